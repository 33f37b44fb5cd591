//! Versioned Pinball Map client.

use netkit_core::{Client, NetworkingError, RequestDescriptor, Transport, TransportRequest};
use serde::de::DeserializeOwned;

use crate::config::{ConfigError, PinballMapConfig};

/// A `Client` bound to the Pinball Map host that rewrites every descriptor
/// path to `/api/v{version}/{path}.json` before it is built.
#[derive(Debug, Clone)]
pub struct PinballMapApi {
    client: Client,
    version: u32,
}

impl PinballMapApi {
    pub fn new(config: &PinballMapConfig, transport: impl Transport) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder(config.host.clone(), transport)
            .scheme(config.scheme.clone())
            .build();
        Ok(Self {
            client,
            version: config.version,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn versioned(&self, descriptor: &RequestDescriptor) -> RequestDescriptor {
        RequestDescriptor::new(
            format!("/api/v{}/{}.json", self.version, descriptor.path()),
            descriptor.parameters().cloned(),
            descriptor.method(),
        )
    }

    pub fn build_request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<TransportRequest, NetworkingError> {
        self.client.build_request(&self.versioned(descriptor))
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, NetworkingError> {
        self.client.fetch(&self.versioned(descriptor)).await
    }

    pub fn get<T, F>(&self, descriptor: &RequestDescriptor, completion: F)
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, NetworkingError>) + Send + 'static,
    {
        self.client.get(&self.versioned(descriptor), completion);
    }
}
