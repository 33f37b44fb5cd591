//! Resolves a `RequestDescriptor` against a scheme and host.
//!
//! # Design
//! Host and path are percent-encoded separately, each with its own allowed
//! set, then composed and handed to `url::Url` for validation. Anything the
//! parser rejects, or that would silently change meaning (a path without a
//! leading slash would be glued onto the host, a `.` or `..` segment would
//! be resolved away), fails with `InvalidUrl`
//! carrying the inputs as given. Query items are appended form-encoded in
//! the parameter map's iteration order.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::descriptor::RequestDescriptor;
use crate::error::NetworkingError;
use crate::http::TransportRequest;

/// Characters escaped in the path component. `/` and sub-delimiters pass
/// through so already-structured paths keep their shape.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters escaped in the host component. `:` and brackets are allowed
/// so ports and IPv6 literals survive.
const HOST: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Build the transport request for `descriptor` under `scheme://host`.
///
/// Never performs I/O and never panics; every failure is `InvalidUrl`.
pub fn build(
    scheme: &str,
    host: &str,
    descriptor: &RequestDescriptor,
) -> Result<TransportRequest, NetworkingError> {
    let invalid = || NetworkingError::InvalidUrl {
        scheme: scheme.to_string(),
        host: host.to_string(),
        path: descriptor.path().to_string(),
    };

    let path = descriptor.path();
    let unanchored = !path.is_empty() && !path.starts_with('/');
    if host.is_empty() || unanchored || has_dot_segment(path) {
        tracing::warn!(scheme, host, path, "cannot compose URL");
        return Err(invalid());
    }

    let composed = format!(
        "{scheme}://{}{}",
        utf8_percent_encode(host, HOST),
        utf8_percent_encode(path, PATH)
    );

    let mut url = match Url::parse(&composed) {
        Ok(url) if url.has_host() => url,
        Ok(_) => {
            tracing::warn!(scheme, host, path, "composed URL has no host");
            return Err(invalid());
        }
        Err(error) => {
            tracing::warn!(scheme, host, path, %error, "cannot compose URL");
            return Err(invalid());
        }
    };

    if let Some(parameters) = descriptor.parameters().filter(|p| !p.is_empty()) {
        url.query_pairs_mut().extend_pairs(parameters.iter());
    }

    let request = TransportRequest {
        url,
        method: descriptor.method(),
    };
    tracing::debug!(method = %request.method, url = %request.url, "built transport request");
    Ok(request)
}

/// `Url::parse` collapses these, so the path would not reach the server as given.
fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}
