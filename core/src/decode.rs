//! JSON response decoding.
//!
//! # Design
//! `JsonDecoder` turns a `RawExchange` into `Result<T, NetworkingError>`
//! with a fixed precedence: a transport error wins over any bytes, then a
//! missing or empty body is `NoData`, then the bytes are parsed. A decoder
//! may rewrite object keys before the model sees them (`KeyStrategy`);
//! models that need something else implement `Deserialize` themselves.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::NetworkingError;
use crate::http::RawExchange;

/// How object keys on the wire are rewritten before decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Keys are used as they appear.
    #[default]
    UseDefaultKeys,
    /// `full_name` becomes `fullName`. Leading and trailing underscores are
    /// kept.
    ConvertFromSnakeCase,
    /// `fullName` becomes `full_name`, `userID` becomes `user_id`.
    ConvertToSnakeCase,
}

#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    key_strategy: KeyStrategy,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_strategy(key_strategy: KeyStrategy) -> Self {
        Self { key_strategy }
    }

    /// Decoder for APIs whose snake_case keys map onto camelCase models.
    pub fn snake_case() -> Self {
        Self::with_key_strategy(KeyStrategy::ConvertFromSnakeCase)
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        self.key_strategy
    }

    /// Decode `bytes` as `T`, applying the key strategy.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, serde_json::Error> {
        let rewrite: fn(&str) -> String = match self.key_strategy {
            KeyStrategy::UseDefaultKeys => return serde_json::from_slice(bytes),
            KeyStrategy::ConvertFromSnakeCase => snake_to_camel,
            KeyStrategy::ConvertToSnakeCase => camel_to_snake,
        };
        let value: Value = serde_json::from_slice(bytes)?;
        T::deserialize(rewrite_keys(value, rewrite))
    }

    /// Classify one exchange.
    pub fn decode_response<T: DeserializeOwned>(
        &self,
        exchange: RawExchange,
    ) -> Result<T, NetworkingError> {
        if let Some(error) = exchange.error {
            tracing::debug!(%error, "transport reported an error");
            return Err(NetworkingError::request(error));
        }
        let body = match exchange.body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(NetworkingError::NoData),
        };
        self.decode(&body).map_err(|error| {
            tracing::debug!(%error, status = ?exchange.status, "response did not decode");
            NetworkingError::request(error)
        })
    }
}

fn rewrite_keys(value: Value, rewrite: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (rewrite(&k), rewrite_keys(v, rewrite)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| rewrite_keys(v, rewrite)).collect())
        }
        other => other,
    }
}

fn snake_to_camel(key: &str) -> String {
    let start = key.len() - key.trim_start_matches('_').len();
    let end = key.trim_end_matches('_').len().max(start);
    let core = &key[start..end];
    if !core.contains('_') {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..start]);
    for (i, word) in core.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out.push_str(&key[end..]);
    out
}

fn camel_to_snake(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Model {
        id: i64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[allow(non_snake_case)]
    struct Camel {
        fullName: String,
        authenticationToken: String,
    }

    #[test]
    fn snake_to_camel_follows_word_boundaries() {
        assert_eq!(snake_to_camel("full_name"), "fullName");
        assert_eq!(snake_to_camel("user_ID"), "userId");
        assert_eq!(snake_to_camel("id"), "id");
        assert_eq!(snake_to_camel("_private_key_"), "_privateKey_");
        assert_eq!(snake_to_camel("a__b"), "aB");
        assert_eq!(snake_to_camel("__"), "__");
    }

    #[test]
    fn camel_to_snake_splits_acronyms() {
        assert_eq!(camel_to_snake("fullName"), "full_name");
        assert_eq!(camel_to_snake("userID"), "user_id");
        assert_eq!(camel_to_snake("myURLProperty"), "my_url_property");
        assert_eq!(camel_to_snake("id"), "id");
    }

    #[test]
    fn snake_case_decoder_rewrites_nested_keys() {
        let decoder = JsonDecoder::snake_case();
        let body = br#"[{"full_name":"Portland","authentication_token":"t"}]"#;
        let decoded: Vec<Camel> = decoder.decode(body).unwrap();
        assert_eq!(decoded[0].fullName, "Portland");
        assert_eq!(decoded[0].authenticationToken, "t");
    }

    #[test]
    fn default_decoder_leaves_keys_alone() {
        let decoder = JsonDecoder::new();
        let result: Result<Camel, _> = decoder.decode(br#"{"full_name":"x","authentication_token":"t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn transport_error_wins_over_body() {
        let exchange = RawExchange::failed(TransportError::message("offline")).with_body(r#"{"id":1}"#);
        let err = JsonDecoder::new().decode_response::<Model>(exchange).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn missing_body_is_no_data() {
        let err = JsonDecoder::new()
            .decode_response::<Model>(RawExchange::empty())
            .unwrap_err();
        assert!(matches!(err, NetworkingError::NoData));
    }

    #[test]
    fn empty_body_is_no_data() {
        let exchange = RawExchange::success(Vec::new());
        let err = JsonDecoder::new().decode_response::<Model>(exchange).unwrap_err();
        assert!(matches!(err, NetworkingError::NoData));
    }

    #[test]
    fn bad_json_is_request_error() {
        let exchange = RawExchange::success("not json");
        let err = JsonDecoder::new().decode_response::<Model>(exchange).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn valid_body_decodes() {
        let exchange = RawExchange::success(r#"{"id":123}"#);
        let model: Model = JsonDecoder::new().decode_response(exchange).unwrap();
        assert_eq!(model, Model { id: 123 });
    }
}
