//! Byte encoding for cached entities.

use bytes::Bytes;
use clientele_core::ClienteleResult;
use serde::{de::DeserializeOwned, Serialize};

/// Converts an entity to and from the bytes kept in the cache.
pub trait EntityCodec<T>: Send + Sync {
    /// Serializes the entity.
    fn encode(&self, entity: &T) -> ClienteleResult<Bytes>;

    /// Deserializes the entity.
    fn decode(&self, bytes: &[u8]) -> ClienteleResult<T>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> EntityCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, entity: &T) -> ClienteleResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(entity)?))
    }

    fn decode(&self, bytes: &[u8]) -> ClienteleResult<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::{Customer, CustomerId};

    #[test]
    fn test_json_codec_round_trip() {
        let customer = Customer {
            id: CustomerId::new(),
            name: "Amanda".to_string(),
            city: "Campinas".to_string(),
        };

        let bytes = EntityCodec::<Customer>::encode(&JsonCodec, &customer).unwrap();
        let decoded: Customer = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, customer);
    }

    #[test]
    fn test_json_codec_rejects_garbage() {
        let result: ClienteleResult<Customer> = JsonCodec.decode(b"{not json");
        assert!(result.is_err());
    }
}
