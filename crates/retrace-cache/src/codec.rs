//! Blob codec for the persisted record set.
//!
//! Encoding is JSON serialization, gzip compression, then base64; decoding
//! runs the same steps in reverse. The resulting string is embedded as the
//! single opaque payload field of the saved state envelope.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use retrace_types::IdentityRecord;

use crate::error::CacheError;

/// Encode a record set into a base64 string of gzipped JSON.
pub fn encode_records(records: &[IdentityRecord]) -> Result<String, CacheError> {
    let json = serde_json::to_vec(records)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

/// Decode a blob produced by [`encode_records`].
///
/// Order matters: base64-decode, gunzip, then JSON-deserialize. Any step
/// failing yields a [`CacheError`]; the store maps that to "no prior cache".
pub fn decode_records(blob: &str) -> Result<Vec<IdentityRecord>, CacheError> {
    let compressed = STANDARD
        .decode(blob)
        .map_err(|e| CacheError::Decode(format!("base64: {e}")))?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(|e| CacheError::Decode(format!("gzip: {e}")))?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use retrace_types::StableId;

    use super::*;

    fn sample_records() -> Vec<IdentityRecord> {
        let mut first = IdentityRecord::new(StableId(42), "Foo Bar", "Gilgamesh");
        let _ = first.aliases.upsert("Baz Qux", "Excalibur");
        let second = IdentityRecord::new(StableId(7), "Old Name", "Adamantoise");
        vec![first, second]
    }

    #[test]
    fn round_trip_preserves_records_and_order() {
        let records = sample_records();
        let blob = encode_records(&records).unwrap();
        let back = decode_records(&blob).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn empty_record_set_round_trips() {
        let blob = encode_records(&[]).unwrap();
        assert!(decode_records(&blob).unwrap().is_empty());
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let result = decode_records("not!!valid@@base64");
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn valid_base64_invalid_gzip_is_a_decode_error() {
        let blob = STANDARD.encode(b"plainly not gzip");
        let result = decode_records(&blob);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn gzipped_non_json_is_a_serde_error() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"definitely not json").unwrap();
        let blob = STANDARD.encode(encoder.finish().unwrap());
        let result = decode_records(&blob);
        assert!(matches!(result, Err(CacheError::Serde(_))));
    }
}
