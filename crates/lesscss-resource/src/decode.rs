//! Charset-aware decoding of stylesheet bytes.

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{ResourceError, ResourceResult};

/// Decode raw stylesheet bytes to text.
///
/// A byte-order mark, when present, determines the encoding and overrides
/// `default_encoding`; the BOM itself is not part of the returned text.
/// Fails when the bytes are malformed for the determined encoding.
pub fn decode_text(
    bytes: &[u8],
    default_encoding: &'static Encoding,
    name: &str,
) -> ResourceResult<String> {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => {
            debug!(resource = name, encoding = encoding.name(), "BOM found");
            encoding
        }
        None => {
            debug!(
                resource = name,
                encoding = default_encoding.name(),
                "using default encoding"
            );
            default_encoding
        }
    };
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ResourceError::Decode {
            name: name.to_string(),
            encoding: encoding.name(),
        });
    }
    Ok(text.into_owned())
}
