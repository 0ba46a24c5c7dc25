//! Share-token text transforms.
//!
//! A serialized project state travels inside a URL fragment, so it is first
//! zlib-compressed and then encoded with URL-safe unpadded base64. Both
//! transforms are deterministic, making identical projects produce identical
//! tokens.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::core::error::DecodeError;

/// Compress UTF-8 text and encode it as URL-safe base64.
pub fn compress_to_token(text: &str) -> String {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    // Writing into a Vec cannot fail
    let _ = encoder.write_all(text.as_bytes());
    let compressed = encoder.finish().unwrap_or_default();
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decode a URL-safe base64 token and decompress it back to text.
pub fn decompress_from_token(token: &str) -> Result<String, DecodeError> {
    let compressed = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| DecodeError::Base64)?;

    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|_| DecodeError::Compression)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let text = r#"{"src/App.vue":"<template>hi</template>"}"#;
        let token = compress_to_token(text);
        assert_eq!(decompress_from_token(&token).unwrap(), text);
    }

    #[test]
    fn test_token_is_url_safe() {
        // Binary-heavy input exercises the full base64 alphabet.
        let text = "\u{00ff}\u{00fe}".repeat(200);
        let token = compress_to_token(&text);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "same input";
        assert_eq!(compress_to_token(text), compress_to_token(text));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            decompress_from_token("not+url/safe=="),
            Err(DecodeError::Base64)
        ));
    }

    #[test]
    fn test_invalid_zlib_rejected() {
        let token = URL_SAFE_NO_PAD.encode(b"not zlib data");
        assert!(matches!(
            decompress_from_token(&token),
            Err(DecodeError::Compression)
        ));
    }
}
