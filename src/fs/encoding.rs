// src/fs/encoding.rs

//! Text encoding helpers shared by temp files and captured process output.

/// Decode bytes as UTF-8, falling back to Latin-1 when they are not valid
/// UTF-8.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback never fails.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Encode text for writing to disk.
///
/// Rust strings are always valid UTF-8, so there is no Latin-1 fallback on
/// this side.
pub fn encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}
