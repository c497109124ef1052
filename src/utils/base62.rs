//! Base62 short code encoding.
//!
//! Short codes are the base62 representation of a link's numeric id, using the
//! alphabet `0-9a-zA-Z` in digit-value order. Codes are therefore sequential
//! and carry no padding: `0 -> "0"`, `61 -> "Z"`, `62 -> "10"`.

use crate::error::AppError;
use serde_json::json;

/// Digit symbols in value order 0..61.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Longest possible encoding of a `u64` (62^11 > 2^64).
const MAX_LEN: usize = 11;

/// Encodes a non-negative integer as a base62 string.
///
/// # Examples
///
/// ```
/// use snaplink::utils::base62::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut id: u64) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut buf = [0u8; MAX_LEN];
    let mut pos = MAX_LEN;
    while id > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(id % BASE) as usize];
        id /= BASE;
    }

    buf[pos..].iter().map(|&b| b as char).collect()
}

/// Decodes a base62 string back into the integer it represents.
///
/// Returns `None` for empty input, symbols outside the alphabet, or values
/// that do not fit in a `u64`.
pub fn decode(code: &str) -> Option<u64> {
    if code.is_empty() {
        return None;
    }

    code.bytes().try_fold(0u64, |acc, b| {
        let digit = digit_value(b)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

fn digit_value(b: u8) -> Option<u64> {
    let value = match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'z' => b - b'a' + 10,
        b'A'..=b'Z' => b - b'A' + 36,
        _ => return None,
    };
    Some(u64::from(value))
}

/// Encodes a database-assigned id.
///
/// # Errors
///
/// Returns [`AppError::Internal`] for negative ids, which an auto-increment
/// key never produces.
pub fn encode_id(id: i64) -> Result<String, AppError> {
    u64::try_from(id)
        .map(encode)
        .map_err(|_| AppError::internal("Link id out of range", json!({ "id": id })))
}
