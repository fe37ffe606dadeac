//!
//! Text formatting helpers for log lines and error messages.
//!

/// Render bytes as a `0x`-prefixed lowercase hex string.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Ellipsize a string in the middle when it exceeds `threshold` characters.
#[must_use]
pub fn ellipsize_middle(s: &str, threshold: usize, head: usize, tail: usize) -> String {
    let len = s.chars().count();

    // Only shorten when strictly longer than threshold and there is room.
    if len > threshold && head + 1 + tail < len {
        let prefix: String = s.chars().take(head).collect();
        let suffix: String = s.chars().skip(len - tail).collect();

        format!("{prefix}…{suffix}")
    } else {
        s.to_string()
    }
}

///
/// TESTS
///
