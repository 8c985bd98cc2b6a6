//! ASCII version codes
//!
//! Section versions are four ASCII digits packed like tags: the raw u32's
//! big-endian bytes spell the number (`0x30303332` is `"0032"`).

/// Decode a raw version code, or `None` if it is not four ASCII digits.
#[must_use]
pub fn decode_version(raw: u32) -> Option<u32> {
    raw.to_be_bytes().iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

/// Encode a version number (0-9999) as a raw version code.
#[cfg(test)]
pub(crate) fn encode_version(version: u32) -> u32 {
    let digits = format!("{:04}", version % 10_000);
    let bytes = digits.as_bytes();
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_version() {
        assert_eq!(decode_version(0x30303332), Some(32));
        assert_eq!(decode_version(u32::from_le_bytes(*b"4400")), Some(44));
        assert_eq!(decode_version(0x30303030), Some(0));
        assert_eq!(decode_version(0x0000_0020), None);
    }

    #[test]
    fn test_encode_version() {
        assert_eq!(encode_version(32), 0x30303332);
        assert_eq!(decode_version(encode_version(1234)), Some(1234));
    }
}
