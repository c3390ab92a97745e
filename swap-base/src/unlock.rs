//! Text codec for unlock keys.
//!
//! An unlock key is a 64-byte ed25519 signature over an order address,
//! carried around as a base-58 string. Decoding is a validation predicate,
//! not an exceptional path: UI code polls it on every keystroke, so
//! malformed input yields `None` rather than an error. No cryptographic
//! verification happens here.

/// Raw size of an unlock key.
pub const UNLOCK_KEY_LEN: usize = 64;

/// Encodes a raw unlock signature as a base-58 string.
pub fn encode_unlock_key(signature: &[u8; UNLOCK_KEY_LEN]) -> String {
    bs58::encode(signature).into_string()
}

/// Decodes a base-58 unlock key. Returns `None` for malformed base-58 input
/// or for any decoded length other than exactly 64 bytes.
pub fn decode_unlock_key(value: &str) -> Option<[u8; UNLOCK_KEY_LEN]> {
    let bytes = bs58::decode(value).into_vec().ok()?;
    <[u8; UNLOCK_KEY_LEN]>::try_from(bytes.as_slice()).ok()
}

/// True iff `value` parses as an unlock key.
pub fn is_unlock_key(value: &str) -> bool {
    decode_unlock_key(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_any_signature() {
        let mut signature = [0u8; UNLOCK_KEY_LEN];
        for (i, byte) in signature.iter_mut().enumerate() {
            *byte = (i * 7 % 251) as u8;
        }
        let encoded = encode_unlock_key(&signature);
        assert_eq!(decode_unlock_key(&encoded), Some(signature));

        let zeros = [0u8; UNLOCK_KEY_LEN];
        assert_eq!(decode_unlock_key(&encode_unlock_key(&zeros)), Some(zeros));
    }

    #[test]
    fn rejects_wrong_lengths() {
        // 32 bytes of valid base-58 is well-formed but not an unlock key
        let short = bs58::encode([7u8; 32]).into_string();
        assert_eq!(decode_unlock_key(&short), None);

        let long = bs58::encode([7u8; 65]).into_string();
        assert_eq!(decode_unlock_key(&long), None);

        assert_eq!(decode_unlock_key(""), None);
    }

    #[test]
    fn rejects_non_base58_input() {
        assert!(!is_unlock_key("not base58: 0OIl"));
        assert!(!is_unlock_key("!!!!"));
        assert!(is_unlock_key(&encode_unlock_key(&[1u8; UNLOCK_KEY_LEN])));
    }
}
