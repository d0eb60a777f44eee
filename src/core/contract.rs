use std::fmt;

use super::constants::{ABI_WORD_SIZE, MINT_SELECTOR, TOTAL_SUPPLY_SELECTOR};

#[derive(Debug, Clone, PartialEq)]
pub enum ContractError {
    InvalidHex(String),
    InvalidLength(usize),
    Overflow,
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::InvalidHex(msg) => write!(f, "Invalid hex data: {}", msg),
            ContractError::InvalidLength(len) => write!(f, "Expected a {}-byte word, got {} bytes", ABI_WORD_SIZE, len),
            ContractError::Overflow => write!(f, "Value does not fit in 64 bits"),
        }
    }
}

/// `0x`-prefixed call data for `totalSupply()`
pub fn total_supply_call_data() -> String {
    format!("0x{}", hex::encode(TOTAL_SUPPLY_SELECTOR))
}

/// `0x`-prefixed call data for `mint()`
pub fn mint_call_data() -> String {
    format!("0x{}", hex::encode(MINT_SELECTOR))
}

/// Decode the single uint256 word returned by `eth_call`
pub fn decode_uint_word(data: &str) -> Result<u64, ContractError> {
    let bytes = hex::decode(data.trim_start_matches("0x"))
        .map_err(|e| ContractError::InvalidHex(e.to_string()))?;

    if bytes.len() != ABI_WORD_SIZE {
        return Err(ContractError::InvalidLength(bytes.len()));
    }

    let (high, low) = bytes.split_at(ABI_WORD_SIZE - 8);
    if high.iter().any(|b| *b != 0) {
        return Err(ContractError::Overflow);
    }

    let mut word = [0u8; 8];
    word.copy_from_slice(low);
    Ok(u64::from_be_bytes(word))
}

/// Parse a JSON-RPC quantity such as `0x1b4`
pub fn parse_quantity(quantity: &str) -> Result<u64, ContractError> {
    let digits = quantity.trim_start_matches("0x");
    if digits.is_empty() {
        return Err(ContractError::InvalidHex(format!("empty quantity {:?}", quantity)));
    }
    u64::from_str_radix(digits, 16).map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow => ContractError::Overflow,
        _ => ContractError::InvalidHex(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_data() {
        assert_eq!(total_supply_call_data(), "0x18160ddd");
        assert_eq!(mint_call_data(), "0x1249c58b");
    }

    #[test]
    fn test_decode_uint_word() {
        let forty_two = format!("0x{}2a", "0".repeat(62));
        assert_eq!(decode_uint_word(&forty_two), Ok(42));
        assert_eq!(decode_uint_word(&format!("0x{}", "0".repeat(64))), Ok(0));
    }

    #[test]
    fn test_decode_rejects_bad_words() {
        assert_eq!(decode_uint_word("0x"), Err(ContractError::InvalidLength(0)));
        assert!(matches!(decode_uint_word("0xzz"), Err(ContractError::InvalidHex(_))));

        let huge = format!("0x01{}", "0".repeat(62));
        assert_eq!(decode_uint_word(&huge), Err(ContractError::Overflow));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x1b4"), Ok(436));
        assert_eq!(parse_quantity("0x0"), Ok(0));
        assert!(parse_quantity("0x").is_err());
        assert_eq!(parse_quantity("0x1ffffffffffffffff"), Err(ContractError::Overflow));
    }
}
