use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 20-byte account address.
/// Display format: Bech32m with "agora" human-readable prefix.
///
/// The all-zero address is a sentinel meaning "no address"; it is never a
/// valid candidate or payout recipient.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);
    pub const LEN: usize = 20;

    /// Bech32m human-readable prefix
    pub const BECH32_HRP: &'static str = "agora";

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Create from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() != Self::LEN {
            return Err(TypesError::InvalidAddressLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Check if this is the zero-address sentinel
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    /// Convert to hex string without 0x prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Encode as Bech32m with "agora" prefix
        let hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
        match bech32::encode::<bech32::Bech32m>(hrp, &self.0) {
            Ok(encoded) => write!(f, "{}", encoded),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Support both Bech32m ("agora1...") and hex ("0x...")
        if s.starts_with("agora1") {
            let (hrp, data) =
                bech32::decode(s).map_err(|e| TypesError::Bech32Error(e.to_string()))?;

            let expected_hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
            if hrp != expected_hrp {
                return Err(TypesError::InvalidAddressFormat(format!(
                    "Invalid HRP: expected '{}', got '{}'",
                    Self::BECH32_HRP,
                    hrp
                )));
            }

            let data_len = data.len();
            let bytes: [u8; 20] = data
                .try_into()
                .map_err(|_| TypesError::InvalidAddressLength(data_len))?;

            Ok(Self::from_bytes(bytes))
        } else if s.starts_with("0x") || s.starts_with("0X") {
            let bytes =
                hex::decode(&s[2..]).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
            Self::from_slice(&bytes)
        } else {
            Err(TypesError::InvalidAddressFormat(format!(
                "Expected 'agora1...' or '0x...', got '{}'",
                s
            )))
        }
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_bytes([1u8; 20]).is_zero());
    }

    #[test]
    fn test_display_roundtrip() {
        let addr = Address::from_bytes([7u8; 20]);
        let encoded = addr.to_string();
        assert!(encoded.starts_with("agora1"));
        assert_eq!(encoded.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_hex_roundtrip() {
        let addr = Address::from_bytes([0xabu8; 20]);
        let hex = format!("{:x}", addr);
        assert_eq!(hex.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_from_slice_wrong_length() {
        assert_eq!(
            Address::from_slice(&[0u8; 19]),
            Err(TypesError::InvalidAddressLength(19))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("not-an-address".parse::<Address>().is_err());
        assert!("agora1qqqq".parse::<Address>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let addr = Address::from_bytes([3u8; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert!(json.starts_with("\"agora1"));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_serde_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Address::from_bytes([9u8; 20]), 3u64);
        let json = serde_json::to_string(&map).unwrap();
        let back: HashMap<Address, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
