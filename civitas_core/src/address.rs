use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use derive_more::{AsRef, Deref, From};

use super::{strip_hex, DecodeError};

/// A 20-byte contract or account address, hex-encoded on the wire.
#[derive(
    Clone,
    Copy,
    Deref,
    AsRef,
    From,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    serde_with::DeserializeFromStr,
    serde_with::SerializeDisplay,
)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_slice(bytes: &[u8]) -> Result<Address, DecodeError> {
        let inner = bytes.try_into().map_err(|_| DecodeError::Length {
            expected: 20,
            got: bytes.len(),
        })?;
        Ok(Address(inner))
    }

    /// Extract an address from an indexed topic word, which left-pads the
    /// 20 bytes to 32.
    pub fn from_topic(topic: &str) -> Result<Address, DecodeError> {
        let bytes = hex::decode(strip_hex(topic))?;
        if bytes.len() != 32 {
            return Err(DecodeError::Length {
                expected: 32,
                got: bytes.len(),
            });
        }
        Address::from_slice(&bytes[12..])
    }
}

impl FromStr for Address {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 20];
        hex::decode_to_slice(strip_hex(s), &mut out)?;
        Ok(Address(out))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Address").field(&hex::encode(self.0)).finish()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A 32-byte transaction hash.
#[derive(
    Clone,
    Copy,
    Deref,
    AsRef,
    From,
    Eq,
    PartialEq,
    Hash,
    serde_with::DeserializeFromStr,
    serde_with::SerializeDisplay,
)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub fn from_slice(bytes: &[u8]) -> Result<TxHash, DecodeError> {
        let inner = bytes.try_into().map_err(|_| DecodeError::Length {
            expected: 32,
            got: bytes.len(),
        })?;
        Ok(TxHash(inner))
    }
}

impl FromStr for TxHash {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(strip_hex(s), &mut out)?;
        Ok(TxHash(out))
    }
}

impl Debug for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TxHash").field(&hex::encode(self.0)).finish()
    }
}

impl Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A donation receipt identifier, a contract-assigned bytes32.
#[derive(
    Clone,
    Copy,
    Deref,
    AsRef,
    From,
    Eq,
    PartialEq,
    Hash,
    serde_with::DeserializeFromStr,
    serde_with::SerializeDisplay,
)]
pub struct Receipt([u8; 32]);

impl FromStr for Receipt {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(strip_hex(s), &mut out)?;
        Ok(Receipt(out))
    }
}

impl Debug for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Receipt").field(&hex::encode(self.0)).finish()
    }
}

impl Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
