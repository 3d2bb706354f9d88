use sha3::{Digest, Keccak256};

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid length: expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },
    #[error("log data truncated at word {0}")]
    Truncated(usize),
    #[error("missing indexed topic {0}")]
    MissingTopic(usize),
    #[error("value does not fit target type")]
    Overflow,
    #[error("array lengths do not match")]
    ArityMismatch,
    #[error("unknown event kind {0}")]
    UnknownEvent(String),
    #[error("unknown source kind {0}")]
    UnknownSourceKind(String),
}

/// Topic hash for an event signature, `0x`-prefixed, as expected by the
/// node's log filter.
pub fn event_topic(signature: &str) -> String {
    let digest = Keccak256::digest(signature.as_bytes());
    format!("0x{}", hex::encode(digest))
}

pub fn strip_hex(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Parse a hex quantity like `0x1a2b` as returned by JSON-RPC.
pub fn parse_hex_u64(s: &str) -> Result<u64, DecodeError> {
    let s = strip_hex(s);
    u64::from_str_radix(s, 16).map_err(|_| DecodeError::Overflow)
}

const WORD: usize = 32;

/// Word-level reader over a log's `data` payload. Every static field is one
/// 32-byte word; dynamic arrays are referenced by a byte offset into the
/// same payload, where the first word at the offset is the element count.
pub struct AbiData {
    bytes: Vec<u8>,
}

impl AbiData {
    pub fn parse(data: &str) -> Result<AbiData, DecodeError> {
        let bytes = hex::decode(strip_hex(data))?;
        Ok(AbiData { bytes })
    }

    fn word(&self, index: usize) -> Result<&[u8], DecodeError> {
        let start = index * WORD;
        let end = start + WORD;
        if end > self.bytes.len() {
            return Err(DecodeError::Truncated(index));
        }
        Ok(&self.bytes[start..end])
    }

    pub fn uint(&self, index: usize) -> Result<u128, DecodeError> {
        uint_from_word(self.word(index)?)
    }

    pub fn uint64(&self, index: usize) -> Result<u64, DecodeError> {
        u64::try_from(self.uint(index)?).map_err(|_| DecodeError::Overflow)
    }

    pub fn bytes32(&self, index: usize) -> Result<[u8; 32], DecodeError> {
        let word = self.word(index)?;
        word.try_into().map_err(|_| DecodeError::Truncated(index))
    }

    /// A `uint256[]` field: the word at `index` is a byte offset to the
    /// array's length word, followed by that many element words.
    pub fn uint_array(&self, index: usize) -> Result<Vec<u128>, DecodeError> {
        let offset = usize::try_from(self.uint(index)?).map_err(|_| DecodeError::Overflow)?;
        if offset % WORD != 0 {
            return Err(DecodeError::Truncated(index));
        }
        let head = offset / WORD;
        let len = usize::try_from(self.uint(head)?).map_err(|_| DecodeError::Overflow)?;
        (0..len).map(|i| self.uint(head + 1 + i)).collect()
    }
}

fn uint_from_word(word: &[u8]) -> Result<u128, DecodeError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(DecodeError::Overflow);
    }
    let tail: [u8; 16] = word[16..].try_into().map_err(|_| DecodeError::Overflow)?;
    Ok(u128::from_be_bytes(tail))
}
