//! Metadata Codec
//!
//! Packs the type tags of a key's components into a 24-bit word and keeps only
//! the significant leading bytes.
//!
//! ## Layout
//! ```text
//!  23      18 17      12 11       6 5        0
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │  tag 1   │  tag 2   │  tag 3   │  tag 4   │
//! └──────────┴──────────┴──────────┴──────────┘
//!  byte 0 ────────┘ byte 1 ─────┘ byte 2 ────┘
//!
//! arity 1 → 1 byte, arity 2 → 2 bytes, arity 3 and 4 → 3 bytes
//! ```
//!
//! Unused trailing slots are packed as `Undefined` (0). With 3 bytes, a
//! non-zero fourth slot means arity 4.

use std::fmt;

use crate::error::{Result, ShardKeyError};
use crate::types::KeyDataType;

/// Most components a key can have
pub const MAX_ARITY: usize = 4;

/// Most metadata bytes a key can carry
pub const MAX_METADATA_LEN: usize = 3;

const TAG_BITS: u32 = 6;
const TAG_MASK: u32 = 0x3F;
const WORD_BITS: u32 = 24;

/// Packed component type tags, as stored on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Metadata {
    bytes: [u8; MAX_METADATA_LEN],
    len: u8,
}

/// Serialized metadata length for a key of `arity` components
pub fn metadata_len(arity: usize) -> usize {
    arity.min(MAX_METADATA_LEN)
}

fn field_shift(index: usize) -> u32 {
    WORD_BITS - TAG_BITS * (index as u32 + 1)
}

fn field(word: u32, index: usize) -> u8 {
    ((word >> field_shift(index)) & TAG_MASK) as u8
}

/// Left-align up to 3 bytes into the 24-bit word
fn word_from(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(MAX_METADATA_LEN)
        .enumerate()
        .fold(0u32, |word, (i, b)| word | (u32::from(*b) << (16 - 8 * i as u32)))
}

impl Metadata {
    /// Pack 1..=4 tags
    ///
    /// Fails with `UnsupportedType` naming the first `Undefined` component.
    pub fn pack(types: &[KeyDataType]) -> Result<Self> {
        if types.is_empty() || types.len() > MAX_ARITY {
            return Err(ShardKeyError::InvalidValue(format!(
                "key arity must be 1..={}, got {}",
                MAX_ARITY,
                types.len()
            )));
        }
        if let Some(pos) = types.iter().position(|t| !t.is_defined()) {
            return Err(ShardKeyError::UnsupportedType {
                component: pos + 1,
                type_name: KeyDataType::Undefined.name(),
            });
        }

        let word = types
            .iter()
            .enumerate()
            .fold(0u32, |word, (i, t)| word | (u32::from(t.code()) << field_shift(i)));

        let len = metadata_len(types.len());
        let full = word.to_be_bytes();
        let mut bytes = [0u8; MAX_METADATA_LEN];
        bytes[..len].copy_from_slice(&full[1..1 + len]);
        Ok(Metadata {
            bytes,
            len: len as u8,
        })
    }

    /// Wrap raw metadata bytes read off the wire
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() || raw.len() > MAX_METADATA_LEN {
            return Err(ShardKeyError::MetadataLength {
                expected: MAX_METADATA_LEN,
                found: raw.len(),
            });
        }
        let mut bytes = [0u8; MAX_METADATA_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Metadata {
            bytes,
            len: raw.len() as u8,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The 24-bit packed word (missing bytes read as zero)
    pub fn word(&self) -> u32 {
        word_from(self.as_bytes())
    }

    /// Arity implied by the metadata alone
    pub fn arity(&self) -> usize {
        match self.len {
            1 => 1,
            2 => 2,
            _ if field(self.word(), 3) != 0 => 4,
            _ => 3,
        }
    }

    /// Unpack the first `arity` tags
    ///
    /// Unknown codes fail with `UnknownTypeTag`, `Undefined` inside the arity
    /// with `UnsupportedType`.
    pub fn unpack(&self, arity: usize) -> Result<Vec<KeyDataType>> {
        if arity == 0 || arity > MAX_ARITY {
            return Err(ShardKeyError::InvalidValue(format!(
                "key arity must be 1..={}, got {}",
                MAX_ARITY, arity
            )));
        }
        let word = self.word();
        (0..arity)
            .map(|i| {
                let code = field(word, i);
                match KeyDataType::from_code(code) {
                    Some(KeyDataType::Undefined) => Err(ShardKeyError::UnsupportedType {
                        component: i + 1,
                        type_name: KeyDataType::Undefined.name(),
                    }),
                    Some(tag) => Ok(tag),
                    None => Err(ShardKeyError::UnknownTypeTag(code)),
                }
            })
            .collect()
    }

    /// Unpack using the inferred arity
    pub fn types(&self) -> Result<Vec<KeyDataType>> {
        self.unpack(self.arity())
    }

    /// Check saved metadata against what the reader expects
    ///
    /// Any difference is reported for the first differing component with the
    /// expected type named.
    pub fn validate(saved: &[u8], expected: &Metadata) -> Result<()> {
        if saved == expected.as_bytes() {
            return Ok(());
        }
        if saved.len() > MAX_METADATA_LEN {
            return Err(ShardKeyError::MetadataLength {
                expected: expected.len(),
                found: saved.len(),
            });
        }

        let saved_word = word_from(saved);
        let expected_word = expected.word();
        for index in 0..MAX_ARITY {
            let found = field(saved_word, index);
            let wanted = field(expected_word, index);
            if found != wanted {
                tracing::debug!(
                    component = index + 1,
                    expected = wanted,
                    found,
                    "metadata mismatch"
                );
                return Err(ShardKeyError::MetadataMismatch {
                    component: index + 1,
                    expected: KeyDataType::from_code(wanted).unwrap_or(KeyDataType::Undefined),
                    found: KeyDataType::from_code(found).unwrap_or(KeyDataType::Undefined),
                });
            }
        }

        Err(ShardKeyError::MetadataLength {
            expected: expected.len(),
            found: saved.len(),
        })
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = match self.types() {
            Ok(types) => types.iter().map(|t| t.name().to_string()).collect(),
            Err(_) => vec!["?".to_string()],
        };
        write!(f, "Metadata({:02x?} = [{}])", self.as_bytes(), tags.join(", "))
    }
}
