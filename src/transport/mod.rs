//! Transport Module
//!
//! Text-safe wrappings of raw key bytes. Both are exact inverses of their
//! encoders and are applied before / after the key codec, never during.
//!
//! ## External string
//! ```text
//! base64url( raw bytes ‖ crc32(raw bytes) as u32 LE )      (no padding)
//! ```
//!
//! ## UTF8 envelope
//! ```text
//! byte < 0x80   → itself
//! byte >= 0x80  → 110000xx 10xxxxxx   (the byte as U+0080..U+00FF)
//! ```

mod external;
mod utf8;

pub use external::{serialize_from_external_string, serialize_to_external_string};
pub use utf8::{decode_utf8, encode_to_utf8};
