//! # shardkey
//!
//! Shard-aware compound record keys with a compact, self-describing wire form:
//! - One to four typed identifier components plus a 16-bit shard id
//! - Packed type metadata so a reader can reject keys of the wrong shape
//! - Raw bytes, a checksummed URL-safe string, and a UTF8-safe envelope
//! - Type-erased reconstruction for diagnostics
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │      RecordKey / ChildKey / GrandchildKey / GreatGrandchild  │
//! │                    (CompoundKey trait)                       │
//! └──────────┬──────────────────────┬───────────────────────────┘
//!            │                      │
//!            ▼                      ▼
//!   ┌─────────────────┐    ┌─────────────────┐     ┌─────────────┐
//!   │  Frame / Legacy │    │   Value Codec   │◄────│  GhostKey   │
//!   │ (ctrl + shard)  │    │ (KeyComponent)  │     │ (KeyValue)  │
//!   └────────┬────────┘    └────────┬────────┘     └──────┬──────┘
//!            │                      │                     │
//!            ▼                      ▼                     │
//!   ┌─────────────────┐    ┌─────────────────┐            │
//!   │    Transport    │    │    Metadata     │◄───────────┘
//!   │ (base64 / UTF8) │    │  (6-bit tags)   │
//!   └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use shardkey::{ChildKey, CompoundKey};
//!
//! let key = ChildKey::new(7, 42i32, "x".to_string())?;
//! let bytes = key.to_bytes()?;
//! assert_eq!(ChildKey::<i32, String>::from_bytes(&bytes)?, key);
//!
//! let ghost = shardkey::ghost::reconstruct(&bytes).unwrap();
//! assert_eq!(ghost.to_string(), "shard 7: 42, \"x\"");
//! # Ok::<(), shardkey::ShardKeyError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod types;
pub mod codec;
pub mod metadata;
pub mod frame;
pub mod legacy;
pub mod transport;
pub mod key;
pub mod ghost;
pub mod grouping;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, ShardKeyError};
pub use config::{Config, ConfigBuilder, LegacyFormat};
pub use types::{tag_of, KeyDataType};
pub use codec::{Decimal, KeyComponent, KeyEnum, KeyValue};
pub use metadata::Metadata;
pub use key::{ChildKey, CompoundKey, GrandchildKey, GreatGrandchildKey, RecordKey};
pub use ghost::{GhostComponent, GhostKey};
pub use grouping::KeyedRecord;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of shardkey
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
