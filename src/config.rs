//! Configuration for shardkey
//!
//! Decode policy with sensible defaults. Encoding is not configurable: the
//! wire format is fixed.

/// Decode-time policy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Format Configuration
    // -------------------------------------------------------------------------
    /// Whether the origin-prefixed legacy layout is accepted on decode
    pub legacy_format: LegacyFormat,

    // -------------------------------------------------------------------------
    // Validation Configuration
    // -------------------------------------------------------------------------
    /// Accept bytes left over after the last component
    pub allow_trailing_bytes: bool,
}

/// Handling of the legacy (origin-prefixed, metadata-free) layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyFormat {
    /// Only the canonical metadata layout decodes
    #[default]
    Reject,

    /// Fall back to the legacy layout when the first byte is not a canonical
    /// control byte, optionally requiring a specific origin character
    Accept { expected_origin: Option<u8> },
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Accept the legacy layout from any origin
    pub fn accept_legacy(mut self) -> Self {
        self.config.legacy_format = LegacyFormat::Accept {
            expected_origin: None,
        };
        self
    }

    /// Accept the legacy layout only from `origin`
    pub fn legacy_origin(mut self, origin: u8) -> Self {
        self.config.legacy_format = LegacyFormat::Accept {
            expected_origin: Some(origin),
        };
        self
    }

    /// Set the legacy format policy directly
    pub fn legacy_format(mut self, format: LegacyFormat) -> Self {
        self.config.legacy_format = format;
        self
    }

    /// Allow (and ignore) bytes after the last component
    pub fn allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.config.allow_trailing_bytes = allow;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
