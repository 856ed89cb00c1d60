//! Codec Test Suite
//!
//! Value encodings, metadata packing and the transport wrappings, exercised
//! through the public API only.
//!
//! ```bash
//! cargo test --test codec_tests
//! ```

mod value_tests;
