//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports ergonomic helpers for seed ids, config loading,
//! and the HTTP plumbing every slice mounts into.
//!
//! ## Seed generation
//! Use `safe_nanoid!` for short, unambiguous random strings:
//! ```rust
//! # use shiok_kernel::safe_nanoid;
//! let seed = safe_nanoid!(8);
//! assert_eq!(seed.len(), 8);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use shiok_kernel::config::load_config;
//! let cfg: shiok_kernel::domain::config::ApiConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use nanoid::nanoid;
pub use shiok_domain as domain;

/// Generates an unambiguous `NanoID` (no visually confusing characters).
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
