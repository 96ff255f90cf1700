//! Configuration options for decoding.
//!
//! Encoding has no tunable behavior; the wire format has exactly one
//! rendering. Decoding accepts untrusted text, so the only knob is the
//! nesting-depth limit that bounds recursion on hostile payloads.
//!
//! ## Examples
//!
//! ```rust
//! use serde_php::{from_str_with_options, PhpOptions};
//!
//! let options = PhpOptions::new().with_max_depth(8);
//! let value: Vec<Vec<i64>> = from_str_with_options("a:1:{i:0;a:1:{i:0;i:7;}}", options)?;
//! assert_eq!(value, vec![vec![7]]);
//! # Ok::<(), serde_php::Error>(())
//! ```

/// Nesting depth accepted by default while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decoding options.
///
/// # Examples
///
/// ```rust
/// use serde_php::PhpOptions;
///
/// let options = PhpOptions::new().with_max_depth(32);
/// assert_eq!(options.max_depth, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhpOptions {
    /// Maximum aggregate nesting depth accepted while decoding.
    ///
    /// Each open array or object counts one level. Exceeding the limit fails
    /// with [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded).
    pub max_depth: usize,
}

impl Default for PhpOptions {
    fn default() -> Self {
        PhpOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PhpOptions {
    /// Creates options with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
