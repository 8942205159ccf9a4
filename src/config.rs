//! Parser limits.
//!
//! The defaults can be overridden through environment variables, read once on first use:
//!
//! | Variable                    | Default   | Description                        |
//! |-----------------------------|-----------|------------------------------------|
//! | `RADIX_JSON_MAX_DEPTH`      | 64        | Maximum nesting of objects/arrays  |
//! | `RADIX_JSON_MAX_INPUT_LEN`  | 1,000,000 | Maximum input size in bytes        |

use std::sync::OnceLock;

/// Default maximum nesting depth. Parsing is recursive, so this bounds stack usage.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum input size in bytes (1MB).
pub const DEFAULT_MAX_INPUT_LEN: usize = 1_000_000;

static MAX_DEPTH_CACHE: OnceLock<usize> = OnceLock::new();
static MAX_INPUT_LEN_CACHE: OnceLock<usize> = OnceLock::new();

/// Limits applied while parsing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// How many objects and arrays may be open at once. The root object counts as one.
    pub max_depth: usize,
    /// Longest accepted input, measured up to the terminating NUL byte if there is one.
    pub max_input_len: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            max_depth: max_depth_from_env(),
            max_input_len: max_input_len_from_env(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn max_depth_from_env() -> usize {
    *MAX_DEPTH_CACHE.get_or_init(|| env_or("RADIX_JSON_MAX_DEPTH", DEFAULT_MAX_DEPTH))
}

fn max_input_len_from_env() -> usize {
    *MAX_INPUT_LEN_CACHE.get_or_init(|| env_or("RADIX_JSON_MAX_INPUT_LEN", DEFAULT_MAX_INPUT_LEN))
}

fn env_or(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, default, "ignoring invalid limit");
            default
        }),
        Err(_) => default,
    }
}
