//! Structured text (tagged-tree) form of problems.
//!
//! The format is consumed by kernel caches as a lookup key, so the writer
//! builds it by hand to keep it byte-for-byte stable:
//!
//! ```text
//! <P>
//!  <TC t="0" n="2" st0="1" sz0="4" st1="4" sz1="8" />
//!  ...
//! </P>
//! ```

use alloc::format;
use alloc::string::String;

#[cfg(feature = "std")]
mod reader;

#[cfg(feature = "std")]
pub use reader::parse_problem;

/// Indentation prefix for a nesting level, one space per level.
pub fn indent(level: usize) -> String {
    " ".repeat(level)
}

/// Appends ` name="value"` to an element being written.
pub(crate) fn push_attr(state: &mut String, name: &str, value: impl core::fmt::Display) {
    state.push_str(&format!(" {name}=\"{value}\""));
}

/// Replaces every non-alphanumeric character with `_`.
///
/// Applied to device names so they are safe in attributes and file names.
pub fn make_name_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
