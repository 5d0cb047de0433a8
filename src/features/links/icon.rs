//! Icon class normalization for links.
//!
//! Editors paste either a bare Font Awesome class list (`fab fa-github`) or
//! the snippet copied from the icon gallery (`<i class="fab fa-github"></i>`).
//! Only the class list is stored.

use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::DEFAULT_ICON_CLASS;

lazy_static! {
    /// A single `<i class="..."></i>` element and nothing else; the class
    /// value may not contain markup
    static ref ICON_TAG_REGEX: Regex =
        Regex::new(r#"^\s*<i\s+class\s*=\s*"([^"<>]*)"\s*>\s*</i>\s*$"#).unwrap();
}

/// Normalize user-supplied icon markup to a class token list.
///
/// Blank input (or a tag with a blank class attribute) yields
/// [`DEFAULT_ICON_CLASS`]. Anything that is not exactly one `<i>` element is
/// returned trimmed. The result is a fixed point: normalizing it again
/// returns it unchanged.
pub fn normalize_icon_class(input: Option<&str>) -> String {
    let trimmed = input.map(str::trim).unwrap_or_default();

    let classes = match ICON_TAG_REGEX.captures(trimmed) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str().trim()),
        None => trimmed,
    };

    if classes.is_empty() {
        DEFAULT_ICON_CLASS.to_string()
    } else {
        classes.to_string()
    }
}
