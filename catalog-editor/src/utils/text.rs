//! Display text helpers

use std::borrow::Cow;

pub const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_chars` characters, appending an ellipsis when
/// anything was dropped.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS)),
    }
}
