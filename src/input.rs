//! Input events understood by the viewer.

use crate::Direction;

/// Keys the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }

    /// Direction of travel for this key, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowLeft => Some(Direction::Prev),
            Key::ArrowRight => Some(Direction::Next),
            Key::Other => None,
        }
    }
}

/// A user or platform event fed into the viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Prev button clicked
    Prev,
    /// Next button clicked
    Next,
    /// Page number field committed with the given raw text
    PageInput(String),
    /// Mode toggle button clicked
    ToggleMode,
    /// Fullscreen button clicked
    ToggleFullscreen,
    /// Key pressed
    Key(Key),
    /// Fullscreen changed; carries the id of the fullscreen element, if any
    FullscreenChanged(Option<String>),
}

/// Parse the page number field leniently.
///
/// Leading whitespace and a sign are accepted and parsing stops at the
/// first non-digit. Text without leading digits, and zero, read as page 1.
///
/// ```rust
/// use flipbook_core_view::parse_page_number;
///
/// assert_eq!(parse_page_number(" 12abc"), 12);
/// assert_eq!(parse_page_number("abc"), 1);
/// assert_eq!(parse_page_number("0"), 1);
/// assert_eq!(parse_page_number("-3"), -3);
/// ```
pub fn parse_page_number(input: &str) -> i64 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return 1;
    }

    let value = rest[..digit_count]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    match (negative, value) {
        (_, 0) => 1,
        (true, v) => -v,
        (false, v) => v,
    }
}
