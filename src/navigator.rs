//! Page index state and the navigation rules that guard it.

/// Page layout mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LayoutMode {
    /// One page at a time
    Single,
    /// Two pages side by side, left slot conventionally even-indexed
    #[default]
    Spread,
}

impl LayoutMode {
    /// Number of pages a prev/next move covers in this mode.
    #[inline]
    pub fn step(self) -> usize {
        match self {
            LayoutMode::Single => 1,
            LayoutMode::Spread => 2,
        }
    }

    /// The other mode.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Single => LayoutMode::Spread,
            LayoutMode::Spread => LayoutMode::Single,
        }
    }
}

/// Direction of a stepping move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Lowercase name, used for CSS class suffixes and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Prev => "prev",
            Direction::Next => "next",
        }
    }
}

/// Snapshot of the viewer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Zero-based index of the page in the first slot
    pub index: usize,
    /// Current layout mode
    pub mode: LayoutMode,
    /// True while a transition is between its exit and enter phases
    pub animating: bool,
}

/// Owner of the page index and layout mode.
///
/// Every index write in the crate goes through one of `advance`,
/// `set_index`, `toggle_mode` or `align_spread`, so the index can never
/// leave `[0, max(0, N - 1)]`.
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::{Direction, LayoutMode, Navigator};
///
/// let mut nav = Navigator::new(5, LayoutMode::Spread);
/// assert_eq!(nav.advance(Direction::Next), Some(2));
/// assert_eq!(nav.advance(Direction::Next), Some(4));
///
/// // 4 + 2 is past the last page
/// assert!(!nav.can_advance(Direction::Next));
/// assert_eq!(nav.advance(Direction::Next), None);
/// assert_eq!(nav.index(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Navigator {
    page_count: usize,
    index: usize,
    mode: LayoutMode,
}

impl Navigator {
    /// Create a navigator positioned on the first page.
    pub fn new(page_count: usize, mode: LayoutMode) -> Self {
        Self {
            page_count,
            index: 0,
            mode,
        }
    }

    /// Total number of pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current zero-based index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current layout mode.
    #[inline]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Step size for the current mode.
    #[inline]
    pub fn step(&self) -> usize {
        self.mode.step()
    }

    /// Snapshot the state, tagging it with the caller's animation flag.
    pub fn state(&self, animating: bool) -> ViewState {
        ViewState {
            index: self.index,
            mode: self.mode,
            animating,
        }
    }

    /// Constrain any integer into the valid index range.
    pub fn clamp(&self, i: i64) -> usize {
        let last = self.page_count.saturating_sub(1);
        let last = i64::try_from(last).unwrap_or(i64::MAX);
        i.clamp(0, last) as usize
    }

    /// Check whether a move in `direction` lands on an existing page.
    pub fn can_advance(&self, direction: Direction) -> bool {
        let step = self.step();
        match direction {
            Direction::Next => self.index + step < self.page_count,
            Direction::Prev => self.index >= step,
        }
    }

    /// Move one step in `direction`.
    ///
    /// Returns the new index, or `None` (leaving the index untouched) when
    /// `can_advance(direction)` does not hold.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        if !self.can_advance(direction) {
            return None;
        }
        let step = self.step() as i64;
        let raw = match direction {
            Direction::Next => self.index as i64 + step,
            Direction::Prev => self.index as i64 - step,
        };
        self.index = self.clamp(raw);
        Some(self.index)
    }

    /// Jump to a one-based page number. Out-of-range input is clamped.
    pub fn set_index(&mut self, page_number: i64) -> usize {
        self.index = self.clamp(page_number.saturating_sub(1));
        self.index
    }

    /// Flip between single and spread layout, returning the new mode.
    pub fn toggle_mode(&mut self) -> LayoutMode {
        self.mode = self.mode.toggled();
        if self.mode == LayoutMode::Spread {
            self.index -= self.index % 2;
        }
        self.mode
    }

    /// In spread mode, move the index down to even parity.
    ///
    /// Returns true if the index changed.
    pub fn align_spread(&mut self) -> bool {
        if self.mode != LayoutMode::Spread || self.index % 2 == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}
