//! Viewer configuration.

use crate::LayoutMode;

/// Fixed durations of the two transition phases, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTimings {
    pub exit_ms: u32,
    pub enter_ms: u32,
}

impl PhaseTimings {
    pub const fn new(exit_ms: u32, enter_ms: u32) -> Self {
        Self { exit_ms, enter_ms }
    }
}

/// How arrow keys move between pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeyboardNavigation {
    /// Jump straight to the target page without animating
    #[default]
    Immediate,
    /// Go through the same animated transition as the prev/next buttons
    Animated,
}

/// Text shown on the mode toggle button for the current mode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModeLabels {
    pub single: String,
    pub spread: String,
}

impl Default for ModeLabels {
    fn default() -> Self {
        Self {
            single: "Нэг хуудас".to_string(),
            spread: "Хоёр хуудас".to_string(),
        }
    }
}

impl ModeLabels {
    /// Label for the given mode.
    pub fn label_for(&self, mode: LayoutMode) -> &str {
        match mode {
            LayoutMode::Single => &self.single,
            LayoutMode::Spread => &self.spread,
        }
    }
}

/// DOM element ids of the viewer container and its controls.
///
/// Every control is optional on the page; a missing id only disables
/// that control.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlIds {
    pub reader: String,
    pub page_num: String,
    pub page_input: String,
    pub page_of: String,
    pub prev: String,
    pub next: String,
    pub toggle_mode: String,
    pub fullscreen: String,
}

impl Default for ControlIds {
    fn default() -> Self {
        Self {
            reader: "reader".to_string(),
            page_num: "pageNum".to_string(),
            page_input: "pageInput".to_string(),
            page_of: "pageOf".to_string(),
            prev: "prev".to_string(),
            next: "next".to_string(),
            toggle_mode: "toggleSingle".to_string(),
            fullscreen: "fullscreenBtn".to_string(),
        }
    }
}

/// Complete viewer configuration.
///
/// All fields are optional when deserialized; missing ones take their
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// Layout used when the viewer mounts
    pub initial_mode: LayoutMode,
    /// Arrow key behaviour
    pub keyboard: KeyboardNavigation,
    /// Fade/slide timings for single mode
    pub single: PhaseTimings,
    /// Page-flip timings for spread mode
    pub spread: PhaseTimings,
    /// CSS easing used by the spread flip
    pub spread_easing: String,
    pub labels: ModeLabels,
    pub controls: ControlIds,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_mode: LayoutMode::Spread,
            keyboard: KeyboardNavigation::Immediate,
            single: PhaseTimings::new(420, 420),
            spread: PhaseTimings::new(520, 20),
            spread_easing: "cubic-bezier(.2,.8,.2,1)".to_string(),
            labels: ModeLabels::default(),
            controls: ControlIds::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a TOML string into a `ViewerConfig`.
    ///
    /// ```toml
    /// initial_mode = "single"
    /// keyboard = "animated"
    ///
    /// [single]
    /// exit_ms = 300
    /// enter_ms = 300
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
