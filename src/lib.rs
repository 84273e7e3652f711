//! # flipbook-core-view
//!
//! Core navigation and page-flip library for paginated image readers.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Navigating an ordered page list in single-page or two-page spread layout
//! - Describing what to draw for the current position
//! - Sequencing animated page transitions with at most one in flight
//! - Keeping spread parity consistent across fullscreen changes
//! - Mounting the viewer into a browser page (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`ViewerConfig`] from TOML
//! - `json` - Load page lists from a JSON manifest
//! - `web` - Enable web/WASM DOM mounting support
//!
//! ## Example
//!
//! ```rust,ignore
//! use flipbook_core_view::{PageList, Viewer, ViewerConfig, ViewerEvent};
//!
//! let pages = PageList::new(["/p/001.png", "/p/002.png", "/p/003.png"]);
//! let mut viewer = Viewer::new(pages, ViewerConfig::default());
//! viewer.mount(&mut surface);
//!
//! // A click on "next" starts the spread flip
//! viewer.handle(ViewerEvent::Next, &mut surface, now_ms);
//!
//! // Arm a timer for each pending task and tick when it fires
//! if let Some(task) = viewer.pending_task() {
//!     schedule(task.due_ms());
//! }
//! viewer.tick(&mut surface, now_ms);
//! ```

mod config;
mod data;
mod fullscreen;
mod input;
mod loader;
mod navigator;
pub mod render;
pub mod timer;
mod transition;
mod viewer;

#[cfg(feature = "web")]
pub mod web;

pub use config::{ControlIds, KeyboardNavigation, ModeLabels, PhaseTimings, ViewerConfig};
pub use data::{PageList, PageRef};
pub use fullscreen::{FullscreenChange, FullscreenRequest, FullscreenSync};
pub use input::{parse_page_number, Key, ViewerEvent};
pub use loader::{load_page_list, page_list_from_refs, LoadError, PageSource};
pub use navigator::{Direction, LayoutMode, Navigator, ViewState};
pub use render::{render_view, PlacedPage, RenderResult, Slot, SlotPosition};
pub use timer::{CancellationToken, ScheduledTask};
pub use transition::{
    AnimationError, RequestOutcome, SingleTransition, SpreadTransition, TickOutcome, TransitionController, TransitionCue,
    TransitionPhase, TransitionStyle, TwoPhase, ViewerSurface,
};
pub use viewer::{Viewer, ViewerOutcome};

#[cfg(feature = "json")]
pub use loader::PageManifest;

#[cfg(feature = "web")]
pub use loader::window_pages;
