//! Keeps spread parity consistent across fullscreen changes.

use log::debug;

use crate::Navigator;

/// What a fullscreen notification meant for the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenChange {
    /// The viewer container became the fullscreen element
    Entered,
    /// The viewer container stopped being the fullscreen element
    Exited,
    /// The notification concerned some other element
    Ignored,
}

/// Platform call the host should make for a fullscreen toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenRequest {
    Enter,
    Exit,
}

/// Tracks whether the viewer container is fullscreen.
///
/// Notifications carry the id of the element that is fullscreen after the
/// change (or `None`). Only changes involving the viewer's own container
/// are acted on.
#[derive(Clone, Debug)]
pub struct FullscreenSync {
    container_id: String,
    active: bool,
}

impl FullscreenSync {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            active: false,
        }
    }

    /// Id of the element this synchronizer is scoped to.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Whether the container is currently fullscreen.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Which platform call a toggle should make.
    pub fn toggle_request(&self) -> FullscreenRequest {
        if self.active {
            FullscreenRequest::Exit
        } else {
            FullscreenRequest::Enter
        }
    }

    /// Handle a fullscreen-change notification.
    ///
    /// On enter, spread mode is realigned to an even index; the mode itself
    /// is never changed. On exit the index is left alone. The caller
    /// re-renders for `Entered` and `Exited`.
    pub fn on_change(&mut self, fullscreen_element: Option<&str>, nav: &mut Navigator) -> FullscreenChange {
        if fullscreen_element == Some(self.container_id.as_str()) {
            self.active = true;
            let realigned = nav.align_spread();
            debug!(
                "fullscreen: entered mode={:?} index={} realigned={realigned}",
                nav.mode(),
                nav.index()
            );
            FullscreenChange::Entered
        } else if self.active {
            self.active = false;
            debug!("fullscreen: exited index={}", nav.index());
            FullscreenChange::Exited
        } else {
            debug!("fullscreen: ignoring change for {fullscreen_element:?}");
            FullscreenChange::Ignored
        }
    }
}
