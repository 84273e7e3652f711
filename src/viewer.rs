//! The viewer component: wires navigation, rendering, transitions and
//! fullscreen handling behind a single event entry point.

use log::debug;

use crate::fullscreen::{FullscreenChange, FullscreenRequest, FullscreenSync};
use crate::timer::ScheduledTask;
use crate::transition::{RequestOutcome, TickOutcome, TransitionController, TransitionPhase, TransitionStyle, ViewerSurface};
use crate::{
    parse_page_number, render_view, Direction, Key, KeyboardNavigation, Navigator, PageList, RenderResult, ViewState,
    ViewerConfig, ViewerEvent,
};

/// What handling an event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerOutcome {
    /// Nothing changed
    Ignored,
    /// State changed and the surface was re-rendered
    Rendered,
    /// An animated move was requested
    Transition(RequestOutcome),
    /// The host should make this fullscreen platform call
    Fullscreen(FullscreenRequest),
}

/// Paginated page-image viewer.
///
/// Owns the view state for one mount. The host feeds it events and
/// timer ticks; the viewer draws through a [`ViewerSurface`].
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::{
///     AnimationError, PageList, RenderResult, TransitionCue, Viewer, ViewerConfig, ViewerEvent, ViewerSurface,
/// };
///
/// struct Headless;
///
/// impl ViewerSurface for Headless {
///     fn present(&mut self, _view: &RenderResult) {}
///     fn begin_exit(&mut self, _cue: &TransitionCue) -> Result<(), AnimationError> { Ok(()) }
///     fn begin_enter(&mut self, _cue: &TransitionCue) -> Result<(), AnimationError> { Ok(()) }
///     fn settle(&mut self, _cue: &TransitionCue) {}
/// }
///
/// let pages = PageList::new(["1.png", "2.png", "3.png", "4.png"]);
/// let mut viewer = Viewer::new(pages, ViewerConfig::default());
/// let mut surface = Headless;
/// viewer.mount(&mut surface);
///
/// viewer.handle(ViewerEvent::Next, &mut surface, 0);
/// assert!(viewer.state().animating);
///
/// // Drive the timers: exit phase, then enter phase
/// while let Some(due) = viewer.pending_task().map(|t| t.due_ms()) {
///     viewer.tick(&mut surface, due);
/// }
/// assert_eq!(viewer.state().index, 2);
/// assert!(!viewer.state().animating);
/// ```
#[derive(Debug)]
pub struct Viewer {
    pages: PageList,
    nav: Navigator,
    transitions: TransitionController,
    fullscreen: FullscreenSync,
    config: ViewerConfig,
}

impl Viewer {
    /// Create a viewer on the first page in the configured initial mode.
    pub fn new(pages: PageList, config: ViewerConfig) -> Self {
        let nav = Navigator::new(pages.len(), config.initial_mode);
        let fullscreen = FullscreenSync::new(config.controls.reader.clone());
        Self {
            pages,
            nav,
            transitions: TransitionController::new(),
            fullscreen,
            config,
        }
    }

    pub fn pages(&self) -> &PageList {
        &self.pages
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Snapshot of index, mode and animation flag.
    pub fn state(&self) -> ViewState {
        self.nav.state(self.transitions.is_animating())
    }

    /// Phase of the transition state machine.
    pub fn phase(&self) -> TransitionPhase {
        self.transitions.phase()
    }

    /// Whether the viewer container is currently fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    /// Toggle button text for the current mode.
    pub fn mode_label(&self) -> &str {
        self.config.labels.label_for(self.nav.mode())
    }

    /// Render the current state.
    pub fn render(&self) -> RenderResult {
        render_view(&self.pages, &self.state())
    }

    /// Timer the host should arm, if a transition is in flight.
    pub fn pending_task(&self) -> Option<&ScheduledTask> {
        self.transitions.pending_task()
    }

    /// Initial render.
    pub fn mount<S: ViewerSurface>(&self, surface: &mut S) {
        debug!(
            "viewer: mounted pages={} mode={:?}",
            self.pages.len(),
            self.nav.mode()
        );
        surface.present(&self.render());
    }

    fn present<S: ViewerSurface>(&self, surface: &mut S) -> ViewerOutcome {
        surface.present(&self.render());
        ViewerOutcome::Rendered
    }

    /// Handle one input or platform event.
    pub fn handle<S: ViewerSurface>(&mut self, event: ViewerEvent, surface: &mut S, now_ms: u64) -> ViewerOutcome {
        match event {
            ViewerEvent::Prev => self.step(Direction::Prev, surface, now_ms),
            ViewerEvent::Next => self.step(Direction::Next, surface, now_ms),
            ViewerEvent::PageInput(text) => self.jump(&text, surface),
            ViewerEvent::ToggleMode => {
                let mode = self.nav.toggle_mode();
                debug!("viewer: mode toggled to {mode:?} index={}", self.nav.index());
                self.present(surface)
            }
            ViewerEvent::ToggleFullscreen => ViewerOutcome::Fullscreen(self.fullscreen.toggle_request()),
            ViewerEvent::Key(key) => self.key(key, surface, now_ms),
            ViewerEvent::FullscreenChanged(element) => {
                match self.fullscreen.on_change(element.as_deref(), &mut self.nav) {
                    FullscreenChange::Ignored => ViewerOutcome::Ignored,
                    FullscreenChange::Entered | FullscreenChange::Exited => self.present(surface),
                }
            }
        }
    }

    /// Run the transition phase that is due at `now_ms`, if any.
    pub fn tick<S: ViewerSurface>(&mut self, surface: &mut S, now_ms: u64) -> TickOutcome {
        self.transitions.tick(&mut self.nav, &self.pages, surface, now_ms)
    }

    fn step<S: ViewerSurface>(&mut self, direction: Direction, surface: &mut S, now_ms: u64) -> ViewerOutcome {
        let style = TransitionStyle::for_mode(self.nav.mode(), &self.config);
        let outcome = self
            .transitions
            .request(style, direction, &mut self.nav, &self.pages, surface, now_ms);
        ViewerOutcome::Transition(outcome)
    }

    fn jump<S: ViewerSurface>(&mut self, text: &str, surface: &mut S) -> ViewerOutcome {
        let last_page = i64::try_from(self.pages.len().max(1)).unwrap_or(i64::MAX);
        let page = parse_page_number(text).clamp(1, last_page);
        let index = self.nav.set_index(page);
        debug!("viewer: jumped to page={page} index={index}");
        self.present(surface)
    }

    fn key<S: ViewerSurface>(&mut self, key: Key, surface: &mut S, now_ms: u64) -> ViewerOutcome {
        let Some(direction) = key.direction() else {
            return ViewerOutcome::Ignored;
        };
        match self.config.keyboard {
            KeyboardNavigation::Animated => self.step(direction, surface, now_ms),
            KeyboardNavigation::Immediate => {
                if self.transitions.is_animating() {
                    debug!("viewer: key {key:?} dropped, transition in flight");
                    return ViewerOutcome::Ignored;
                }
                match self.nav.advance(direction) {
                    Some(index) => {
                        debug!("viewer: key {key:?} moved to index={index}");
                        self.present(surface)
                    }
                    None => ViewerOutcome::Ignored,
                }
            }
        }
    }
}
