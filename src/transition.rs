//! Animated page transitions.
//!
//! A transition moves the viewer one step in a direction in three stages:
//! the displayed slots animate out, the index is advanced exactly once,
//! then the freshly rendered slots animate in. The controller is driven by
//! `tick()` calls at the due times of its [`ScheduledTask`]s and accepts
//! at most one transition at a time.

use log::{debug, warn};

use crate::timer::ScheduledTask;
use crate::{render_view, Direction, LayoutMode, Navigator, PageList, PhaseTimings, RenderResult, ViewerConfig};

/// Two-phase timing contract shared by every transition style.
pub trait TwoPhase {
    /// Duration of the exit animation, before the index changes.
    fn exit_ms(&self) -> u32;
    /// Duration of the enter animation, after the index changes.
    fn enter_ms(&self) -> u32;
}

/// Single-element fade/slide used in single mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleTransition {
    pub timings: PhaseTimings,
}

impl SingleTransition {
    /// Class added to the incoming page element.
    pub const ENTER_CLASS: &'static str = "single-in";

    /// Class added to the outgoing page element.
    pub fn exit_class(direction: Direction) -> &'static str {
        match direction {
            Direction::Next => "single-out-next",
            Direction::Prev => "single-out-prev",
        }
    }
}

impl TwoPhase for SingleTransition {
    fn exit_ms(&self) -> u32 {
        self.timings.exit_ms
    }

    fn enter_ms(&self) -> u32 {
        self.timings.enter_ms
    }
}

/// Dual-element 3-D page flip used in spread mode.
///
/// During the exit phase the left page rotates away while the right page
/// rotates into place; the enter phase only lets the new spread settle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpreadTransition {
    pub timings: PhaseTimings,
    /// CSS easing function for both elements
    pub easing: String,
}

impl SpreadTransition {
    pub const OUTGOING_ORIGIN: &'static str = "left center";
    pub const INCOMING_ORIGIN: &'static str = "right center";
    pub const OUTGOING_TRANSFORM: &'static str = "rotateY(-120deg) translateZ(-280px)";
    pub const INCOMING_START_TRANSFORM: &'static str = "rotateY(90deg) translateZ(-200px)";
    pub const INCOMING_END_TRANSFORM: &'static str = "rotateY(0deg) translateZ(0)";

    /// CSS `transition` value for both flipping elements.
    pub fn css_transition(&self) -> String {
        let ms = self.timings.exit_ms;
        format!(
            "transform {ms}ms {easing}, opacity {ms}ms {easing}",
            easing = self.easing
        )
    }
}

impl TwoPhase for SpreadTransition {
    fn exit_ms(&self) -> u32 {
        self.timings.exit_ms
    }

    fn enter_ms(&self) -> u32 {
        self.timings.enter_ms
    }
}

/// Visual strategy of a transition, picked from the layout mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionStyle {
    Single(SingleTransition),
    Spread(SpreadTransition),
}

impl TransitionStyle {
    /// Style for moves made in `mode`.
    pub fn for_mode(mode: LayoutMode, config: &ViewerConfig) -> Self {
        match mode {
            LayoutMode::Single => TransitionStyle::Single(SingleTransition {
                timings: config.single,
            }),
            LayoutMode::Spread => TransitionStyle::Spread(SpreadTransition {
                timings: config.spread,
                easing: config.spread_easing.clone(),
            }),
        }
    }
}

impl TwoPhase for TransitionStyle {
    fn exit_ms(&self) -> u32 {
        match self {
            TransitionStyle::Single(t) => t.exit_ms(),
            TransitionStyle::Spread(t) => t.exit_ms(),
        }
    }

    fn enter_ms(&self) -> u32 {
        match self {
            TransitionStyle::Single(t) => t.enter_ms(),
            TransitionStyle::Spread(t) => t.enter_ms(),
        }
    }
}

/// Everything a surface needs to animate one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionCue {
    pub direction: Direction,
    pub style: TransitionStyle,
}

/// Error raised by a surface when a visual step cannot run.
///
/// The controller never propagates it; a failed step turns the transition
/// into an instant jump.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("no element to animate: {0}")]
    MissingElement(&'static str),
    #[error("animation step failed: {0}")]
    Platform(String),
}

/// Rendering surface the viewer draws on and animates.
pub trait ViewerSurface {
    /// Replace the displayed slots and control state.
    fn present(&mut self, view: &RenderResult);

    /// Start animating the currently displayed slots out.
    fn begin_exit(&mut self, cue: &TransitionCue) -> Result<(), AnimationError>;

    /// Start animating freshly presented slots in.
    fn begin_enter(&mut self, cue: &TransitionCue) -> Result<(), AnimationError>;

    /// Remove any animation leftovers once a transition is over.
    fn settle(&mut self, cue: &TransitionCue);
}

/// Current phase of the transition state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Exiting,
    Entering,
}

/// Result of a transition request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Exit phase started; the index changes when it is due
    Started,
    /// Another transition is in flight; request dropped
    Busy,
    /// No page in that direction; request dropped
    Blocked,
    /// The exit animation failed, so the move was applied immediately
    Jumped,
}

/// Result of a `tick()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing in flight
    Idle,
    /// In flight, but the current phase is not due yet
    Pending,
    /// Exit phase finished; the index was advanced and the enter phase began
    Mutated,
    /// The transition finished and the controller is idle again
    Settled,
}

#[derive(Debug)]
struct InFlight {
    cue: TransitionCue,
    phase: TransitionPhase,
    task: ScheduledTask,
}

/// Serializes animated prev/next moves.
///
/// Holding the in-flight transition in an `Option` makes it the single
/// owner of the "animating" state: a request is only accepted when the slot
/// is empty, and later requests are dropped rather than queued.
#[derive(Debug, Default)]
pub struct TransitionController {
    in_flight: Option<InFlight>,
    next_task_id: u64,
}

impl TransitionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> TransitionPhase {
        self.in_flight
            .as_ref()
            .map_or(TransitionPhase::Idle, |flight| flight.phase)
    }

    /// True between the start of the exit phase and the end of the enter phase.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The task the host should arm a timer for, if any.
    pub fn pending_task(&self) -> Option<&ScheduledTask> {
        self.in_flight.as_ref().map(|flight| &flight.task)
    }

    /// Cue of the transition in flight.
    pub fn cue(&self) -> Option<&TransitionCue> {
        self.in_flight.as_ref().map(|flight| &flight.cue)
    }

    fn schedule(&mut self, now_ms: u64, delay_ms: u32) -> ScheduledTask {
        self.next_task_id += 1;
        ScheduledTask::new(self.next_task_id, now_ms, delay_ms)
    }

    /// Request an animated move in `direction`.
    pub fn request<S: ViewerSurface>(
        &mut self,
        style: TransitionStyle,
        direction: Direction,
        nav: &mut Navigator,
        pages: &PageList,
        surface: &mut S,
        now_ms: u64,
    ) -> RequestOutcome {
        if self.in_flight.is_some() {
            debug!("transition: {} dropped, another transition in flight", direction.as_str());
            return RequestOutcome::Busy;
        }
        if !nav.can_advance(direction) {
            debug!(
                "transition: {} blocked at index={} mode={:?} pages={}",
                direction.as_str(),
                nav.index(),
                nav.mode(),
                nav.page_count()
            );
            return RequestOutcome::Blocked;
        }

        let cue = TransitionCue { direction, style };
        if let Err(err) = surface.begin_exit(&cue) {
            warn!("transition: exit animation failed ({err}), jumping without animation");
            nav.advance(direction);
            surface.settle(&cue);
            surface.present(&render_view(pages, &nav.state(false)));
            return RequestOutcome::Jumped;
        }

        let task = self.schedule(now_ms, cue.style.exit_ms());
        debug!(
            "transition: {} exiting from index={} due_ms={}",
            direction.as_str(),
            nav.index(),
            task.due_ms()
        );
        self.in_flight = Some(InFlight {
            cue,
            phase: TransitionPhase::Exiting,
            task,
        });
        RequestOutcome::Started
    }

    /// Advance the state machine to `now_ms`.
    ///
    /// Runs at most one phase boundary per call; the enter phase is timed
    /// from the moment the index changed.
    pub fn tick<S: ViewerSurface>(
        &mut self,
        nav: &mut Navigator,
        pages: &PageList,
        surface: &mut S,
        now_ms: u64,
    ) -> TickOutcome {
        let Some(flight) = self.in_flight.take() else {
            return TickOutcome::Idle;
        };
        if !flight.task.is_due(now_ms) {
            self.in_flight = Some(flight);
            return TickOutcome::Pending;
        }

        match flight.phase {
            TransitionPhase::Exiting => {
                let cue = flight.cue;
                match nav.advance(cue.direction) {
                    Some(index) => debug!("transition: {} mutated index={index}", cue.direction.as_str()),
                    None => debug!(
                        "transition: {} no longer possible at index={}, keeping position",
                        cue.direction.as_str(),
                        nav.index()
                    ),
                }
                surface.present(&render_view(pages, &nav.state(true)));

                if let Err(err) = surface.begin_enter(&cue) {
                    warn!("transition: enter animation failed ({err}), settling immediately");
                    surface.settle(&cue);
                    return TickOutcome::Settled;
                }

                let task = self.schedule(now_ms, cue.style.enter_ms());
                self.in_flight = Some(InFlight {
                    cue,
                    phase: TransitionPhase::Entering,
                    task,
                });
                TickOutcome::Mutated
            }
            TransitionPhase::Entering => {
                surface.settle(&flight.cue);
                debug!("transition: {} settled at index={}", flight.cue.direction.as_str(), nav.index());
                TickOutcome::Settled
            }
            TransitionPhase::Idle => TickOutcome::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        presented: Vec<RenderResult>,
        steps: Vec<&'static str>,
        fail_exit: bool,
        fail_enter: bool,
    }

    impl ViewerSurface for Recorder {
        fn present(&mut self, view: &RenderResult) {
            self.steps.push("present");
            self.presented.push(view.clone());
        }

        fn begin_exit(&mut self, _cue: &TransitionCue) -> Result<(), AnimationError> {
            self.steps.push("exit");
            if self.fail_exit {
                return Err(AnimationError::MissingElement(".page"));
            }
            Ok(())
        }

        fn begin_enter(&mut self, _cue: &TransitionCue) -> Result<(), AnimationError> {
            self.steps.push("enter");
            if self.fail_enter {
                return Err(AnimationError::Platform("boom".into()));
            }
            Ok(())
        }

        fn settle(&mut self, _cue: &TransitionCue) {
            self.steps.push("settle");
        }
    }

    fn single_style() -> TransitionStyle {
        TransitionStyle::for_mode(LayoutMode::Single, &ViewerConfig::default())
    }

    fn setup(pages: usize) -> (TransitionController, Navigator, PageList, Recorder) {
        let list: PageList = (0..pages).map(|i| format!("{i}.png")).collect();
        (
            TransitionController::new(),
            Navigator::new(pages, LayoutMode::Single),
            list,
            Recorder::default(),
        )
    }

    #[test]
    fn test_full_cycle() {
        let (mut ctrl, mut nav, pages, mut surface) = setup(3);

        let outcome = ctrl.request(single_style(), Direction::Next, &mut nav, &pages, &mut surface, 0);
        assert_eq!(outcome, RequestOutcome::Started);
        assert_eq!(ctrl.phase(), TransitionPhase::Exiting);
        assert_eq!(ctrl.pending_task().map(|t| t.due_ms()), Some(420));

        // Not due yet: no mutation
        assert_eq!(ctrl.tick(&mut nav, &pages, &mut surface, 419), TickOutcome::Pending);
        assert_eq!(nav.index(), 0);

        assert_eq!(ctrl.tick(&mut nav, &pages, &mut surface, 420), TickOutcome::Mutated);
        assert_eq!(nav.index(), 1);
        assert_eq!(ctrl.phase(), TransitionPhase::Entering);
        assert!(ctrl.is_animating());
        assert_eq!(ctrl.pending_task().map(|t| t.due_ms()), Some(840));

        assert_eq!(ctrl.tick(&mut nav, &pages, &mut surface, 840), TickOutcome::Settled);
        assert_eq!(ctrl.phase(), TransitionPhase::Idle);
        assert!(!ctrl.is_animating());
        assert_eq!(surface.steps, vec!["exit", "present", "enter", "settle"]);
        assert_eq!(surface.presented[0].current_page, 2);
    }

    #[test]
    fn test_second_request_is_dropped() {
        let (mut ctrl, mut nav, pages, mut surface) = setup(5);

        ctrl.request(single_style(), Direction::Next, &mut nav, &pages, &mut surface, 0);
        let outcome = ctrl.request(single_style(), Direction::Next, &mut nav, &pages, &mut surface, 10);
        assert_eq!(outcome, RequestOutcome::Busy);

        ctrl.tick(&mut nav, &pages, &mut surface, 420);
        let outcome = ctrl.request(single_style(), Direction::Prev, &mut nav, &pages, &mut surface, 500);
        assert_eq!(outcome, RequestOutcome::Busy);

        ctrl.tick(&mut nav, &pages, &mut surface, 840);
        assert_eq!(nav.index(), 1);
        assert_eq!(surface.steps.iter().filter(|s| **s == "exit").count(), 1);
    }

    #[test]
    fn test_blocked_at_bounds() {
        let (mut ctrl, mut nav, pages, mut surface) = setup(3);

        let outcome = ctrl.request(single_style(), Direction::Prev, &mut nav, &pages, &mut surface, 0);
        assert_eq!(outcome, RequestOutcome::Blocked);
        assert!(!ctrl.is_animating());
        assert!(surface.steps.is_empty());
    }

    #[test]
    fn test_exit_failure_jumps() {
        let (mut ctrl, mut nav, pages, mut surface) = setup(3);
        surface.fail_exit = true;

        let outcome = ctrl.request(single_style(), Direction::Next, &mut nav, &pages, &mut surface, 0);
        assert_eq!(outcome, RequestOutcome::Jumped);
        assert_eq!(nav.index(), 1);
        assert!(!ctrl.is_animating());
        assert_eq!(surface.presented.last().map(|v| v.current_page), Some(2));
    }

    #[test]
    fn test_enter_failure_settles_with_mutated_index() {
        let (mut ctrl, mut nav, pages, mut surface) = setup(3);
        surface.fail_enter = true;

        ctrl.request(single_style(), Direction::Next, &mut nav, &pages, &mut surface, 0);
        assert_eq!(ctrl.tick(&mut nav, &pages, &mut surface, 420), TickOutcome::Settled);
        assert_eq!(nav.index(), 1);
        assert!(!ctrl.is_animating());
        assert_eq!(surface.steps, vec!["exit", "present", "enter", "settle"]);
    }

    #[test]
    fn test_spread_style_timings() {
        let config = ViewerConfig::default();
        let style = TransitionStyle::for_mode(LayoutMode::Spread, &config);
        assert_eq!(style.exit_ms(), 520);
        assert_eq!(style.enter_ms(), 20);

        let TransitionStyle::Spread(spread) = style else {
            panic!("expected spread style");
        };
        assert_eq!(
            spread.css_transition(),
            "transform 520ms cubic-bezier(.2,.8,.2,1), opacity 520ms cubic-bezier(.2,.8,.2,1)"
        );
    }

    #[test]
    fn test_exit_class() {
        assert_eq!(SingleTransition::exit_class(Direction::Next), "single-out-next");
        assert_eq!(SingleTransition::exit_class(Direction::Prev), "single-out-prev");
    }
}
