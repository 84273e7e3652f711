use flipbook_core_view::{
    AnimationError, Key, LayoutMode, PageList, RenderResult, RequestOutcome, TickOutcome, TransitionCue, TransitionPhase,
    Viewer, ViewerConfig, ViewerEvent, ViewerOutcome, ViewerSurface,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Default)]
struct RecordingSurface {
    presented: Vec<RenderResult>,
    exits: usize,
    enters: usize,
    settles: usize,
    fail_enter: bool,
}

impl RecordingSurface {
    fn last(&self) -> &RenderResult {
        self.presented.last().expect("nothing presented")
    }
}

impl ViewerSurface for RecordingSurface {
    fn present(&mut self, view: &RenderResult) {
        self.presented.push(view.clone());
    }

    fn begin_exit(&mut self, _cue: &TransitionCue) -> Result<(), AnimationError> {
        self.exits += 1;
        Ok(())
    }

    fn begin_enter(&mut self, _cue: &TransitionCue) -> Result<(), AnimationError> {
        self.enters += 1;
        if self.fail_enter {
            return Err(AnimationError::MissingElement(".page"));
        }
        Ok(())
    }

    fn settle(&mut self, _cue: &TransitionCue) {
        self.settles += 1;
    }
}

fn pages(n: usize) -> PageList {
    (1..=n).map(|i| format!("/static/uploads/7/{i:03}.png")).collect()
}

fn mounted(n: usize) -> (Viewer, RecordingSurface) {
    let viewer = Viewer::new(pages(n), ViewerConfig::default());
    let mut surface = RecordingSurface::default();
    viewer.mount(&mut surface);
    (viewer, surface)
}

fn run_timers(viewer: &mut Viewer, surface: &mut RecordingSurface) {
    while let Some(due) = viewer.pending_task().map(|t| t.due_ms()) {
        viewer.tick(surface, due);
    }
}

#[test]
fn spread_bounds_on_trailing_page() {
    let (mut viewer, mut surface) = mounted(5);
    viewer.handle(ViewerEvent::Next, &mut surface, 0);
    run_timers(&mut viewer, &mut surface);
    viewer.handle(ViewerEvent::Next, &mut surface, 1_000);
    run_timers(&mut viewer, &mut surface);

    assert_eq!(viewer.state().index, 4);
    let view = surface.last();
    assert!(view.next_disabled);
    assert!(!view.prev_disabled);
    assert_eq!(view.page_label(), "5");
    assert!(view.slots[1].is_empty());

    assert_eq!(
        viewer.handle(ViewerEvent::Next, &mut surface, 2_000),
        ViewerOutcome::Transition(RequestOutcome::Blocked)
    );
    assert_eq!(viewer.state().index, 4);
}

#[test]
fn jump_clamps_to_last_page() {
    let (mut viewer, mut surface) = mounted(10);
    viewer.handle(ViewerEvent::ToggleMode, &mut surface, 0);
    viewer.handle(ViewerEvent::PageInput("15".into()), &mut surface, 0);

    assert_eq!(viewer.state().index, 9);
    assert_eq!(surface.last().page_label(), "10");
    assert_eq!(surface.last().page_of_label(), "/ 10");
}

#[test]
fn fullscreen_enter_realigns_spread() {
    let (mut viewer, mut surface) = mounted(10);
    viewer.handle(ViewerEvent::PageInput("4".into()), &mut surface, 0);
    assert_eq!(viewer.state().index, 3);
    let renders = surface.presented.len();

    let outcome = viewer.handle(ViewerEvent::FullscreenChanged(Some("reader".into())), &mut surface, 0);

    assert_eq!(outcome, ViewerOutcome::Rendered);
    assert_eq!(viewer.state().index, 2);
    assert_eq!(viewer.state().mode, LayoutMode::Spread);
    assert_eq!(surface.presented.len(), renders + 1);
    assert_eq!(surface.last().current_page, 3);
}

#[test]
fn enter_failure_still_settles() {
    let (mut viewer, mut surface) = mounted(6);
    surface.fail_enter = true;

    viewer.handle(ViewerEvent::Next, &mut surface, 0);
    let due = viewer.pending_task().map(|t| t.due_ms()).expect("exit timer");
    assert_eq!(viewer.tick(&mut surface, due), TickOutcome::Settled);

    assert_eq!(viewer.phase(), TransitionPhase::Idle);
    assert!(!viewer.state().animating);
    assert_eq!(viewer.state().index, 2);
    assert_eq!(surface.last().current_page, 3);
    assert_eq!(surface.settles, 1);
}

#[test]
fn second_request_dropped_while_animating() {
    let (mut viewer, mut surface) = mounted(10);

    assert_eq!(
        viewer.handle(ViewerEvent::Next, &mut surface, 0),
        ViewerOutcome::Transition(RequestOutcome::Started)
    );
    assert_eq!(
        viewer.handle(ViewerEvent::Next, &mut surface, 100),
        ViewerOutcome::Transition(RequestOutcome::Busy)
    );
    assert_eq!(
        viewer.handle(ViewerEvent::Key(Key::ArrowRight), &mut surface, 150),
        ViewerOutcome::Ignored
    );
    assert_eq!(surface.exits, 1);

    run_timers(&mut viewer, &mut surface);
    assert_eq!(viewer.state().index, 2);
    assert_eq!(surface.enters, 1);
    assert_eq!(surface.settles, 1);
}

#[test]
fn rendering_is_idempotent() {
    let (viewer, _surface) = mounted(7);
    assert_eq!(viewer.render(), viewer.render());
}

#[derive(Clone, Debug)]
enum Op {
    Prev,
    Next,
    Key(bool),
    Jump(i64),
    Toggle,
    Fullscreen(bool),
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Prev),
        Just(Op::Next),
        any::<bool>().prop_map(Op::Key),
        (-5i64..30).prop_map(Op::Jump),
        Just(Op::Toggle),
        any::<bool>().prop_map(Op::Fullscreen),
        Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn index_stays_in_range(n in 0usize..12, ops in prop::collection::vec(op(), 0..40)) {
        let (mut viewer, mut surface) = mounted(n);
        let mut now = 0u64;

        for op in ops {
            now += 50;
            let event = match op {
                Op::Prev => Some(ViewerEvent::Prev),
                Op::Next => Some(ViewerEvent::Next),
                Op::Key(right) => Some(ViewerEvent::Key(if right { Key::ArrowRight } else { Key::ArrowLeft })),
                Op::Jump(page) => Some(ViewerEvent::PageInput(page.to_string())),
                Op::Toggle => Some(ViewerEvent::ToggleMode),
                Op::Fullscreen(on) => Some(ViewerEvent::FullscreenChanged(on.then(|| "reader".to_string()))),
                Op::Tick => None,
            };
            match event {
                Some(event) => {
                    viewer.handle(event, &mut surface, now);
                }
                None => {
                    viewer.tick(&mut surface, now);
                }
            }

            let state = viewer.state();
            prop_assert!(state.index < n.max(1));
            prop_assert_eq!(viewer.render(), viewer.render());
        }

        run_timers(&mut viewer, &mut surface);
        prop_assert!(!viewer.state().animating);
    }

    #[test]
    fn toggling_into_spread_is_even(n in 2usize..20, page in 1i64..20) {
        let (mut viewer, mut surface) = mounted(n);
        viewer.handle(ViewerEvent::ToggleMode, &mut surface, 0);
        viewer.handle(ViewerEvent::PageInput(page.to_string()), &mut surface, 0);
        viewer.handle(ViewerEvent::ToggleMode, &mut surface, 0);

        prop_assert_eq!(viewer.state().mode, LayoutMode::Spread);
        prop_assert_eq!(viewer.state().index % 2, 0);
    }
}
