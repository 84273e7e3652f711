//! Browser integration: DOM surface, control wiring, timers and fullscreen.
//!
//! ```rust,ignore
//! use flipbook_core_view::{web, window_pages, ViewerConfig};
//!
//! // Keep the handle alive for as long as the reader is on the page.
//! let reader = web::mount(window_pages("PAGES"), ViewerConfig::default())?;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlInputElement, KeyboardEvent, Window};

use crate::render::web::{page_elements, render_into};
use crate::timer::CancellationToken;
use crate::transition::{SingleTransition, SpreadTransition};
use crate::{
    AnimationError, FullscreenRequest, Key, ModeLabels, PageList, RenderResult, TransitionCue, TransitionStyle, Viewer,
    ViewerConfig, ViewerEvent, ViewerOutcome, ViewerSurface,
};

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn js_error(err: JsValue) -> AnimationError {
    AnimationError::Platform(format!("{err:?}"))
}

/// [`ViewerSurface`] drawing into the page's DOM.
///
/// Every element is looked up once by id and is optional.
pub struct DomSurface {
    document: Document,
    container: Option<Element>,
    page_num: Option<Element>,
    page_input: Option<HtmlInputElement>,
    page_of: Option<Element>,
    prev: Option<HtmlButtonElement>,
    next: Option<HtmlButtonElement>,
    toggle_mode: Option<Element>,
    labels: ModeLabels,
}

impl DomSurface {
    pub fn new(document: Document, config: &ViewerConfig) -> Self {
        let ids = &config.controls;
        let container = document.get_element_by_id(&ids.reader);
        let page_num = document.get_element_by_id(&ids.page_num);
        let page_input = document
            .get_element_by_id(&ids.page_input)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let page_of = document.get_element_by_id(&ids.page_of);
        let prev = document
            .get_element_by_id(&ids.prev)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let next = document
            .get_element_by_id(&ids.next)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let toggle_mode = document.get_element_by_id(&ids.toggle_mode);

        if container.is_none() {
            warn!("web: no container element #{}", ids.reader);
        }

        Self {
            document,
            container,
            page_num,
            page_input,
            page_of,
            prev,
            next,
            toggle_mode,
            labels: config.labels.clone(),
        }
    }

    /// The viewer container, if present on the page.
    pub fn container(&self) -> Option<&Element> {
        self.container.as_ref()
    }

    fn pages(&self) -> Result<Vec<HtmlElement>, AnimationError> {
        let container = self
            .container
            .as_ref()
            .ok_or(AnimationError::MissingElement("reader"))?;
        page_elements(container).map_err(js_error)
    }

    fn flip_out(&self, spread: &SpreadTransition) -> Result<(), AnimationError> {
        let pages = self.pages()?;
        let (Some(left), Some(right)) = (pages.first(), pages.get(1)) else {
            return Err(AnimationError::MissingElement(".page pair"));
        };

        let transition = spread.css_transition();
        let left_style = left.style();
        let right_style = right.style();
        left_style.set_property("transition", &transition).map_err(js_error)?;
        right_style.set_property("transition", &transition).map_err(js_error)?;
        left_style
            .set_property("transform-origin", SpreadTransition::OUTGOING_ORIGIN)
            .map_err(js_error)?;
        right_style
            .set_property("transform-origin", SpreadTransition::INCOMING_ORIGIN)
            .map_err(js_error)?;
        right_style
            .set_property("transform", SpreadTransition::INCOMING_START_TRANSFORM)
            .map_err(js_error)?;
        right_style.set_property("opacity", "0").map_err(js_error)?;

        // Force layout so the start state is committed before animating.
        let _ = left.offset_width();

        left_style
            .set_property("transform", SpreadTransition::OUTGOING_TRANSFORM)
            .map_err(js_error)?;
        left_style.set_property("opacity", "0").map_err(js_error)?;
        right_style
            .set_property("transform", SpreadTransition::INCOMING_END_TRANSFORM)
            .map_err(js_error)?;
        right_style.set_property("opacity", "1").map_err(js_error)?;
        Ok(())
    }
}

impl ViewerSurface for DomSurface {
    fn present(&mut self, view: &RenderResult) {
        if let Some(container) = &self.container {
            if let Err(err) = render_into(&self.document, container, view) {
                warn!("web: render failed: {err:?}");
            }
        }

        let page_label = view.page_label();
        if let Some(el) = &self.page_num {
            el.set_text_content(Some(&page_label));
        }
        if let Some(input) = &self.page_input {
            input.set_value(&page_label);
        }
        if let Some(el) = &self.page_of {
            el.set_text_content(Some(&view.page_of_label()));
        }
        if let Some(button) = &self.prev {
            button.set_disabled(view.prev_disabled);
        }
        if let Some(button) = &self.next {
            button.set_disabled(view.next_disabled);
        }
        if let Some(el) = &self.toggle_mode {
            el.set_text_content(Some(self.labels.label_for(view.mode)));
        }
    }

    fn begin_exit(&mut self, cue: &TransitionCue) -> Result<(), AnimationError> {
        match &cue.style {
            TransitionStyle::Single(_) => {
                let pages = self.pages()?;
                let current = pages.first().ok_or(AnimationError::MissingElement(".page"))?;
                current
                    .class_list()
                    .add_1(SingleTransition::exit_class(cue.direction))
                    .map_err(js_error)
            }
            TransitionStyle::Spread(spread) => self.flip_out(spread),
        }
    }

    fn begin_enter(&mut self, cue: &TransitionCue) -> Result<(), AnimationError> {
        match &cue.style {
            TransitionStyle::Single(_) => {
                let pages = self.pages()?;
                let incoming = pages.first().ok_or(AnimationError::MissingElement(".page"))?;
                incoming
                    .class_list()
                    .add_1(SingleTransition::ENTER_CLASS)
                    .map_err(js_error)
            }
            // The incoming spread was already rotated in during the exit phase.
            TransitionStyle::Spread(_) => Ok(()),
        }
    }

    fn settle(&mut self, cue: &TransitionCue) {
        let Ok(pages) = self.pages() else {
            return;
        };
        for page in pages {
            match &cue.style {
                TransitionStyle::Single(_) => {
                    let classes = page.class_list();
                    let _ = classes.remove_1(SingleTransition::ENTER_CLASS);
                    let _ = classes.remove_1(SingleTransition::exit_class(cue.direction));
                }
                TransitionStyle::Spread(_) => page.style().set_css_text(""),
            }
        }
    }
}

struct Shared {
    viewer: Viewer,
    surface: DomSurface,
    timer: Option<ArmedTimer>,
}

struct ArmedTimer {
    task_id: u64,
    handle: i32,
    token: CancellationToken,
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A viewer mounted into the document.
///
/// Dropping it removes every event listener and cancels any armed
/// transition timer.
pub struct MountedViewer {
    shared: Rc<RefCell<Shared>>,
    window: Window,
    document: Document,
    listeners: Vec<Listener>,
}

/// Mount a viewer on the current document.
///
/// Controls are looked up by the ids in `config.controls`; any of them may
/// be missing.
pub fn mount(pages: PageList, config: ViewerConfig) -> Result<MountedViewer, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let ids = config.controls.clone();
    let mut surface = DomSurface::new(document.clone(), &config);
    let viewer = Viewer::new(pages, config);
    viewer.mount(&mut surface);

    let mut mounted = MountedViewer {
        shared: Rc::new(RefCell::new(Shared {
            viewer,
            surface,
            timer: None,
        })),
        window: window.clone(),
        document: document.clone(),
        listeners: Vec::new(),
    };

    for (id, event) in [
        (&ids.prev, ViewerEvent::Prev),
        (&ids.next, ViewerEvent::Next),
        (&ids.toggle_mode, ViewerEvent::ToggleMode),
        (&ids.fullscreen, ViewerEvent::ToggleFullscreen),
    ] {
        if let Some(el) = document.get_element_by_id(id) {
            mounted.listen(EventTarget::from(el), "click", move |_| Some(event.clone()))?;
        }
    }

    if let Some(input) = document
        .get_element_by_id(&ids.page_input)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        let field = input.clone();
        mounted.listen(EventTarget::from(input), "change", move |_| {
            Some(ViewerEvent::PageInput(field.value()))
        })?;
    }

    mounted.listen(EventTarget::from(window), "keydown", |event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        Some(ViewerEvent::Key(Key::from_name(&key)))
    })?;

    let doc = document.clone();
    mounted.listen(EventTarget::from(document), "fullscreenchange", move |_| {
        Some(ViewerEvent::FullscreenChanged(doc.fullscreen_element().map(|el| el.id())))
    })?;

    Ok(mounted)
}

impl MountedViewer {
    /// Current viewer state.
    pub fn state(&self) -> crate::ViewState {
        self.shared.borrow().viewer.state()
    }

    /// Feed an event into the viewer as if it came from a control.
    pub fn dispatch(&self, event: ViewerEvent) {
        dispatch(&self.shared, &self.window, &self.document, event);
    }

    fn listen<F>(&mut self, target: EventTarget, event: &'static str, mut map: F) -> Result<(), JsValue>
    where
        F: FnMut(&Event) -> Option<ViewerEvent> + 'static,
    {
        let shared = Rc::clone(&self.shared);
        let window = self.window.clone();
        let document = self.document.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
            if let Some(viewer_event) = map(&dom_event) {
                dispatch(&shared, &window, &document, viewer_event);
            }
        });
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for MountedViewer {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref());
        }
        if let Some(armed) = self.shared.borrow_mut().timer.take() {
            armed.token.cancel();
            self.window.clear_timeout_with_handle(armed.handle);
        }
        debug!("web: viewer unmounted");
    }
}

fn dispatch(shared: &Rc<RefCell<Shared>>, window: &Window, document: &Document, event: ViewerEvent) {
    let outcome = {
        let mut inner = shared.borrow_mut();
        let Shared { viewer, surface, .. } = &mut *inner;
        viewer.handle(event, surface, now_ms())
    };

    if let ViewerOutcome::Fullscreen(request) = outcome {
        match request {
            FullscreenRequest::Enter => {
                let container = shared.borrow().surface.container().cloned();
                if let Some(container) = container {
                    if let Err(err) = container.request_fullscreen() {
                        debug!("web: fullscreen request refused: {err:?}");
                    }
                }
            }
            FullscreenRequest::Exit => {
                document.exit_fullscreen();
            }
        }
    }

    arm_timer(shared, window);
}

/// Arm a browser timeout for the viewer's pending transition task.
fn arm_timer(shared: &Rc<RefCell<Shared>>, window: &Window) {
    let mut inner = shared.borrow_mut();
    let Some(task) = inner.viewer.pending_task().cloned() else {
        inner.timer = None;
        return;
    };
    if inner.timer.as_ref().is_some_and(|armed| armed.task_id == task.id()) {
        return;
    }

    let delay = i32::try_from(task.remaining_ms(now_ms())).unwrap_or(i32::MAX);
    let token = task.token();
    let due_ms = task.due_ms();
    let callback_shared = Rc::clone(shared);
    let callback_window = window.clone();
    let callback_token = token.clone();
    let callback = Closure::once_into_js(move || {
        if callback_token.is_cancelled() {
            return;
        }
        {
            let mut inner = callback_shared.borrow_mut();
            inner.timer = None;
            let Shared { viewer, surface, .. } = &mut *inner;
            viewer.tick(surface, now_ms().max(due_ms));
        }
        arm_timer(&callback_shared, &callback_window);
    });

    match window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
        Ok(handle) => {
            inner.timer = Some(ArmedTimer {
                task_id: task.id(),
                handle,
                token,
            });
        }
        Err(err) => {
            warn!("web: could not arm transition timer ({err:?}), finishing immediately");
            let Shared { viewer, surface, .. } = &mut *inner;
            while let Some(due) = viewer.pending_task().map(|t| t.due_ms()) {
                viewer.tick(surface, due);
            }
        }
    }
}
