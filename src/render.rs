//! Rendering logic for page slots.

use crate::{LayoutMode, PageList, PageRef, ViewState};

/// Where a slot sits in the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPosition {
    /// The only slot in single mode
    Single,
    /// Left half of a spread
    Left,
    /// Right half of a spread
    Right,
}

/// A page placed into a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedPage {
    /// Zero-based page index
    pub index: usize,
    /// Page reference to display
    pub src: PageRef,
}

/// A renderable unit holding zero or one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub position: SlotPosition,
    pub page: Option<PlacedPage>,
}

impl Slot {
    /// CSS class list for the slot's container element.
    pub fn css_class(&self) -> &'static str {
        match self.position {
            SlotPosition::Single => "page single",
            SlotPosition::Left | SlotPosition::Right => "page",
        }
    }

    /// Check if the slot has no page.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
    }
}

/// Result of a render: the slots to show plus control metadata.
///
/// This is a platform-agnostic description of the view. Each consumer
/// can interpret it for its own backend (DOM, terminal, test double).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Layout the slots were produced for
    pub mode: LayoutMode,
    /// Slots in display order
    pub slots: Vec<Slot>,
    /// One-based number of the page in the first slot
    pub current_page: usize,
    /// Total number of pages
    pub page_count: usize,
    /// Whether the prev control should be disabled
    pub prev_disabled: bool,
    /// Whether the next control should be disabled
    pub next_disabled: bool,
}

impl RenderResult {
    /// Text for the current page number display.
    pub fn page_label(&self) -> String {
        self.current_page.to_string()
    }

    /// Text for the "of N" display next to the page number.
    pub fn page_of_label(&self) -> String {
        format!("/ {}", self.page_count)
    }

    /// Page references in slot order, skipping empty slots.
    pub fn visible_pages(&self) -> impl Iterator<Item = &PlacedPage> {
        self.slots.iter().filter_map(|slot| slot.page.as_ref())
    }
}

fn place(pages: &PageList, position: SlotPosition, index: usize) -> Slot {
    Slot {
        position,
        page: pages.get(index).map(|src| PlacedPage {
            index,
            src: src.clone(),
        }),
    }
}

/// Map the page list and view state to the slots to display.
///
/// Pure: the same inputs always give an equal result.
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::{render_view, LayoutMode, PageList, ViewState};
///
/// let pages = PageList::new(["p1.png", "p2.png", "p3.png"]);
/// let state = ViewState { index: 2, mode: LayoutMode::Spread, animating: false };
///
/// let result = render_view(&pages, &state);
/// assert_eq!(result.slots.len(), 2);
/// assert!(result.slots[1].is_empty());
/// assert_eq!(result.page_label(), "3");
/// assert_eq!(result.page_of_label(), "/ 3");
/// assert!(result.next_disabled);
/// ```
pub fn render_view(pages: &PageList, state: &ViewState) -> RenderResult {
    let index = state.index;
    let slots = match state.mode {
        LayoutMode::Single => vec![place(pages, SlotPosition::Single, index)],
        LayoutMode::Spread => vec![
            place(pages, SlotPosition::Left, index),
            place(pages, SlotPosition::Right, index + 1),
        ],
    };

    RenderResult {
        mode: state.mode,
        slots,
        current_page: index + 1,
        page_count: pages.len(),
        prev_disabled: index == 0,
        next_disabled: index + state.mode.step() >= pages.len(),
    }
}

/// Web-specific rendering implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

    /// Replace the container's children with one `div.page` per slot.
    ///
    /// Empty slots still get their `div` so a spread always has a left and
    /// a right element.
    pub fn render_into(document: &Document, container: &Element, result: &RenderResult) -> Result<(), JsValue> {
        container.set_inner_html("");

        for slot in &result.slots {
            let page = document.create_element("div")?;
            page.set_class_name(slot.css_class());
            if let Some(placed) = &slot.page {
                let img = document.create_element("img")?.dyn_into::<HtmlImageElement>()?;
                img.set_src(placed.src.as_str());
                page.append_child(&img)?;
            }
            container.append_child(&page)?;
        }

        Ok(())
    }

    /// Collect the rendered `.page` elements in slot order.
    pub fn page_elements(container: &Element) -> Result<Vec<HtmlElement>, JsValue> {
        let nodes = container.query_selector_all(".page")?;
        let mut elements = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                elements.push(el);
            }
        }
        Ok(elements)
    }
}
