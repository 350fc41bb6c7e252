//! DOM anchors the game attaches to

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window,
};

use crate::error::BindError;
use crate::input::TouchControl;

pub const PLAY_BUTTON: &str = "play-game-btn";
pub const CLOSE_BUTTON: &str = "close-game-btn";
pub const OVERLAY: &str = "game-overlay";
pub const CONTROLS_MODAL: &str = "game-controls-modal";
pub const START_BUTTON: &str = "start-game-btn";
pub const CANVAS: &str = "game-canvas";
pub const SCORE: &str = "game-score";
pub const MESSAGE: &str = "game-message";
pub const FINAL_SCORE: &str = "final-score-text";

const HIDDEN: &str = "hidden";
const FLEX: &str = "flex";

/// Every element the game touches, resolved once at start-up
pub struct Anchors {
    pub window: Window,
    pub body: Option<HtmlElement>,
    pub play_button: Element,
    pub close_button: Element,
    pub overlay: Element,
    pub controls_modal: Element,
    pub start_button: HtmlElement,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub score: Element,
    pub message: Element,
    pub final_score: Element,
    /// On-screen controls present on this page (may be none)
    pub touch: Vec<(TouchControl, Element)>,
}

impl Anchors {
    pub fn bind() -> Result<Self, BindError> {
        let window = web_sys::window().ok_or(BindError::NoWindow)?;
        let document = window.document().ok_or(BindError::NoDocument)?;

        let canvas: HtmlCanvasElement = typed(&document, CANVAS, "canvas")?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(BindError::NoContext)?;

        let touch = TouchControl::ALL
            .iter()
            .filter_map(|&control| {
                document
                    .get_element_by_id(control.element_id())
                    .map(|el| (control, el))
            })
            .collect();

        Ok(Self {
            body: document.body(),
            play_button: element(&document, PLAY_BUTTON)?,
            close_button: element(&document, CLOSE_BUTTON)?,
            overlay: element(&document, OVERLAY)?,
            controls_modal: element(&document, CONTROLS_MODAL)?,
            start_button: typed(&document, START_BUTTON, "HTML element")?,
            canvas,
            ctx,
            score: element(&document, SCORE)?,
            message: element(&document, MESSAGE)?,
            final_score: element(&document, FINAL_SCORE)?,
            touch,
            window,
        })
    }

    /// Lock or restore page scrolling behind the overlay
    pub fn lock_scroll(&self, locked: bool) {
        if let Some(body) = &self.body {
            let value = if locked { "hidden" } else { "" };
            let _ = body.style().set_property("overflow", value);
        }
    }

    /// Current viewport size in CSS pixels
    pub fn viewport(&self) -> (f64, f64) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
        (
            dim(self.window.inner_width()).unwrap_or(0.0),
            dim(self.window.inner_height()).unwrap_or(0.0),
        )
    }
}

fn element(document: &Document, id: &'static str) -> Result<Element, BindError> {
    document
        .get_element_by_id(id)
        .ok_or(BindError::MissingElement(id))
}

fn typed<T: JsCast>(
    document: &Document,
    id: &'static str,
    type_name: &'static str,
) -> Result<T, BindError> {
    element(document, id)?
        .dyn_into::<T>()
        .map_err(|_| BindError::WrongElementType(id, type_name))
}

/// Show a flex container (modal, overlay)
pub fn show(el: &Element) {
    let classes = el.class_list();
    let _ = classes.remove_1(HIDDEN);
    let _ = classes.add_1(FLEX);
}

/// Hide a flex container
pub fn hide(el: &Element) {
    let classes = el.class_list();
    let _ = classes.add_1(HIDDEN);
    let _ = classes.remove_1(FLEX);
}

/// Toggle only the `hidden` class
pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force(HIDDEN, hidden);
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}
