//! Small DOM helpers shared by the components

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, EventTarget, Window};

use crate::error::{FxError, FxResult};

pub fn window() -> FxResult<Window> {
    web_sys::window().ok_or_else(|| FxError::Js("no window".into()))
}

pub fn document() -> FxResult<Document> {
    window()?
        .document()
        .ok_or_else(|| FxError::Js("no document".into()))
}

/// Look up every id, or `None` if any is missing
pub fn require_ids<const N: usize>(document: &Document, ids: [&str; N]) -> Option<[Element; N]> {
    let mut found = Vec::with_capacity(N);
    for id in ids {
        match document.get_element_by_id(id) {
            Some(el) => found.push(el),
            None => {
                log::debug!("#{} not found", id);
                return None;
            }
        }
    }
    found.try_into().ok()
}

/// Viewport size in CSS pixels
pub fn viewport_size(window: &Window) -> (f32, f32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// An event listener that stays attached until dropped or removed
pub struct Listener<E: 'static> {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(E)>,
}

impl<E: wasm_bindgen::convert::FromWasmAbi + 'static> Listener<E> {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(E) + 'static,
    ) -> FxResult<Self> {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub fn remove(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
