//! Notify-once visibility subscriptions over `IntersectionObserver`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::FxResult;
use crate::reveal::NotifyOnce;

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Calls `on_visible` the first time each watched element intersects the
/// viewport, then stops watching that element
pub struct OnceObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl OnceObserver {
    pub fn observe(
        elements: Vec<Element>,
        threshold: f64,
        root_margin: &str,
        mut on_visible: impl FnMut(&Element) + 'static,
    ) -> FxResult<Self> {
        let watched = Rc::new(elements);
        let gate = Rc::new(RefCell::new(NotifyOnce::<usize>::new()));

        let callback = {
            let watched = watched.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        let Some(key) = watched.iter().position(|el| *el == target) else {
                            continue;
                        };
                        if gate.borrow_mut().fire(key) {
                            observer.unobserve(&target);
                            on_visible(&target);
                        }
                    }
                },
            )
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&threshold.into());
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for el in watched.iter() {
            observer.observe(el);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Stop watching everything
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}
