//! Reveal-on-scroll: adds the reveal class once an element scrolls into view

use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element};

use super::Component;
use super::dom;
use super::observer::OnceObserver;
use crate::error::FxResult;
use crate::reveal::{sibling_index, stagger_delay_ms};
use crate::settings::Selectors;

const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -20px 0px";

pub struct RevealOnScroll {
    elements: Vec<Element>,
    attr: String,
    class: String,
    stagger: bool,
    observer: Option<OnceObserver>,
}

impl RevealOnScroll {
    pub fn from_page(document: &Document, selectors: &Selectors, reduced_motion: bool) -> Option<Self> {
        let list = document
            .query_selector_all(&format!("[{}]", selectors.reveal_attr))
            .ok()?;
        let elements: Vec<Element> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| wasm_bindgen::JsCast::dyn_into::<Element>(node).ok())
            .collect();
        if elements.is_empty() {
            return None;
        }

        Some(Self {
            elements,
            attr: selectors.reveal_attr.clone(),
            class: selectors.reveal_class.clone(),
            stagger: !reduced_motion,
            observer: None,
        })
    }
}

/// Index of `el` among its parent's revealable children
fn revealable_index(el: &Element, attr: &str) -> Option<usize> {
    let parent = el.parent_element()?;
    let children = parent.children();
    let mut flags = Vec::with_capacity(children.length() as usize);
    let mut target = None;
    for i in 0..children.length() {
        let Some(child) = children.item(i) else {
            continue;
        };
        if child == *el {
            target = Some(flags.len());
        }
        flags.push(child.has_attribute(attr));
    }
    sibling_index(&flags, target?)
}

fn reveal_later(el: Element, class: String, delay_ms: u32) {
    let show = move || {
        let _ = el.class_list().add_1(&class);
    };
    if delay_ms == 0 {
        show();
        return;
    }
    let Ok(window) = dom::window() else {
        show();
        return;
    };
    let callback = Closure::once_into_js(show);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::JsCast::unchecked_ref(&callback),
            delay_ms as i32,
        )
        .is_err()
    {
        log::warn!("Reveal timer rejected");
    }
}

impl Component for RevealOnScroll {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn start(&mut self) -> FxResult<()> {
        if self.observer.is_some() {
            return Ok(());
        }

        let attr = self.attr.clone();
        let class = self.class.clone();
        let stagger = self.stagger;
        let observer = OnceObserver::observe(self.elements.clone(), THRESHOLD, ROOT_MARGIN, move |el| {
            let delay = if stagger {
                stagger_delay_ms(revealable_index(el, &attr))
            } else {
                0
            };
            reveal_later(el.clone(), class.clone(), delay);
        })?;
        log::debug!("Watching {} revealable elements", self.elements.len());
        self.observer = Some(observer);
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
