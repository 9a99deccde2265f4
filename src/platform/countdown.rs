//! Countdown widget: writes the schedule's display into the page every second

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element};

use super::Component;
use super::dom;
use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::countdown::EventSchedule;
use crate::error::FxResult;
use crate::settings::Selectors;

/// Elements the countdown writes into
#[derive(Clone)]
struct CountdownView {
    schedule: EventSchedule,
    fields: [Element; 4],
    status: Element,
    selectors: Selectors,
}

impl CountdownView {
    fn render(&self, now: i64) {
        let display = self.schedule.evaluate(now);
        for (el, text) in self.fields.iter().zip(display.fields.padded()) {
            el.set_text_content(Some(&text));
        }

        if display.label.is_markup() {
            self.status.set_inner_html(display.label.as_str());
        } else {
            self.status.set_text_content(Some(display.label.as_str()));
        }
        self.status
            .set_class_name(&self.selectors.status_class_name(display.status_class()));
    }
}

pub struct CountdownWidget {
    view: CountdownView,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl CountdownWidget {
    /// Build from the page, or `None` when the event markup is absent or
    /// carries unusable dates
    pub fn from_page(document: &Document, selectors: &Selectors) -> Option<Self> {
        let host = document.get_element_by_id(&selectors.event_host)?;

        let start = host.get_attribute(&selectors.event_start_attr).unwrap_or_default();
        let end = host.get_attribute(&selectors.event_end_attr).unwrap_or_default();
        let schedule = match EventSchedule::parse(&start, &end) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Countdown disabled: {}", e);
                return None;
            }
        };

        let fields = dom::require_ids(document, selectors.countdown_fields())?;
        let [status] = dom::require_ids(document, [selectors.status.as_str()])?;

        Some(Self {
            view: CountdownView {
                schedule,
                fields,
                status,
                selectors: selectors.clone(),
            },
            interval: None,
        })
    }
}

impl Component for CountdownWidget {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn start(&mut self) -> FxResult<()> {
        if self.interval.is_some() {
            return Ok(());
        }

        self.view.render(js_sys::Date::now() as i64);

        let view = self.view.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            view.render(js_sys::Date::now() as i64);
        });
        let handle = dom::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            COUNTDOWN_PERIOD_MS,
        )?;
        self.interval = Some((handle, closure));
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some((handle, _closure)) = self.interval.take() {
            if let Ok(window) = dom::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}
