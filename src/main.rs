//! Landing FX entry point
//!
//! On the web this wires every effect whose markup is present. Natively it
//! evaluates a countdown from the command line, which is handy for checking
//! event dates before publishing them.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use landing_fx::Settings;
    use landing_fx::error::FxResult;
    use landing_fx::platform::Page;
    use landing_fx::platform::backdrop::CurveBackdrop;
    use landing_fx::platform::countdown::CountdownWidget;
    use landing_fx::platform::dom;
    use landing_fx::platform::reveal::RevealOnScroll;

    thread_local! {
        static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    }

    pub fn run() -> FxResult<()> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        let settings = Settings::load();
        let document = dom::document()?;

        let mut page = Page::new();
        page.add(
            "countdown",
            CountdownWidget::from_page(&document, &settings.selectors),
        );
        page.add("backdrop", CurveBackdrop::from_page(&document, &settings));
        page.add(
            "reveal",
            RevealOnScroll::from_page(&document, &settings.selectors, settings.reduced_motion),
        );

        let started = page.start_all();
        log::info!("Landing FX running ({} of {} effects)", started, page.len());

        PAGE.with(|cell| {
            if let Some(mut old) = cell.borrow_mut().replace(page) {
                old.dispose_all();
            }
        });
        Ok(())
    }

    pub fn dispose() {
        PAGE.with(|cell| {
            if let Some(mut page) = cell.borrow_mut().take() {
                page.dispose_all();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_page::run() {
        log::error!("Landing FX failed to start: {}", e);
    }
}

/// Tear down every running effect (timers, frame loop, listeners)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = disposeEffects)]
pub fn dispose_effects() {
    wasm_page::dispose();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (start, end, now) = match args.as_slice() {
        [start, end] => (start, end, None),
        [start, end, now] => (start, end, Some(now)),
        _ => {
            eprintln!("usage: landing-fx <event-start> <event-end> [now]");
            std::process::exit(2);
        }
    };

    if let Err(e) = print_countdown(start, end, now.map(String::as_str)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_countdown(start: &str, end: &str, now: Option<&str>) -> landing_fx::FxResult<()> {
    use landing_fx::EventSchedule;
    use landing_fx::countdown::parse_timestamp;

    let schedule = EventSchedule::parse(start, end)?;
    let now = match now {
        Some(now) => parse_timestamp("now", now)?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0),
    };
    log::info!("Evaluating schedule {:?} at {}", schedule, now);

    let display = schedule.evaluate(now);
    println!("{:?}: {}", display.phase, display.fields_line());
    println!("{}", display.label.as_str());
    Ok(())
}
