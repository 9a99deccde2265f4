//! Browser components
//!
//! Each effect is a component built once at page load. Construction looks up
//! the elements it needs and yields `None` when any are missing, so a page
//! without a countdown or canvas simply skips that effect. Started components
//! keep their timers and listeners until `dispose`.

#[cfg(target_arch = "wasm32")]
pub mod backdrop;
#[cfg(target_arch = "wasm32")]
pub mod countdown;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod observer;
#[cfg(target_arch = "wasm32")]
pub mod reveal;

use crate::error::FxResult;

/// A page effect with an explicit lifecycle
pub trait Component {
    fn name(&self) -> &'static str;

    /// Attach timers/listeners and render the first state
    fn start(&mut self) -> FxResult<()>;

    /// Detach everything `start` attached; safe to call twice
    fn dispose(&mut self);
}

/// The set of components wired onto the current page
#[derive(Default)]
pub struct Page {
    components: Vec<Box<dyn Component>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component if its markup was present
    pub fn add<C: Component + 'static>(&mut self, name: &'static str, component: Option<C>) {
        match component {
            Some(c) => self.components.push(Box::new(c)),
            None => log::debug!("{} markup not present, skipping", name),
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Start every component; one failing does not stop the rest
    pub fn start_all(&mut self) -> usize {
        let mut started = 0;
        for c in &mut self.components {
            match c.start() {
                Ok(()) => {
                    log::info!("{} started", c.name());
                    started += 1;
                }
                Err(e) => log::warn!("{} failed to start: {}", c.name(), e),
            }
        }
        started
    }

    /// Dispose in reverse start order
    pub fn dispose_all(&mut self) {
        for c in self.components.iter_mut().rev() {
            c.dispose();
            log::info!("{} disposed", c.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        fail: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Component for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn start(&mut self) -> FxResult<()> {
            if self.fail {
                return Err(FxError::Js("boom".into()));
            }
            self.log.borrow_mut().push(format!("start {}", self.name));
            Ok(())
        }

        fn dispose(&mut self) {
            self.log.borrow_mut().push(format!("dispose {}", self.name));
        }
    }

    fn recorder(name: &'static str, fail: bool, log: &Rc<RefCell<Vec<String>>>) -> Recorder {
        Recorder {
            name,
            fail,
            log: log.clone(),
        }
    }

    #[test]
    fn test_missing_markup_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut page = Page::new();
        page.add("countdown", None::<Recorder>);
        page.add("backdrop", Some(recorder("backdrop", false, &log)));
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_failure_does_not_stop_others() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut page = Page::new();
        page.add("a", Some(recorder("a", true, &log)));
        page.add("b", Some(recorder("b", false, &log)));
        assert_eq!(page.start_all(), 1);
        assert_eq!(*log.borrow(), vec!["start b".to_string()]);
    }

    #[test]
    fn test_dispose_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut page = Page::new();
        page.add("a", Some(recorder("a", false, &log)));
        page.add("b", Some(recorder("b", false, &log)));
        page.start_all();
        page.dispose_all();
        assert_eq!(
            *log.borrow(),
            vec!["start a", "start b", "dispose b", "dispose a"]
        );
    }
}
