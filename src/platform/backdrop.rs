//! Curve backdrop: steps the scene and repaints the canvas every frame

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use super::Component;
use super::dom::{self, Listener};
use crate::error::{FxError, FxResult};
use crate::normalize_pointer;
use crate::render::{CanvasPainter, frame};
use crate::scene::{CurveScene, Pointer, Viewport};
use crate::settings::Settings;

/// State touched by the frame loop and the event listeners
struct Backdrop {
    scene: CurveScene,
    painter: CanvasPainter,
    last_time: f64,
}

impl Backdrop {
    fn resize(&mut self, window: &Window) {
        let (w, h) = dom::viewport_size(window);
        self.scene.resize(w, h);
        self.painter.resize(w, h, window.device_pixel_ratio());
    }

    fn frame(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            crate::consts::FRAME_DT
        };
        self.last_time = time;

        self.scene.step(dt);
        self.painter.paint(&frame(&self.scene));
    }
}

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct CurveBackdrop {
    state: Rc<RefCell<Backdrop>>,
    animate: bool,
    frame_loop: FrameLoop,
    frame_handle: Rc<RefCell<Option<i32>>>,
    listeners: Vec<Listener<MouseEvent>>,
    resize: Option<Listener<web_sys::Event>>,
}

impl CurveBackdrop {
    pub fn from_page(document: &Document, settings: &Settings) -> Option<Self> {
        let canvas = document
            .get_element_by_id(&settings.selectors.canvas)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let painter = match CanvasPainter::new(canvas) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Backdrop disabled: {}", e);
                return None;
            }
        };

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let (width, height) = dom::window()
            .map(|w| dom::viewport_size(&w))
            .unwrap_or_default();
        let scene = CurveScene::new(
            seed,
            Viewport::new(width, height),
            settings.particle_count(),
            settings.time_step,
        );
        log::info!("Backdrop scene seeded with {}", seed);

        Some(Self {
            state: Rc::new(RefCell::new(Backdrop {
                scene,
                painter,
                last_time: 0.0,
            })),
            animate: !settings.reduced_motion,
            frame_loop: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
            resize: None,
        })
    }

    fn start_loop(&mut self, window: &Window) -> FxResult<()> {
        let state = self.state.clone();
        let frame_loop = self.frame_loop.clone();
        let frame_handle = self.frame_handle.clone();

        *self.frame_loop.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            state.borrow_mut().frame(time);

            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(closure) = frame_loop.borrow().as_ref() {
                *frame_handle.borrow_mut() = window
                    .request_animation_frame(closure.as_ref().unchecked_ref())
                    .ok();
            }
        }));

        let handle = match self.frame_loop.borrow().as_ref() {
            Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref())?,
            None => return Err(FxError::Js("frame loop missing".into())),
        };
        *self.frame_handle.borrow_mut() = Some(handle);
        Ok(())
    }
}

impl Component for CurveBackdrop {
    fn name(&self) -> &'static str {
        "backdrop"
    }

    fn start(&mut self) -> FxResult<()> {
        if self.resize.is_some() {
            return Ok(());
        }
        let window = dom::window()?;
        self.state.borrow_mut().resize(&window);

        {
            let state = self.state.clone();
            let animate = self.animate;
            self.resize = Some(Listener::attach(&window, "resize", move |_: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let mut s = state.borrow_mut();
                s.resize(&window);
                if !animate {
                    let prims = frame(&s.scene);
                    s.painter.paint(&prims);
                }
            })?);
        }

        if !self.animate {
            let s = self.state.borrow();
            s.painter.paint(&frame(&s.scene));
            log::info!("Reduced motion: backdrop drawn once");
            return Ok(());
        }

        {
            let state = self.state.clone();
            self.listeners.push(Listener::attach(&window, "mousemove", move |e: MouseEvent| {
                let mut s = state.borrow_mut();
                let vp = s.scene.viewport();
                let pointer = Pointer::new(
                    normalize_pointer(e.client_x() as f32, vp.width),
                    normalize_pointer(e.client_y() as f32, vp.height),
                );
                s.scene.set_pointer(pointer);
            })?);
        }

        self.start_loop(&window)
    }

    fn dispose(&mut self) {
        if let Some(handle) = self.frame_handle.borrow_mut().take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        // Dropping the closure breaks the loop's self-reference
        self.frame_loop.borrow_mut().take();
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        if let Some(resize) = self.resize.take() {
            resize.remove();
        }
    }
}
