use crate::render::FieldPainter;
use crate::worker::WorkerShim;
use field_core::constants::TARGET_FPS;
use field_core::{Bounds, DelegationLink, NeuronField};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One canvas layer: a population, its painter, and its surface.
pub struct FieldLayer {
    pub canvas: web::HtmlCanvasElement,
    pub painter: FieldPainter,
    pub sim: Rc<RefCell<NeuronField>>,
}

impl FieldLayer {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn step_and_paint(&self) {
        let bounds = self.bounds();
        self.sim.borrow_mut().step(bounds);
        self.painter.paint_all(self.sim.borrow().agents(), bounds);
    }
}

pub struct FrameContext {
    /// Neuron layer; stepped by the worker while the link holds.
    pub field: FieldLayer,
    /// Drift layer; always stepped locally.
    pub drift: FieldLayer,
    pub link: Rc<RefCell<DelegationLink>>,
    pub shim: Option<WorkerShim>,
    pub last_frame: Option<Instant>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // Manual cadence gate: the vsync callback fires at display rate, the
        // step/render pair runs at TARGET_FPS.
        let now = Instant::now();
        if let Some(last) = self.last_frame {
            if (now - last).as_secs_f64() < 1.0 / TARGET_FPS {
                return;
            }
        }
        self.last_frame = Some(now);

        if self.link.borrow().is_delegated() {
            let bounds = self.field.bounds();
            if let Some(shim) = &self.shim {
                shim.request_update(bounds);
            }
            // Positions land asynchronously from worker replies; paint
            // whatever state has been applied so far.
            self.field
                .painter
                .paint_all(self.field.sim.borrow().agents(), bounds);
        } else {
            self.field.step_and_paint();
        }

        self.drift.step_and_paint();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
