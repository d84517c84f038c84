//! Off-main-thread stepping: the shim on the render side and the mirror
//! loop on the worker side.
//!
//! Replies carry no sequence number; whichever well-formed reply arrives
//! next is applied, so a slow worker can land a payload computed against
//! older bounds.

use field_core::protocol::{self, WorkerReply, WorkerRequest};
use field_core::{Bounds, DelegationLink, FieldConfig, NeuronField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Render-side handle to the worker. Dropping it detaches the handlers, so
/// the frame loop keeps it alive for the whole session.
pub struct WorkerShim {
    worker: web::Worker,
    link: Rc<RefCell<DelegationLink>>,
    _onmessage: Closure<dyn FnMut(web::MessageEvent)>,
    _onerror: Closure<dyn FnMut(web::ErrorEvent)>,
}

impl WorkerShim {
    /// Start the worker and hand it the population seeds. Any failure flips
    /// the link to local fallback and yields no shim.
    pub fn spawn(
        script_url: &str,
        sim: Rc<RefCell<NeuronField>>,
        link: Rc<RefCell<DelegationLink>>,
        bounds: Bounds,
    ) -> Option<WorkerShim> {
        let worker = match web::Worker::new(script_url) {
            Ok(w) => w,
            Err(e) => {
                link.borrow_mut()
                    .mark_failed(&format!("worker start: {:?}", e));
                return None;
            }
        };

        let link_msg = link.clone();
        let sim_msg = sim.clone();
        let onmessage = Closure::wrap(Box::new(move |ev: web::MessageEvent| {
            // Once fallen back, the worker may still be alive; ignore it.
            if !link_msg.borrow().is_delegated() {
                return;
            }
            let Some(text) = ev.data().as_string() else {
                link_msg
                    .borrow_mut()
                    .mark_failed("reply was not a string payload");
                return;
            };
            let reply = match protocol::decode_reply(&text) {
                Ok(r) => r,
                Err(e) => {
                    link_msg.borrow_mut().mark_failed(&e.to_string());
                    return;
                }
            };
            if let Err(e) = sim_msg.borrow_mut().apply_states(&reply.agents) {
                link_msg.borrow_mut().mark_failed(&e.to_string());
            }
        }) as Box<dyn FnMut(_)>);
        worker.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let link_err = link.clone();
        let onerror = Closure::wrap(Box::new(move |ev: web::ErrorEvent| {
            link_err
                .borrow_mut()
                .mark_failed(&format!("worker error: {}", ev.message()));
        }) as Box<dyn FnMut(_)>);
        worker.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let init = WorkerRequest::Init {
            width: bounds.width,
            height: bounds.height,
            agents: sim.borrow().seeds(),
        };
        match protocol::encode_request(&init) {
            Ok(json) => {
                if let Err(e) = worker.post_message(&JsValue::from_str(&json)) {
                    link.borrow_mut()
                        .mark_failed(&format!("init post: {:?}", e));
                    return None;
                }
            }
            Err(e) => {
                link.borrow_mut().mark_failed(&e.to_string());
                return None;
            }
        }
        link.borrow_mut().mark_delegated();
        log::info!("[field] worker delegation active");
        Some(WorkerShim {
            worker,
            link,
            _onmessage: onmessage,
            _onerror: onerror,
        })
    }

    /// Ask the worker for one tick against the given bounds. The reply is
    /// applied by the message handler whenever it arrives.
    pub fn request_update(&self, bounds: Bounds) {
        if !self.link.borrow().is_delegated() {
            return;
        }
        let req = WorkerRequest::Update {
            width: bounds.width,
            height: bounds.height,
        };
        match protocol::encode_request(&req) {
            Ok(json) => {
                if let Err(e) = self.worker.post_message(&JsValue::from_str(&json)) {
                    self.link
                        .borrow_mut()
                        .mark_failed(&format!("update post: {:?}", e));
                }
            }
            Err(e) => self.link.borrow_mut().mark_failed(&e.to_string()),
        }
    }
}

/// Worker-side entry; the hosting script calls this once after module init.
///
/// The worker mirrors the primary population from the `init` seeds and runs
/// the identical step function, replying with serialized state every tick.
#[wasm_bindgen]
pub fn worker_main() {
    let scope = match js_sys::global().dyn_into::<web::DedicatedWorkerGlobalScope>() {
        Ok(s) => s,
        Err(_) => {
            log::error!("[worker] not running in a dedicated worker scope");
            return;
        }
    };

    let mirror: RefCell<Option<NeuronField>> = RefCell::new(None);
    let scope_reply = scope.clone();
    let onmessage = Closure::wrap(Box::new(move |ev: web::MessageEvent| {
        let Some(text) = ev.data().as_string() else {
            log::warn!("[worker] request was not a string payload");
            return;
        };
        let request = match protocol::decode_request(&text) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[worker] bad request: {e}");
                return;
            }
        };
        let reply = match request {
            WorkerRequest::Init {
                width,
                height,
                agents,
            } => {
                let bounds = Bounds::new(width, height);
                let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
                let field =
                    NeuronField::from_seeds(FieldConfig::default(), bounds, seed, &agents);
                let states = field.states();
                *mirror.borrow_mut() = Some(field);
                WorkerReply { agents: states }
            }
            WorkerRequest::Update { width, height } => {
                let mut guard = mirror.borrow_mut();
                let Some(field) = guard.as_mut() else {
                    log::warn!("[worker] update before init");
                    return;
                };
                field.step(Bounds::new(width, height));
                WorkerReply {
                    agents: field.states(),
                }
            }
        };
        match protocol::encode_reply(&reply) {
            Ok(json) => {
                let _ = scope_reply.post_message(&JsValue::from_str(&json));
            }
            Err(e) => log::warn!("[worker] encode reply: {e}"),
        }
    }) as Box<dyn FnMut(_)>);
    scope.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();
}
