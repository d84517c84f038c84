#![cfg(target_arch = "wasm32")]
//! Browser front-end: the ambient neuron/drift canvas layers, the worker
//! delegation shim, and the SVG/welcome-text page dressing.

use field_core::{layer_seed, Bounds, DelegationLink, FieldConfig, NeuronField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod decor;
mod dom;
mod frame;
mod render;
mod style;
mod welcome;
mod worker;

// The worker bootstrap script calls this after module init.
pub use worker::worker_main;

const FIELD_CANVAS_ID: &str = "field-canvas";
const DRIFT_CANVAS_ID: &str = "drift-canvas";
const RING_HOST_ID: &str = "ring-host";
const PANEL_LINKS_SVG_ID: &str = "panel-links";
const PANEL_IDS: [&str; 3] = ["panel-about", "panel-work", "panel-contact"];
const WELCOME_ID: &str = "welcome-text";
const LANGUAGES_URL: &str = "assets/languages.xml";
const WORKER_URL: &str = "field-worker.js";
const WELCOME_PERIOD_MS: i32 = 3200;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    // The worker loads this same module; there the bootstrap script calls
    // `worker_main` and there is no window to wire up.
    if web::window().is_none() {
        return Ok(());
    }
    log::info!("field-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let field_canvas = dom::get_canvas(&document, FIELD_CANVAS_ID)?;
    let drift_canvas = dom::get_canvas(&document, DRIFT_CANVAS_ID)?;
    dom::sync_canvas_to_window(&field_canvas);
    dom::sync_canvas_to_window(&drift_canvas);

    // Session seed; every layer derives its own stream from it.
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;

    let field_cfg = FieldConfig::default();
    let drift_cfg = FieldConfig::drift();
    let field_bounds = Bounds::new(field_canvas.width() as f32, field_canvas.height() as f32);
    let drift_bounds = Bounds::new(drift_canvas.width() as f32, drift_canvas.height() as f32);
    let field_sim = Rc::new(RefCell::new(NeuronField::new(
        field_cfg.clone(),
        field_bounds,
        layer_seed(seed, 0),
    )));
    let drift_sim = Rc::new(RefCell::new(NeuronField::new(
        drift_cfg.clone(),
        drift_bounds,
        layer_seed(seed, 1),
    )));
    log::info!(
        "[field] {} neuron agents, {} drift agents",
        field_sim.borrow().len(),
        drift_sim.borrow().len()
    );

    // Best-effort delegation; every failure path lands in local stepping.
    let link = Rc::new(RefCell::new(DelegationLink::new()));
    let shim = worker::WorkerShim::spawn(WORKER_URL, field_sim.clone(), link.clone(), field_bounds);

    let field_layer = frame::FieldLayer {
        canvas: field_canvas.clone(),
        painter: render::FieldPainter::new(dom::canvas_2d(&field_canvas)?, field_cfg),
        sim: field_sim,
    };
    let drift_layer = frame::FieldLayer {
        canvas: drift_canvas.clone(),
        painter: render::FieldPainter::new(dom::canvas_2d(&drift_canvas)?, drift_cfg),
        sim: drift_sim,
    };

    // Page dressing; each piece logs and degrades on its own.
    let mut decor_rng = StdRng::seed_from_u64(layer_seed(seed, 2));
    let rings = decor::RingDecor::mount(&document, RING_HOST_ID, &mut decor_rng);
    let links = decor::PanelLinks::mount(&document, PANEL_LINKS_SVG_ID, &PANEL_IDS);

    {
        let document_welcome = document.clone();
        spawn_local(async move {
            let greetings = welcome::fetch_greetings(LANGUAGES_URL).await;
            welcome::start_carousel(&document_welcome, WELCOME_ID, greetings, WELCOME_PERIOD_MS);
        });
    }

    {
        let field_canvas_rs = field_canvas.clone();
        let drift_canvas_rs = drift_canvas.clone();
        dom::wire_debounced_resize(move || {
            dom::sync_canvas_to_window(&field_canvas_rs);
            dom::sync_canvas_to_window(&drift_canvas_rs);
            if let Some(r) = &rings {
                r.resize();
            }
            if let Some(l) = &links {
                l.resize();
            }
        });
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        field: field_layer,
        drift: drift_layer,
        link,
        shim,
        last_frame: None,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
