use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Quiet time after the last resize event before layers are re-synced.
const RESIZE_DEBOUNCE_MS: i32 = 100;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Backing size follows the window, not the element box:
/// `innerWidth × innerHeight × devicePixelRatio`.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        canvas.set_width(((width * dpr) as u32).max(1));
        canvas.set_height(((height * dpr) as u32).max(1));
    }
}

pub fn get_canvas(
    document: &web::Document,
    element_id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{element_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn canvas_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Run `on_resize` once the window has been quiet for the debounce window.
pub fn wire_debounced_resize(mut on_resize: impl FnMut() + 'static) {
    let Some(window) = web::window() else {
        log::warn!("[dom] no window; resize handling disabled");
        return;
    };
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let pending_fire = pending.clone();
    let fire = Closure::wrap(Box::new(move || {
        pending_fire.set(None);
        on_resize();
    }) as Box<dyn FnMut()>);

    let resize = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else { return };
        if let Some(handle) = pending.take() {
            w.clear_timeout_with_handle(handle);
        }
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            fire.as_ref().unchecked_ref(),
            RESIZE_DEBOUNCE_MS,
        ) {
            Ok(handle) => pending.set(Some(handle)),
            Err(e) => log::warn!("[dom] resize timeout failed: {:?}", e),
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
    resize.forget();
}
