//! Welcome-text language carousel: one fetch of the language document, then
//! a timer cycling the greeting element. Every failure path degrades to the
//! built-in fallback list.

use field_core::{fallback_greetings, Greeting, GreetingCarousel};
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch the `<language lang=".." text="..">` document; any failure or an
/// empty element list yields the fallback.
pub async fn fetch_greetings(url: &str) -> Vec<Greeting> {
    match try_fetch(url).await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => {
            log::warn!("[welcome] language document empty; using fallback");
            fallback_greetings()
        }
        Err(e) => {
            log::warn!("[welcome] fetch failed ({e}); using fallback");
            fallback_greetings()
        }
    }
}

async fn try_fetch(url: &str) -> anyhow::Result<Vec<Greeting>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("fetch returned a non-Response"))?;
    if !resp.ok() {
        return Err(anyhow::anyhow!("fetch status {}", resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("body was not text"))?;
    parse_language_xml(&text)
}

fn parse_language_xml(text: &str) -> anyhow::Result<Vec<Greeting>> {
    let parser = web::DomParser::new().map_err(js_err)?;
    let doc = parser
        .parse_from_string(text, web::SupportedType::TextXml)
        .map_err(js_err)?;
    let nodes = doc.get_elements_by_tag_name("language");
    let mut out = Vec::new();
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i) else { continue };
        let (Some(lang), Some(greeting)) = (el.get_attribute("lang"), el.get_attribute("text"))
        else {
            continue;
        };
        out.push(Greeting {
            lang,
            text: greeting,
        });
    }
    Ok(out)
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

/// Rotate the greeting element's text (and its `lang` attribute) on a fixed
/// period. A missing element is logged and the carousel is skipped.
pub fn start_carousel(
    document: &web::Document,
    element_id: &str,
    greetings: Vec<Greeting>,
    period_ms: i32,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("[welcome] missing #{element_id}; carousel disabled");
        return;
    };

    let carousel = RefCell::new(GreetingCarousel::new(greetings));
    {
        let c = carousel.borrow();
        el.set_text_content(Some(&c.current().text));
        let _ = el.set_attribute("lang", &c.current().lang);
    }

    let el_tick = el.clone();
    let closure = Closure::wrap(Box::new(move || {
        let mut c = carousel.borrow_mut();
        let g = c.advance();
        el_tick.set_text_content(Some(&g.text));
        let _ = el_tick.set_attribute("lang", &g.lang);
    }) as Box<dyn FnMut()>);

    if let Some(w) = web::window() {
        match w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(_) => closure.forget(),
            Err(e) => log::warn!("[welcome] interval failed: {:?}", e),
        }
    }
}
