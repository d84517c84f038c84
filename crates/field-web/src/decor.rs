//! SVG page dressing: concentric rings with randomized arc segments, and
//! connection lines between DOM panels. Geometry-to-markup glue only;
//! resize updates attributes in place rather than rebuilding the tree.

use rand::Rng;
use std::f32::consts::{PI, TAU};
use web_sys as web;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const RING_COUNT: usize = 3;
const ARCS_PER_RING: usize = 4;
const RING_GAP: f32 = 14.0;
const RING_STROKE: &str = "rgba(120, 220, 255, 0.25)";
const ARC_STROKE: &str = "rgba(120, 220, 255, 0.7)";
const LINE_STROKE: &str = "rgba(120, 220, 255, 0.35)";

/// SVG path `d` for a circular arc of `sweep` radians starting at `start`.
pub fn arc_path(cx: f32, cy: f32, r: f32, start: f32, sweep: f32) -> String {
    let x0 = cx + r * start.cos();
    let y0 = cy + r * start.sin();
    let end = start + sweep;
    let x1 = cx + r * end.cos();
    let y1 = cy + r * end.sin();
    let large = if sweep.abs() > PI { 1 } else { 0 };
    format!("M {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2}")
}

/// Center of a box in page coordinates.
pub fn rect_center(left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    (left + width / 2.0, top + height / 2.0)
}

/// Rings mounted around a host element. Elements are created once; `resize`
/// re-derives center and radii from the host box.
pub struct RingDecor {
    host: web::Element,
    circles: Vec<web::Element>,
    /// Arc element with its fixed (start, sweep) span.
    arcs: Vec<(web::Element, f32, f32)>,
}

impl RingDecor {
    pub fn mount<R: Rng>(
        document: &web::Document,
        host_id: &str,
        rng: &mut R,
    ) -> Option<RingDecor> {
        let Some(host) = document.get_element_by_id(host_id) else {
            log::warn!("[decor] missing #{host_id}; rings skipped");
            return None;
        };

        let svg = match document.create_element_ns(Some(SVG_NS), "svg") {
            Ok(el) => el,
            Err(e) => {
                log::warn!("[decor] svg create failed: {:?}", e);
                return None;
            }
        };
        let _ = svg.set_attribute("width", "100%");
        let _ = svg.set_attribute("height", "100%");
        let _ = svg.set_attribute("aria-hidden", "true");

        let mut circles = Vec::new();
        let mut arcs = Vec::new();
        for ring in 0..RING_COUNT {
            if let Ok(circle) = document.create_element_ns(Some(SVG_NS), "circle") {
                let _ = circle.set_attribute("fill", "none");
                let _ = circle.set_attribute("stroke", RING_STROKE);
                let _ = circle.set_attribute("stroke-width", "1");
                let _ = svg.append_child(&circle);
                circles.push(circle);
            }
            for _ in 0..ARCS_PER_RING {
                if let Ok(path) = document.create_element_ns(Some(SVG_NS), "path") {
                    let start = rng.gen_range(0.0..TAU);
                    let sweep = rng.gen_range(0.15..1.2);
                    let _ = path.set_attribute("fill", "none");
                    let _ = path.set_attribute("stroke", ARC_STROKE);
                    let _ = path.set_attribute("stroke-width", "2");
                    let _ = path.set_attribute("class", &format!("ring-arc ring-arc-{ring}"));
                    let _ = svg.append_child(&path);
                    arcs.push((path, start, sweep));
                }
            }
        }

        if host.append_child(&svg).is_err() {
            log::warn!("[decor] could not attach ring svg");
            return None;
        }
        let decor = RingDecor { host, circles, arcs };
        decor.resize();
        Some(decor)
    }

    /// Re-derive center and radii from the host box; elements are reused.
    pub fn resize(&self) {
        let rect = self.host.get_bounding_client_rect();
        let (cx, cy) = (rect.width() as f32 / 2.0, rect.height() as f32 / 2.0);
        let base = (cx.min(cy) - RING_GAP * RING_COUNT as f32).max(RING_GAP);

        for (ring, circle) in self.circles.iter().enumerate() {
            let r = base + RING_GAP * ring as f32;
            let _ = circle.set_attribute("cx", &format!("{cx:.2}"));
            let _ = circle.set_attribute("cy", &format!("{cy:.2}"));
            let _ = circle.set_attribute("r", &format!("{r:.2}"));
        }
        for (i, (path, start, sweep)) in self.arcs.iter().enumerate() {
            let r = base + RING_GAP * (i / ARCS_PER_RING) as f32;
            let _ = path.set_attribute("d", &arc_path(cx, cy, r, *start, *sweep));
        }
    }
}

/// Lines between consecutive panels, drawn into a page-spanning SVG overlay.
pub struct PanelLinks {
    document: web::Document,
    panel_ids: Vec<String>,
    lines: Vec<web::Element>,
}

impl PanelLinks {
    pub fn mount(document: &web::Document, svg_id: &str, panel_ids: &[&str]) -> Option<PanelLinks> {
        let Some(svg) = document.get_element_by_id(svg_id) else {
            log::warn!("[decor] missing #{svg_id}; panel links skipped");
            return None;
        };
        if panel_ids.len() < 2 {
            return None;
        }

        let mut lines = Vec::new();
        for _ in 0..panel_ids.len() - 1 {
            if let Ok(line) = document.create_element_ns(Some(SVG_NS), "line") {
                let _ = line.set_attribute("stroke", LINE_STROKE);
                let _ = line.set_attribute("stroke-width", "1");
                let _ = svg.append_child(&line);
                lines.push(line);
            }
        }
        let links = PanelLinks {
            document: document.clone(),
            panel_ids: panel_ids.iter().map(|s| s.to_string()).collect(),
            lines,
        };
        links.resize();
        Some(links)
    }

    /// Re-read panel boxes and move the line endpoints in place.
    pub fn resize(&self) {
        for (i, line) in self.lines.iter().enumerate() {
            let (Some(from), Some(to)) = (
                self.document.get_element_by_id(&self.panel_ids[i]),
                self.document.get_element_by_id(&self.panel_ids[i + 1]),
            ) else {
                continue;
            };
            let a = from.get_bounding_client_rect();
            let b = to.get_bounding_client_rect();
            let (x1, y1) = rect_center(a.left(), a.top(), a.width(), a.height());
            let (x2, y2) = rect_center(b.left(), b.top(), b.width(), b.height());
            let _ = line.set_attribute("x1", &format!("{x1:.2}"));
            let _ = line.set_attribute("y1", &format!("{y1:.2}"));
            let _ = line.set_attribute("x2", &format!("{x2:.2}"));
            let _ = line.set_attribute("y2", &format!("{y2:.2}"));
        }
    }
}
