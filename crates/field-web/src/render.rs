use crate::style;
use field_core::{Agent, Bounds, FieldConfig};
use web_sys as web;

/// Paints one field layer onto a 2D canvas context.
///
/// Repainting is idempotent within a frame: the painter reads agent state
/// and never writes it back.
pub struct FieldPainter {
    ctx: web::CanvasRenderingContext2d,
    cfg: FieldConfig,
}

impl FieldPainter {
    pub fn new(ctx: web::CanvasRenderingContext2d, cfg: FieldConfig) -> Self {
        Self { ctx, cfg }
    }

    pub fn clear(&self, bounds: Bounds) {
        self.ctx
            .clear_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    pub fn paint_all(&self, agents: &[Agent], bounds: Bounds) {
        self.clear(bounds);
        for agent in agents {
            self.paint(agent);
        }
    }

    /// Trail as a fading polyline, then the body as a shadowed circle.
    pub fn paint(&self, agent: &Agent) {
        let ctx = &self.ctx;
        let depth = agent.depth();

        let points = &agent.trail;
        if points.len() >= 2 {
            let segments = points.len() - 1;
            ctx.set_line_width((agent.size as f64 * 0.5).max(0.5));
            for i in 0..segments {
                let alpha =
                    style::trail_alpha(i, segments, depth, self.cfg.trail_alpha_ceiling);
                ctx.set_stroke_style_str(&style::rgba(self.cfg.trail_color, alpha));
                ctx.begin_path();
                ctx.move_to(points[i].x as f64, points[i].y as f64);
                ctx.line_to(points[i + 1].x as f64, points[i + 1].y as f64);
                ctx.stroke();
            }
        }

        ctx.set_shadow_color(self.cfg.shadow_color);
        ctx.set_shadow_blur((self.cfg.shadow_blur_scale * depth) as f64);
        ctx.set_fill_style_str(&style::rgba(self.cfg.body_color, style::body_alpha(depth)));
        ctx.begin_path();
        let _ = ctx.arc(
            agent.pos.x as f64,
            agent.pos.y as f64,
            agent.size.max(0.1) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        // Shadow state would bleed into the next agent's trail strokes.
        ctx.set_shadow_blur(0.0);
    }
}
