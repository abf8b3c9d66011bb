//! 2D canvas backend

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::style::{BACKGROUND, BubbleStyle, Ellipse, POPPED_FILL, RadialGradient};
use crate::sim::Session;

/// Draws a session onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    background: String,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            background: BACKGROUND.css(),
        }
    }

    /// Clear and draw every bubble in index order
    pub fn render(&self, session: &Session) -> Result<(), JsValue> {
        let size = session.layout().canvas;
        self.ctx.set_fill_style_str(&self.background);
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);

        for bubble in session.bubbles() {
            self.draw(&BubbleStyle::for_bubble(bubble))?;
        }
        Ok(())
    }

    fn draw(&self, style: &BubbleStyle) -> Result<(), JsValue> {
        match style {
            BubbleStyle::Popped { center, radius } => {
                self.ctx.set_fill_style_str(POPPED_FILL);
                self.circle(center.x, center.y, *radius)?;
            }
            BubbleStyle::Intact {
                center,
                radius,
                body,
                highlight,
                highlight_shape,
                rim,
                rim_radius,
            } => {
                self.ctx.set_fill_style_canvas_gradient(&self.gradient(body)?);
                self.circle(center.x, center.y, *radius)?;

                self.ctx
                    .set_fill_style_canvas_gradient(&self.gradient(highlight)?);
                self.ellipse(highlight_shape)?;

                self.ctx.set_fill_style_canvas_gradient(&self.gradient(rim)?);
                self.circle(rim.outer_center.x, rim.outer_center.y, *rim_radius)?;
            }
        }
        Ok(())
    }

    fn gradient(&self, g: &RadialGradient) -> Result<CanvasGradient, JsValue> {
        let gradient = self.ctx.create_radial_gradient(
            g.inner_center.x as f64,
            g.inner_center.y as f64,
            g.inner_radius as f64,
            g.outer_center.x as f64,
            g.outer_center.y as f64,
            g.outer_radius as f64,
        )?;
        for (offset, color) in &g.stops {
            gradient.add_color_stop(*offset, color)?;
        }
        Ok(gradient)
    }

    fn circle(&self, x: f32, y: f32, r: f32) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(x as f64, y as f64, r.max(0.0) as f64, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn ellipse(&self, e: &Ellipse) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.ellipse(
            e.center.x as f64,
            e.center.y as f64,
            e.radii.x.max(0.0) as f64,
            e.radii.y.max(0.0) as f64,
            e.rotation as f64,
            0.0,
            TAU,
        )?;
        self.ctx.fill();
        Ok(())
    }
}
