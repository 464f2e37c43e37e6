//! Canvas2D sprite renderer

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{self, Sprite};
use crate::error::FatalError;
use crate::platform::LoadedImages;
use crate::sim::RoundState;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: LoadedImages,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, images: LoadedImages) -> Result<Self, FatalError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(FatalError::NoCanvasContext)?;

        log::info!("Canvas renderer {}x{}", canvas.width(), canvas.height());
        Ok(Self {
            ctx,
            images,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    /// Clear and draw the whole round
    pub fn render(&self, state: &RoundState) {
        self.clear();
        for sprite in scene::build(state) {
            self.draw(&sprite);
        }
    }

    fn draw(&self, sprite: &Sprite) {
        let img = self.images.get(sprite.key);
        let (w, h) = (sprite.size.x as f64, sprite.size.y as f64);
        let y = sprite.pos.y as f64;

        // Draw failures only mean a missing frame
        if sprite.flip_x {
            self.ctx.save();
            self.ctx.scale(-1.0, 1.0).ok();
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    sprite.mirrored_x() as f64,
                    y,
                    w,
                    h,
                )
                .ok();
            self.ctx.restore();
        } else {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    sprite.pos.x as f64,
                    y,
                    w,
                    h,
                )
                .ok();
        }
    }
}
