//! Canvas 2D presenter
//!
//! Plain shapes and text: white triangle ship, red projectiles, yellow round
//! enemies, cyan beam, plus the HUD and laser gauge.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::sim::{ControlScheme, GamePhase};
use crate::view::{FrameSnapshot, Presenter, Summary};

/// Projectile sprite size
const PROJECTILE_W: f64 = 10.0;
const PROJECTILE_H: f64 = 20.0;

/// Draws frames onto a 2D canvas context
pub struct CanvasPresenter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    scheme: ControlScheme,
}

impl CanvasPresenter {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
        scheme: ControlScheme,
    ) -> Self {
        Self {
            ctx,
            width,
            height,
            scheme,
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn draw(&self, frame: &FrameSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        // Ship
        let ship = frame.ship;
        let (sx, sy, sw, sh) = (ship.x as f64, ship.y as f64, ship.w as f64, ship.h as f64);
        ctx.set_fill_style_str("white");
        ctx.begin_path();
        ctx.move_to(sx + sw / 2.0, sy);
        ctx.line_to(sx, sy + sh);
        ctx.line_to(sx + sw, sy + sh);
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str("red");
        for p in &frame.projectiles {
            ctx.fill_rect(
                p.x as f64 - PROJECTILE_W / 2.0,
                p.y as f64,
                PROJECTILE_W,
                PROJECTILE_H,
            );
        }

        ctx.set_fill_style_str("yellow");
        for enemy in &frame.enemies {
            let r = enemy.w as f64 / 2.0;
            ctx.begin_path();
            ctx.arc(enemy.x as f64 + r, enemy.y as f64 + enemy.h as f64 / 2.0, r, 0.0, TAU)?;
            ctx.fill();
        }

        if let Some(beam) = frame.beam {
            ctx.set_fill_style_str("cyan");
            ctx.fill_rect(beam.x as f64, beam.y as f64, beam.w as f64, beam.h as f64);
        }

        self.draw_gauge(frame)?;

        ctx.set_fill_style_str("white");
        ctx.set_font("20px Arial");
        ctx.fill_text(&format!("Score: {}", frame.score), 10.0, 30.0)?;
        ctx.fill_text(&format!("Lives: {}", frame.lives), 10.0, 60.0)?;
        ctx.fill_text(&format!("Time: {}s", frame.elapsed_secs), 10.0, 90.0)?;
        Ok(())
    }

    fn draw_gauge(&self, frame: &FrameSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (base_w, gauge_h, font_px) = match self.scheme {
            ControlScheme::Touch => (120.0, 10.0, 12),
            ControlScheme::Keyboard => (200.0, 20.0, 20),
        };
        let gauge_y = self.height - gauge_h - 10.0;

        ctx.set_fill_style_str("gray");
        ctx.fill_rect(10.0, gauge_y, base_w, gauge_h);
        ctx.set_fill_style_str("cyan");
        ctx.fill_rect(10.0, gauge_y, base_w * frame.gauge as f64, gauge_h);

        if frame.laser_ready {
            ctx.set_fill_style_str("white");
            ctx.set_font(&format!("{}px Arial", font_px));
            ctx.fill_text(
                "Press Z or 2-finger tap to Fire!!",
                10.0 + base_w + 10.0,
                gauge_y + gauge_h - 2.0,
            )?;
        }
        Ok(())
    }
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if let Err(e) = self.draw(frame) {
            log::warn!("Draw failed: {:?}", e);
        }
    }

    fn finish(&mut self, summary: &Summary) {
        let message = match summary.outcome {
            GamePhase::Won => format!(
                "Congratulations, you win! Your score: {}. Clear Time: {} seconds",
                summary.score, summary.clear_time_secs
            ),
            _ => "Game Over!".to_string(),
        };
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&message);
        }
    }
}
