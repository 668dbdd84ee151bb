//! 2D canvas rendering
//!
//! A thin, read-only consumer of simulation state: it draws the backdrop,
//! the phosphor grid, the pulsing fruit, and the snake once per display
//! frame, and feeds nothing back into the simulation.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{BOARD_SIZE, CELL_SIZE, GRID_SIZE};
use crate::sim::grid::{Cell, Direction};
use crate::sim::state::GameState;

/// Renders game state onto a fixed-size square canvas.
#[derive(Debug)]
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap `canvas`, sizing it to the board.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(BOARD_SIZE as u32);
        canvas.set_height(BOARD_SIZE as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame. `time_ms` is the free-running animation phase used
    /// for the fruit pulse; it is unrelated to logical steps.
    pub fn render(&self, state: &GameState, time_ms: f64) {
        self.ctx.set_fill_style_str("#060b08");
        self.ctx.fill_rect(0.0, 0.0, BOARD_SIZE, BOARD_SIZE);

        self.draw_grid();
        self.draw_fruit(state.fruit, time_ms);
        self.draw_snake(state);
    }

    fn draw_grid(&self) {
        self.ctx.save();
        self.ctx.set_stroke_style_str("rgba(58, 194, 136, 0.12)");
        self.ctx.set_line_width(1.0);

        // Half-pixel offset keeps 1px lines crisp
        for i in 0..=u32::from(GRID_SIZE) {
            let pos = f64::from(i) * CELL_SIZE + 0.5;

            self.ctx.begin_path();
            self.ctx.move_to(pos, 0.0);
            self.ctx.line_to(pos, BOARD_SIZE);
            self.ctx.stroke();

            self.ctx.begin_path();
            self.ctx.move_to(0.0, pos);
            self.ctx.line_to(BOARD_SIZE, pos);
            self.ctx.stroke();
        }
        self.ctx.restore();
    }

    fn draw_fruit(&self, fruit: Cell, time_ms: f64) {
        let pulse = 0.84 + (time_ms / 140.0).sin() * 0.13;
        let size = CELL_SIZE * pulse;
        let offset = (CELL_SIZE - size) / 2.0;

        let x = f64::from(fruit.x) * CELL_SIZE + offset;
        let y = f64::from(fruit.y) * CELL_SIZE + offset;

        self.ctx.save();
        self.ctx.set_shadow_blur(18.0);
        self.ctx.set_shadow_color("rgba(255, 132, 40, 0.9)");
        self.ctx.set_fill_style_str("#ff8e2f");
        self.ctx.fill_rect(x, y, size, size);

        // Specular glint
        self.ctx.set_fill_style_str("rgba(255, 238, 204, 0.65)");
        self.ctx
            .fill_rect(x + size * 0.2, y + size * 0.2, size * 0.26, size * 0.26);
        self.ctx.restore();
    }

    fn draw_snake(&self, state: &GameState) {
        let head = state.head();
        for &segment in &state.snake {
            let is_head = segment == head;
            let x = f64::from(segment.x) * CELL_SIZE;
            let y = f64::from(segment.y) * CELL_SIZE;

            self.ctx.save();
            self.ctx.set_shadow_blur(if is_head { 22.0 } else { 12.0 });
            self.ctx.set_shadow_color(if is_head {
                "rgba(175, 255, 122, 0.9)"
            } else {
                "rgba(100, 231, 150, 0.7)"
            });

            self.ctx
                .set_fill_style_str(if is_head { "#b4ff79" } else { "#59d17f" });
            self.ctx
                .fill_rect(x + 1.0, y + 1.0, CELL_SIZE - 2.0, CELL_SIZE - 2.0);

            // Eye dots on the head, faint scale dots down the body
            self.ctx.set_fill_style_str(if is_head {
                "#172413"
            } else {
                "rgba(22, 33, 24, 0.5)"
            });
            let eye = 3.0;
            match state.direction {
                Direction::Left | Direction::Right => {
                    let eye_x = if state.direction == Direction::Right {
                        x + CELL_SIZE - 7.0
                    } else {
                        x + 4.0
                    };
                    self.ctx.fill_rect(eye_x, y + 6.0, eye, eye);
                    self.ctx.fill_rect(eye_x, y + CELL_SIZE - 9.0, eye, eye);
                }
                Direction::Up | Direction::Down => {
                    let eye_y = if state.direction == Direction::Down {
                        y + CELL_SIZE - 7.0
                    } else {
                        y + 4.0
                    };
                    self.ctx.fill_rect(x + 6.0, eye_y, eye, eye);
                    self.ctx.fill_rect(x + CELL_SIZE - 9.0, eye_y, eye, eye);
                }
            }
            self.ctx.restore();
        }
    }
}
