use crate::config::{Palette, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::surface::Surface;

const CENTER_X: i32 = SCREEN_WIDTH as i32 / 2;
const CENTER_Y: i32 = SCREEN_HEIGHT as i32 / 2;

/// Draws the game-over message and the restart hint.
pub fn render_game_over(surface: &mut dyn Surface, palette: &Palette) {
    surface.draw_text("Game Over", CENTER_X - 40, CENTER_Y, palette.text);
    surface.draw_text(
        "Press 'R' to restart",
        CENTER_X - 60,
        CENTER_Y + 16,
        palette.text,
    );
}
