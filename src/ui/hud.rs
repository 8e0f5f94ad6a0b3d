use crate::config::{Palette, SCREEN_HEIGHT};
use crate::surface::Surface;

const SCORE_TEXT_X: i32 = 5;
const SCORE_TEXT_BASELINE_Y: i32 = SCREEN_HEIGHT as i32 - 5;

/// Draws the running score at the bottom-left corner.
pub fn render_score(surface: &mut dyn Surface, score: u32, palette: &Palette) {
    surface.draw_text(
        &format!("Score: {score}"),
        SCORE_TEXT_X,
        SCORE_TEXT_BASELINE_Y,
        palette.text,
    );
}
