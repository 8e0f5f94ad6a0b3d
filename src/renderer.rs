use crate::config::{Palette, tile_rect};
use crate::game::Snapshot;
use crate::surface::Surface;
use crate::ui::hud::render_score;
use crate::ui::menu::render_game_over;

/// Renders the full game frame from an immutable snapshot.
pub fn render(surface: &mut dyn Surface, snapshot: &Snapshot<'_>, palette: &Palette) {
    surface.fill(palette.background);

    for segment in snapshot.snake.segments() {
        surface.fill_rect(tile_rect(*segment), palette.snake);
    }

    surface.fill_rect(tile_rect(snapshot.food.position), palette.food);

    if snapshot.game_over {
        render_game_over(surface, palette);
    }

    render_score(surface, snapshot.score, palette);
}
