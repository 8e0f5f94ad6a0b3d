use std::time::Duration;

use ratatui::style::Color;

use crate::snake::Point;
use crate::surface::PixelRect;

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: u16 = 320;

/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: u16 = 240;

/// Edge length of one grid cell in pixels.
pub const TILE_SIZE: u16 = 5;

/// Playfield dimensions in cells.
pub const GRID: GridSize = GridSize::from_screen(SCREEN_WIDTH, SCREEN_HEIGHT, TILE_SIZE);

/// Frames per simulation step at the start of a game.
pub const INITIAL_SPEED: u32 = 10;

/// Fastest allowed cadence, in frames per simulation step.
pub const MIN_SPEED: u32 = 2;

/// Preferred display scale of the logical screen.
pub const WINDOW_SCALE: u16 = 2;

pub const WINDOW_TITLE: &str = "Snake Game";

/// Host frame rate.
pub const FRAMES_PER_SECOND: u32 = 60;

/// How long a key stays held after its last press when the terminal never
/// reports key releases.
pub const KEY_HOLD_FALLBACK: Duration = Duration::from_millis(200);

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Derives the cell grid that covers a screen of the given pixel size.
    #[must_use]
    pub const fn from_screen(screen_width: u16, screen_height: u16, tile_size: u16) -> Self {
        Self {
            width: screen_width / tile_size,
            height: screen_height / tile_size,
        }
    }

    /// Returns the cell where a fresh snake starts.
    #[must_use]
    pub fn center(self) -> Point {
        Point {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

/// Returns the pixel rectangle covered by the cell at `point`.
#[must_use]
pub fn tile_rect(point: Point) -> PixelRect {
    let tile = i32::from(TILE_SIZE);
    PixelRect {
        x: point.x * tile,
        y: point.y * tile,
        width: tile,
        height: tile,
    }
}

/// Colors used by the presenter.
#[derive(Debug)]
pub struct Palette {
    pub background: Color,
    pub snake: Color,
    pub food: Color,
    pub text: Color,
}

pub const PALETTE: Palette = Palette {
    background: Color::Rgb(0, 0, 0),
    snake: Color::Rgb(0, 255, 0),
    food: Color::Rgb(255, 0, 0),
    text: Color::Rgb(255, 255, 255),
};
