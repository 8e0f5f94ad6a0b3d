use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

use crate::config::TILE_SIZE;

/// Upper half-block glyph used for two-pixel-rows-per-cell compositing.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Drawing target for the presenter, addressed in logical pixels.
pub trait Surface {
    /// Paints the whole surface.
    fn fill(&mut self, color: Color);

    /// Paints `rect`, clipped to the surface.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Writes `text` with its baseline at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}

/// Surface backed by a ratatui buffer.
///
/// Every terminal cell holds two vertically stacked dots: the `▀` foreground
/// is the upper dot and the background the lower one. At `scale` 1 one tile
/// maps to one dot.
pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    scale: u16,
}

impl<'a> TerminalSurface<'a> {
    /// Wraps `buffer`, drawing only inside `area`.
    #[must_use]
    pub fn new(buffer: &'a mut Buffer, area: Rect, scale: u16) -> Self {
        let area = area.intersection(buffer.area);
        Self {
            buffer,
            area,
            scale: scale.max(1),
        }
    }

    // Floors, so pixels left of or above the origin never land on dot 0.
    fn dot_column(&self, pixel_x: i32) -> i32 {
        (pixel_x * i32::from(self.scale)).div_euclid(i32::from(TILE_SIZE))
    }

    fn dot_row(&self, pixel_y: i32) -> i32 {
        (pixel_y * i32::from(self.scale)).div_euclid(i32::from(TILE_SIZE))
    }

    fn paint_dot(&mut self, column: i32, dot_row: i32, color: Color) {
        let Some((x, y)) = self.cell_position(column, dot_row.div_euclid(2)) else {
            return;
        };
        let Some(cell) = self.buffer.cell_mut((x, y)) else {
            return;
        };

        if cell.symbol() != GLYPH_HALF_UPPER {
            let lower = cell.bg;
            cell.set_symbol(GLYPH_HALF_UPPER).set_fg(lower);
        }

        if dot_row.rem_euclid(2) == 0 {
            cell.set_fg(color);
        } else {
            cell.set_bg(color);
        }
    }

    fn cell_position(&self, column: i32, row: i32) -> Option<(u16, u16)> {
        let column = u16::try_from(column).ok()?;
        let row = u16::try_from(row).ok()?;

        let x = self.area.x.checked_add(column)?;
        let y = self.area.y.checked_add(row)?;
        if x >= self.area.right() || y >= self.area.bottom() {
            return None;
        }

        Some((x, y))
    }
}

impl Surface for TerminalSurface<'_> {
    fn fill(&mut self, color: Color) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(GLYPH_HALF_UPPER).set_fg(color).set_bg(color);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let columns = self.dot_column(rect.x)..self.dot_column(rect.x + rect.width);
        let dot_rows = self.dot_row(rect.y)..self.dot_row(rect.y + rect.height);

        for dot_row in dot_rows {
            for column in columns.clone() {
                self.paint_dot(column, dot_row, color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let row = self.dot_row(y).div_euclid(2);
        let mut column = self.dot_column(x);

        for character in text.chars() {
            let width = character.width().unwrap_or(0);
            if width == 0 {
                continue;
            }

            if let Some(position) = self.cell_position(column, row) {
                if let Some(cell) = self.buffer.cell_mut(position) {
                    cell.set_char(character).set_fg(color);
                }
            }
            column += width as i32;
        }
    }
}

/// Returns the terminal cells needed to show `logical` pixels at `scale`.
#[must_use]
pub fn cells_for(logical: Size, scale: u16) -> Size {
    let columns = u32::from(logical.width) * u32::from(scale) / u32::from(TILE_SIZE);
    let dot_rows = u32::from(logical.height) * u32::from(scale) / u32::from(TILE_SIZE);

    Size {
        width: u16::try_from(columns).unwrap_or(u16::MAX),
        height: u16::try_from(dot_rows.div_ceil(2)).unwrap_or(u16::MAX),
    }
}

/// Picks the largest scale up to `max_scale` whose play area fits `available`.
///
/// Falls back to 1 when nothing fits; the surface then clips.
#[must_use]
pub fn fit_scale(available: Size, logical: Size, max_scale: u16) -> u16 {
    (1..=max_scale.max(1))
        .rev()
        .find(|scale| {
            let needed = cells_for(logical, *scale);
            needed.width <= available.width && needed.height <= available.height
        })
        .unwrap_or(1)
}

/// Centres a play area of `size` cells inside `area`.
#[must_use]
pub fn centered(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::layout::{Rect, Size};
    use ratatui::style::Color;

    use super::{cells_for, centered, fit_scale, PixelRect, Surface, TerminalSurface};

    const LOGICAL: Size = Size {
        width: 320,
        height: 240,
    };

    #[test]
    fn fill_rect_paints_upper_and_lower_halves() {
        let area = Rect::new(0, 0, 64, 24);
        let mut buffer = Buffer::empty(area);
        let mut surface = TerminalSurface::new(&mut buffer, area, 1);

        surface.fill(Color::Black);
        surface.fill_rect(
            PixelRect {
                x: 5,
                y: 0,
                width: 5,
                height: 5,
            },
            Color::Green,
        );
        surface.fill_rect(
            PixelRect {
                x: 5,
                y: 5,
                width: 5,
                height: 5,
            },
            Color::Red,
        );

        let cell = &buffer[(1, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Green);
        assert_eq!(cell.bg, Color::Red);
        assert_eq!(buffer[(0, 0)].fg, Color::Black);
    }

    #[test]
    fn scale_two_covers_two_columns_and_one_full_row() {
        let area = Rect::new(0, 0, 128, 48);
        let mut buffer = Buffer::empty(area);
        let mut surface = TerminalSurface::new(&mut buffer, area, 2);

        surface.fill(Color::Black);
        surface.fill_rect(
            PixelRect {
                x: 10,
                y: 10,
                width: 5,
                height: 5,
            },
            Color::Green,
        );

        for x in 4..6 {
            assert_eq!(buffer[(x, 2)].fg, Color::Green);
            assert_eq!(buffer[(x, 2)].bg, Color::Green);
        }
        assert_eq!(buffer[(6, 2)].fg, Color::Black);
        assert_eq!(buffer[(4, 3)].fg, Color::Black);
    }

    #[test]
    fn drawing_outside_the_area_is_clipped() {
        let area = Rect::new(0, 0, 64, 24);
        let mut buffer = Buffer::empty(area);
        let mut surface = TerminalSurface::new(&mut buffer, area, 1);

        surface.fill_rect(
            PixelRect {
                x: 320,
                y: 120,
                width: 5,
                height: 5,
            },
            Color::Green,
        );
        surface.fill_rect(
            PixelRect {
                x: -5,
                y: 120,
                width: 5,
                height: 5,
            },
            Color::Green,
        );
        surface.draw_text("Score: 123", 300, 235, Color::White);

        assert_eq!(buffer[(60, 23)].symbol(), "S");
        assert_eq!(buffer[(63, 23)].symbol(), "r");
        assert!(buffer.content().iter().all(|cell| cell.fg != Color::Green));
    }

    #[test]
    fn text_lands_on_the_baseline_row() {
        let area = Rect::new(0, 0, 64, 24);
        let mut buffer = Buffer::empty(area);
        let mut surface = TerminalSurface::new(&mut buffer, area, 1);

        surface.draw_text("Score: 7", 5, 235, Color::White);

        let row: String = (1..9).map(|x| buffer[(x, 23)].symbol()).collect();
        assert_eq!(row, "Score: 7");
        assert_eq!(buffer[(1, 23)].fg, Color::White);
    }

    #[test]
    fn cells_needed_per_scale() {
        assert_eq!(
            cells_for(LOGICAL, 1),
            Size {
                width: 64,
                height: 24,
            }
        );
        assert_eq!(
            cells_for(LOGICAL, 2),
            Size {
                width: 128,
                height: 48,
            }
        );
    }

    #[test]
    fn fit_scale_prefers_largest_fitting_scale() {
        let roomy = Size {
            width: 200,
            height: 60,
        };
        let small = Size {
            width: 80,
            height: 30,
        };
        let tiny = Size {
            width: 20,
            height: 10,
        };

        assert_eq!(fit_scale(roomy, LOGICAL, 2), 2);
        assert_eq!(fit_scale(roomy, LOGICAL, 1), 1);
        assert_eq!(fit_scale(small, LOGICAL, 2), 1);
        assert_eq!(fit_scale(tiny, LOGICAL, 2), 1);
    }

    #[test]
    fn centered_area_stays_inside() {
        let area = Rect::new(0, 0, 80, 30);

        let inner = centered(
            area,
            Size {
                width: 64,
                height: 24,
            },
        );

        assert_eq!(inner, Rect::new(8, 3, 64, 24));

        let clamped = centered(
            area,
            Size {
                width: 128,
                height: 48,
            },
        );
        assert_eq!(clamped, area);
    }
}
