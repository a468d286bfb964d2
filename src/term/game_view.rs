//! GameView: maps a `GameSnapshot` into a terminal frame.
//!
//! This module is pure (no I/O) and unit-testable, including the mouse
//! hit-testing that turns terminal coordinates back into grid cells.

use crossterm::style::Color;

use crate::core::snapshot::GameSnapshot;
use crate::types::{CellValue, GamePhase, GridCoordinate, EMPTY_CELL, GRID_COLS, GRID_ROWS};

/// Countdown progress for the depleting indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownView {
    pub remaining_ms: u64,
    pub delay_ms: u64,
}

/// Where the board sits inside the frame
const BOARD_X: u16 = 2;
const BOARD_Y: u16 = 2;
/// Terminal cells per grid cell; 4x2 compensates glyph aspect ratio
const CELL_W: u16 = 4;
const CELL_H: u16 = 2;

const PANEL_X: u16 = BOARD_X + GRID_COLS as u16 * CELL_W + 4;
const BAR_Y: u16 = BOARD_Y + GRID_ROWS as u16 * CELL_H + 1;
const BAR_WIDTH: u16 = GRID_COLS as u16 * CELL_W;

/// One display color per catalog value, indexed by `value - 1`
const PALETTE: [Color; 18] = [
    Color::AnsiValue(39),
    Color::AnsiValue(208),
    Color::AnsiValue(196),
    Color::AnsiValue(46),
    Color::AnsiValue(226),
    Color::AnsiValue(201),
    Color::AnsiValue(51),
    Color::AnsiValue(21),
    Color::AnsiValue(129),
    Color::AnsiValue(203),
    Color::AnsiValue(118),
    Color::AnsiValue(214),
    Color::AnsiValue(87),
    Color::AnsiValue(160),
    Color::AnsiValue(34),
    Color::AnsiValue(63),
    Color::AnsiValue(220),
    Color::AnsiValue(93),
];

fn value_color(value: CellValue) -> Color {
    let idx = (value as usize).saturating_sub(1) % PALETTE.len();
    PALETTE[idx]
}

#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn render(
        &self,
        snap: &GameSnapshot,
        countdown: CountdownView,
        frame: &mut crate::term::frame::Frame,
    ) {
        frame.put_str(BOARD_X, 0, "Q U I N T R I S", Color::White, Color::Reset);

        self.render_board(snap, frame);
        self.render_panel(snap, frame);
        self.render_countdown(countdown, frame);

        frame.put_str(
            BOARD_X,
            BAR_Y + 2,
            "arrows aim * enter place * x/z rotate * c swap * q quit",
            Color::DarkGrey,
            Color::Reset,
        );

        if snap.phase == GamePhase::GameOver {
            self.render_game_over(snap, frame);
        }
    }

    fn render_board(&self, snap: &GameSnapshot, frame: &mut crate::term::frame::Frame) {
        for y in 0..GRID_ROWS {
            for x in 0..GRID_COLS {
                let value = snap.grid[y as usize][x as usize];
                let bg = if value == EMPTY_CELL {
                    Color::AnsiValue(236)
                } else {
                    value_color(value)
                };
                self.fill_grid_cell(frame, x, y, ' ', Color::Reset, bg);
            }
        }

        // Overlay the current piece footprint at the aim cursor.
        if let Some(piece) = snap.current {
            let overlay_fg = if snap.aim_fits {
                Color::White
            } else {
                Color::Red
            };
            for px in 0..3i8 {
                for py in 0..3i8 {
                    if !piece.occupies(px, py) {
                        continue;
                    }
                    let gx = snap.aim.x - 1 + px;
                    let gy = snap.aim.y - 1 + py;
                    if gx < 0 || gx >= GRID_COLS || gy < 0 || gy >= GRID_ROWS {
                        continue;
                    }
                    let bg = if snap.aim_fits {
                        value_color(piece.value())
                    } else {
                        Color::AnsiValue(52)
                    };
                    self.fill_grid_cell(frame, gx, gy, '░', overlay_fg, bg);
                }
            }
        }

        // Aim cursor marker on the focused cell itself.
        let ax = BOARD_X + snap.aim.x as u16 * CELL_W;
        let ay = BOARD_Y + snap.aim.y as u16 * CELL_H;
        let marker = frame.get(ax, ay).unwrap_or_default();
        frame.put_char(ax, ay, '+', Color::Black, marker.bg);
    }

    fn fill_grid_cell(
        &self,
        frame: &mut crate::term::frame::Frame,
        x: i8,
        y: i8,
        ch: char,
        fg: Color,
        bg: Color,
    ) {
        let origin_x = BOARD_X + x as u16 * CELL_W;
        let origin_y = BOARD_Y + y as u16 * CELL_H;
        for row in 0..CELL_H {
            for col in 0..CELL_W {
                frame.put_char(origin_x + col, origin_y + row, ch, fg, bg);
            }
        }
    }

    fn render_panel(&self, snap: &GameSnapshot, frame: &mut crate::term::frame::Frame) {
        let fg = Color::White;
        frame.put_str(PANEL_X, BOARD_Y, &format!("SCORE {:>6}", snap.score), fg, Color::Reset);
        frame.put_str(
            PANEL_X,
            BOARD_Y + 1,
            &format!("LEVEL {:>6}", snap.level),
            fg,
            Color::Reset,
        );
        frame.put_str(
            PANEL_X,
            BOARD_Y + 2,
            &format!("LIVES {:>6}", snap.lives),
            fg,
            Color::Reset,
        );
        frame.put_str(
            PANEL_X,
            BOARD_Y + 3,
            &format!("MULT  {:>5}x", snap.multiplier),
            fg,
            Color::Reset,
        );

        frame.put_str(PANEL_X, BOARD_Y + 5, "NEXT", Color::DarkGrey, Color::Reset);
        self.render_preview(snap.current.as_ref(), PANEL_X, BOARD_Y + 6, frame);

        frame.put_str(PANEL_X, BOARD_Y + 10, "AFTER", Color::DarkGrey, Color::Reset);
        self.render_preview(snap.following.as_ref(), PANEL_X, BOARD_Y + 11, frame);
    }

    fn render_preview(
        &self,
        piece: Option<&crate::core::pieces::GamePiece>,
        origin_x: u16,
        origin_y: u16,
        frame: &mut crate::term::frame::Frame,
    ) {
        let Some(piece) = piece else {
            return;
        };
        for px in 0..3i8 {
            for py in 0..3i8 {
                let bg = if piece.occupies(px, py) {
                    value_color(piece.value())
                } else {
                    Color::AnsiValue(234)
                };
                let x = origin_x + px as u16 * 2;
                let y = origin_y + py as u16;
                frame.put_char(x, y, ' ', Color::Reset, bg);
                frame.put_char(x + 1, y, ' ', Color::Reset, bg);
            }
        }
    }

    fn render_countdown(&self, countdown: CountdownView, frame: &mut crate::term::frame::Frame) {
        let filled = if countdown.delay_ms == 0 {
            0
        } else {
            let ratio = countdown.remaining_ms.min(countdown.delay_ms) as f64
                / countdown.delay_ms as f64;
            (ratio * f64::from(BAR_WIDTH)).round() as u16
        };

        // green while comfortable, red when time is short
        let color = if filled * 3 <= BAR_WIDTH {
            Color::Red
        } else if filled * 2 <= BAR_WIDTH {
            Color::Yellow
        } else {
            Color::Green
        };

        for col in 0..BAR_WIDTH {
            let (ch, fg) = if col < filled {
                ('█', color)
            } else {
                ('░', Color::AnsiValue(238))
            };
            frame.put_char(BOARD_X + col, BAR_Y, ch, fg, Color::Reset);
        }
    }

    fn render_game_over(&self, snap: &GameSnapshot, frame: &mut crate::term::frame::Frame) {
        let mid_y = BOARD_Y + (GRID_ROWS as u16 * CELL_H) / 2;
        frame.put_str(
            BOARD_X + 2,
            mid_y - 1,
            "  G A M E  O V E R  ",
            Color::White,
            Color::AnsiValue(52),
        );
        frame.put_str(
            BOARD_X + 2,
            mid_y,
            &format!("   final score {:>5} ", snap.score),
            Color::White,
            Color::AnsiValue(52),
        );
    }

    /// Map a terminal coordinate to the grid cell under it, if any
    pub fn hit_test(&self, col: u16, row: u16) -> Option<GridCoordinate> {
        if col < BOARD_X || row < BOARD_Y {
            return None;
        }
        let x = (col - BOARD_X) / CELL_W;
        let y = (row - BOARD_Y) / CELL_H;
        if x >= GRID_COLS as u16 || y >= GRID_ROWS as u16 {
            return None;
        }
        Some(GridCoordinate::new(x as i8, y as i8))
    }
}
