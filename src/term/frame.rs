//! Frame: a styled character buffer the renderer flushes to the terminal.
//!
//! Writes outside the frame are dropped, so views never have to clip.

use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for StyledCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<StyledCell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![StyledCell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Reset every cell to the default blank
    pub fn clear(&mut self) {
        self.cells.fill(StyledCell::default());
    }

    pub fn get(&self, x: u16, y: u16) -> Option<StyledCell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    pub fn put(&mut self, x: u16, y: u16, cell: StyledCell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, fg: Color, bg: Color) {
        self.put(x, y, StyledCell { ch, fg, bg });
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Color, bg: Color) {
        for (offset, ch) in text.chars().enumerate() {
            self.put_char(x + offset as u16, y, ch, fg, bg);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, cell: StyledCell) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.put(col, row, cell);
            }
        }
    }
}
