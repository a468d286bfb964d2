//! TerminalRenderer: flushes a frame to a real terminal.
//!
//! Draws a full frame on first use or resize, then per-cell diffs against
//! the previous frame to keep redraw traffic small.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::frame::Frame;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(EnableMouseCapture)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(DisableMouseCapture)?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let needs_full = match &self.last {
            Some(last) => last.width() != frame.width() || last.height() != frame.height(),
            None => true,
        };

        if needs_full {
            self.full_redraw(frame)?;
        } else if let Some(last) = self.last.take() {
            self.diff_redraw(frame, &last)?;
        }

        self.last = Some(frame.clone());
        Ok(())
    }

    fn full_redraw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let mut style: Option<(Color, Color)> = None;
        for y in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..frame.width() {
                let cell = frame.get(x, y).unwrap_or_default();
                if style != Some((cell.fg, cell.bg)) {
                    self.stdout.queue(SetForegroundColor(cell.fg))?;
                    self.stdout.queue(SetBackgroundColor(cell.bg))?;
                    style = Some((cell.fg, cell.bg));
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn diff_redraw(&mut self, next: &Frame, prev: &Frame) -> Result<()> {
        let mut style: Option<(Color, Color)> = None;

        for y in 0..next.height() {
            for x in 0..next.width() {
                let cell = next.get(x, y).unwrap_or_default();
                if prev.get(x, y) == Some(cell) {
                    continue;
                }
                self.stdout.queue(cursor::MoveTo(x, y))?;
                if style != Some((cell.fg, cell.bg)) {
                    self.stdout.queue(SetForegroundColor(cell.fg))?;
                    self.stdout.queue(SetBackgroundColor(cell.bg))?;
                    style = Some((cell.fg, cell.bg));
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
