//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame after `enter`, a resize or `invalidate` is painted in
//! full. After that only cells that differ from the previous frame are
//! written, and SGR codes are emitted only for the style parts that changed.
//! Mouse capture and focus reporting stay on while the alternate screen is
//! active.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: FrameBuffer,
    repaint: bool,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: FrameBuffer::new(0, 0),
            repaint: true,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(EnableFocusChange)?;
        self.flush_buf()?;
        self.repaint = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableFocusChange)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw.
    pub fn invalidate(&mut self) {
        self.repaint = true;
    }

    /// Draw `fb`, then swap it with the retained previous frame.
    ///
    /// Callers keep a single `FrameBuffer` and re-render into it each frame.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let sized = self.prev.width() == fb.width() && self.prev.height() == fb.height();

        self.buf.clear();
        if self.repaint || !sized {
            encode_full_into(fb, &mut self.buf)?;
            self.repaint = false;
        } else {
            encode_diff_into(&self.prev, fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        std::mem::swap(&mut self.prev, fb);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Paint every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            pen.print(out, cell.ch, cell.style)?;
        }
    }
    pen.finish(out)
}

/// Write the cells of `next` that differ from `prev`.
///
/// Both frames must have the same size. Consecutive changed cells share one
/// cursor move; identical frames produce no output.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    // Where the terminal cursor sits after the last printed glyph.
    let mut at: Option<(u16, u16)> = None;

    for (i, (old, new)) in prev.cells().iter().zip(next.cells()).enumerate() {
        if old == new {
            continue;
        }
        let x = (i % next.width() as usize) as u16;
        let y = (i / next.width() as usize) as u16;
        if at != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
        }
        pen.print(out, new.ch, new.style)?;
        at = Some((x + 1, y));
    }
    pen.finish(out)
}

/// Current terminal style while encoding one frame.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, ch: char, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        let attrs_changed = !matches!(prev, Some(p) if p.bold == style.bold && p.dim == style.dim);

        // SGR reset also clears colors, so both colors follow it.
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(color(style.bg)))?;
        }
        out.queue(Print(ch))?;
        Ok(())
    }

    fn finish(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(out: &[u8]) -> String {
        String::from_utf8_lossy(out).into_owned()
    }

    #[test]
    fn adjacent_changes_share_one_cursor_move() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        b.put_str(1, 0, "777", style);
        b.put_char(5, 1, '3', style);

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let s = text(&out);

        // MoveTo is 1-based on the wire: row;col.
        assert!(s.contains("\x1b[1;2H"));
        assert!(!s.contains("\x1b[1;3H"));
        assert!(s.contains("\x1b[2;6H"));
        assert!(s.contains("777"));
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(4, 3);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unchanged_style_is_not_repeated() {
        let a = FrameBuffer::new(4, 1);
        let mut b = a.clone();
        let gold = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(255, 215, 0));
        b.put_str(0, 0, "4  6", gold);

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert_eq!(text(&out).matches("48;2;255;215;0").count(), 1);
    }

    #[test]
    fn full_encode_paints_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "9+1", CellStyle::default());
        fb.put_str(0, 1, "=10", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let s = text(&out);
        assert!(s.contains("9+1"));
        assert!(s.contains("\x1b[2;1H"));
        assert!(s.contains("=10"));
    }
}
