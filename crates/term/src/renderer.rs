//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! Only cells that changed since the previous frame are rewritten. A size change
//! (or an explicit [`TerminalRenderer::invalidate`]) forces a full repaint.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// A horizontal stretch of changed cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    scratch: Vec<u8>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            scratch: Vec::with_capacity(32 * 1024),
            active: false,
        }
    }

    /// Switch to raw mode on the alternate screen with the cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.active = true;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.prev = None;
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush();
        terminal::disable_raw_mode().context("disable raw mode")?;
        flushed
    }

    /// Repaint everything on the next draw. Call after a terminal resize.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then keep a copy of it to diff the next frame against.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match self.prev.as_mut() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.scratch)?;
                prev.clone_from(fb);
            }
            _ => {
                encode_full_into(fb, &mut self.scratch)?;
                self.prev = Some(fb.clone());
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode a full repaint of `fb` as terminal commands.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            write_cell(out, fb.get(x, y).unwrap_or_default(), &mut style)?;
        }
    }

    reset_into(out)
}

/// Encode only the runs of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for_each_changed_run(prev, next, |run| {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            write_cell(out, next.get(x, run.y).unwrap_or_default(), &mut style)?;
        }
        Ok(())
    })?;
    reset_into(out)
}

/// Visit changed cells of `next` grouped into row runs. Every row is one run when
/// the sizes differ.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(Run) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    if prev.width() != w || prev.height() != next.height() {
        for y in 0..next.height() {
            f(Run { x: 0, y, len: w })?;
        }
        return Ok(());
    }

    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..w {
            let dirty = prev.get(x, y) != next.get(x, y);
            match (dirty, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    f(Run { x: s, y, len: x - s })?;
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            f(Run { x: s, y, len: w - s })?;
        }
    }
    Ok(())
}

fn write_cell(out: &mut Vec<u8>, cell: Cell, current: &mut Option<CellStyle>) -> Result<()> {
    if *current != Some(cell.style) {
        set_style_into(out, cell.style)?;
        *current = Some(cell.style);
    }
    out.queue(Print(cell.ch))?;
    Ok(())
}

fn set_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
        let mut runs = Vec::new();
        for_each_changed_run(prev, next, |run| {
            runs.push(run);
            Ok(())
        })
        .unwrap();
        runs
    }

    fn put(fb: &mut FrameBuffer, x: u16, y: u16, ch: char) {
        fb.put_char(x, y, ch, CellStyle::default());
    }

    #[test]
    fn adjacent_changes_form_one_run() {
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        for x in 1..=3 {
            put(&mut b, x, 0, 'X');
        }
        put(&mut b, 5, 1, 'Y');

        assert_eq!(
            changed_runs(&a, &b),
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 5, y: 1, len: 1 }]
        );
    }

    #[test]
    fn diff_moves_cursor_once_per_run() {
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        for x in 1..=3 {
            put(&mut b, x, 0, 'X');
        }
        put(&mut b, 5, 1, 'Y');

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // MoveTo is 1-based row;col.
        assert!(text.contains("\x1b[1;2H"));
        assert!(text.contains("\x1b[2;6H"));
        assert_eq!(text.matches('H').count(), 2);
        assert_eq!(text.matches('X').count(), 3);
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 4);
        assert!(changed_runs(&a, &a.clone()).is_empty());
    }

    #[test]
    fn size_change_marks_every_row() {
        let a = FrameBuffer::new(2, 2);
        let b = FrameBuffer::new(3, 3);
        let runs = changed_runs(&a, &b);
        assert_eq!(runs.len(), 3);
        assert!(runs.iter().all(|r| r.x == 0 && r.len == 3));
    }

    #[test]
    fn diff_output_contains_only_changed_glyphs() {
        let a = FrameBuffer::new(3, 1);
        let mut b = a.clone();
        put(&mut b, 2, 0, 'Q');

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('Q').count(), 1);

        let mut empty = Vec::new();
        encode_diff_into(&a, &a, &mut empty).unwrap();
        assert!(!String::from_utf8(empty).unwrap().contains('Q'));
    }

    #[test]
    fn full_output_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        put(&mut fb, 0, 0, 'A');
        put(&mut fb, 1, 0, 'B');
        put(&mut fb, 0, 1, 'C');
        put(&mut fb, 1, 1, 'D');

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for ch in ['A', 'B', 'C', 'D'] {
            assert!(text.contains(ch));
        }
    }
}
