//! Character-cell drawing surface for the terminal.
//!
//! The canvas is sampled at the centre of each terminal cell. Paths are
//! rasterised with the even-odd rule when clipped, and paint accumulates
//! opacity per cell, so overlapping regions come out brighter.

use anyhow::Result;
use crossterm::{cursor::MoveTo, queue, style::Print};
use std::io::Write;

use crate::geo::Canvas;
use crate::terminator::RenderSurface;
use crate::terminator::contour::ray_crossings;

/// Glyphs from unlit to fully lit.
const SHADES: [char; 5] = ['.', '░', '▒', '▓', '█'];

#[derive(Debug, Clone)]
pub struct TerminalSurface {
    canvas: Canvas,
    columns: u16,
    rows: u16,
    light: Vec<f64>,
    clip: Vec<bool>,
    saved: Vec<Vec<bool>>,
    path: Vec<Vec<(f64, f64)>>,
}

impl TerminalSurface {
    pub fn new(canvas: Canvas, columns: u16, rows: u16) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let cells = columns as usize * rows as usize;
        Self {
            canvas,
            columns,
            rows,
            light: vec![0.0; cells],
            clip: vec![true; cells],
            saved: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Size the raster to the terminal, keeping the map's 2:1 shape with
    /// cells roughly twice as tall as they are wide.
    pub fn fit_to_terminal(canvas: Canvas) -> Self {
        let (term_columns, term_rows) = crossterm::terminal::size().unwrap_or((80, 24));
        // Leave room for the status lines.
        let max_rows = term_rows.saturating_sub(3).max(1);
        let columns = term_columns.min(max_rows.saturating_mul(4)).max(8);
        Self::new(canvas, columns, (columns / 4).max(1))
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Forget everything painted so far.
    pub fn clear(&mut self) {
        self.light.fill(0.0);
        self.clip.fill(true);
        self.saved.clear();
        self.path.clear();
    }

    /// Accumulated opacity of a cell, 0.0 to 1.0.
    pub fn level(&self, column: u16, row: u16) -> f64 {
        self.light[self.index(column, row)]
    }

    fn index(&self, column: u16, row: u16) -> usize {
        row as usize * self.columns as usize + column as usize
    }

    /// Canvas coordinate at the centre of a cell.
    fn sample_point(&self, column: u16, row: u16) -> (f64, f64) {
        let x = (column as f64 + 0.5) * self.canvas.width as f64 / self.columns as f64;
        let y = (row as f64 + 0.5) * self.canvas.height as f64 / self.rows as f64;
        (x, y)
    }

    fn path_contains(&self, x: f64, y: f64) -> bool {
        let crossings: usize = self
            .path
            .iter()
            .map(|subpath| ray_crossings(subpath.iter().copied(), x, y))
            .sum();
        crossings % 2 == 1
    }

    pub fn to_lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|column| {
                        let level = self.level(column, row);
                        let shade = (level * (SHADES.len() - 1) as f64).ceil() as usize;
                        SHADES[shade.min(SHADES.len() - 1)]
                    })
                    .collect()
            })
            .collect()
    }

    /// Queue the raster at the top-left of the terminal and flush.
    pub fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        for (row, line) in self.to_lines().iter().enumerate() {
            queue!(out, MoveTo(0, row as u16), Print(line))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl RenderSurface for TerminalSurface {
    fn save(&mut self) {
        self.saved.push(self.clip.clone());
    }

    fn restore(&mut self) {
        if let Some(clip) = self.saved.pop() {
            self.clip = clip;
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.path.last_mut()
            && let Some(&first) = subpath.first()
            && subpath.last() != Some(&first)
        {
            subpath.push(first);
        }
    }

    fn clip(&mut self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let (x, y) = self.sample_point(column, row);
                let inside = self.path_contains(x, y);
                let i = self.index(column, row);
                self.clip[i] &= inside;
            }
        }
        self.path.clear();
    }

    fn paint_with_alpha(&mut self, alpha: f64) {
        for (light, &visible) in self.light.iter_mut().zip(&self.clip) {
            if visible {
                *light = (*light + alpha).min(1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(surface: &mut TerminalSurface, x0: f64, y0: f64, x1: f64, y1: f64) {
        surface.move_to(x0, y0);
        surface.line_to(x1, y0);
        surface.line_to(x1, y1);
        surface.line_to(x0, y1);
        surface.close_path();
    }

    #[test]
    fn test_clip_and_paint_square() {
        let mut surface = TerminalSurface::new(Canvas::new(40, 20), 4, 2);
        surface.save();
        surface.begin_path();
        square(&mut surface, 0.0, 0.0, 20.0, 10.0);
        surface.clip();
        surface.paint_with_alpha(0.25);
        surface.restore();

        assert_eq!(surface.level(0, 0), 0.25);
        assert_eq!(surface.level(1, 0), 0.25);
        assert_eq!(surface.level(2, 0), 0.0);
        assert_eq!(surface.level(0, 1), 0.0);
        assert_eq!(surface.to_lines(), vec!["░░..".to_string(), "....".to_string()]);
    }

    #[test]
    fn test_even_odd_hole() {
        let mut surface = TerminalSurface::new(Canvas::new(30, 30), 3, 3);
        surface.begin_path();
        square(&mut surface, 0.0, 0.0, 30.0, 30.0);
        square(&mut surface, 10.0, 10.0, 20.0, 20.0);
        surface.clip();
        surface.paint_with_alpha(0.5);

        assert_eq!(surface.level(0, 0), 0.5);
        assert_eq!(surface.level(1, 1), 0.0);
        assert_eq!(surface.level(2, 2), 0.5);
    }

    #[test]
    fn test_restore_resets_clip() {
        let mut surface = TerminalSurface::new(Canvas::new(20, 10), 2, 1);
        surface.save();
        surface.begin_path();
        square(&mut surface, 0.0, 0.0, 10.0, 10.0);
        surface.clip();
        surface.restore();

        surface.paint_with_alpha(1.0);
        assert_eq!(surface.to_lines(), vec!["██".to_string()]);

        surface.clear();
        assert_eq!(surface.level(1, 0), 0.0);
    }

    #[test]
    fn test_draw_writes_every_row() {
        let surface = TerminalSurface::new(Canvas::new(20, 10), 2, 3);
        let mut out = Vec::new();
        surface.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("..").count(), 3);
    }
}
