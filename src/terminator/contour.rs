//! Marching-squares outline tracing.
//!
//! A cell is the square spanned by four sample pixels `step` apart. Its
//! corner pattern is a 4-bit mask (top-left 8, top-right 4, bottom-left 2,
//! bottom-right 1) and [`DIRECTION_TABLE`] picks the next cell so that the
//! inside of the region always stays on the left of travel. Outlines of a
//! region therefore run counter-clockwise on screen and outlines of its holes
//! run clockwise, which fills correctly under either fill rule.
//!
//! When the tracer moves, the two corners shared with the previous cell are
//! carried over through [`CARRY_TABLE`] and only the two new corners are
//! probed.

use anyhow::{Context, Result, bail};
use std::collections::HashSet;

use super::classifier::{Bounded, PixelPredicate};
use crate::constants::TRACE_ITERATION_FACTOR;
use crate::geo::{Canvas, PixelPoint};

pub const TOP_LEFT: u8 = 0b1000;
pub const TOP_RIGHT: u8 = 0b0100;
pub const BOTTOM_LEFT: u8 = 0b0010;
pub const BOTTOM_RIGHT: u8 = 0b0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Corners of the new cell that are already known after a move.
    pub const fn known_after_move(self) -> u8 {
        match self {
            Self::Up => BOTTOM_LEFT | BOTTOM_RIGHT,
            Self::Down => TOP_LEFT | TOP_RIGHT,
            Self::Left => TOP_RIGHT | BOTTOM_RIGHT,
            Self::Right => TOP_LEFT | BOTTOM_LEFT,
        }
    }

    /// Relocate the shared corners of `mask` into the new cell's positions.
    const fn carry(self, mask: u8) -> u8 {
        match self {
            // old top edge becomes the new bottom edge
            Self::Up => (mask & (TOP_LEFT | TOP_RIGHT)) >> 2,
            Self::Down => (mask & (BOTTOM_LEFT | BOTTOM_RIGHT)) << 2,
            // old left edge becomes the new right edge
            Self::Left => (mask & (TOP_LEFT | BOTTOM_LEFT)) >> 1,
            Self::Right => (mask & (TOP_RIGHT | BOTTOM_RIGHT)) << 1,
        }
    }

    fn apply(self, p: PixelPoint, step: i32) -> PixelPoint {
        let (dx, dy) = self.offset();
        PixelPoint::new(p.x + dx * step, p.y + dy * step)
    }
}

use Direction::{Down as D, Left as L, Right as R, Up as U};

/// Next move for each corner pattern. Empty and full cells move right,
/// which is also the search direction. The saddles 6 and 9 always resolve
/// the same way.
pub const DIRECTION_TABLE: [Direction; 16] = [R, D, L, L, R, D, L, L, U, U, U, U, R, D, R, R];

/// `CARRY_TABLE[direction][mask]`: lit corners of the next cell that are
/// known from the current one.
pub const CARRY_TABLE: [[u8; 16]; 4] = build_carry_table();

const fn build_carry_table() -> [[u8; 16]; 4] {
    let mut table = [[0u8; 16]; 4];
    let mut d = 0;
    while d < 4 {
        let direction = Direction::ALL[d];
        let mut mask = 0;
        while mask < 16 {
            table[d][mask] = direction.carry(mask as u8);
            mask += 1;
        }
        d += 1;
    }
    table
}

const CORNERS: [(u8, i32, i32); 4] = [
    (TOP_LEFT, 0, 0),
    (TOP_RIGHT, 1, 0),
    (BOTTOM_LEFT, 0, 1),
    (BOTTOM_RIGHT, 1, 1),
];

/// Corner values of the current cell: which are known, which are lit.
#[derive(Debug, Clone, Copy, Default)]
struct CornerWindow {
    known: u8,
    lit: u8,
}

impl CornerWindow {
    /// Probe the unknown corners. Returns the number of predicate calls.
    fn fill<P: PixelPredicate + ?Sized>(&mut self, origin: PixelPoint, step: i32, predicate: &P) -> usize {
        let mut probes = 0;
        for (bit, dx, dy) in CORNERS {
            if self.known & bit != 0 {
                continue;
            }
            if predicate.is_inside(PixelPoint::new(origin.x + dx * step, origin.y + dy * step)) {
                self.lit |= bit;
            }
            self.known |= bit;
            probes += 1;
        }
        probes
    }

    fn moved(self, direction: Direction) -> Self {
        Self {
            known: direction.known_after_move(),
            lit: CARRY_TABLE[direction as usize][self.lit as usize],
        }
    }
}

/// Grid and canvas parameters shared by every trace of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOptions {
    pub canvas: Canvas,
    /// Distance between sample pixels.
    pub step: u32,
    /// How far beyond the canvas the bounded pass still follows the edge.
    pub margin: u32,
}

impl TraceOptions {
    pub fn new(canvas: Canvas, step: u32, margin: u32) -> Self {
        Self {
            canvas: Canvas::new(canvas.width, canvas.height),
            step: step.max(1),
            margin,
        }
    }

    /// Interior seed used by the second pass: left edge, middle row.
    pub fn default_hint(&self) -> PixelPoint {
        PixelPoint::new(0, (self.canvas.height / 2) as i32)
    }

    /// Start of the bounded pass: two cells left of the margin, on the hint's
    /// row and on the hint's grid.
    pub fn outer_start(&self, hint: PixelPoint) -> PixelPoint {
        let cells = self.margin.div_ceil(self.step) + 2;
        PixelPoint::new(hint.x - (cells * self.step) as i32, hint.y)
    }

    /// Searching further right than this means the row has no boundary.
    fn search_limit(&self) -> i32 {
        (self.canvas.width + self.margin + self.step) as i32
    }

    /// Upper bound on visited cells; a closed outline never needs more.
    pub fn max_iterations(&self) -> u64 {
        let pad = 2 * (self.margin as u64 + 2 * self.step as u64);
        let columns = (self.canvas.width as u64 + pad) / self.step as u64 + 2;
        let rows = (self.canvas.height as u64 + pad) / self.step as u64 + 2;
        columns * rows * TRACE_ITERATION_FACTOR
    }

    /// Whether all four corners of the cell at `origin` are on the canvas.
    fn cell_on_canvas(&self, origin: PixelPoint) -> bool {
        let step = self.step as i32;
        self.canvas.contains(origin)
            && self
                .canvas
                .contains(PixelPoint::new(origin.x + step, origin.y + step))
    }
}

/// Closed outline: cell anchors in travel order, first equal to last.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    points: Vec<PixelPoint>,
}

impl Contour {
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Shoelace area in screen coordinates (y down). Negative for outlines
    /// that run counter-clockwise on screen.
    pub fn signed_area(&self) -> f64 {
        let twice: i64 = self
            .points
            .windows(2)
            .map(|w| w[0].x as i64 * w[1].y as i64 - w[1].x as i64 * w[0].y as i64)
            .sum();
        twice as f64 / 2.0
    }

    /// Odd number of crossings to the right of (x, y).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        ray_crossings(self.points.iter().map(|p| (p.x as f64, p.y as f64)), x, y) % 2 == 1
    }
}

/// Even-odd membership over a set of outlines.
pub fn even_odd_contains(contours: &[Contour], x: f64, y: f64) -> bool {
    contours
        .iter()
        .map(|c| ray_crossings(c.points.iter().map(|p| (p.x as f64, p.y as f64)), x, y))
        .sum::<usize>()
        % 2
        == 1
}

/// Number of polygon edges crossed by a ray from (x, y) towards +x.
/// The polygon is closed implicitly.
pub(crate) fn ray_crossings<I>(points: I, x: f64, y: f64) -> usize
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return 0;
    };

    let mut crossings = 0;
    let mut prev = first;
    for cur in iter.chain(std::iter::once(first)) {
        if (prev.1 > y) != (cur.1 > y) {
            let xi = prev.0 + (y - prev.1) * (cur.0 - prev.0) / (cur.1 - prev.1);
            if x < xi {
                crossings += 1;
            }
        }
        prev = cur;
    }
    crossings
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceState {
    /// Moving right along the start row looking for a boundary cell.
    Searching,
    /// Following the boundary; reaching the first boundary cell again closes it.
    Tracing,
}

/// Result of one successful trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutcome {
    pub contour: Contour,
    /// Some boundary cell lay entirely on the visible canvas.
    pub touched_canvas: bool,
    pub iterations: u64,
    pub probes: usize,
}

/// Trace a single outline starting the search at `start`.
///
/// Returns `Ok(None)` when the start row holds no boundary up to just past
/// the right edge. Exceeding the iteration bound is an error: the predicate
/// produced a boundary that never closes.
pub fn trace<P: PixelPredicate + ?Sized>(
    predicate: &P,
    start: PixelPoint,
    options: &TraceOptions,
) -> Result<Option<TraceOutcome>> {
    trace_skipping(predicate, start, options, &HashSet::new())
}

/// Like [`trace`], but the search walks past boundary cells in `skip`.
fn trace_skipping<P: PixelPredicate + ?Sized>(
    predicate: &P,
    start: PixelPoint,
    options: &TraceOptions,
    skip: &HashSet<PixelPoint>,
) -> Result<Option<TraceOutcome>> {
    let step = options.step as i32;
    let max_iterations = options.max_iterations();
    let search_limit = options.search_limit();

    let mut state = TraceState::Searching;
    let mut origin = start;
    let mut window = CornerWindow::default();
    let mut path_start = start;
    let mut points = Vec::new();
    let mut touched_canvas = false;
    let mut probes = 0;

    for iteration in 1..=max_iterations {
        probes += window.fill(origin, step, predicate);
        let pattern = window.lit;

        match state {
            TraceState::Searching => {
                if pattern != 0 && pattern != 0b1111 && !skip.contains(&origin) {
                    state = TraceState::Tracing;
                    path_start = origin;
                    points.push(origin);
                    touched_canvas |= options.cell_on_canvas(origin);
                } else if origin.x > search_limit {
                    return Ok(None);
                }
            }
            TraceState::Tracing => {
                points.push(origin);
                if origin == path_start {
                    return Ok(Some(TraceOutcome {
                        contour: Contour { points },
                        touched_canvas,
                        iterations: iteration,
                        probes,
                    }));
                }
                touched_canvas |= options.cell_on_canvas(origin);
            }
        }

        // The search only ever moves right, including over skipped cells.
        let direction = match state {
            TraceState::Searching => Direction::Right,
            TraceState::Tracing => DIRECTION_TABLE[pattern as usize],
        };
        origin = direction.apply(origin, step);
        window = window.moved(direction);
    }

    bail!(
        "Contour did not close within {} cells (start ({}, {}), step {}, last cell ({}, {}), {} vertices, state {:?})",
        max_iterations,
        start.x,
        start.y,
        step,
        origin.x,
        origin.y,
        points.len(),
        state
    )
}

/// Trace the outline of a region, including one hole.
///
/// The first pass runs on the bounded predicate from outside the canvas on
/// the hint's row, which finds the outer outline even when the region covers
/// the whole border. The second pass searches the same row from `hint` on
/// the same grid, walking past the cells the outer outline already owns; the
/// first other boundary cell it meets belongs to a hole (or to a separate
/// piece of the region), which is traced as the second contour.
pub fn trace_contours<P: PixelPredicate + ?Sized>(
    predicate: &P,
    hint: PixelPoint,
    options: &TraceOptions,
) -> Result<Vec<Contour>> {
    let bounded = Bounded::new(predicate, options.canvas, options.margin);
    let Some(outer) = trace(&bounded, options.outer_start(hint), options)
        .context("Failed to trace the outer contour")?
    else {
        return Ok(Vec::new());
    };

    let owned: HashSet<PixelPoint> = outer
        .contour
        .points
        .iter()
        .copied()
        .filter(|p| p.y == hint.y)
        .collect();
    let inner = trace_skipping(&bounded, hint, options, &owned)
        .context("Failed to trace the inner contour")?;

    let mut contours = vec![outer.contour];
    contours.extend(inner.map(|outcome| outcome.contour));
    Ok(contours)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(width: u32, height: u32, step: u32, margin: u32) -> TraceOptions {
        TraceOptions::new(Canvas::new(width, height), step, margin)
    }

    /// Corners on the left and right of travel when crossing each cell edge.
    fn edge_sides(direction: Direction) -> (u8, u8) {
        match direction {
            Direction::Up => (TOP_LEFT, TOP_RIGHT),
            Direction::Down => (BOTTOM_RIGHT, BOTTOM_LEFT),
            Direction::Left => (BOTTOM_LEFT, TOP_LEFT),
            Direction::Right => (TOP_RIGHT, BOTTOM_RIGHT),
        }
    }

    #[test]
    fn test_direction_table_keeps_inside_on_the_left() {
        for pattern in 1u8..15 {
            let (left, right) = edge_sides(DIRECTION_TABLE[pattern as usize]);
            assert_ne!(pattern & left, 0, "pattern {pattern:04b}: left corner unlit");
            assert_eq!(pattern & right, 0, "pattern {pattern:04b}: right corner lit");
        }
    }

    #[test]
    fn test_search_moves_right() {
        assert_eq!(DIRECTION_TABLE[0], Direction::Right);
        assert_eq!(DIRECTION_TABLE[15], Direction::Right);
    }

    #[test]
    fn test_carry_table() {
        let right = Direction::Right as usize;
        assert_eq!(CARRY_TABLE[right][(TOP_RIGHT | BOTTOM_RIGHT) as usize], TOP_LEFT | BOTTOM_LEFT);
        assert_eq!(CARRY_TABLE[right][(TOP_LEFT | BOTTOM_LEFT) as usize], 0);

        let up = Direction::Up as usize;
        assert_eq!(CARRY_TABLE[up][TOP_LEFT as usize], BOTTOM_LEFT);

        let down = Direction::Down as usize;
        assert_eq!(CARRY_TABLE[down][BOTTOM_RIGHT as usize], TOP_RIGHT);

        let left = Direction::Left as usize;
        assert_eq!(CARRY_TABLE[left][0b1111], TOP_RIGHT | BOTTOM_RIGHT);
    }

    #[test]
    fn test_carried_bits_are_known() {
        for direction in Direction::ALL {
            for mask in 0u8..16 {
                let carried = CARRY_TABLE[direction as usize][mask as usize];
                assert_eq!(carried & !direction.known_after_move(), 0);
            }
        }
    }

    #[test]
    fn test_square_traces_closed() {
        let square = |p: PixelPoint| (10..20).contains(&p.x) && (10..20).contains(&p.y);
        let outcome = trace(&square, PixelPoint::new(0, 15), &options(32, 32, 1, 2))
            .unwrap()
            .unwrap();

        let contour = &outcome.contour;
        assert!(contour.is_closed());
        assert_eq!(contour.points()[0], PixelPoint::new(9, 15));
        assert_eq!(contour.signed_area().abs(), 100.0);
        assert!(contour.contains(15.0, 15.0));
        assert!(!contour.contains(25.0, 15.0));
        assert!(outcome.touched_canvas);
        // One probe per new corner: at most two per step after the first cell.
        assert!(outcome.probes as u64 <= 2 * outcome.iterations + 2);
    }

    #[test]
    fn test_empty_and_full_rows_return_none() {
        let opts = options(32, 32, 2, 2);
        let nothing = |_: PixelPoint| false;
        let everything = |_: PixelPoint| true;
        assert!(trace(&nothing, PixelPoint::new(0, 16), &opts).unwrap().is_none());
        assert!(trace(&everything, PixelPoint::new(0, 16), &opts).unwrap().is_none());
    }

    #[test]
    fn test_unclosed_boundary_is_an_error() {
        // An unbounded half-plane: the outline runs down forever.
        let half_plane = |p: PixelPoint| p.x >= 5;
        let err = trace(&half_plane, PixelPoint::new(0, 0), &options(16, 16, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("did not close"));
    }

    #[test]
    fn test_trace_contours_single_region() {
        let opts = options(40, 30, 1, 3);
        let square = |p: PixelPoint| (10..20).contains(&p.x) && (5..25).contains(&p.y);
        let contours = trace_contours(&square, opts.default_hint(), &opts).unwrap();
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn test_trace_contours_with_hole() {
        let opts = options(40, 30, 1, 3);
        let ring = |p: PixelPoint| !((15..25).contains(&p.x) && (10..20).contains(&p.y));
        let contours = trace_contours(&ring, opts.default_hint(), &opts).unwrap();

        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(Contour::is_closed));
        // Outer outline and hole run in opposite directions.
        assert!(contours[0].signed_area() * contours[1].signed_area() < 0.0);

        assert!(even_odd_contains(&contours, 2.0, 2.0));
        assert!(!even_odd_contains(&contours, 20.0, 15.0));
    }

    #[test]
    fn test_trace_contours_nothing_lit() {
        let opts = options(40, 30, 2, 3);
        let nothing = |_: PixelPoint| false;
        assert!(trace_contours(&nothing, opts.default_hint(), &opts).unwrap().is_empty());
    }

    #[test]
    fn test_trace_contours_everything_lit() {
        let opts = options(40, 30, 2, 3);
        let everything = |_: PixelPoint| true;
        let contours = trace_contours(&everything, opts.default_hint(), &opts).unwrap();
        assert_eq!(contours.len(), 1);
        assert!(even_odd_contains(&contours, 0.0, 0.0));
        assert!(even_odd_contains(&contours, 39.0, 29.0));
    }

    #[test]
    fn test_zero_sized_canvas_traces_its_margin() {
        let opts = TraceOptions::new(Canvas { width: 0, height: 0 }, 0, 2);
        assert_eq!(opts.canvas, Canvas::new(1, 1));

        let everything = |_: PixelPoint| true;
        let contours = trace_contours(&everything, opts.default_hint(), &opts).unwrap();
        assert_eq!(contours.len(), 1);
        assert!(even_odd_contains(&contours, 0.0, 0.0));
    }

    #[test]
    fn test_ray_crossings_closes_polygon() {
        let square = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        assert_eq!(ray_crossings(square, 2.0, 2.0), 1);
        assert_eq!(ray_crossings(square, 5.0, 2.0), 0);
        assert_eq!(ray_crossings(square, -1.0, 2.0), 2);
    }
}
