// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator itself.  Given a region, a sampling
//! density, a constant mode, and an iteration budget, it classifies
//! every lattice point by the iteration at which its orbit under
//! `z = z*z + c` first leaves the disc of radius 2, producing the
//! integer field a renderer consumes.
//!
//! The orbit state is held as flat, index-parallel buffers (current
//! iterate, constant term, active flag) rather than per-point
//! objects, so the hot loop allocates nothing.  Once a point escapes
//! its buffer entries are frozen; the pass loop stops as soon as no
//! point remains active.

use crossbeam::thread::ScopedJoinHandle;
use error::EvalError;
use grid::{Region, SampleGrid};
use itertools::iproduct;
use num::Complex;

/// Magnitude-squared form of the bailout radius 2.0.  Any orbit of
/// the quadratic map whose magnitude exceeds 2 is guaranteed to
/// diverge.
const BAILOUT_SQR: f64 = 4.0;

/// Selects the constant term of the recurrence.  Mandelbrot mode
/// makes each point its own constant with the orbit starting at zero;
/// Julia mode shares one fixed constant across every point, with each
/// orbit starting at the point itself.
///
/// A Julia constant of exactly zero is legal and distinct from
/// Mandelbrot mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConstantMode {
    /// Per-point constant, zero orbit start.
    Mandelbrot,
    /// Fixed constant, grid-point orbit start.
    Julia(Complex<f64>),
}

/// The result of one evaluation: the per-point escape iterations,
/// shaped like the sample grid that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeField {
    rows: usize,
    cols: usize,
    max_iterations: u32,
    iterations_run: usize,
    cells: Vec<u32>,
}

impl EscapeField {
    /// The number of rows (imaginary-axis samples).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns (real-axis samples).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A field built from a valid grid is never empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The escape iteration recorded at (row, column): the 0-based
    /// index of the pass on which the orbit's magnitude first
    /// exceeded the bailout radius, or the sentinel if it never did.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.cols + col]
    }

    /// Whether the point at (row, column) escaped within the budget.
    pub fn escaped(&self, row: usize, col: usize) -> bool {
        self.get(row, col) < self.max_iterations
    }

    /// The sentinel held by never-escaped cells, equal to the
    /// iteration budget the field was evaluated under.  Escape
    /// iterations are always strictly below it.
    pub fn sentinel(&self) -> u32 {
        self.max_iterations
    }

    /// The number of whole-grid passes actually executed.  At most
    /// the iteration budget, and lower when every point escaped
    /// before the budget was spent.
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// The raw escape buffer in row-major order.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}

fn check_evaluation_params(max_iterations: u32, threads: usize) -> Result<(), EvalError> {
    if max_iterations == 0 {
        return Err(EvalError::InvalidParameter(
            "iteration cap must be positive".to_string(),
        ));
    }
    if threads == 0 {
        return Err(EvalError::InvalidParameter(
            "thread count must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Runs the recurrence over one horizontal band of the grid.  `cells`
/// is the band's slice of the escape buffer, already filled with the
/// sentinel; `first_row` is the grid row its first entry corresponds
/// to.  Returns the number of passes executed over the band.
fn evaluate_band(
    grid: &SampleGrid,
    mode: ConstantMode,
    max_iterations: u32,
    first_row: usize,
    cells: &mut [u32],
) -> usize {
    let band_rows = cells.len() / grid.cols();

    let mut z: Vec<Complex<f64>> = Vec::with_capacity(cells.len());
    let mut c: Vec<Complex<f64>> = Vec::with_capacity(cells.len());
    for (row, col) in iproduct!(first_row..first_row + band_rows, 0..grid.cols()) {
        let point = grid.point(row, col);
        match mode {
            ConstantMode::Mandelbrot => {
                z.push(Complex::new(0.0, 0.0));
                c.push(point);
            }
            ConstantMode::Julia(constant) => {
                z.push(point);
                c.push(constant);
            }
        }
    }

    let mut active = vec![true; cells.len()];
    let mut remaining = cells.len();
    let mut passes = 0;

    for i in 0..max_iterations {
        if remaining == 0 {
            break;
        }
        passes += 1;
        for idx in 0..cells.len() {
            if !active[idx] {
                continue;
            }
            let next = z[idx] * z[idx] + c[idx];
            z[idx] = next;
            if next.norm_sqr() > BAILOUT_SQR {
                cells[idx] = i;
                active[idx] = false;
                remaining -= 1;
            }
        }
    }
    passes
}

/// Evaluates the escape field for `region` sampled at `density`,
/// iterating each point at most `max_iterations` times.
///
/// The output is deterministic: identical inputs produce bit-identical
/// fields.  Cells whose orbits never escape hold `max_iterations` as
/// a sentinel, so an escape on the very first pass (recorded as 0) is
/// distinguishable from no escape at all.
pub fn evaluate(
    region: &Region,
    density: f64,
    mode: ConstantMode,
    max_iterations: u32,
) -> Result<EscapeField, EvalError> {
    check_evaluation_params(max_iterations, 1)?;
    let grid = SampleGrid::new(region, density)?;

    let mut cells = vec![max_iterations; grid.len()];
    let iterations_run = evaluate_band(&grid, mode, max_iterations, 0, &mut cells);
    Ok(EscapeField {
        rows: grid.rows(),
        cols: grid.cols(),
        max_iterations,
        iterations_run,
        cells,
    })
}

/// The multi-threaded evaluation function.  Splits the grid into
/// horizontal bands, one scoped worker per band, and produces exactly
/// the field `evaluate` would: cells carry no dependency on each
/// other within a pass, so banding changes nothing but the wall
/// clock.
pub fn evaluate_threaded(
    region: &Region,
    density: f64,
    mode: ConstantMode,
    max_iterations: u32,
    threads: usize,
) -> Result<EscapeField, EvalError> {
    check_evaluation_params(max_iterations, threads)?;
    let grid = SampleGrid::new(region, density)?;

    let mut cells = vec![max_iterations; grid.len()];
    let band_rows = (grid.rows() / threads) + 1;
    let mut iterations_run = 0;
    crossbeam::scope(|spawner| {
        let grid = &grid;
        let handles: Vec<ScopedJoinHandle<usize>> = cells
            .chunks_mut(band_rows * grid.cols())
            .enumerate()
            .map(|(band, slice)| {
                spawner.spawn(move |_| {
                    evaluate_band(grid, mode, max_iterations, band * band_rows, slice)
                })
            })
            .collect();
        iterations_run = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .max()
            .unwrap_or(0);
    })
    .unwrap();

    Ok(EscapeField {
        rows: grid.rows(),
        cols: grid.cols(),
        max_iterations,
        iterations_run,
        cells,
    })
}
