use std::collections::HashSet;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use sheetnest::entities::Instance;
use sheetnest::geometry::primitives::{Point, Region};
use thousands::Separable;

/// Symmetric matrix of pairwise shape distances, with zeros on the diagonal.
/// Only the upper triangle is stored.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the FastDTW distance between every pair of vertex series.
    pub fn new(series: &[Vec<Point>], radius: usize, parallel: bool) -> Self {
        let n = series.len();
        let pairs = (0..n).tuple_combinations::<(usize, usize)>().collect_vec();
        let dist = |&(i, j): &(usize, usize)| fast_dtw(&series[i], &series[j], radius).0;

        let values: Vec<f64> = match parallel {
            true => pairs.par_iter().map(dist).collect(),
            false => pairs.iter().map(dist).collect(),
        };

        Self { n, values }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index out of bounds: ({i}, {j})");
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.values[self.condensed_index(i, j)],
            std::cmp::Ordering::Greater => self.values[self.condensed_index(j, i)],
        }
    }

    /// All unordered pairs `(i, j)` with `i < j`, by ascending distance.
    /// Ties keep their lexicographic order.
    pub fn sorted_pairs(&self) -> Vec<(usize, usize)> {
        (0..self.n)
            .tuple_combinations::<(usize, usize)>()
            .sorted_by_key(|&(i, j)| OrderedFloat(self.get(i, j)))
            .collect_vec()
    }

    /// Scans the sorted pairs and records every index the first time it appears.
    /// Indices which do not occur in any pair are appended in ascending order.
    pub fn placement_order(&self) -> Vec<usize> {
        let mut seen = vec![false; self.n];
        let mut order = Vec::with_capacity(self.n);

        let from_pairs = self.sorted_pairs().into_iter().flat_map(|(i, j)| [i, j]);
        for idx in from_pairs.chain(0..self.n) {
            if !seen[idx] {
                seen[idx] = true;
                order.push(idx);
            }
        }
        order
    }

    fn condensed_index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j);
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }
}

/// Ordered vertices of the piece's outer boundary, used as its time series
pub fn vertex_series(shape: &Region) -> Vec<Point> {
    shape.exterior_points()
}

/// Order in which the pieces of the instance are offered to the placement search:
/// most similar pairs first.
pub fn placement_order(instance: &Instance, radius: usize, parallel: bool) -> Vec<usize> {
    let start = Instant::now();
    let series = instance
        .pieces
        .iter()
        .map(|p| vertex_series(&p.shape))
        .collect_vec();

    let matrix = DistanceMatrix::new(&series, radius, parallel);
    let order = matrix.placement_order();

    info!(
        "[SIM] computed {} pairwise distances in {:.3}ms",
        (matrix.n() * matrix.n().saturating_sub(1) / 2).separate_with_commas(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    debug!("[SIM] placement order: {order:?}");

    order
}

/// A warping path: pairs of aligned indices, from `(0, 0)` to `(len_x - 1, len_y - 1)`
pub type WarpPath = Vec<(usize, usize)>;

/// Exact dynamic time warping, with the euclidean distance between points as cost.
pub fn dtw(x: &[Point], y: &[Point]) -> (f64, WarpPath) {
    match (x.is_empty(), y.is_empty()) {
        (true, true) => (0.0, vec![]),
        (true, false) | (false, true) => (f64::INFINITY, vec![]),
        (false, false) => windowed_dtw(x, y, &Window::full(x.len(), y.len())),
    }
}

/// Approximate dynamic time warping in linear time and space (Salvador & Chan).
///
/// Series are coarsened by averaging neighbouring points, aligned recursively,
/// and the coarse alignment, widened by `radius`, restricts the search at the finer resolution.
pub fn fast_dtw(x: &[Point], y: &[Point], radius: usize) -> (f64, WarpPath) {
    assert!(radius >= 1, "FastDTW radius must be at least 1");
    let min_time_size = radius + 2;
    if x.len() < min_time_size || y.len() < min_time_size {
        return dtw(x, y);
    }

    let x_shrunk = reduce_by_half(x);
    let y_shrunk = reduce_by_half(y);
    let (_, low_res_path) = fast_dtw(&x_shrunk, &y_shrunk, radius);
    let window = Window::expand(&low_res_path, x.len(), y.len(), radius);

    let (distance, path) = windowed_dtw(x, y, &window);
    match distance.is_finite() {
        true => (distance, path),
        false => {
            debug!("[SIM] FastDTW window did not connect both ends, falling back to exact DTW");
            dtw(x, y)
        }
    }
}

fn reduce_by_half(x: &[Point]) -> Vec<Point> {
    x.chunks_exact(2)
        .map(|c| Point((c[0].0 + c[1].0) / 2.0, (c[0].1 + c[1].1) / 2.0))
        .collect()
}

/// Cells of the cost matrix to evaluate: one contiguous (inclusive) range of `j` for every `i`
struct Window {
    rows: Vec<Option<(usize, usize)>>,
}

impl Window {
    fn full(len_x: usize, len_y: usize) -> Self {
        Self {
            rows: vec![Some((0, len_y - 1)); len_x],
        }
    }

    /// Projects a low resolution path onto the full resolution, widened by `radius` cells.
    fn expand(path: &[(usize, usize)], len_x: usize, len_y: usize, radius: usize) -> Self {
        let r = radius as isize;
        let widened: HashSet<(isize, isize)> = path
            .iter()
            .flat_map(|&(i, j)| {
                let (i, j) = (i as isize, j as isize);
                (-r..=r).flat_map(move |a| (-r..=r).map(move |b| (i + a, j + b)))
            })
            .collect();

        let cells: HashSet<(isize, isize)> = widened
            .iter()
            .flat_map(|&(i, j)| {
                [
                    (i * 2, j * 2),
                    (i * 2, j * 2 + 1),
                    (i * 2 + 1, j * 2),
                    (i * 2 + 1, j * 2 + 1),
                ]
            })
            .collect();

        //every row keeps the first contiguous run of cells, starting from where the previous row's run started
        let mut rows = Vec::with_capacity(len_x);
        let mut start_j = 0;
        for i in 0..len_x {
            let mut run: Option<(usize, usize)> = None;
            for j in start_j..len_y {
                match (cells.contains(&(i as isize, j as isize)), run) {
                    (true, None) => run = Some((j, j)),
                    (true, Some((lo, _))) => run = Some((lo, j)),
                    (false, Some(_)) => break,
                    (false, None) => {}
                }
            }
            if let Some((lo, _)) = run {
                start_j = lo;
            }
            rows.push(run);
        }
        Self { rows }
    }
}

#[derive(Clone, Copy)]
enum Step {
    Up,
    Left,
    Diagonal,
}

/// Dynamic time warping restricted to the cells of `window`.
/// Returns an infinite distance if the window does not connect both ends.
fn windowed_dtw(x: &[Point], y: &[Point], window: &Window) -> (f64, WarpPath) {
    let (len_x, len_y) = (x.len(), y.len());

    //offsets of every row within the flat cost storage
    let offsets = window
        .rows
        .iter()
        .scan(0, |acc, row| {
            let offset = *acc;
            *acc += row.map_or(0, |(lo, hi)| hi - lo + 1);
            Some(offset)
        })
        .collect_vec();
    let n_cells = window
        .rows
        .iter()
        .map(|row| row.map_or(0, |(lo, hi)| hi - lo + 1))
        .sum();

    let cell_idx = |i: usize, j: usize| -> Option<usize> {
        match window.rows[i] {
            Some((lo, hi)) if (lo..=hi).contains(&j) => Some(offsets[i] + j - lo),
            _ => None,
        }
    };

    let mut cost = vec![f64::INFINITY; n_cells];
    let mut steps = vec![Step::Diagonal; n_cells];

    // (i, j) refer to x[i] and y[j]; the virtual cell (-1, -1) has cost 0
    let cost_at = |cost: &[f64], i: Option<usize>, j: Option<usize>| -> f64 {
        match (i, j) {
            (None, None) => 0.0,
            (Some(i), Some(j)) => cell_idx(i, j).map_or(f64::INFINITY, |idx| cost[idx]),
            _ => f64::INFINITY,
        }
    };

    for i in 0..len_x {
        let Some((lo, hi)) = window.rows[i] else {
            continue;
        };
        for j in lo..=hi.min(len_y - 1) {
            let dt = x[i].distance(&y[j]);
            let (pi, pj) = (i.checked_sub(1), j.checked_sub(1));
            let candidates = [
                (cost_at(&cost, pi, Some(j)), Step::Up),
                (cost_at(&cost, Some(i), pj), Step::Left),
                (cost_at(&cost, pi, pj), Step::Diagonal),
            ];
            //first minimum wins
            let (best, step) = candidates
                .into_iter()
                .fold((f64::INFINITY, Step::Diagonal), |acc, c| match c.0 < acc.0 {
                    true => c,
                    false => acc,
                });
            if let Some(idx) = cell_idx(i, j) {
                cost[idx] = best + dt;
                steps[idx] = step;
            }
        }
    }

    let Some(end) = cell_idx(len_x - 1, len_y - 1) else {
        return (f64::INFINITY, vec![]);
    };
    let distance = cost[end];
    if !distance.is_finite() {
        return (f64::INFINITY, vec![]);
    }

    let mut path = vec![];
    let (mut i, mut j) = (len_x - 1, len_y - 1);
    loop {
        path.push((i, j));
        let Some(idx) = cell_idx(i, j) else {
            break;
        };
        match (steps[idx], i, j) {
            (_, 0, 0) => break,
            (Step::Up, i_, _) => i = i_ - 1,
            (Step::Left, _, j_) => j = j_ - 1,
            (Step::Diagonal, i_, j_) => (i, j) = (i_ - 1, j_ - 1),
        }
    }
    path.reverse();

    (distance, path)
}
