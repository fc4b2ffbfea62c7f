//! Dense pairwise travel costs keyed by point identity.
//!
//! A [`CostMatrix`] holds kilometres between every ordered pair of points in
//! a single optimisation run. Rows and columns share the same index order,
//! and ids map back to that order for lookups by identity.

use std::collections::HashMap;

use thiserror::Error;

use crate::Point;

/// Errors from [`CostMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostMatrixError {
    /// The number of rows did not match the number of points.
    #[error("expected {expected} rows, found {actual}")]
    RowCount { expected: usize, actual: usize },
    /// A row had the wrong length.
    #[error("row {row} has {actual} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A cell was negative, NaN or infinite.
    #[error("cell ({row}, {column}) holds invalid distance {value}")]
    InvalidCell { row: usize, column: usize, value: f64 },
    /// Two points shared an identifier.
    #[error("point id {id} appears more than once")]
    DuplicateId { id: u64 },
}

/// Square matrix of non-negative distances in kilometres.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    ids: Vec<u64>,
    index: HashMap<u64, usize>,
    cells: Vec<f64>,
}

impl CostMatrix {
    /// Build a matrix by evaluating `cost` for every ordered pair of points.
    ///
    /// # Panics
    ///
    /// Panics if two points share an id; callers are expected to pass a
    /// distinct point set.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::{CostMatrix, Point};
    ///
    /// let points = vec![
    ///     Point::new(1, "A", "", 0.0, 0.0),
    ///     Point::new(2, "B", "", 0.0, 1.0),
    /// ];
    /// let matrix = CostMatrix::from_fn(&points, |from, to| {
    ///     if from.id == to.id { 0.0 } else { 5.0 }
    /// });
    /// assert_eq!(matrix.distance(1, 2), 5.0);
    /// ```
    pub fn from_fn<F>(points: &[Point], mut cost: F) -> Self
    where
        F: FnMut(&Point, &Point) -> f64,
    {
        let cells = points
            .iter()
            .flat_map(|from| points.iter().map(move |to| (from, to)))
            .map(|(from, to)| cost(from, to))
            .collect();
        Self::with_cells(points, cells)
            .unwrap_or_else(|err| panic!("cannot build cost matrix: {err}"))
    }

    /// Build a matrix from rows ordered like `points`.
    ///
    /// Rows must be square in the number of points and every cell must be a
    /// finite, non-negative distance.
    pub fn from_rows(points: &[Point], rows: Vec<Vec<f64>>) -> Result<Self, CostMatrixError> {
        let n = points.len();
        if rows.len() != n {
            return Err(CostMatrixError::RowCount {
                expected: n,
                actual: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(CostMatrixError::ColumnCount {
                    row,
                    expected: n,
                    actual: values.len(),
                });
            }
            for (column, value) in values.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(CostMatrixError::InvalidCell { row, column, value });
                }
                cells.push(value);
            }
        }
        Self::with_cells(points, cells)
    }

    fn with_cells(points: &[Point], cells: Vec<f64>) -> Result<Self, CostMatrixError> {
        let ids: Vec<u64> = points.iter().map(|point| point.id).collect();
        let mut index = HashMap::with_capacity(ids.len());
        for (position, &id) in ids.iter().enumerate() {
            if index.insert(id, position).is_some() {
                return Err(CostMatrixError::DuplicateId { id });
            }
        }
        Ok(Self { ids, index, cells })
    }

    /// Number of points covered by the matrix.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the matrix covers no points.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Point ids in row order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Row index of the point with `id`, if present.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Distance from row `from` to column `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn between(&self, from: usize, to: usize) -> f64 {
        let n = self.len();
        assert!(
            from < n && to < n,
            "cost matrix index ({from}, {to}) out of range for {n} points"
        );
        self.cells[from * n + to]
    }

    /// Distance between two points by id.
    ///
    /// # Panics
    ///
    /// Panics if either id is missing. Every point handed to a solver must
    /// appear as both a row and a column.
    pub fn distance(&self, from: u64, to: u64) -> f64 {
        self.between(self.require(from), self.require(to))
    }

    /// Return a matrix whose row order matches `points`.
    ///
    /// Solvers work on positions within their input slice; this realigns a
    /// matrix built from the same point set in a different order.
    ///
    /// # Panics
    ///
    /// Panics if any point id is missing from the matrix.
    pub fn aligned_to(&self, points: &[Point]) -> Self {
        if points.len() == self.len() && points.iter().map(|p| p.id).eq(self.ids.iter().copied())
        {
            return self.clone();
        }
        let positions: Vec<usize> = points.iter().map(|point| self.require(point.id)).collect();
        let cells = positions
            .iter()
            .flat_map(|&from| positions.iter().map(move |&to| (from, to)))
            .map(|(from, to)| self.between(from, to))
            .collect();
        Self::with_cells(points, cells)
            .unwrap_or_else(|err| panic!("cannot realign cost matrix: {err}"))
    }

    /// Whether `distance(a, b) == distance(b, a)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (i + 1..n).all(|j| self.between(i, j) == self.between(j, i)))
    }

    fn require(&self, id: u64) -> usize {
        self.index_of(id)
            .unwrap_or_else(|| panic!("point {id} is missing from the cost matrix"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn points() -> Vec<Point> {
        vec![
            Point::new(10, "A", "", 0.0, 0.0),
            Point::new(20, "B", "", 0.0, 1.0),
            Point::new(30, "C", "", 1.0, 1.0),
        ]
    }

    fn rows() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ]
    }

    #[rstest]
    fn from_rows_indexes_by_id(points: Vec<Point>) {
        let matrix = CostMatrix::from_rows(&points, rows()).expect("valid rows");
        assert_eq!(matrix.distance(10, 30), 2.0);
        assert_eq!(matrix.distance(30, 20), 6.0);
        assert_eq!(matrix.index_of(20), Some(1));
        assert!(!matrix.is_symmetric());
    }

    #[rstest]
    fn from_rows_rejects_short_row(points: Vec<Point>) {
        let mut bad = rows();
        bad[1].pop();
        let err = CostMatrix::from_rows(&points, bad).expect_err("short row");
        assert_eq!(
            err,
            CostMatrixError::ColumnCount {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
    }

    #[rstest]
    fn from_rows_rejects_missing_row(points: Vec<Point>) {
        let mut bad = rows();
        bad.pop();
        let err = CostMatrix::from_rows(&points, bad).expect_err("missing row");
        assert!(matches!(err, CostMatrixError::RowCount { expected: 3, actual: 2 }));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn from_rows_rejects_invalid_cells(points: Vec<Point>, #[case] value: f64) {
        let mut bad = rows();
        bad[2][0] = value;
        let err = CostMatrix::from_rows(&points, bad).expect_err("invalid cell");
        assert!(matches!(
            err,
            CostMatrixError::InvalidCell { row: 2, column: 0, .. }
        ));
    }

    #[rstest]
    fn from_rows_rejects_duplicate_ids() {
        let points = vec![
            Point::new(1, "A", "", 0.0, 0.0),
            Point::new(1, "A again", "", 0.0, 0.0),
        ];
        let err = CostMatrix::from_rows(&points, vec![vec![0.0, 0.0], vec![0.0, 0.0]])
            .expect_err("duplicate id");
        assert_eq!(err, CostMatrixError::DuplicateId { id: 1 });
    }

    #[rstest]
    fn aligned_to_reorders_rows_and_columns(points: Vec<Point>) {
        let matrix = CostMatrix::from_rows(&points, rows()).expect("valid rows");
        let reversed: Vec<Point> = points.iter().rev().cloned().collect();

        let aligned = matrix.aligned_to(&reversed);

        assert_eq!(aligned.ids(), &[30, 20, 10]);
        assert_eq!(aligned.between(0, 2), matrix.distance(30, 10));
        assert_eq!(aligned.between(2, 1), matrix.distance(10, 20));
    }

    #[rstest]
    #[should_panic(expected = "missing from the cost matrix")]
    fn distance_panics_on_unknown_id(points: Vec<Point>) {
        let matrix = CostMatrix::from_rows(&points, rows()).expect("valid rows");
        let _ = matrix.distance(10, 99);
    }
}
