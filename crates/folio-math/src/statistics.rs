//! Sample statistics over period-by-asset return rows.
//!
//! Rows are periods, columns are assets. Covariance uses the sample
//! (n − 1) denominator.

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

fn check_rectangular(rows: &[Vec<f64>]) -> MathResult<usize> {
    let width = rows.first().map_or(0, Vec::len);
    match rows.iter().find(|r| r.len() != width) {
        Some(row) => Err(MathError::dimension_mismatch(width, row.len())),
        None => Ok(width),
    }
}

fn column(rows: &[Vec<f64>], col: usize) -> Vec<f64> {
    rows.iter().map(|r| r[col]).collect()
}

/// Column means.
///
/// # Errors
///
/// Fails on an empty input or ragged rows.
pub fn mean_vector(rows: &[Vec<f64>]) -> MathResult<Vec<f64>> {
    if rows.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    let width = check_rectangular(rows)?;
    Ok((0..width).map(|c| column(rows, c).mean()).collect())
}

/// Sample covariance matrix of the columns.
///
/// # Errors
///
/// Fails with fewer than two rows or ragged rows.
pub fn covariance_matrix(rows: &[Vec<f64>]) -> MathResult<Vec<Vec<f64>>> {
    if rows.len() < 2 {
        return Err(MathError::insufficient_data(2, rows.len()));
    }
    let width = check_rectangular(rows)?;
    let columns: Vec<Vec<f64>> = (0..width).map(|c| column(rows, c)).collect();

    let mut cov = vec![vec![0.0; width]; width];
    for i in 0..width {
        for j in i..width {
            let c = columns[i].iter().covariance(columns[j].iter());
            cov[i][j] = c;
            cov[j][i] = c;
        }
    }
    Ok(cov)
}

/// Dot product of two equal-length vectors.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `wᵀ M w`.
#[must_use]
pub fn quadratic_form(w: &[f64], m: &[Vec<f64>]) -> f64 {
    m.iter()
        .zip(w)
        .map(|(row, wi)| wi * dot(row, w))
        .sum()
}
