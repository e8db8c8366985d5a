/**
 * SvdRec
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::time::Instant;

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SvdRecError};
use crate::matrix::InteractionMatrix;
use crate::types::{FactorMatrix, SingularValues};
use crate::utils;

/// Upper bound on the solver's iterations, non-convergence fails with `DecompositionFailed`.
const MAX_SVD_ITERATIONS: usize = 10_000;

/// A rank-k truncated singular value decomposition `U · diag(Σ) · Vᵗ` of an interaction matrix.
///
/// `u` has a row per user and `v` has a row per item, both with `rank` columns. The singular
/// triplets are stored in descending order of their singular values.
#[derive(Clone, Debug)]
pub struct Decomposition {
    u: FactorMatrix,
    singular_values: SingularValues,
    v: FactorMatrix,
}

impl Decomposition {

    /// The rank used when the caller does not ask for one.
    pub fn default_rank(matrix: &InteractionMatrix) -> usize {
        let (num_rows, num_cols) = matrix.shape();
        num_rows.min(num_cols).saturating_sub(1)
    }

    /// Decomposes `matrix`, keeping the `rank` largest singular values. The rank must be positive
    /// and smaller than both dimensions of the matrix.
    ///
    /// The matrix is densified for a full SVD, so memory and time grow with `num_users * num_items`.
    pub fn compute(matrix: &InteractionMatrix, rank: Option<usize>) -> Result<Self> {

        let (num_rows, num_cols) = matrix.shape();
        let max_rank = num_rows.min(num_cols);

        let rank = match rank {
            Some(rank) => rank,
            None => {
                let rank = Decomposition::default_rank(matrix);
                info!("Number of SVD dimensions not requested, using {} dimensions.", rank);
                rank
            }
        };

        if rank == 0 || rank >= max_rank {
            return Err(SvdRecError::InvalidRank { rank, max: max_rank });
        }

        let start = Instant::now();

        let svd = matrix.to_dense()
            .try_svd(true, true, f64::EPSILON, MAX_SVD_ITERATIONS)
            .ok_or(SvdRecError::DecompositionFailed)?;

        let (full_u, full_v_t) = match (svd.u, svd.v_t) {
            (Some(u), Some(v_t)) => (u, v_t),
            _ => return Err(SvdRecError::DecompositionFailed),
        };
        let full_singular_values = svd.singular_values;

        // Positions of the singular values, largest first
        let mut order: Vec<usize> = (0..full_singular_values.len()).collect();
        order.sort_by(|&a, &b| {
            full_singular_values[b].partial_cmp(&full_singular_values[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(rank);

        let u = DMatrix::from_fn(num_rows, rank, |row, k| full_u[(row, order[k])]);
        let singular_values = DVector::from_fn(rank, |k, _| full_singular_values[order[k]]);
        let v = DMatrix::from_fn(num_cols, rank, |row, k| full_v_t[(order[k], row)]);

        debug!("Decomposed {}x{} matrix at rank {} in {}ms",
            num_rows, num_cols, rank, utils::to_millis(start.elapsed()));

        Ok(Decomposition { u, singular_values, v })
    }

    /// Reassembles a decomposition from previously computed factors.
    pub fn from_factors(
        u: FactorMatrix,
        singular_values: SingularValues,
        v: FactorMatrix,
    ) -> Result<Self> {

        let rank = singular_values.len();

        if rank == 0 || u.ncols() != rank || v.ncols() != rank {
            return Err(SvdRecError::MalformedInput(format!(
                "factors of shape {:?} and {:?} do not match {} singular values",
                u.shape(), v.shape(), rank)));
        }

        Ok(Decomposition { u, singular_values, v })
    }

    pub fn rank(&self) -> usize {
        self.singular_values.len()
    }

    /// Left singular vectors, one row per user.
    pub fn u(&self) -> &FactorMatrix {
        &self.u
    }

    pub fn singular_values(&self) -> &SingularValues {
        &self.singular_values
    }

    /// Right singular vectors, one row per item.
    pub fn v(&self) -> &FactorMatrix {
        &self.v
    }

    pub fn num_users(&self) -> usize {
        self.u.nrows()
    }

    pub fn num_items(&self) -> usize {
        self.v.nrows()
    }

    /// Approximates the decomposed matrix as `U · diag(Σ) · Vᵗ`.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.u * DMatrix::from_diagonal(&self.singular_values) * self.v.transpose()
    }
}
