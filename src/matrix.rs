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

use nalgebra::DMatrix;
use sprs::TriMat;

use crate::error::{check_index, Result, SvdRecError};
use crate::types;
use crate::types::{DenseVector, SparseMatrix};

/// NaN or infinite ratings would keep the decomposition from converging.
fn check_finite(value: f64, row: usize, col: usize) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SvdRecError::MalformedInput(
            format!("rating {} at ({}, {}) is not a finite number", value, row, col)))
    }
}

/// The user-item interaction matrix in compressed sparse row format. Users are rows, items are
/// columns. Zero entries are never stored, they denote the absence of an interaction.
#[derive(Clone, Debug)]
pub struct InteractionMatrix {
    csr: SparseMatrix,
}

impl InteractionMatrix {

    /// Builds the matrix from dense rows. All rows must have the same length.
    pub fn from_dense<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {

        let num_rows = rows.len();
        let num_cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);

        if num_rows == 0 || num_cols == 0 {
            return Err(SvdRecError::MalformedInput(String::from("empty matrix")));
        }

        let mut triplets = TriMat::new((num_rows, num_cols));

        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();

            if row.len() != num_cols {
                return Err(SvdRecError::MalformedInput(format!(
                    "row {} has {} columns, expected {}", row_idx, row.len(), num_cols)));
            }

            for (col_idx, value) in row.iter().enumerate() {
                check_finite(*value, row_idx, col_idx)?;

                if *value != 0.0 {
                    triplets.add_triplet(row_idx, col_idx, *value);
                }
            }
        }

        Ok(InteractionMatrix { csr: triplets.to_csr() })
    }

    /// Builds the matrix from one-based `(user, item, value)` triplets. The shape is inferred from
    /// the largest ids seen, values of duplicate cells are summed up.
    pub fn from_triplets<T>(triplets: T) -> Result<Self>
        where T: IntoIterator<Item=(usize, usize, f64)> {

        let mut entries: Vec<(usize, usize, f64)> = Vec::new();
        let mut num_rows = 0;
        let mut num_cols = 0;

        for (row_id, col_id, value) in triplets {
            if row_id == 0 || col_id == 0 {
                return Err(SvdRecError::MalformedInput(format!(
                    "ids are one-based, found ({}, {})", row_id, col_id)));
            }

            check_finite(value, row_id - 1, col_id - 1)?;

            num_rows = num_rows.max(row_id);
            num_cols = num_cols.max(col_id);

            if value != 0.0 {
                entries.push((row_id - 1, col_id - 1, value));
            }
        }

        if num_rows == 0 {
            return Err(SvdRecError::MalformedInput(String::from("no triplets given")));
        }

        let mut matrix = TriMat::with_capacity((num_rows, num_cols), entries.len());
        for (row, col, value) in entries {
            matrix.add_triplet(row, col, value);
        }

        Ok(InteractionMatrix { csr: matrix.to_csr() })
    }

    /// Adopts an existing sparse matrix, converting it to row storage if necessary.
    pub fn from_csr(matrix: SparseMatrix) -> Result<Self> {
        for (value, (row, col)) in matrix.iter() {
            check_finite(*value, row, col)?;
        }

        let csr = if matrix.is_csr() { matrix } else { matrix.to_csr() };
        Ok(InteractionMatrix { csr })
    }

    /// `(num_users, num_items)`
    pub fn shape(&self) -> (usize, usize) {
        self.csr.shape()
    }

    pub fn num_users(&self) -> usize {
        self.csr.rows()
    }

    pub fn num_items(&self) -> usize {
        self.csr.cols()
    }

    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Value at the zero-based `(row, col)`, 0.0 if there is no interaction.
    pub fn cell(&self, row: usize, col: usize) -> Result<f64> {
        check_index(row, self.num_users())?;
        check_index(col, self.num_items())?;

        Ok(self.csr.get(row, col).cloned().unwrap_or(0.0))
    }

    /// Materializes the zero-based `row`, including the zeros of absent interactions.
    pub fn row(&self, row: usize) -> Result<DenseVector> {
        check_index(row, self.num_users())?;

        let mut dense = types::new_dense_vector(self.num_items());

        if let Some(sparse_row) = self.csr.outer_view(row) {
            for (col, value) in sparse_row.iter() {
                dense[col] = *value;
            }
        }

        Ok(dense)
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let (num_rows, num_cols) = self.shape();
        let mut dense = DMatrix::zeros(num_rows, num_cols);

        for (value, (row, col)) in self.csr.iter() {
            dense[(row, col)] = *value;
        }

        dense
    }

    pub fn as_csr(&self) -> &SparseMatrix {
        &self.csr
    }
}
