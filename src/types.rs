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

use fnv::FnvHashSet;
use nalgebra::{DMatrix, DVector};
use sprs::CsMat;

pub type DenseVector = Vec<f64>;

pub type SparseMatrix = CsMat<f64>;

/// Latent factors, one row per user or item.
pub type FactorMatrix = DMatrix<f64>;
pub type SingularValues = DVector<f64>;

/// Unordered set of one-based item ids.
pub type ItemSet = FnvHashSet<usize>;

pub fn new_dense_vector(dimensions: usize) -> DenseVector {
    vec![0.0; dimensions]
}

pub fn new_item_set(capacity: usize) -> ItemSet {
    FnvHashSet::with_capacity_and_hasher(capacity, Default::default())
}
