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

use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading data, decomposing or recommending.
#[derive(Error, Debug)]
pub enum SvdRecError {
    #[error("no interaction matrix loaded")]
    NoDataLoaded,

    #[error("the matrix must be decomposed before computing similarities or recommendations")]
    DecompositionRequired,

    #[error("invalid rank {rank}, must be in 1..{max}")]
    InvalidRank { rank: usize, max: usize },

    #[error("index {index} out of bounds for dimension of size {bound}")]
    IndexOutOfBounds { index: usize, bound: usize },

    #[error("invalid encoder: {0}")]
    InvalidEncoder(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("singular value decomposition did not converge")]
    DecompositionFailed,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SvdRecError>;

/// Fails with `IndexOutOfBounds` unless `index < bound`.
pub(crate) fn check_index(index: usize, bound: usize) -> Result<usize> {
    if index < bound {
        Ok(index)
    } else {
        Err(SvdRecError::IndexOutOfBounds { index, bound })
    }
}

/// Maps a one-based ID onto its zero-based position, rejecting 0 and IDs beyond `bound`.
pub(crate) fn check_id(id: usize, bound: usize) -> Result<usize> {
    if id == 0 || id > bound {
        Err(SvdRecError::IndexOutOfBounds { index: id, bound })
    } else {
        Ok(id - 1)
    }
}
