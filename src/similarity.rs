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

// Similarities in the latent space are plain dot products of factor rows. They are NOT
// normalized, so they are not cosine similarities and depend on the length of the factor rows.
// All indices are zero-based.

use crate::decomposition::Decomposition;
use crate::error::{check_index, Result};
use crate::types::FactorMatrix;

#[inline(always)]
fn dot_rows(a: &FactorMatrix, row_a: usize, b: &FactorMatrix, row_b: usize) -> f64 {
    a.row(row_a).dot(&b.row(row_b))
}

/// Dot product of the item factors of `item_a` and `item_b`.
pub fn item_similarity(decomposition: &Decomposition, item_a: usize, item_b: usize) -> Result<f64> {
    let num_items = decomposition.num_items();
    check_index(item_a, num_items)?;
    check_index(item_b, num_items)?;

    Ok(dot_rows(decomposition.v(), item_a, decomposition.v(), item_b))
}

/// Dot product of the user factors of `user_a` and `user_b`.
pub fn user_similarity(decomposition: &Decomposition, user_a: usize, user_b: usize) -> Result<f64> {
    let num_users = decomposition.num_users();
    check_index(user_a, num_users)?;
    check_index(user_b, num_users)?;

    Ok(dot_rows(decomposition.u(), user_a, decomposition.u(), user_b))
}

/// Dot product of the factors of `user` and `item`. Serves both as the affinity of a user for an
/// item and as the predicted rating.
pub fn user_item_score(decomposition: &Decomposition, user: usize, item: usize) -> Result<f64> {
    check_index(user, decomposition.num_users())?;
    check_index(item, decomposition.num_items())?;

    Ok(dot_rows(decomposition.u(), user, decomposition.v(), item))
}


#[cfg(test)]
mod tests {

    use crate::decomposition::Decomposition;
    use crate::error::SvdRecError;
    use crate::matrix::InteractionMatrix;
    use crate::similarity;

    fn decomposition() -> Decomposition {
        let matrix = InteractionMatrix::from_dense(&[
            vec![5.0, 3.0, 0.0, 1.0, 0.0],
            vec![4.0, 0.0, 0.0, 1.0, 2.0],
            vec![1.0, 1.0, 0.0, 5.0, 0.0],
            vec![0.0, 1.0, 5.0, 4.0, 3.0],
        ]).unwrap();

        Decomposition::compute(&matrix, Some(2)).unwrap()
    }

    #[test]
    fn similarities_are_symmetric() {
        let decomposition = decomposition();

        for a in 0..5 {
            for b in 0..5 {
                assert_eq!(
                    similarity::item_similarity(&decomposition, a, b).unwrap(),
                    similarity::item_similarity(&decomposition, b, a).unwrap());
            }
        }

        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(
                    similarity::user_similarity(&decomposition, a, b).unwrap(),
                    similarity::user_similarity(&decomposition, b, a).unwrap());
            }
        }
    }

    #[test]
    fn similarities_are_unnormalized_dot_products() {
        let decomposition = decomposition();
        let v = decomposition.v();
        let u = decomposition.u();

        let expected_items = v[(1, 0)] * v[(3, 0)] + v[(1, 1)] * v[(3, 1)];
        let expected_users = u[(0, 0)] * u[(2, 0)] + u[(0, 1)] * u[(2, 1)];
        let expected_score = u[(2, 0)] * v[(4, 0)] + u[(2, 1)] * v[(4, 1)];

        let items = similarity::item_similarity(&decomposition, 1, 3).unwrap();
        let users = similarity::user_similarity(&decomposition, 0, 2).unwrap();
        let score = similarity::user_item_score(&decomposition, 2, 4).unwrap();

        assert!((items - expected_items).abs() < 1e-12);
        assert!((users - expected_users).abs() < 1e-12);
        assert!((score - expected_score).abs() < 1e-12);
    }

    #[test]
    fn scores_are_deterministic() {
        let decomposition = decomposition();

        for user in 0..4 {
            for item in 0..5 {
                let first = similarity::user_item_score(&decomposition, user, item).unwrap();
                let second = similarity::user_item_score(&decomposition, user, item).unwrap();
                assert_eq!(first.to_bits(), second.to_bits());
            }
        }
    }

    #[test]
    fn indices_are_checked() {
        let decomposition = decomposition();

        assert!(matches!(
            similarity::item_similarity(&decomposition, 0, 5),
            Err(SvdRecError::IndexOutOfBounds { index: 5, bound: 5 })));
        assert!(matches!(
            similarity::user_similarity(&decomposition, 4, 0),
            Err(SvdRecError::IndexOutOfBounds { index: 4, bound: 4 })));
        assert!(matches!(
            similarity::user_item_score(&decomposition, 0, 9),
            Err(SvdRecError::IndexOutOfBounds { .. })));
    }
}
