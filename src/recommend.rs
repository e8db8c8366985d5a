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

// Recommendations take and return one-based user and item ids.

use crate::decomposition::Decomposition;
use crate::error::{check_id, Result};
use crate::matrix::InteractionMatrix;
use crate::ranking;
use crate::ranking::ScoredItem;
use crate::similarity;
use crate::types;
use crate::types::ItemSet;

/// The `count` items closest to `item_id` in the latent space, best first. The item itself is a
/// candidate as well and will usually come first.
pub fn similar_items(
    decomposition: &Decomposition,
    item_id: usize,
    count: usize,
) -> Result<Vec<ScoredItem>> {

    let num_items = decomposition.num_items();
    let item_idx = check_id(item_id, num_items)?;

    let mut candidates = Vec::with_capacity(num_items);
    for other_item_idx in 0..num_items {
        let score = similarity::item_similarity(decomposition, item_idx, other_item_idx)?;
        candidates.push(ScoredItem { item: other_item_idx + 1, score });
    }

    Ok(ranking::top_n(candidates, count))
}

/// The `count` items with the highest predicted score for `user_id`, best first. Items the user
/// already interacted with are not filtered out.
pub fn recommend_for_user(
    decomposition: &Decomposition,
    user_id: usize,
    count: usize,
) -> Result<Vec<ScoredItem>> {

    let num_items = decomposition.num_items();
    let user_idx = check_id(user_id, decomposition.num_users())?;

    let mut candidates = Vec::with_capacity(num_items);
    for item_idx in 0..num_items {
        let score = similarity::user_item_score(decomposition, user_idx, item_idx)?;
        candidates.push(ScoredItem { item: item_idx + 1, score });
    }

    Ok(ranking::top_n(candidates, count))
}

/// The `neighbor_count` users most similar to `user_id` in the latent space, best first. The user
/// is never its own neighbor.
pub fn nearest_neighbors(
    decomposition: &Decomposition,
    user_id: usize,
    neighbor_count: usize,
) -> Result<Vec<ScoredItem>> {

    let num_users = decomposition.num_users();
    let user_idx = check_id(user_id, num_users)?;

    let mut candidates = Vec::with_capacity(num_users);
    for other_user_idx in 0..num_users {
        if other_user_idx != user_idx {
            let score = similarity::user_similarity(decomposition, user_idx, other_user_idx)?;
            candidates.push(ScoredItem { item: other_user_idx + 1, score });
        }
    }

    Ok(ranking::top_n(candidates, neighbor_count))
}

/// Finds the nearest neighbors of `user_id` in the latent space, and suggests every item that a
/// neighbor rated differently than the user in the raw interaction data. The latent space decides
/// who is similar, the raw data decides what to suggest. The result is unordered.
pub fn recommend_from_nearest_neighbors(
    matrix: &InteractionMatrix,
    decomposition: &Decomposition,
    user_id: usize,
    neighbor_count: usize,
) -> Result<ItemSet> {

    let neighbors = nearest_neighbors(decomposition, user_id, neighbor_count)?;

    let neighbor_ids: Vec<usize> = neighbors.iter().map(|neighbor| neighbor.item).collect();
    info!("User #{}'s most similar users are {:?}", user_id, neighbor_ids);

    let history = matrix.row(user_id - 1)?;
    let mut recommended = types::new_item_set(history.len());

    for neighbor_id in neighbor_ids {
        let neighbor_history = matrix.row(neighbor_id - 1)?;

        for (item_idx, (rating, neighbor_rating)) in
            history.iter().zip(neighbor_history.iter()).enumerate() {

            if *neighbor_rating != 0.0 && neighbor_rating != rating {
                recommended.insert(item_idx + 1);
            }
        }
    }

    Ok(recommended)
}


#[cfg(test)]
mod tests {

    use nalgebra::{DMatrix, DVector};

    use crate::decomposition::Decomposition;
    use crate::error::SvdRecError;
    use crate::matrix::InteractionMatrix;
    use crate::recommend;

    fn block_ratings() -> InteractionMatrix {
        // Users 1 and 2 share items 1 to 3, user 3 only interacted with item 4
        InteractionMatrix::from_dense(&[
            vec![4.0, 4.0, 0.0, 0.0],
            vec![4.0, 4.0, 2.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ]).unwrap()
    }

    fn ids(scored: &[crate::ranking::ScoredItem]) -> Vec<usize> {
        scored.iter().map(|scored_item| scored_item.item).collect()
    }

    #[test]
    fn similar_items_are_sorted_and_complete() {
        let decomposition = Decomposition::compute(&block_ratings(), Some(2)).unwrap();

        for item_id in 1..=4 {
            for count in 0..6 {
                let similar = recommend::similar_items(&decomposition, item_id, count).unwrap();

                assert_eq!(similar.len(), count.min(4));

                for pair in similar.windows(2) {
                    assert!(pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score && pair[0].item < pair[1].item));
                }

                let mut unique = ids(&similar);
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), similar.len());
                assert!(unique.iter().all(|id| *id >= 1 && *id <= 4));
            }
        }
    }

    #[test]
    fn similar_items_include_the_item_itself() {
        let decomposition = Decomposition::compute(&block_ratings(), Some(1)).unwrap();
        let similar = recommend::similar_items(&decomposition, 1, 4).unwrap();

        assert!(ids(&similar).contains(&1));
    }

    #[test]
    fn ties_are_broken_by_ascending_item_id() {
        let u = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let singular_values = DVector::from_vec(vec![2.0, 1.0]);
        let v = DMatrix::from_row_slice(5, 2, &[
            0.0, 1.0,
            1.0, 0.0,
            0.0, 1.0,
            1.0, 0.0,
            0.0, 0.0,
        ]);
        let decomposition = Decomposition::from_factors(u, singular_values, v).unwrap();

        let similar = recommend::similar_items(&decomposition, 3, 5).unwrap();
        assert_eq!(ids(&similar), vec![1, 3, 2, 4, 5]);

        // Item 5 lives outside the latent space and is equally similar to everything
        let similar = recommend::similar_items(&decomposition, 5, 3).unwrap();
        assert_eq!(ids(&similar), vec![1, 2, 3]);

        let recommended = recommend::recommend_for_user(&decomposition, 2, 5).unwrap();
        assert_eq!(ids(&recommended), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn recommendations_for_user() {
        let matrix = InteractionMatrix::from_dense(&[
            vec![5.0, 3.0, 0.0],
            vec![4.0, 0.0, 0.0],
            vec![0.0, 0.0, 5.0],
        ]).unwrap();
        let decomposition = Decomposition::compute(&matrix, Some(1)).unwrap();

        let recommended = recommend::recommend_for_user(&decomposition, 1, 3).unwrap();

        let mut items = ids(&recommended);
        items.sort();
        assert_eq!(items, vec![1, 2, 3]);

        for pair in recommended.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn ids_are_one_based() {
        let decomposition = Decomposition::compute(&block_ratings(), Some(1)).unwrap();

        assert!(matches!(
            recommend::similar_items(&decomposition, 0, 3),
            Err(SvdRecError::IndexOutOfBounds { index: 0, .. })));
        assert!(matches!(
            recommend::similar_items(&decomposition, 5, 3),
            Err(SvdRecError::IndexOutOfBounds { index: 5, bound: 4 })));
        assert!(matches!(
            recommend::recommend_for_user(&decomposition, 4, 3),
            Err(SvdRecError::IndexOutOfBounds { index: 4, bound: 3 })));
        assert!(recommend::recommend_for_user(&decomposition, 3, 3).is_ok());
    }

    #[test]
    fn nearest_neighbors_exclude_the_user() {
        let decomposition = Decomposition::compute(&block_ratings(), Some(1)).unwrap();

        let neighbors = recommend::nearest_neighbors(&decomposition, 1, 5).unwrap();

        assert_eq!(ids(&neighbors), vec![2, 3]);
    }

    #[test]
    fn neighbors_suggest_differently_rated_items() {
        let matrix = block_ratings();
        let decomposition = Decomposition::compute(&matrix, Some(1)).unwrap();

        let for_first_user =
            recommend::recommend_from_nearest_neighbors(&matrix, &decomposition, 1, 1).unwrap();
        assert_eq!(for_first_user.len(), 1);
        assert!(for_first_user.contains(&3));

        // User 2 already rated everything user 1 rated, with the same ratings
        let for_second_user =
            recommend::recommend_from_nearest_neighbors(&matrix, &decomposition, 2, 1).unwrap();
        assert!(for_second_user.is_empty());

        let from_everybody =
            recommend::recommend_from_nearest_neighbors(&matrix, &decomposition, 1, 2).unwrap();
        assert_eq!(from_everybody.len(), 2);
        assert!(from_everybody.contains(&3));
        assert!(from_everybody.contains(&4));
    }

    #[test]
    fn identical_users_have_nothing_to_suggest() {
        let matrix = InteractionMatrix::from_dense(&[
            vec![3.0, 0.0, 1.0],
            vec![3.0, 0.0, 1.0],
        ]).unwrap();
        let decomposition = Decomposition::compute(&matrix, Some(1)).unwrap();

        let recommended =
            recommend::recommend_from_nearest_neighbors(&matrix, &decomposition, 1, 1).unwrap();

        assert!(recommended.is_empty());
    }
}
