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

#[cfg(test)]
mod tests {

    use crate::SvdRec;

    #[test]
    fn programmatic_usage() {

        /* Our input data comprises of ratings that users gave to items. Users and items are
           identified by consecutive integer ids starting at 1, and absent ratings are left out. */
        let ratings = vec![
            (1, 1, 5.0),
            (1, 2, 3.0),
            (1, 4, 1.0),
            (2, 1, 4.0),
            (2, 4, 1.0),
            (3, 1, 1.0),
            (3, 2, 1.0),
            (3, 4, 5.0),
            (4, 3, 5.0),
            (4, 4, 4.0),
            (5, 2, 1.0),
            (5, 3, 5.0),
            (5, 4, 4.0),
        ];

        /* A session holds the sparse interaction matrix, the shape is inferred from the ids. */
        let mut svdrec = SvdRec::new();
        svdrec.load_triplets(ratings).unwrap();

        assert_eq!(svdrec.shape().unwrap(), (5, 4));

        /* The names are optional and only used for presentation. */
        svdrec.load_item_encoder(&json!({
            "1": "Toy Story", "2": "Jumanji", "3": "Heat", "4": "Casino"
        })).unwrap();

        /* We compute a truncated SVD, which projects users and items into a common latent
           space with two dimensions. */
        svdrec.decompose(Some(2)).unwrap();

        /* Items similar to Toy Story, according to the dot product of their latent factors. */
        let similar = svdrec.similar_items_scored(1, 4).unwrap();
        assert_eq!(similar.len(), 4);

        for scored_item in similar.iter() {
            println!("{} ({:.3})", svdrec.item_name(scored_item.item), scored_item.score);
        }

        /* Personalized recommendations for the first user, best first. */
        let recommended = svdrec.recommend_for_user(1, 2).unwrap();
        assert_eq!(recommended.len(), 2);

        /* Items that the most similar user rated differently than the first user. */
        let from_neighbor = svdrec.recommend_from_nearest_neighbors(1, 1).unwrap();
        assert!(from_neighbor.iter().all(|item| *item >= 1 && *item <= 4));

        for item in from_neighbor.iter() {
            println!("Recommended by the closest user: {}", svdrec.item_name(*item));
        }
    }
}
