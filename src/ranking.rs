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

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An item (or user) id together with its score. Used to find the top-n entries via a binary heap.
#[derive(PartialEq, Clone, Copy, Debug, Serialize)]
pub struct ScoredItem {
    pub item: usize,
    pub score: f64,
}

/// Ordering for our max-heap: the heap's top must be the worst retained entry, so lower scores
/// compare as greater. Equal scores fall back to the id, where higher ids are worse. There is no
/// total order on floating point numbers, incomparable scores are treated as equal.
fn cmp_reverse(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    let by_score = match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(Ordering::Less) => Ordering::Greater,
        Some(Ordering::Greater) => Ordering::Less,
        Some(Ordering::Equal) => Ordering::Equal,
        None => Ordering::Equal
    };

    by_score.then_with(|| scored_item_a.item.cmp(&scored_item_b.item))
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

/// Retains the `n` best candidates, sorted by descending score. Candidates with equal scores keep
/// ascending id order, which is the same outcome as a stable descending sort over candidates
/// generated in id order.
pub fn top_n<I>(candidates: I, n: usize) -> Vec<ScoredItem>
    where I: IntoIterator<Item=ScoredItem> {

    if n == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(n);

    for scored_item in candidates {
        if heap.len() < n {
            heap.push(scored_item);
        } else if let Some(mut top) = heap.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    heap.into_sorted_vec()
}
