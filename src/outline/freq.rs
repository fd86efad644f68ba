//! Frequency tables.

use std::collections::HashMap;
use std::hash::Hash;

/// Most frequent value of `items`. Ties go to the value seen first.
pub fn mode<K, I>(items: I) -> Option<K>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    // value -> (count, index of first occurrence)
    let mut counts: HashMap<K, (usize, usize)> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, index)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(key, _)| key)
}
