//! Frequency counting.
//!
//! Ties are always resolved by first appearance in the input, so results are
//! reproducible for a given row order.

use std::collections::HashMap;
use std::hash::Hash;

/// Count distinct values, most frequent first.
///
/// Values with equal counts keep the order in which they were first seen.
///
/// # Examples
///
/// ```
/// use devstats_stats::value_counts;
///
/// let licenses = ["MIT", "MIT", "Apache-2.0"];
/// let counts = value_counts(licenses);
/// assert_eq!(counts, vec![("MIT", 2), ("Apache-2.0", 1)]);
/// ```
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    // Slot index per key keeps first-seen order without a second pass.
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for value in values {
        match slots.get(&value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The most frequent value, or `None` for an empty input.
///
/// # Examples
///
/// ```
/// use devstats_stats::mode;
///
/// assert_eq!(mode(["Rust", "Go", "Rust"]), Some("Rust"));
/// assert_eq!(mode(Vec::<&str>::new()), None);
/// ```
pub fn mode<K, I>(values: I) -> Option<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    value_counts(values).into_iter().next().map(|(k, _)| k)
}

/// Every value sharing the highest count, in first-seen order, with that count.
///
/// # Examples
///
/// ```
/// use devstats_stats::tied_for_max;
///
/// let (names, count) = tied_for_max(["Martin", "Bernard", "Martin", "Bernard", "Petit"]).unwrap();
/// assert_eq!(names, vec!["Martin", "Bernard"]);
/// assert_eq!(count, 2);
/// ```
pub fn tied_for_max<K, I>(values: I) -> Option<(Vec<K>, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let counts = value_counts(values);
    let max = counts.first()?.1;
    let winners = counts
        .into_iter()
        .take_while(|(_, count)| *count == max)
        .map(|(k, _)| k)
        .collect();
    Some((winners, max))
}
