//! Stable top-N / bottom-N selection.
//!
//! Items whose key is `None` (or NaN) do not qualify. Equal keys keep input order,
//! so the first row in the file wins a tie.

use std::cmp::Ordering;

fn select_by<T, K, F>(items: &[T], n: usize, key: F, descending: bool) -> Vec<&T>
where
    K: PartialOrd,
    F: Fn(&T) -> Option<K>,
{
    let mut keyed: Vec<(K, &T)> = items
        .iter()
        .filter_map(|item| key(item).map(|k| (k, item)))
        // NaN-like keys compare with nothing, including themselves.
        .filter(|(k, _)| k.partial_cmp(k).is_some())
        .collect();

    keyed.sort_by(|a, b| {
        let ord = a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });

    keyed.into_iter().take(n).map(|(_, item)| item).collect()
}

/// The `n` items with the largest key, largest first.
///
/// Returns `min(n, qualifying)` items.
///
/// # Examples
///
/// ```
/// use devstats_stats::top_n_by;
///
/// let followers = [("a", Some(300)), ("b", Some(500)), ("c", None), ("d", Some(300))];
/// let top: Vec<&str> = top_n_by(&followers, 5, |(_, f)| *f)
///     .into_iter()
///     .map(|(login, _)| *login)
///     .collect();
/// assert_eq!(top, vec!["b", "a", "d"]);
/// ```
pub fn top_n_by<T, K, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    K: PartialOrd,
    F: Fn(&T) -> Option<K>,
{
    select_by(items, n, key, true)
}

/// The `n` items with the smallest key, smallest first.
///
/// # Examples
///
/// ```
/// use devstats_stats::bottom_n_by;
///
/// let joined = [("a", Some(2012)), ("b", None), ("c", Some(2009))];
/// let earliest: Vec<&str> = bottom_n_by(&joined, 5, |(_, y)| *y)
///     .into_iter()
///     .map(|(login, _)| *login)
///     .collect();
/// assert_eq!(earliest, vec!["c", "a"]);
/// ```
pub fn bottom_n_by<T, K, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    K: PartialOrd,
    F: Fn(&T) -> Option<K>,
{
    select_by(items, n, key, false)
}
