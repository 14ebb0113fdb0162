//! Day and week grouping.
//!
//! Both groupings are stable: members keep the order they arrived in, and
//! groups appear in the order their key was first seen.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::Datelike;

use crate::shift::{Day, Shift, Week};

/// Partition `items` by `key`, preserving first-encounter order of keys.
fn group_stable<T, K, F>(items: Vec<T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Copy + Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(item);
    }

    groups
}

/// Group shifts by the calendar date they start on.
pub fn group_by_day(shifts: Vec<Shift>) -> Vec<Day> {
    group_stable(shifts, Shift::date)
        .into_iter()
        .map(|(date, shifts)| Day::new(date, shifts))
        .collect()
}

/// Group days by ISO week number.
///
/// Only the week number is used as the key, not the ISO year.
pub fn group_by_week(days: Vec<Day>) -> Vec<Week> {
    let has_input = !days.is_empty();
    let weeks: Vec<Week> = group_stable(days, |day| day.date().iso_week().week())
        .into_iter()
        .map(|(week, days)| Week::new(week, days))
        .collect();

    debug_assert!(!has_input || !weeks.is_empty());
    weeks
}
