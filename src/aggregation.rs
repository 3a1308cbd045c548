//! Totals and groupings over a list of expenses.
//!
//! Every function here is pure: the expenses are only read, and the same input
//! always gives the same output.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::{expense::Expense, money::Money};

/// Summed amounts keyed by a grouping key, in order of first occurrence.
pub type GroupTotals<K> = IndexMap<K, Money>;

/// Sum the amounts of `expenses`.
///
/// Returns zero for no expenses.
pub fn total_amount<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Money {
    expenses.into_iter().map(|expense| expense.amount).sum()
}

/// Sum the amounts of `expenses` that share the same key.
///
/// Keys are used exactly as `key_fn` returns them. The returned map lists keys
/// in the order they were first seen.
pub fn group_and_sum_by<'a, K, F>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    mut key_fn: F,
) -> GroupTotals<K>
where
    K: Hash + Eq,
    F: FnMut(&'a Expense) -> K,
{
    let mut totals = GroupTotals::new();

    for expense in expenses {
        *totals.entry(key_fn(expense)).or_insert(Money::ZERO) += expense.amount;
    }

    totals
}

/// List the group totals from largest to smallest.
///
/// Equal totals keep their relative order from `totals`.
pub fn rank_descending<K: Clone>(totals: &GroupTotals<K>) -> Vec<(K, Money)> {
    let mut ranked: Vec<(K, Money)> = totals
        .iter()
        .map(|(key, total)| (key.clone(), *total))
        .collect();

    // `sort_by` is stable, which gives ties a reproducible order.
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));

    ranked
}
