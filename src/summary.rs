//! The summary of a group's expenses shown next to the list of bills.

use serde::Serialize;

use crate::{
    aggregation::{GroupTotals, group_and_sum_by, rank_descending, total_amount},
    expense::Expense,
    money::Money,
    period::{Period, YearMonth, filter_by_period},
};

/// How much one person paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonTotal {
    /// The person's name, as entered on their bills.
    pub paid_by: String,
    /// The sum of the bills they paid.
    pub total: Money,
}

/// Totals for a set of expenses, scoped to a [Period].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The period that `total`, `by_person`, `by_category` and
    /// `by_month_in_period` cover.
    pub period: Period,
    /// The sum of every expense in `period`.
    pub total: Money,
    /// The amount each person paid in `period`, in order of first occurrence.
    pub by_person: GroupTotals<String>,
    /// The amount spent on each category in `period`, in order of first occurrence.
    pub by_category: GroupTotals<String>,
    /// Monthly totals over every expense, ignoring `period`, so the trend
    /// across months stays visible while a single month is selected.
    pub by_month: GroupTotals<YearMonth>,
    /// Monthly totals over only the expenses in `period`.
    pub by_month_in_period: GroupTotals<YearMonth>,
    /// The month that `current_month_ranking` covers.
    pub current_month: YearMonth,
    /// Who paid the most in `current_month`, largest first.
    pub current_month_ranking: Vec<PersonTotal>,
}

/// Summarise `expenses` for `period`.
///
/// `current_month` is the month the ranking of payers is computed for. It is
/// passed in rather than read from the clock so that the result only depends
/// on the arguments.
pub fn build_summary(expenses: &[Expense], period: Period, current_month: YearMonth) -> Summary {
    let scoped = filter_by_period(expenses, period);

    let total = total_amount(scoped.iter().copied());
    let by_person = group_and_sum_by(scoped.iter().copied(), |expense| expense.paid_by.clone());
    let by_category = group_and_sum_by(scoped.iter().copied(), |expense| {
        expense.category.clone()
    });
    let by_month = group_and_sum_by(expenses, |expense| YearMonth::of(expense.occurred_on));
    let by_month_in_period = group_and_sum_by(scoped.iter().copied(), |expense| {
        YearMonth::of(expense.occurred_on)
    });

    let this_month = filter_by_period(expenses, Period::Month(current_month));
    let current_month_ranking = rank_descending(&group_and_sum_by(this_month, |expense| {
        expense.paid_by.clone()
    }))
    .into_iter()
    .map(|(paid_by, total)| PersonTotal { paid_by, total })
    .collect();

    Summary {
        period,
        total,
        by_person,
        by_category,
        by_month,
        by_month_in_period,
        current_month,
        current_month_ranking,
    }
}
