use time::Date;

use crate::{database_id::ExpenseId, expense::Expense, money::Money};

/// Create an expense for the group "home_001" without touching the database.
pub fn expense(
    id: ExpenseId,
    category: &str,
    amount: f64,
    occurred_on: Date,
    paid_by: &str,
) -> Expense {
    Expense {
        id,
        group_id: "home_001".to_owned(),
        category: category.to_owned(),
        amount: Money::from_decimal(amount).expect("test amount should be finite"),
        occurred_on,
        paid_by: paid_by.to_owned(),
    }
}
