//! Expense management for the bill splitting application.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and its validated `ExpenseFields`
//! - Database functions for storing, querying, and managing expenses
//! - The JSON route handlers for expenses and their summaries

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod payload;
mod state;
mod summary_endpoint;

pub use self::core::{
    Expense, ExpenseFields, GroupId, create_expense, create_expense_table, delete_expense,
    get_expense, list_expenses, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::{DeletedResponse, delete_expense_endpoint};
pub use edit_endpoint::edit_expense_endpoint;
pub use list_endpoint::list_expenses_endpoint;
pub use payload::{ExpensePayload, NewExpensePayload};
pub use state::{ExpenseState, SummaryState};
pub use summary_endpoint::{PeriodQuery, get_summary_endpoint};

pub(crate) use state::lock_connection;

#[cfg(test)]
pub mod test_utils;
