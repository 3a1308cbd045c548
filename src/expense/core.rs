//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId, money::Money};

// ============================================================================
// MODELS
// ============================================================================

/// A bill paid by one member of a household or trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// The household or trip the expense belongs to.
    pub group_id: String,
    /// What the money was spent on, e.g. "Electricity".
    pub category: String,
    /// How much was paid.
    pub amount: Money,
    /// The day the bill was paid.
    pub occurred_on: Date,
    /// Who paid the bill.
    pub paid_by: String,
}

/// The identifier of a household or trip, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupId(String);

impl GroupId {
    /// Create a group ID with surrounding whitespace removed.
    ///
    /// # Errors
    /// Returns [Error::EmptyGroupId] if `group_id` is empty or only whitespace.
    pub fn new(group_id: &str) -> Result<Self, Error> {
        let group_id = group_id.trim();

        if group_id.is_empty() {
            return Err(Error::EmptyGroupId);
        }

        Ok(Self(group_id.to_owned()))
    }

    /// The group ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The user editable fields of an expense that have passed validation.
///
/// Text fields are trimmed but otherwise kept exactly as entered, so
/// "Electricity" and "electricity" remain different categories.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    category: String,
    amount: Money,
    occurred_on: Date,
    paid_by: String,
}

impl ExpenseFields {
    /// Validate the fields of an expense.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyCategory] if `category` is empty after trimming,
    /// - [Error::EmptyPayer] if `paid_by` is empty after trimming,
    /// - [Error::NegativeAmount] if `amount` is less than zero,
    /// - or [Error::AmountTooLarge] if `amount` is more than [Money::MAX].
    pub fn new(
        category: &str,
        amount: Money,
        occurred_on: Date,
        paid_by: &str,
    ) -> Result<Self, Error> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let paid_by = paid_by.trim();
        if paid_by.is_empty() {
            return Err(Error::EmptyPayer);
        }

        if amount.is_negative() {
            return Err(Error::NegativeAmount(amount));
        }

        if amount.exceeds_max() {
            return Err(Error::AmountTooLarge(amount));
        }

        Ok(Self {
            category: category.to_owned(),
            amount,
            occurred_on,
            paid_by: paid_by.to_owned(),
        })
    }

    /// What the money was spent on.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// How much was paid.
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// The day the bill was paid.
    pub fn occurred_on(&self) -> Date {
        self.occurred_on
    }

    /// Who paid the bill.
    pub fn paid_by(&self) -> &str {
        &self.paid_by
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const EXPENSE_COLUMNS: &str = "id, group_id, category, amount, occurred_on, paid_by";

/// Create a new expense in the database for the group `group_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_expense(
    group_id: &GroupId,
    fields: &ExpenseFields,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(&format!(
            "INSERT INTO expense (group_id, category, amount, occurred_on, paid_by)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            params![
                group_id.as_str(),
                fields.category,
                fields.amount,
                fields.occurred_on,
                fields.paid_by,
            ],
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve all expenses for the group `group_id` in the order they were created.
///
/// An unknown group simply has no expenses.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn list_expenses(group_id: &str, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense WHERE group_id = :group_id ORDER BY id ASC"
        ))?
        .query_map(&[(":group_id", &group_id)], map_expense_row)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Replace the editable fields of the expense `id`.
///
/// The group of an expense never changes. Concurrent updates to the same
/// expense are not detected, the last update wins.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    fields: &ExpenseFields,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "UPDATE expense
             SET category = ?1, amount = ?2, occurred_on = ?3, paid_by = ?4
             WHERE id = ?5
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            params![
                fields.category,
                fields.amount,
                fields.occurred_on,
                fields.paid_by,
                id,
            ],
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingExpense,
            error => error.into(),
        })
}

/// Delete the expense `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                group_id TEXT NOT NULL,
                category TEXT NOT NULL,
                amount INTEGER NOT NULL CHECK (amount BETWEEN 0 AND 1000000000000000),
                occurred_on TEXT NOT NULL,
                paid_by TEXT NOT NULL
                )",
        (),
    )?;

    // Listing and summarising always filter on the group.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_group_date ON expense(group_id, occurred_on);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        group_id: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        occurred_on: row.get(4)?,
        paid_by: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod model_tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{ExpenseFields, GroupId},
        money::Money,
    };

    #[test]
    fn fields_are_trimmed() {
        let fields = ExpenseFields::new(
            "  Electricity ",
            Money::from_cents(100),
            date!(2024 - 01 - 05),
            " A",
        )
        .unwrap();

        assert_eq!(fields.category(), "Electricity");
        assert_eq!(fields.paid_by(), "A");
    }

    #[test]
    fn rejects_blank_category() {
        let result = ExpenseFields::new("   ", Money::ZERO, date!(2024 - 01 - 05), "A");

        assert_eq!(result, Err(Error::EmptyCategory));
    }

    #[test]
    fn rejects_blank_payer() {
        let result = ExpenseFields::new("Gas", Money::ZERO, date!(2024 - 01 - 05), "");

        assert_eq!(result, Err(Error::EmptyPayer));
    }

    #[test]
    fn rejects_negative_amount() {
        let amount = Money::from_cents(-1);

        let result = ExpenseFields::new("Gas", amount, date!(2024 - 01 - 05), "A");

        assert_eq!(result, Err(Error::NegativeAmount(amount)));
    }

    #[test]
    fn rejects_amount_over_max() {
        let amount = Money::MAX + Money::from_cents(1);

        let result = ExpenseFields::new("Rent", amount, date!(2024 - 01 - 05), "A");

        assert_eq!(result, Err(Error::AmountTooLarge(amount)));
    }

    #[test]
    fn accepts_max_amount() {
        let result = ExpenseFields::new("Rent", Money::MAX, date!(2024 - 01 - 05), "A");

        assert!(result.is_ok());
    }

    #[test]
    fn accepts_zero_amount() {
        let result = ExpenseFields::new("Gas", Money::ZERO, date!(2024 - 01 - 05), "A");

        assert!(result.is_ok());
    }

    #[test]
    fn rejects_blank_group_id() {
        assert_eq!(GroupId::new(" \t"), Err(Error::EmptyGroupId));
        assert_eq!(GroupId::new(" home_001 ").unwrap().as_str(), "home_001");
    }
}
