//! Defines the endpoint for listing a group's expenses.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    expense::{
        Expense,
        core::list_expenses,
        state::{ExpenseState, lock_connection},
    },
};

/// A route handler that responds with every expense recorded for a group.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseState>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let expenses = list_expenses(&group_id, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses for {group_id}: {error}"))?;

    Ok(Json(expenses))
}
