//! Defines the endpoint for replacing the fields of an existing expense.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        Expense, ExpenseFields,
        core::update_expense,
        payload::ExpensePayload,
        state::{ExpenseState, lock_connection},
    },
};

/// A route handler for updating an expense, responds with the updated expense.
///
/// All four editable fields must be supplied; partial updates are not supported.
pub async fn edit_expense_endpoint(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let Path(expense_id) = expense_id?;
    let Json(payload) = payload?;
    let fields = ExpenseFields::try_from(payload)
        .inspect_err(|error| tracing::warn!("rejected update to expense {expense_id}: {error}"))?;

    let connection = lock_connection(&state.db_connection)?;

    let expense = update_expense(expense_id, &fields, &connection)
        .inspect_err(|error| tracing::error!("could not update expense {expense_id}: {error}"))?;

    Ok(Json(expense))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::put};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints::{self, format_endpoint},
        expense::{
            Expense, ExpenseFields, GroupId, create_expense, edit_endpoint::edit_expense_endpoint,
            get_expense, state::ExpenseState,
        },
        money::Money,
    };

    fn get_test_state() -> ExpenseState {
        let conn = Connection::open_in_memory().expect("could not open in-memory SQLite database");
        initialize(&conn).expect("could not initialize test DB");

        ExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn get_test_server(state: ExpenseState) -> TestServer {
        let app = Router::new()
            .route(endpoints::BILL, put(edit_expense_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn must_create_test_expense(state: &ExpenseState) -> Expense {
        let fields =
            ExpenseFields::new("Gas", Money::from_cents(5_000), date!(2024 - 01 - 10), "B")
                .expect("could not create test fields");

        create_expense(
            &GroupId::new("home_001").unwrap(),
            &fields,
            &state.db_connection.lock().unwrap(),
        )
        .expect("could not create test expense")
    }

    #[tokio::test]
    async fn can_update_expense() {
        let state = get_test_state();
        let expense = must_create_test_expense(&state);
        let server = get_test_server(state.clone());
        let want = Expense {
            id: expense.id,
            group_id: expense.group_id.clone(),
            category: "Electricity".to_owned(),
            amount: Money::from_cents(3_333),
            occurred_on: date!(2024 - 02 - 01),
            paid_by: "A".to_owned(),
        };

        let response = server
            .put(&format_endpoint(endpoints::BILL, expense.id))
            .json(&json!({
                "category": want.category,
                "amount": 33.33,
                "occurred_on": "2024-02-01",
                "paid_by": want.paid_by,
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Expense>(), want);
        let stored = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored, want);
    }

    #[tokio::test]
    async fn updating_missing_expense_is_not_found() {
        let server = get_test_server(get_test_state());

        let response = server
            .put(&format_endpoint(endpoints::BILL, 404))
            .json(&json!({
                "category": "Gas",
                "amount": 1,
                "occurred_on": "2024-02-01",
                "paid_by": "A",
            }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn invalid_update_leaves_expense_unchanged() {
        let state = get_test_state();
        let expense = must_create_test_expense(&state);
        let server = get_test_server(state.clone());

        let response = server
            .put(&format_endpoint(endpoints::BILL, expense.id))
            .json(&json!({
                "category": "Gas",
                "amount": 1,
                "occurred_on": "2024-02-01",
                "paid_by": "",
            }))
            .await;

        response.assert_status_bad_request();
        let stored = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored, expense);
    }

    #[tokio::test]
    async fn non_numeric_id_is_json_bad_request() {
        let server = get_test_server(get_test_state());

        let response = server
            .put(&format_endpoint(endpoints::BILL, "abc"))
            .json(&json!({
                "category": "Gas",
                "amount": 1,
                "occurred_on": "2024-02-01",
                "paid_by": "A",
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert!(body["error"].is_string(), "want a JSON error, got {body}");
    }
}
