//! Defines the endpoint for creating a new expense.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    expense::{
        Expense,
        core::create_expense,
        payload::NewExpensePayload,
        state::{ExpenseState, lock_connection},
    },
};

/// A route handler for creating a new expense, responds with the stored expense.
///
/// The payload is validated before the database is touched, so an invalid
/// request never creates a partial record.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    payload: Result<Json<NewExpensePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let Json(payload) = payload?;
    let (group_id, fields) = payload
        .validate()
        .inspect_err(|error| tracing::warn!("rejected new expense: {error}"))?;

    let connection = lock_connection(&state.db_connection)?;

    let expense = create_expense(&group_id, &fields, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    tracing::info!(
        "created expense {} for group {}",
        expense.id,
        expense.group_id
    );

    Ok((StatusCode::CREATED, Json(expense)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints,
        expense::{
            Expense, create_endpoint::create_expense_endpoint, get_expense, state::ExpenseState,
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
            .route(endpoints::BILLS, post(create_expense_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::BILLS)
            .json(&json!({
                "group_id": "home_001",
                "category": "Electricity",
                "amount": 100.25,
                "occurred_on": "2024-01-05",
                "paid_by": "A",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Expense>();
        assert_eq!(created.amount, Money::from_cents(10_025));
        let stored = get_expense(created.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored, created);
        assert_eq!(stored.occurred_on, date!(2024 - 01 - 05));
    }

    #[tokio::test]
    async fn can_create_expense_with_legacy_field_names() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::BILLS)
            .json(&json!({
                "home_id": "home_001",
                "utility_type": "Gas",
                "amount": 50,
                "bill_date": "2024-01-10",
                "added_by": "B",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Expense>();
        assert_eq!(created.group_id, "home_001");
        assert_eq!(created.category, "Gas");
        assert_eq!(created.paid_by, "B");
    }

    #[tokio::test]
    async fn rejects_blank_category() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::BILLS)
            .json(&json!({
                "group_id": "home_001",
                "category": "  ",
                "amount": 10,
                "occurred_on": "2024-01-05",
                "paid_by": "A",
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert!(body["error"].as_str().unwrap().contains("category"));
        assert_no_expenses_stored(&state);
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::BILLS)
            .json(&json!({
                "group_id": "home_001",
                "category": "Gas",
                "amount": -10,
                "occurred_on": "2024-01-05",
                "paid_by": "A",
            }))
            .await;

        response.assert_status_bad_request();
        assert_no_expenses_stored(&state);
    }

    #[tokio::test]
    async fn rejects_amount_too_large_to_store() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::BILLS)
            .json(&json!({
                "group_id": "home_001",
                "category": "Rent",
                "amount": 1e20,
                "occurred_on": "2024-01-05",
                "paid_by": "A",
            }))
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<serde_json::Value>()["error"].is_string());
        assert_no_expenses_stored(&state);
    }

    #[tokio::test]
    async fn rejects_missing_field() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::BILLS)
            .json(&json!({
                "group_id": "home_001",
                "category": "Gas",
                "occurred_on": "2024-01-05",
                "paid_by": "A",
            }))
            .await;

        response.assert_status_bad_request();
        assert_no_expenses_stored(&state);
    }

    #[track_caller]
    fn assert_no_expenses_stored(state: &ExpenseState) {
        let count: i64 = state
            .db_connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM expense", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "want no stored expenses, got {count}");
    }
}
