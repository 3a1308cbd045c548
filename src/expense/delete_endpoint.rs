use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        core::delete_expense,
        state::{ExpenseState, lock_connection},
    },
};

/// The confirmation sent after an expense is deleted.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Always "Deleted successfully".
    pub message: String,
}

/// A route handler for deleting an expense, responds with a confirmation message.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<DeletedResponse>, Error> {
    let Path(expense_id) = expense_id?;
    let connection = lock_connection(&state.db_connection)?;

    delete_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("could not delete expense {expense_id}: {error}"))?;

    Ok(Json(DeletedResponse {
        message: "Deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::delete};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        endpoints::{self, format_endpoint},
        expense::{
            ExpenseFields, GroupId, create_expense,
            delete_endpoint::{DeletedResponse, delete_expense_endpoint},
            get_expense,
            state::ExpenseState,
        },
        money::Money,
    };

    fn get_test_server() -> (TestServer, ExpenseState) {
        let conn = Connection::open_in_memory().expect("could not open in-memory SQLite database");
        initialize(&conn).expect("could not initialize test DB");
        let state = ExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let app = Router::new()
            .route(endpoints::BILL, delete(delete_expense_endpoint))
            .with_state(state.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            state,
        )
    }

    #[tokio::test]
    async fn deletes_expense() {
        let (server, state) = get_test_server();
        let expense = create_expense(
            &GroupId::new("home_001").unwrap(),
            &ExpenseFields::new("Gas", Money::from_cents(1), date!(2024 - 01 - 10), "B").unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = server
            .delete(&format_endpoint(endpoints::BILL, expense.id))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<DeletedResponse>(),
            DeletedResponse {
                message: "Deleted successfully".to_owned()
            }
        );
        assert_eq!(
            get_expense(expense.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_expense_is_not_found() {
        let (server, _) = get_test_server();

        let response = server.delete(&format_endpoint(endpoints::BILL, 1)).await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn non_numeric_id_is_json_bad_request() {
        let (server, _) = get_test_server();

        let response = server.delete(&format_endpoint(endpoints::BILL, "abc")).await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert!(
            body["error"].as_str().is_some_and(|error| error.contains("abc")),
            "want a JSON error mentioning the bad ID, got {body}"
        );
    }
}
