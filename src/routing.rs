//! Application router configuration.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    bill_form_endpoints::{create_bill_from_form, delete_bill_from_form, update_bill_from_form},
    bills_page::get_bills_page,
    edit_bill_page::get_edit_bill_page,
    endpoints::{self, format_endpoint},
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_summary_endpoint, list_expenses_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The JSON API accepts requests from any origin.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(endpoints::BILLS, post(create_expense_endpoint))
        .route(
            endpoints::BILL,
            get(list_expenses_endpoint)
                .put(edit_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(endpoints::BILL_SUMMARY, get(get_summary_endpoint))
        .layer(CorsLayer::permissive());

    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::BILLS_VIEW,
            get(get_bills_page).post(create_bill_from_form),
        )
        .route(
            endpoints::EDIT_BILL_VIEW,
            get(get_edit_bill_page).post(update_bill_from_form),
        )
        .route(endpoints::DELETE_BILL_VIEW, post(delete_bill_from_form))
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the default group's bills page.
async fn get_index_page(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format_endpoint(
        endpoints::BILLS_VIEW,
        &state.default_group_id,
    ))
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested route does not exist" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router,
        endpoints::{self, format_bill_endpoint, format_endpoint},
        expense::Expense,
    };

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().expect("could not open in-memory SQLite database");
        let state = AppState::new(conn, "Etc/UTC", "home_001").expect("could not create state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_default_group() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/bills/home_001");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn api_allows_cross_origin_requests() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::BILL, "home_001"))
            .add_header("origin", "http://localhost:3000")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn bill_lifecycle() {
        let server = get_test_server();

        let created = server
            .post(endpoints::BILLS)
            .json(&json!({
                "home_id": "home_001",
                "utility_type": "Electricity",
                "amount": 100,
                "bill_date": "2024-01-05",
                "added_by": "A",
            }))
            .await
            .json::<Expense>();
        server
            .post(endpoints::BILLS)
            .json(&json!({
                "group_id": "home_001",
                "category": "Gas",
                "amount": 50,
                "occurred_on": "2024-01-10",
                "paid_by": "B",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .put(&format_endpoint(endpoints::BILL, created.id))
            .json(&json!({
                "category": "Electricity",
                "amount": 130,
                "occurred_on": "2024-01-05",
                "paid_by": "A",
            }))
            .await
            .assert_status_ok();

        let summary = server
            .get(&format_endpoint(endpoints::BILL_SUMMARY, "home_001"))
            .await
            .json::<Value>();
        assert_eq!(summary["total"], 180.0);
        assert_eq!(summary["by_person"]["A"], 130.0);

        server
            .delete(&format_endpoint(endpoints::BILL, created.id))
            .await
            .assert_status_ok();

        let bills = server
            .get(&format_endpoint(endpoints::BILL, "home_001"))
            .await
            .json::<Vec<Expense>>();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].category, "Gas");
    }

    #[tokio::test]
    async fn bills_page_forms_round_trip() {
        let server = get_test_server();
        let page_url = format_endpoint(endpoints::BILLS_VIEW, "home_001");
        let row_selector = Selector::parse("tbody tr").unwrap();

        server
            .post(&page_url)
            .form(&[
                ("category", "Gas"),
                ("amount", "50"),
                ("occurred_on", "2024-01-10"),
                ("paid_by", "B"),
                ("period", "all"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = Html::parse_document(&server.get(&page_url).await.text());
        let rows: Vec<String> = page
            .select(&row_selector)
            .map(|row| row.text().collect())
            .collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("Gas"), "want a row for the new bill, got {rows:?}");

        let bills = server
            .get(&format_endpoint(endpoints::BILL, "home_001"))
            .await
            .json::<Vec<Expense>>();
        server
            .post(&format_bill_endpoint(
                endpoints::DELETE_BILL_VIEW,
                "home_001",
                bills[0].id,
            ))
            .form(&[("period", "all")])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let page = Html::parse_document(&server.get(&page_url).await.text());
        let rows: Vec<String> = page
            .select(&row_selector)
            .map(|row| row.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(rows, vec!["No bills recorded for this period."]);
    }
}
