//! Spendly is a web app for tracking a household's shared bills.
//!
//! This library provides a JSON REST API for recording bills, an aggregation
//! engine that summarises them by person, category and month, and a server
//! rendered page for adding, editing and deleting bills next to those
//! summaries.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod app_state;
mod bill_form;
mod bill_form_endpoints;
mod bills_page;
mod database_id;
mod db;
mod edit_bill_page;
mod endpoints;
mod expense;
mod html;
mod logging;
mod money;
mod period;
mod routing;
mod summary;
mod timezone;

pub use aggregation::{GroupTotals, group_and_sum_by, rank_descending, total_amount};
pub use app_state::AppState;
pub use database_id::{DatabaseId, ExpenseId};
pub use db::initialize as initialize_db;
pub use expense::{Expense, ExpenseFields, GroupId, create_expense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use money::Money;
pub use period::{Period, YearMonth, filter_by_period};
pub use routing::build_router;
pub use summary::{PersonTotal, Summary, build_summary};

use crate::html::error_view;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A blank string was used as a group ID.
    #[error("group ID cannot be empty")]
    EmptyGroupId,

    /// A blank string was used as an expense category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A blank string was used as the name of the person who paid.
    #[error("paid by cannot be empty")]
    EmptyPayer,

    /// An expense amount was below zero.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(Money),

    /// An expense amount was larger than [Money::MAX].
    #[error("{0} is larger than the maximum amount of {max}", max = Money::MAX)]
    AmountTooLarge(Money),

    /// A period was neither "all" nor a `YYYY-MM` month.
    #[error("\"{0}\" is not a valid period, expected \"all\" or a month such as \"2024-01\"")]
    InvalidPeriod(String),

    /// The request body could not be parsed as the expected JSON.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// A parameter in the request path, such as a bill ID, could not be parsed.
    #[error("invalid path: {0}")]
    InvalidPathParameter(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPathParameter(rejection.body_text())
    }
}

impl Error {
    /// The status code and client-facing message for this error.
    ///
    /// Internal errors are logged here and replaced with a generic message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::EmptyGroupId
            | Error::EmptyCategory
            | Error::EmptyPayer
            | Error::NegativeAmount(_)
            | Error::AmountTooLarge(_)
            | Error::InvalidPeriod(_)
            | Error::InvalidRequestBody(_)
            | Error::InvalidPathParameter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, "bill not found".to_owned()),
            Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::InvalidTimezoneError(timezone) => {
                tracing::error!("could not get local timezone \"{timezone}\"");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "the server timezone is misconfigured".to_owned(),
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred, check the server logs for more details"
                        .to_owned(),
                )
            }
        }
    }

    /// Render the error as a full HTML page rather than a JSON body.
    fn into_page_response(self) -> Response {
        let (status_code, message) = self.status_and_message();

        let (title, header, fix) = match status_code {
            StatusCode::BAD_REQUEST => (
                "Bad Request",
                "Invalid request",
                "Check the address and try again.",
            ),
            StatusCode::NOT_FOUND => (
                "Not Found",
                "Page not found",
                "Check the address and try again.",
            ),
            _ => (
                "Internal Server Error",
                "Something went wrong",
                "Try again later or check the server logs.",
            ),
        };

        (
            status_code,
            Html(error_view(title, header, &message, fix).into_string()),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = self.status_and_message();

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
