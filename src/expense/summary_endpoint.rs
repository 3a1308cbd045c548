//! Defines the endpoint for summarising a group's expenses.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    expense::{
        core::list_expenses,
        state::{SummaryState, lock_connection},
    },
    period::Period,
    summary::{Summary, build_summary},
    timezone::current_month,
};

/// The query parameters for selecting the summary period.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Either "all" or a month such as "2024-01". Defaults to "all".
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Parse the requested period, defaulting to [Period::All].
    ///
    /// # Errors
    /// Returns [Error::InvalidPeriod] if the period is neither "all" nor a
    /// `YYYY-MM` month.
    pub fn period(&self) -> Result<Period, Error> {
        match self.period.as_deref() {
            None | Some("") => Ok(Period::All),
            Some(period) => period.parse(),
        }
    }
}

/// A route handler that responds with the totals for a group's expenses.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    Path(group_id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Summary>, Error> {
    let period = query.period()?;
    let current_month = current_month(&state.local_timezone)?;

    let connection = lock_connection(&state.db_connection)?;
    let expenses = list_expenses(&group_id, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses for {group_id}: {error}"))?;

    Ok(Json(build_summary(&expenses, period, current_month)))
}
