//! The page for editing a single bill.

use axum::{
    extract::{Path, Query, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    bill_form::{BillFormDefaults, bill_form_fields, bills_page_url, get_group_bill},
    database_id::ExpenseId,
    endpoints::{self, format_bill_endpoint},
    expense::{Expense, ExpenseState, PeriodQuery, lock_connection},
    html::{BUTTON_STYLE, FORM_STYLE, PAGE_CONTAINER_STYLE, base},
    period::Period,
};

fn edit_bill_view(bill: &Expense, period: Period) -> Markup {
    let edit_url = format_bill_endpoint(endpoints::EDIT_BILL_VIEW, &bill.group_id, bill.id);
    let cancel_url = bills_page_url(&bill.group_id, period);

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Edit bill" }

            form method="post" action=(edit_url) class=(FORM_STYLE)
            {
                (bill_form_fields(&BillFormDefaults::from_bill(bill, period)))

                button type="submit" class=(BUTTON_STYLE) { "Update Bill" }
            }

            a href=(cancel_url) { "Cancel" }
        }
    );

    base("Edit bill", &content)
}

/// Renders the page for editing a bill.
pub async fn get_edit_bill_page(
    State(state): State<ExpenseState>,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    render_edit_bill_page(&state, path, &query)
        .map(|markup| markup.into_response())
        .unwrap_or_else(|error| error.into_page_response())
}

fn render_edit_bill_page(
    state: &ExpenseState,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    query: &PeriodQuery,
) -> Result<Markup, Error> {
    let Path((group_id, bill_id)) = path?;
    let period = query.period()?;

    let connection = lock_connection(&state.db_connection)?;
    let bill = get_group_bill(&group_id, bill_id, &connection)?;

    Ok(edit_bill_view(&bill, period))
}
