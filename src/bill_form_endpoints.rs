//! Route handlers for the forms on the bills page.
//!
//! Each handler redirects back to the bills page once the change has been
//! saved, and responds with an error page otherwise.

use axum::{
    Form,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    Error,
    bill_form::{BillForm, bills_page_url, get_group_bill},
    database_id::ExpenseId,
    expense::{
        ExpenseState, GroupId, PeriodQuery, create_expense, delete_expense, lock_connection,
        update_expense,
    },
};

fn redirect_or_error_page(redirect_url: Result<String, Error>) -> Response {
    match redirect_url {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(error) => error.into_page_response(),
    }
}

/// A route handler for adding a bill from the form on the bills page.
pub async fn create_bill_from_form(
    State(state): State<ExpenseState>,
    group_id: Result<Path<String>, PathRejection>,
    form: Result<Form<BillForm>, FormRejection>,
) -> Response {
    redirect_or_error_page(create_bill(&state, group_id, form))
}

fn create_bill(
    state: &ExpenseState,
    group_id: Result<Path<String>, PathRejection>,
    form: Result<Form<BillForm>, FormRejection>,
) -> Result<String, Error> {
    let Path(group_id) = group_id?;
    let Form(form) = form?;

    let group_id = GroupId::new(&group_id)?;
    let (fields, period) = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;
    let bill = create_expense(&group_id, &fields, &connection).inspect_err(|error| {
        tracing::error!("Could not add a bill to {}: {error}", group_id.as_str())
    })?;
    tracing::debug!("Added bill {} to {}", bill.id, bill.group_id);

    Ok(bills_page_url(group_id.as_str(), period))
}

/// A route handler for saving the edit bill form.
pub async fn update_bill_from_form(
    State(state): State<ExpenseState>,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    form: Result<Form<BillForm>, FormRejection>,
) -> Response {
    redirect_or_error_page(update_bill(&state, path, form))
}

fn update_bill(
    state: &ExpenseState,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    form: Result<Form<BillForm>, FormRejection>,
) -> Result<String, Error> {
    let Path((group_id, bill_id)) = path?;
    let Form(form) = form?;

    let (fields, period) = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;
    let bill = get_group_bill(&group_id, bill_id, &connection)?;
    update_expense(bill.id, &fields, &connection)
        .inspect_err(|error| tracing::error!("Could not update bill {bill_id}: {error}"))?;

    Ok(bills_page_url(&bill.group_id, period))
}

/// A route handler for the delete buttons on the bills page.
pub async fn delete_bill_from_form(
    State(state): State<ExpenseState>,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    form: Result<Form<PeriodQuery>, FormRejection>,
) -> Response {
    redirect_or_error_page(delete_bill(&state, path, form))
}

fn delete_bill(
    state: &ExpenseState,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    form: Result<Form<PeriodQuery>, FormRejection>,
) -> Result<String, Error> {
    let Path((group_id, bill_id)) = path?;
    let Form(query) = form?;

    let period = query.period()?;

    let connection = lock_connection(&state.db_connection)?;
    let bill = get_group_bill(&group_id, bill_id, &connection)?;
    delete_expense(bill.id, &connection)
        .inspect_err(|error| tracing::error!("Could not delete bill {bill_id}: {error}"))?;

    Ok(bills_page_url(&bill.group_id, period))
}
