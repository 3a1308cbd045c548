//! The form for adding and editing bills from the bills page.

use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::{Expense, ExpenseFields, PeriodQuery, get_expense},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    money::Money,
    period::Period,
};

/// The fields posted by the bill form.
#[derive(Debug, Deserialize)]
pub struct BillForm {
    pub category: String,
    pub amount: Money,
    pub occurred_on: Date,
    pub paid_by: String,
    /// The period the bills page was showing when the form was sent.
    #[serde(default)]
    pub period: Option<String>,
}

impl BillForm {
    /// Validate the bill and the period to show once it has been saved.
    ///
    /// # Errors
    /// Returns the validation errors of [ExpenseFields::new], or
    /// [Error::InvalidPeriod] if the period is not valid.
    pub fn validate(&self) -> Result<(ExpenseFields, Period), Error> {
        let fields = ExpenseFields::new(
            &self.category,
            self.amount,
            self.occurred_on,
            &self.paid_by,
        )?;
        let period = PeriodQuery {
            period: self.period.clone(),
        }
        .period()?;

        Ok((fields, period))
    }
}

pub struct BillFormDefaults<'a> {
    pub category: Option<&'a str>,
    pub amount: Option<Money>,
    pub occurred_on: Date,
    pub paid_by: Option<&'a str>,
    pub period: Period,
}

impl<'a> BillFormDefaults<'a> {
    /// An empty form dated `today`.
    pub fn new_bill(today: Date, period: Period) -> Self {
        Self {
            category: None,
            amount: None,
            occurred_on: today,
            paid_by: None,
            period,
        }
    }

    /// A form filled in with the fields of `bill`.
    pub fn from_bill(bill: &'a Expense, period: Period) -> Self {
        Self {
            category: Some(&bill.category),
            amount: Some(bill.amount),
            occurred_on: bill.occurred_on,
            paid_by: Some(&bill.paid_by),
            period,
        }
    }
}

pub fn bill_form_fields(defaults: &BillFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| amount.to_string());

    html! {
        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Utility type"
            }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Electricity"
                required
                value=[defaults.category]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0"
                max=(Money::MAX)
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="occurred_on"
                class=(FORM_LABEL_STYLE)
            {
                "Bill date"
            }

            input
                name="occurred_on"
                id="occurred_on"
                type="date"
                value=(defaults.occurred_on)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="paid_by"
                class=(FORM_LABEL_STYLE)
            {
                "Paid by"
            }

            input
                name="paid_by"
                id="paid_by"
                type="text"
                placeholder="Name"
                required
                value=[defaults.paid_by]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        input type="hidden" name="period" value=(defaults.period);
    }
}

/// Add `period` to `url` as a query string, unless it is [Period::All].
pub fn with_period(url: String, period: Period) -> String {
    if period == Period::All {
        return url;
    }

    match serde_urlencoded::to_string([("period", period.to_string())]) {
        Ok(query) => format!("{url}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode period {period} for {url}: {error}");
            url
        }
    }
}

/// The address of the bills page for `group_id` showing `period`.
pub fn bills_page_url(group_id: &str, period: Period) -> String {
    with_period(format_endpoint(endpoints::BILLS_VIEW, group_id), period)
}

/// Get the bill `bill_id` as long as it belongs to `group_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if there is no such bill or it belongs to another group,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_group_bill(
    group_id: &str,
    bill_id: ExpenseId,
    connection: &Connection,
) -> Result<Expense, Error> {
    let bill = get_expense(bill_id, connection)?;

    if bill.group_id != group_id.trim() {
        tracing::debug!(
            "Bill {bill_id} belongs to {} rather than {group_id}",
            bill.group_id
        );
        return Err(Error::NotFound);
    }

    Ok(bill)
}
