//! The page that lists a group's bills next to their summary.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    bill_form::{BillFormDefaults, bill_form_fields, with_period},
    endpoints::{self, format_bill_endpoint, format_endpoint},
    expense::{Expense, PeriodQuery, SummaryState, list_expenses, lock_connection},
    html::{
        BUTTON_STYLE, DANGER_BUTTON_STYLE, FORM_STYLE, PAGE_CONTAINER_STYLE, PANEL_GRID_STYLE,
        PANEL_STYLE, TABLE_AMOUNT_CELL_STYLE, TABLE_CELL_STYLE, TABLE_STYLE, base,
        format_currency,
    },
    money::Money,
    period::{Period, YearMonth, filter_by_period},
    summary::{Summary, build_summary},
    timezone::today,
};

/// Everything the bills page displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillsPageView {
    pub group_id: String,
    pub period: Period,
    /// The date in the local timezone, used as the default date for new bills.
    pub today: Date,
    /// The months that have at least one bill, newest first.
    pub available_periods: Vec<YearMonth>,
    /// The bills in `period`.
    pub bills: Vec<Expense>,
    pub summary: Summary,
}

impl BillsPageView {
    /// Build the view for `expenses` that all belong to `group_id`.
    ///
    /// The payer ranking is computed for the month that `today` falls in.
    pub fn new(group_id: &str, expenses: &[Expense], period: Period, today: Date) -> Self {
        let summary = build_summary(expenses, period, YearMonth::of(today));

        let mut available_periods: Vec<YearMonth> = summary.by_month.keys().copied().collect();
        available_periods.sort_unstable_by(|a, b| b.cmp(a));

        let bills = filter_by_period(expenses, period)
            .into_iter()
            .cloned()
            .collect();

        Self {
            group_id: group_id.to_owned(),
            period,
            today,
            available_periods,
            bills,
            summary,
        }
    }
}

fn totals_panel<'a, K>(title: &str, totals: impl IntoIterator<Item = (K, &'a Money)>) -> Markup
where
    K: std::fmt::Display,
{
    let totals: Vec<_> = totals.into_iter().collect();

    html!(
        section class=(PANEL_STYLE)
        {
            h2 { (title) }

            @if totals.is_empty() {
                p { "Nothing to show." }
            } @else {
                dl
                {
                    @for (key, total) in &totals {
                        dt { (key) }
                        dd { (format_currency(**total)) }
                    }
                }
            }
        }
    )
}

pub fn bills_view(view: &BillsPageView) -> Markup {
    let page_url = format_endpoint(endpoints::BILLS_VIEW, &view.group_id);
    let summary = &view.summary;

    let table_row = |bill: &Expense| {
        let edit_url = with_period(
            format_bill_endpoint(endpoints::EDIT_BILL_VIEW, &view.group_id, bill.id),
            view.period,
        );
        let delete_url = format_bill_endpoint(endpoints::DELETE_BILL_VIEW, &view.group_id, bill.id);

        html!(
            tr
            {
                td class=(TABLE_CELL_STYLE) { (bill.occurred_on) }
                td class=(TABLE_CELL_STYLE) { (bill.category) }
                td class=(TABLE_CELL_STYLE) { (bill.paid_by) }
                td class=(TABLE_AMOUNT_CELL_STYLE) { (format_currency(bill.amount)) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="row-actions"
                    {
                        a href=(edit_url) { "Edit" }

                        form
                            method="post"
                            action=(delete_url)
                            onsubmit="return confirm('Delete this bill?')"
                        {
                            input type="hidden" name="period" value=(view.period);
                            button type="submit" class=(DANGER_BUTTON_STYLE) { "Delete" }
                        }
                    }
                }
            }
        )
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Bills for " (view.group_id) }

            form id="add-bill" method="post" action=(page_url) class=(FORM_STYLE)
            {
                (bill_form_fields(&BillFormDefaults::new_bill(view.today, view.period)))

                button type="submit" class=(BUTTON_STYLE) { "Add Bill" }
            }

            form method="get" action=(page_url)
            {
                label for="period" { "Period " }
                select id="period" name="period"
                {
                    option value="all" selected[view.period == Period::All] { "All time" }

                    @for month in &view.available_periods {
                        option
                            value=(month)
                            selected[view.period == Period::Month(*month)]
                        {
                            (month)
                        }
                    }
                }
                " "
                button type="submit" { "Show" }
            }

            table class=(TABLE_STYLE)
            {
                thead
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Paid by" }
                        th scope="col" class=(TABLE_AMOUNT_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for bill in &view.bills {
                        (table_row(bill))
                    }

                    @if view.bills.is_empty() {
                        tr
                        {
                            td colspan="5" class=(TABLE_CELL_STYLE)
                            {
                                "No bills recorded for this period."
                            }
                        }
                    }
                }
            }

            div class=(PANEL_GRID_STYLE)
            {
                section id="total" class=(PANEL_STYLE)
                {
                    h2 { "Total" }
                    p { (format_currency(summary.total)) }
                }

                (totals_panel("By person", summary.by_person.iter()))
                (totals_panel("By category", summary.by_category.iter()))
                (totals_panel("By month", summary.by_month.iter()))
                (totals_panel(
                    &format!("Top payers in {}", summary.current_month),
                    summary
                        .current_month_ranking
                        .iter()
                        .map(|person| (&person.paid_by, &person.total)),
                ))
            }
        }
    );

    base(&format!("Bills for {}", view.group_id), &content)
}

/// Route handler for the bills page.
pub async fn get_bills_page(
    State(state): State<SummaryState>,
    Path(group_id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    render_bills_page(&state, &group_id, &query)
        .map(|markup| markup.into_response())
        .unwrap_or_else(|error| error.into_page_response())
}

fn render_bills_page(
    state: &SummaryState,
    group_id: &str,
    query: &PeriodQuery,
) -> Result<Markup, Error> {
    let period = query.period()?;
    let today = today(&state.local_timezone)?;

    let connection = lock_connection(&state.db_connection)?;
    let expenses = list_expenses(group_id, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses for {group_id}: {error}"))?;

    Ok(bills_view(&BillsPageView::new(
        group_id,
        &expenses,
        period,
        today,
    )))
}
