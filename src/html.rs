use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::money::Money;

/// The symbol shown in front of amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

// Table styles
pub const TABLE_STYLE: &str = "bills-table";
pub const TABLE_CELL_STYLE: &str = "cell";
pub const TABLE_AMOUNT_CELL_STYLE: &str = "cell amount";

// Summary panel styles
pub const PANEL_STYLE: &str = "panel";
pub const PANEL_GRID_STYLE: &str = "panel-grid";

// Form styles
pub const FORM_STYLE: &str = "bill-form";
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";
pub const BUTTON_STYLE: &str = "button";
pub const DANGER_BUTTON_STYLE: &str = "button danger";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page";

const STYLES: &str = r#"
    body {
        font-family: system-ui, sans-serif;
        margin: 0;
        background: #f9fafb;
        color: #111827;
    }
    .page {
        max-width: 64rem;
        margin: 0 auto;
        padding: 2rem 1.5rem;
    }
    .bills-table {
        width: 100%;
        border-collapse: collapse;
        background: white;
    }
    .bills-table th {
        text-align: left;
        font-size: 0.75rem;
        text-transform: uppercase;
        background: #f3f4f6;
    }
    .cell {
        padding: 0.75rem 1rem;
        border-bottom: 1px solid #e5e7eb;
    }
    .amount {
        text-align: right;
        white-space: nowrap;
    }
    .panel-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr));
        gap: 1rem;
        margin-top: 2rem;
    }
    .panel {
        background: white;
        border-radius: 0.5rem;
        padding: 1rem;
        box-shadow: 0 1px 2px rgba(0, 0, 0, 0.1);
    }
    .panel h2 {
        font-size: 1rem;
        margin-top: 0;
    }
    .panel dl {
        display: grid;
        grid-template-columns: 1fr auto;
        gap: 0.25rem 1rem;
        margin: 0;
    }
    .panel dd {
        margin: 0;
        text-align: right;
    }
    .bill-form {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr));
        gap: 0.75rem;
        align-items: end;
        margin: 1.5rem 0;
    }
    .form-label {
        display: block;
        font-size: 0.875rem;
        margin-bottom: 0.25rem;
    }
    .form-input {
        box-sizing: border-box;
        width: 100%;
        padding: 0.5rem;
        border: 1px solid #d1d5db;
        border-radius: 0.375rem;
    }
    .button {
        padding: 0.5rem 1rem;
        border: none;
        border-radius: 0.375rem;
        background: #2563eb;
        color: white;
        cursor: pointer;
    }
    .danger {
        background: #dc2626;
    }
    .row-actions {
        display: flex;
        gap: 0.5rem;
        align-items: center;
    }
    .row-actions form {
        margin: 0;
    }
"#;

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Spendly" }
                style { (PreEscaped(STYLES)) }
            }

            body
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 { (header) }
            p { (description) }
            p { (fix) }
            a href="/" { "Back to Homepage" }
        }
    );

    base(title, &content)
}

/// Format `amount` with the currency symbol, thousands separators and two
/// decimal places, e.g. "₹1,234.50".
///
/// The whole and fractional parts are formatted separately so that the cents
/// are always exact.
pub fn format_currency(amount: Money) -> String {
    static WHOLE_FMT: OnceLock<Formatter> = OnceLock::new();

    let whole_fmt = WHOLE_FMT.get_or_init(|| {
        Formatter::currency(CURRENCY_SYMBOL)
            .unwrap_or_else(|_| Formatter::new())
            .precision(Precision::Decimals(0))
    });

    let sign = if amount.is_negative() { "-" } else { "" };
    let cents = amount.cents().unsigned_abs();
    let whole = cents / 100;

    let whole = if whole == 0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        format!("{CURRENCY_SYMBOL}0")
    } else {
        whole_fmt.fmt_string(whole as f64)
    };

    format!("{sign}{whole}.{:02}", cents % 100)
}
