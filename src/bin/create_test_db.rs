use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{OffsetDateTime, macros::date};

use spendly::{ExpenseFields, GroupId, Money, create_expense, initialize_db};

/// A utility for creating a test database for the spendly server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The group to add the sample bills to.
    #[arg(long, short, default_value = "home_001")]
    group_id: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Adding sample bills to {}...", args.group_id);

    let group_id = GroupId::new(&args.group_id)?;
    let today = OffsetDateTime::now_utc().date();
    let bills = [
        ("Electricity", 10_000, date!(2024 - 01 - 05), "A"),
        ("Gas", 5_000, date!(2024 - 01 - 10), "B"),
        ("Electricity", 3_000, date!(2024 - 02 - 01), "A"),
        ("Water", 1_250, date!(2024 - 02 - 14), "C"),
        ("Internet", 7_999, today, "B"),
        ("Electricity", 4_550, today, "C"),
    ];

    for (category, cents, occurred_on, paid_by) in bills {
        let fields = ExpenseFields::new(category, Money::from_cents(cents), occurred_on, paid_by)?;
        create_expense(&group_id, &fields, &conn)?;
    }

    println!("Success!");

    Ok(())
}
