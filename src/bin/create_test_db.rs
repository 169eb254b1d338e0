use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use ledger_rs::{Transaction, TransactionKind, TransactionStore};

/// A utility for creating a test database for the REST API server of ledger_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of sample transactions to create, ending today.
    #[arg(long, short, default_value_t = 90)]
    days: i64,
}

/// Sample expenses as (category, amount, note), one is recorded per day in rotation.
const DAILY_EXPENSES: [(&str, f64, &str); 5] = [
    ("food", 14.5, "lunch"),
    ("travel", 3.2, "bus fare"),
    ("food", 82.9, "groceries"),
    ("shopping", 45.0, "books, stationery"),
    ("bills", 60.0, "phone"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let store = TransactionStore::open(output_path)?;

    println!("Creating sample transactions...");
    let today = OffsetDateTime::now_utc().date();

    for days_ago in (0..args.days).rev() {
        let date = (today - Duration::days(days_ago)).to_string();

        if days_ago % 30 == 0 {
            store.create(
                Transaction::build(TransactionKind::Income, 4200.0, &date)
                    .category("salary")
                    .note(Some("monthly pay")),
            )?;
            store.create(
                Transaction::build(TransactionKind::Expense, 1500.0, &date)
                    .category("rent")
                    .note(None),
            )?;
        }

        let (category, amount, note) = DAILY_EXPENSES[(days_ago % 5) as usize];
        store.create(
            Transaction::build(TransactionKind::Expense, amount, &date)
                .category(category)
                .note(Some(note)),
        )?;
    }

    println!("Created {} transactions.", store.count()?);
    println!("Success!");

    Ok(())
}
