use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use paytrack::{
    PlainTextCredentials, TEST_USER_EMAIL, TEST_USER_PASSWORD, initialize_db, seed_test_data,
};

/// A utility for creating a test database for the REST API server of paytrack.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
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

    println!("Creating accounts, test user, reminders and transactions...");
    let today = OffsetDateTime::now_utc().date();
    seed_test_data(&conn, &PlainTextCredentials, today)?;

    println!("Success! Log in as {TEST_USER_EMAIL} with the password {TEST_USER_PASSWORD:?}.");

    Ok(())
}
