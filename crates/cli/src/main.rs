use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use stockroom_catalog::read_catalog;
use stockroom_cli::Session;

#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about = "Interactive product catalog")]
struct Args {
    /// Catalog file to load. Prompted for interactively when omitted.
    database: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    stockroom_observability::init();

    let args = Args::parse();
    let path = match args.database {
        Some(path) => path,
        None => PathBuf::from(prompt_for_database()?),
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(_) => {
            println!("Error: opening the file '{}' failed.", path.display());
            return Ok(ExitCode::FAILURE);
        }
    };

    let catalog = match read_catalog(BufReader::new(file)) {
        Ok(catalog) => catalog,
        Err(err) => {
            println!("Error: {err}.");
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::info!(products = catalog.len(), "catalog loaded");

    let mut session = Session::new(catalog, io::stdin().lock(), io::stdout().lock());
    session.run()?;
    tracing::info!("session ended");

    Ok(ExitCode::SUCCESS)
}

fn prompt_for_database() -> Result<String> {
    print!("Enter database name: ");
    io::stdout().flush()?;

    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    Ok(name.trim().to_owned())
}
