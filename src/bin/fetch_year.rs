//! Companion CLI: fetch one season and print the cleaned table as CSV.
//!
//! Usage: `fetch_year [YEAR]` (defaults to the newest season).

use anyhow::{bail, Context, Result};

use courtside::data::export;
use courtside::data::loader::{self, MAX_YEAR, MIN_YEAR};

fn main() -> Result<()> {
    env_logger::init();

    let year = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u16>()
            .with_context(|| format!("invalid year {arg:?}"))?,
        None => MAX_YEAR,
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        bail!("year {year} outside supported range {MIN_YEAR}-{MAX_YEAR}");
    }

    let table = loader::load_year(year)?;
    log::info!("{} rows, {} columns", table.n_rows(), table.n_columns());
    print!("{}", export::to_csv_string(&table)?);
    Ok(())
}
