use std::time::Duration;

use thiserror::Error;

use super::html;
use super::model::{Cell, StatsTable, AGE_COLUMN, POS_COLUMN, RANK_COLUMN, TEAM_COLUMN};

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// Season bounds: basketball-reference publishes per-game tables from the
/// 1949–50 season onward.
pub const MIN_YEAR: u16 = 1950;
pub const MAX_YEAR: u16 = 2024;

const USER_AGENT: &str = concat!("courtside/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-game stats page for one season.
pub fn stats_url(year: u16) -> String {
    format!("https://www.basketball-reference.com/leagues/NBA_{year}_per_game.html")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure modes of the load step. Either way the current interaction is
/// over; the next year selection starts a fresh run.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The page could not be fetched, or contained no parsable table.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    /// A column the rest of the pipeline relies on is missing.
    #[error("schema mismatch: column {0:?} not found")]
    SchemaMismatch(String),
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Fetch and clean the per-game player table for one season. Blocking; this
/// is the single network call of a pipeline run.
pub fn load_year(year: u16) -> Result<StatsTable, LoadError> {
    let body = fetch_page(&stats_url(year))?;
    parse_stats_table(&body)
}

/// Clean the first table of a stats page:
/// repeated header rows out (recognized by the literal "Age" in the Age
/// column), empty cells to [`Cell::Missing`], the "Rk" rank column dropped
/// when present, and the columns the pipeline relies on verified.
pub fn parse_stats_table(html_doc: &str) -> Result<StatsTable, LoadError> {
    let visible = html::strip_comments(html_doc);
    let table_markup = html::first_table(&visible)
        .ok_or_else(|| LoadError::SourceUnavailable("no stats table found in page".into()))?;

    let mut raw_rows = html::table_rows(table_markup);
    if raw_rows.is_empty() {
        return Err(LoadError::SourceUnavailable("stats table has no rows".into()));
    }
    let columns = raw_rows.remove(0);
    let mut table = StatsTable::from_raw(columns, raw_rows);

    // The publisher re-inserts the header as a data row at intervals.
    // Seasons without an Age column skip this step untouched.
    if let Some(age) = table.column_index(AGE_COLUMN) {
        table
            .rows
            .retain(|row| !matches!(row.get(age), Some(Cell::Text(s)) if s == AGE_COLUMN));
    }

    // Row rank mirrors display order; not part of the dataset.
    table.remove_column(RANK_COLUMN);

    for required in [TEAM_COLUMN, POS_COLUMN] {
        if table.column_index(required).is_none() {
            return Err(LoadError::SchemaMismatch(required.to_string()));
        }
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

fn fetch_page(url: &str) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| LoadError::SourceUnavailable(e.to_string()))?;

    client
        .get(url)
        .send()
        .and_then(|res| res.error_for_status())
        .and_then(|res| res.text())
        .map_err(|e| LoadError::SourceUnavailable(format!("{url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEASON_PAGE: &str = r#"
        <html><body>
        <!-- <table><tr><th>Decoy</th></tr><tr><td>commented out</td></tr></table> -->
        <table id="per_game_stats">
          <thead>
            <tr><th>Rk</th><th>Player</th><th>Age</th><th>Team</th><th>Pos</th><th>PTS</th></tr>
          </thead>
          <tbody>
            <tr><th scope="row">1</th><td>Jayson Tatum</td><td>25</td><td>BOS</td><td>PF</td><td>26.9</td></tr>
            <tr class="thead"><td>Rk</td><td>Player</td><td>Age</td><td>Team</td><td>Pos</td><td>PTS</td></tr>
            <tr><th scope="row">2</th><td>Nikola Jokic</td><td>28</td><td>DEN</td><td>C</td><td></td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_and_cleans_a_season_page() {
        let table = parse_stats_table(SEASON_PAGE).expect("page parses");
        assert_eq!(table.columns, vec!["Player", "Age", "Team", "Pos", "PTS"]);
        assert_eq!(table.n_rows(), 2, "repeated header row must be dropped");
        assert_eq!(table.rows[0][0], Cell::Text("Jayson Tatum".into()));
        assert_eq!(table.rows[1][4], Cell::Missing, "empty cell becomes missing");
    }

    #[test]
    fn skips_commented_out_tables() {
        let table = parse_stats_table(SEASON_PAGE).expect("page parses");
        assert!(!table.columns.iter().any(|c| c == "Decoy"));
    }

    #[test]
    fn table_without_age_column_passes_through_dedup() {
        let page = r#"
            <table>
              <tr><th>Rk</th><th>Player</th><th>Team</th><th>Pos</th><th>PTS</th></tr>
              <tr><td>1</td><td>Bob Cousy</td><td>BOS</td><td>PG</td><td>18.5</td></tr>
            </table>
        "#;
        let table = parse_stats_table(page).expect("page parses");
        assert_eq!(table.n_rows(), 1);
        assert_eq!(table.rows[0][0], Cell::Text("Bob Cousy".into()));
    }

    #[test]
    fn missing_rank_column_is_not_an_error() {
        let page = r#"
            <table>
              <tr><th>Player</th><th>Team</th><th>Pos</th></tr>
              <tr><td>Earl Monroe</td><td>NYK</td><td>SG</td></tr>
            </table>
        "#;
        let table = parse_stats_table(page).expect("page parses");
        assert_eq!(table.columns, vec!["Player", "Team", "Pos"]);
    }

    #[test]
    fn missing_required_column_is_schema_mismatch() {
        let page = r#"
            <table>
              <tr><th>Player</th><th>Pos</th></tr>
              <tr><td>Someone</td><td>C</td></tr>
            </table>
        "#;
        match parse_stats_table(page) {
            Err(LoadError::SchemaMismatch(col)) => assert_eq!(col, "Team"),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn page_without_a_table_is_source_unavailable() {
        let err = parse_stats_table("<html><body>rate limited</body></html>").unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable(_)));
        // A page whose only table is commented out counts as having none.
        let err = parse_stats_table("<!-- <table><tr><td>x</td></tr></table> -->").unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable(_)));
    }
}
