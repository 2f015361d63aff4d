use anyhow::{Context, Result};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use super::model::StatsTable;

/// Download name offered for every export, regardless of season.
pub const FILE_NAME: &str = "playerstats.csv";

const DATA_URI_PREFIX: &str = "data:file/csv;base64,";

/// Render the table as CSV text: one header record, then one record per row
/// with every cell in display form (missing values spelled "N/A").
pub fn to_csv_string(table: &StatsTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .context("writing CSV header")?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .context("writing CSV row")?;
    }
    let bytes = writer.into_inner().context("flushing CSV buffer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Base64 `data:` link carrying the whole CSV, for pasting into a browser
/// address bar when a file dialog is unavailable.
pub fn to_data_uri(table: &StatsTable) -> Result<String> {
    let csv_text = to_csv_string(table)?;
    Ok(format!("{DATA_URI_PREFIX}{}", BASE64_STANDARD.encode(csv_text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn sample() -> StatsTable {
        StatsTable::from_raw(
            vec!["Player".into(), "Team".into(), "Pos".into(), "PTS".into()],
            vec![
                vec!["Tatum".into(), "BOS".into(), "PF".into(), "26.9".into()],
                vec!["Ghost".into(), "".into(), "C".into(), "".into()],
            ],
        )
    }

    #[test]
    fn csv_text_spells_missing_cells_as_na() {
        let text = to_csv_string(&sample()).unwrap();
        assert_eq!(text, "Player,Team,Pos,PTS\nTatum,BOS,PF,26.9\nGhost,N/A,C,N/A\n");
    }

    #[test]
    fn csv_round_trips_through_the_parser() {
        let table = StatsTable::from_raw(
            vec!["Player".into(), "Team".into(), "PTS".into()],
            vec![
                vec!["Smith, Jr.".into(), "SAS".into(), "13.7".into()],
                vec!["Ghost".into(), "N/A".into(), "0.5".into()],
            ],
        );
        let text = to_csv_string(&table).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let columns: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|rec| rec.unwrap().iter().map(str::to_string).collect())
            .collect();

        assert_eq!(StatsTable::from_raw(columns, rows), table);
    }

    #[test]
    fn data_uri_decodes_back_to_the_csv() {
        let table = sample();
        let uri = to_data_uri(&table).unwrap();
        let encoded = uri
            .strip_prefix("data:file/csv;base64,")
            .expect("uri carries the csv media type prefix");
        let decoded = BASE64_STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, to_csv_string(&table).unwrap().into_bytes());
    }

    #[test]
    fn numeric_cells_keep_their_short_form() {
        let table = StatsTable::from_raw(
            vec!["G".into()],
            vec![vec!["82".into()], vec!["0.5".into()]],
        );
        assert!(matches!(table.rows[0][0], Cell::Number(_)));
        assert_eq!(to_csv_string(&table).unwrap(), "G\n82\n0.5\n");
    }
}
