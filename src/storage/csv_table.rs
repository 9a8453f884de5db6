//! CSV match tables. The first record is the header row.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::StorageError;
use crate::models::MatchTable;

/// Read a CSV file into a raw table.
pub fn read_csv_table(path: &Path) -> Result<MatchTable, StorageError> {
    let file = std::fs::File::open(path)?;
    read_csv_from(file)
}

/// Read CSV from any reader.
pub fn read_csv_from<R: Read>(reader: R) -> Result<MatchTable, StorageError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut table = MatchTable::new(headers);

    for record in rdr.records() {
        let record = record?;
        table.push_row(record.iter().map(|c| c.to_string()).collect());
    }

    debug!("Parsed {} CSV rows", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "\
date,home_team,away_team,home_score,away_score,tournament,winner
1872-11-30,Scotland,England,0,0,Friendly,Draw
1873-03-08, England , Scotland ,4,2,Friendly,England
";
        let table = read_csv_from(data.as_bytes()).unwrap();

        assert_eq!(table.headers[1], "home_team");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][1], "England");
        assert_eq!(table.rows[1][6], "England");
    }

    #[test]
    fn test_read_csv_quoted_names() {
        let data = "home_team,away_team\n\"Korea, Republic of\",Japan\n";
        let table = read_csv_from(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0][0], "Korea, Republic of");
    }

    #[test]
    fn test_read_csv_headers_only() {
        let table = read_csv_from("home_team,away_team\n".as_bytes()).unwrap();
        assert_eq!(table.headers.len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_csv_empty_input() {
        let table = read_csv_from("".as_bytes()).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }
}
