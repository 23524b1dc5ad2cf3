use std::path::Path;

use tracing::{info, instrument};

use crate::error::{Result, TrackerError};
use crate::model::{DetailRow, InputRow, ProfileSummary, COMPUTED_COLUMNS};

const SAMPLE_PROFILE_URL: &str =
    "https://www.cloudskillsboost.google.com/public_profiles/01fa1e14-9949-434b-86dc-0e2ccd3ae339";

/// Rows of the input file together with its header.
#[derive(Debug, Clone, Default)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<InputRow>,
}

/// Read the input CSV. Fails if the file is unreadable or lacks `url_column`.
#[instrument]
pub fn read_input(path: &Path, url_column: &str) -> Result<InputTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if !headers.iter().any(|h| h == url_column) {
        return Err(TrackerError::MissingColumn {
            path: path.to_path_buf(),
            column: url_column.to_string(),
        });
    }

    let rows = reader
        .records()
        .map(|record| {
            let record = record?;
            let fields = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), record.get(i).unwrap_or_default().to_string()))
                .collect();
            Ok(InputRow::new(fields))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = rows.len(), "read input rows");
    Ok(InputTable { headers, rows })
}

/// Summary header: the identity columns followed by the computed columns.
pub fn summary_header(identity_columns: &[String]) -> Vec<String> {
    identity_columns
        .iter()
        .cloned()
        .chain(COMPUTED_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

/// Write one row per profile; input columns outside `header` are dropped.
pub fn write_summary(path: &Path, header: &[String], summaries: &[ProfileSummary]) -> Result<bool> {
    if summaries.is_empty() {
        info!("no summary data to save");
        return Ok(false);
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for summary in summaries {
        writer.write_record(header.iter().map(|column| summary.field(column)))?;
    }
    flush(writer, path)?;
    info!(path = %path.display(), count = summaries.len(), "saved profile summary");
    Ok(true)
}

pub fn write_details(path: &Path, rows: &[DetailRow]) -> Result<bool> {
    if rows.is_empty() {
        info!("no detailed data to save");
        return Ok(false);
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    flush(writer, path)?;
    info!(path = %path.display(), count = rows.len(), "saved detailed badge data");
    Ok(true)
}

/// Echo failed input rows under the input header, so the file can be fed
/// back in as input.
pub fn write_failures(path: &Path, headers: &[String], rows: &[InputRow]) -> Result<bool> {
    if rows.is_empty() {
        info!("no failed profiles to save");
        return Ok(false);
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|h| row.get(h).unwrap_or_default()))?;
    }
    flush(writer, path)?;
    info!(path = %path.display(), count = rows.len(), "saved failed profiles");
    Ok(true)
}

/// Create a one-row sample input file unless `path` already exists.
pub fn create_sample_input(path: &Path, identity_columns: &[String], url_column: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(identity_columns)?;
    writer.write_record(identity_columns.iter().map(|column| match column.as_str() {
        "User Name" => "Sample User",
        "Access" => "wn All Good",
        "UR" => "Yes",
        "Co" => "No",
        c if c == url_column => SAMPLE_PROFILE_URL,
        _ => "",
    }))?;
    flush(writer, path)?;
    info!(path = %path.display(), "created sample input file, add more profile URLs to it");
    Ok(true)
}

fn flush<W: std::io::Write>(mut writer: csv::Writer<W>, path: &Path) -> Result<()> {
    writer.flush().map_err(|e| TrackerError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::{Config, DEFAULT_URL_COLUMN};

    fn summary(input: InputRow) -> ProfileSummary {
        ProfileSummary {
            input,
            user_name: "Ada".to_string(),
            skill_badge_count: 2,
            skill_badge_names: "A, B".to_string(),
            arcade_game_count: 1,
            arcade_game_names: "Level 1".to_string(),
            completion_time: Some("Oct 4, 2025 EDT".to_string()),
        }
    }

    #[test]
    fn test_read_input_requires_url_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, "User Name,Email\nAda,ada@example.com\n").unwrap();

        let err = read_input(&path, DEFAULT_URL_COLUMN).unwrap_err();
        assert!(matches!(err, TrackerError::MissingColumn { .. }));
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_input(&dir.path().join("absent.csv"), DEFAULT_URL_COLUMN);
        assert!(matches!(result, Err(TrackerError::Csv(_))));
    }

    #[test]
    fn test_read_input_keeps_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(
            &path,
            format!("User Name,{DEFAULT_URL_COLUMN},Notes\nAda,https://x/p/1,\"a, b\"\nBob,,\n"),
        )
        .unwrap();

        let table = read_input(&path, DEFAULT_URL_COLUMN).unwrap();
        assert_eq!(table.headers, vec!["User Name", DEFAULT_URL_COLUMN, "Notes"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Notes"), Some("a, b"));
        assert_eq!(table.rows[1].get(DEFAULT_URL_COLUMN), Some(""));
    }

    #[test]
    fn test_write_summary_drops_unknown_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let input = InputRow::new(vec![
            ("User Name".to_string(), "".to_string()),
            ("Email".to_string(), "ada@example.com".to_string()),
            ("Secret".to_string(), "dropped".to_string()),
        ]);
        let header = summary_header(&Config::default().identity_columns);

        assert!(write_summary(&path, &header, &[summary(input)]).unwrap());

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            format!(
                "User Name,Email,{DEFAULT_URL_COLUMN},Access,UR,Co,# of Skill Badges (Completed),\
                 Names of Skill Badges,# of Arcade Games,Names of Completed Arcade Games,Completion Time"
            )
        );
        assert_eq!(
            lines.next().unwrap(),
            "Ada,ada@example.com,,,,,2,\"A, B\",1,Level 1,\"Oct 4, 2025 EDT\""
        );
        assert!(!written.contains("dropped"));
    }

    #[test]
    fn test_write_details_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("details.csv");
        let rows = [
            DetailRow {
                profile_url: "https://x/p/1".to_string(),
                badge_title: "Level 1: Cloud Basics".to_string(),
                date_earned: "Oct 4, 2025 EDT".to_string(),
                points: 2,
            },
            DetailRow {
                profile_url: "https://x/p/1".to_string(),
                badge_title: "N/A".to_string(),
                date_earned: "N/A".to_string(),
                points: 0,
            },
        ];

        assert!(write_details(&path, &rows).unwrap());

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Profile URL,Badge Title,Date Earned,Points",
                "https://x/p/1,Level 1: Cloud Basics,\"Oct 4, 2025 EDT\",2",
                "https://x/p/1,N/A,N/A,0",
            ]
        );
    }

    #[test]
    fn test_empty_outputs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        assert!(!write_details(&path, &[]).unwrap());
        assert!(!write_failures(&path, &[], &[]).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_failures_round_trip_as_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.csv");
        let headers = vec!["User Name".to_string(), DEFAULT_URL_COLUMN.to_string()];
        let row = InputRow::new(vec![
            ("User Name".to_string(), "Ada".to_string()),
            (DEFAULT_URL_COLUMN.to_string(), "https://x/p/1".to_string()),
        ]);

        assert!(write_failures(&path, &headers, &[row.clone()]).unwrap());
        let table = read_input(&path, DEFAULT_URL_COLUMN).unwrap();
        assert_eq!(table.headers, headers);
        assert_eq!(table.rows, vec![row]);
    }

    #[test]
    fn test_create_sample_input_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let config = Config::default();

        assert!(create_sample_input(&path, &config.identity_columns, &config.url_column).unwrap());
        assert!(!create_sample_input(&path, &config.identity_columns, &config.url_column).unwrap());

        let table = read_input(&path, &config.url_column).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get(&config.url_column), Some(SAMPLE_PROFILE_URL));
    }
}
