use crate::core::record_builder::build_record;
use crate::core::row_parser::parse_row;
use crate::domain::model::{Dataset, LoadReport};
use crate::domain::ports::DatasetSource;
use crate::utils::error::Result;

/// Fetches the dataset text and turns it into records.
pub struct DatasetLoader<S: DatasetSource> {
    source: S,
}

impl<S: DatasetSource> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self) -> Result<Dataset> {
        tracing::debug!("Fetching dataset from {}", self.source.describe());
        let text = self.source.fetch_text().await?;
        tracing::debug!("Fetched {} bytes", text.len());
        parse_dataset(&text)
    }
}

/// Parses the whole dataset text. The first line holds the headers; every
/// later non-blank line is a candidate, and candidates that do not yield a
/// record are skipped.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .trim()
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate();

    let headers = match lines.next() {
        Some((_, first)) if !first.is_empty() => parse_header(first)?,
        _ => Vec::new(),
    };

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (index, line) in lines.filter(|(_, l)| !l.trim().is_empty()) {
        report.candidate_lines += 1;
        match build_record(&parse_row(line)) {
            Some(record) => records.push(record),
            None => {
                report.skipped += 1;
                tracing::debug!(line = index + 1, "Skipping malformed dataset line");
            }
        }
    }
    report.loaded = records.len();

    Ok(Dataset {
        headers,
        records,
        report,
    })
}

fn parse_header(line: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}
