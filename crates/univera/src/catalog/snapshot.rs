use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Accommodation, College};
use super::lenient::lenient_list;
use crate::accounts::UserProfile;
use crate::favorites::LegacyFavoriteRecord;

/// JSON export of the document store used to seed the in-memory adapters.
///
/// Documents that cannot be decoded at all (no usable id) are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default, deserialize_with = "lenient_list")]
    pub colleges: Vec<College>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub pgs: Vec<Accommodation>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub users: Vec<UserProfile>,
    /// Legacy favorite records keyed by user id.
    #[serde(default)]
    pub legacy_favorites: BTreeMap<String, Vec<LegacyFavoriteRecord>>,
}

#[derive(Debug)]
pub enum CatalogLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLoadError::Io(err) => write!(f, "failed to read catalog snapshot: {}", err),
            CatalogLoadError::Json(err) => write!(f, "invalid catalog snapshot: {}", err),
        }
    }
}

impl std::error::Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogLoadError::Io(err) => Some(err),
            CatalogLoadError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl CatalogSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let snapshot = serde_json::from_reader(reader)?;
        Ok(snapshot)
    }

    pub fn legacy_records_for(&self, user_id: &str) -> &[LegacyFavoriteRecord] {
        self.legacy_favorites
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogExportError {
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),
}

const EXPORT_HEADER: [&str; 8] = [
    "id",
    "name",
    "location",
    "state",
    "type",
    "rating",
    "nirf_ranking",
    "established",
];

/// Write colleges as CSV with every cell quoted. Returns the number of data rows.
pub fn export_colleges_csv<W: Write>(
    colleges: &[College],
    writer: W,
) -> Result<usize, CatalogExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADER)?;
    for college in colleges {
        csv_writer.write_record([
            college.id.as_str().to_string(),
            college.name.clone(),
            college.location.clone(),
            college.state.clone(),
            college.college_type.label().to_string(),
            optional_cell(college.rating),
            optional_cell(college.nirf_ranking),
            optional_cell(college.established),
        ])?;
    }
    csv_writer.flush()?;

    Ok(colleges.len())
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}
