//! Loading the symptom tables produced by the offline training step
//!
//! Layout under the artifacts root:
//!
//! ```text
//! data/processed/symptom_vocab.csv      symptom
//! data/processed/severity_weights.csv   symptom,weight
//! data/processed/disease_info.json      {"description": {..}, "precautions": {..}}
//! models/ann_pipeline.json              exported scaler + MLP
//! models/label_encoder.json             {"classes": [..]}
//! ```

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use crate::disease_info::DiseaseInfo;
use crate::error::ArtifactError;
use crate::severity::SeverityTable;
use crate::vocab::Vocabulary;

/// File locations of every artifact, relative to one root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    root: PathBuf,
}

impl ArtifactPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn processed(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    fn models(&self) -> PathBuf {
        self.root.join("models")
    }

    pub fn vocab(&self) -> PathBuf {
        self.processed().join("symptom_vocab.csv")
    }

    pub fn severity(&self) -> PathBuf {
        self.processed().join("severity_weights.csv")
    }

    pub fn disease_info(&self) -> PathBuf {
        self.processed().join("disease_info.json")
    }

    pub fn pipeline(&self) -> PathBuf {
        self.models().join("ann_pipeline.json")
    }

    pub fn labels(&self) -> PathBuf {
        self.models().join("label_encoder.json")
    }
}

/// The read-only tables consulted on every request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomTables {
    pub vocab: Vocabulary,
    pub severity: SeverityTable,
    pub disease_info: DiseaseInfo,
}

impl SymptomTables {
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let vocab = load_vocab(&paths.vocab())?;
        let severity = load_severity(&paths.severity())?;
        let disease_info = load_disease_info(&paths.disease_info())?;
        log::info!(
            "loaded {} symptoms, {} severity weights, {} disease descriptions from {}",
            vocab.len(),
            severity.len(),
            disease_info.description.len(),
            paths.root().display()
        );
        Ok(Self {
            vocab,
            severity,
            disease_info,
        })
    }
}

pub fn load_vocab(path: &Path) -> Result<Vocabulary, ArtifactError> {
    let table = CsvTable::read(path)?;
    let column = table.column(path, "symptom")?;
    let mut entries = Vec::with_capacity(table.rows.len());
    for (line, fields) in &table.rows {
        entries.push(table.field(path, *line, fields, column)?.to_string());
    }
    Vocabulary::new(entries).map_err(|source| ArtifactError::Table {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_severity(path: &Path) -> Result<SeverityTable, ArtifactError> {
    let table = CsvTable::read(path)?;
    let symptom = table.column(path, "symptom")?;
    let weight = table.column(path, "weight")?;
    let mut entries = Vec::with_capacity(table.rows.len());
    for (line, fields) in &table.rows {
        let key = table.field(path, *line, fields, symptom)?;
        let raw = table.field(path, *line, fields, weight)?;
        let value = raw.trim().parse::<f64>().map_err(|e| ArtifactError::Csv {
            path: path.to_path_buf(),
            line: *line,
            message: format!("invalid weight {raw:?}: {e}"),
        })?;
        entries.push((key.to_string(), value));
    }
    SeverityTable::new(entries).map_err(|source| ArtifactError::Table {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_disease_info(path: &Path) -> Result<DiseaseInfo, ArtifactError> {
    let s = read(path)?;
    serde_json::from_str(&s).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ArtifactError> {
    read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Header plus `(line number, fields)` rows of a small CSV file
struct CsvTable {
    header: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl CsvTable {
    fn read(path: &Path) -> Result<Self, ArtifactError> {
        let text = read(path)?;
        let csv_error = |line: usize, message: String| ArtifactError::Csv {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut header = None;
        let mut rows = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_record(line).map_err(|m| csv_error(line_no, m))?;
            match header {
                None => {
                    let names: Vec<String> = fields.iter().map(|f| f.trim().to_string()).collect();
                    header = Some(names);
                }
                Some(_) => rows.push((line_no, fields)),
            }
        }
        let header = header.ok_or_else(|| csv_error(1, "missing header row".into()))?;
        Ok(Self { header, rows })
    }

    fn column(&self, path: &Path, name: &str) -> Result<usize, ArtifactError> {
        // strip a UTF-8 BOM left by spreadsheet exports
        self.header
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| ArtifactError::Csv {
                path: path.to_path_buf(),
                line: 1,
                message: format!("missing column {name:?}"),
            })
    }

    fn field<'a>(
        &self,
        path: &Path,
        line: usize,
        fields: &'a [String],
        column: usize,
    ) -> Result<&'a str, ArtifactError> {
        fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| ArtifactError::Csv {
                path: path.to_path_buf(),
                line,
                message: format!(
                    "expected at least {} fields, found {}",
                    column + 1,
                    fields.len()
                ),
            })
    }
}

/// Split one CSV record. Fields may be double-quoted; `""` inside quotes is a
/// literal quote.
fn split_record(line: &str) -> Result<Vec<String>, String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".into());
    }
    fields.push(field);
    Ok(fields)
}
