//! ts-batch: batch state-point query files and their runner.

pub mod run;
pub mod schema;
pub mod validate;

pub use run::{PointOutcome, run_batch};
pub use schema::*;
pub use validate::{ValidationError, validate_query_file};

pub type BatchResult<T> = Result<T, BatchError>;

#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> BatchResult<QueryFile> {
    let content = std::fs::read_to_string(path)?;
    let file: QueryFile = serde_yaml::from_str(&content)?;
    validate_query_file(&file)?;
    Ok(file)
}

pub fn save_yaml(path: &std::path::Path, file: &QueryFile) -> BatchResult<()> {
    validate_query_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> BatchResult<QueryFile> {
    let content = std::fs::read_to_string(path)?;
    let file: QueryFile = serde_json::from_str(&content)?;
    validate_query_file(&file)?;
    Ok(file)
}

pub fn save_json(path: &std::path::Path, file: &QueryFile) -> BatchResult<()> {
    validate_query_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` is JSON, anything else YAML.
pub fn load(path: &std::path::Path) -> BatchResult<QueryFile> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json { load_json(path) } else { load_yaml(path) }
}
