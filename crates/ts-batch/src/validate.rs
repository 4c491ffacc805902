//! Query file validation.

use std::collections::HashSet;

use crate::schema::{LATEST_VERSION, QueryFile};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Missing fluid identifier")]
    MissingFluid,

    #[error("Query file has no points")]
    NoPoints,

    #[error("Duplicate label: {label}")]
    DuplicateLabel { label: String },

    #[error("Invalid point {point}: {reason}")]
    InvalidPoint { point: String, reason: String },
}

/// Check structure and every point's inputs.
///
/// Fluid names are not checked here; they depend on the engine.
pub fn validate_query_file(file: &QueryFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    if file.fluid.trim().is_empty() {
        return Err(ValidationError::MissingFluid);
    }

    if file.points.is_empty() {
        return Err(ValidationError::NoPoints);
    }

    let mut labels = HashSet::new();
    for (index, point) in file.points.iter().enumerate() {
        if let Some(label) = &point.label {
            if !labels.insert(label.as_str()) {
                return Err(ValidationError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        point
            .flash_input()
            .map_err(|err| ValidationError::InvalidPoint {
                point: point.display_label(index),
                reason: err.to_string(),
            })?;
    }

    Ok(())
}
