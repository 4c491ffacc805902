//! Batch runner.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, warn};
use ts_fluids::{PropertyEngine, Session, StateError, StatePoint, StateResult};

use crate::schema::QueryFile;

/// Result of one point in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOutcome {
    pub label: String,
    pub result: StateResult<StatePoint>,
}

impl PointOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Select the file's fluid on `session` and evaluate every point.
///
/// Only a failed fluid selection aborts the batch; per-point failures are
/// collected in the returned outcomes.
pub fn run_batch<E: PropertyEngine>(
    session: &mut Session<E>,
    file: &QueryFile,
) -> StateResult<Vec<PointOutcome>> {
    session.select_fluid(&file.fluid)?;

    let outcomes: Vec<PointOutcome> = file
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let label = point.display_label(index);
            let result = point
                .flash_input()
                .and_then(|input| session.evaluate(&input));
            match &result {
                Ok(_) => debug!(point = %label, "evaluated"),
                Err(err) => warn!(point = %label, "{err}"),
            }
            PointOutcome { label, result }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        fluid = %file.fluid,
        points = outcomes.len(),
        failed,
        "batch finished"
    );
    Ok(outcomes)
}

impl Serialize for PointOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("label", &self.label)?;
        match &self.result {
            Ok(state) => map.serialize_entry("state", state)?,
            Err(err) => map.serialize_entry("error", &ErrorReport(err))?,
        }
        map.end()
    }
}

struct ErrorReport<'a>(&'a StateError);

impl Serialize for ErrorReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("kind", &self.0.kind())?;
        map.serialize_entry("message", &self.0.to_string())?;
        map.end()
    }
}
