use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to parse timeline data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timeline item id {0} is used more than once")]
    DuplicateId(u32),
    #[error("timeline item {id} has energy {energy}, expected 0-100")]
    EnergyOutOfRange { id: u32, energy: u32 },
}
