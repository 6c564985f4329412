use thiserror::Error;

use crate::api::ApiError;
use crate::task::sink::SinkError;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("submit failed: {0}")]
    Submit(#[from] SinkError),
}
