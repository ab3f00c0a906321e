//! Error type for the engine binary.

use beeworld_core::ParamsError;
use beeworld_world::WorldError;

/// Top-level errors the engine can exit with.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The terrain map failed to load.
    #[error("terrain map: {0}")]
    World(#[from] WorldError),

    /// The parameter file failed to load or validate.
    #[error("parameters: {0}")]
    Params(#[from] ParamsError),

    /// The results file could not be written.
    #[error("failed to write results: {0}")]
    Output(#[from] std::io::Error),
}
