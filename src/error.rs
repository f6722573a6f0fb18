//! Error types
//!
//! Only configuration and storage can fail. Gameplay operations are total.

use thiserror::Error;

/// A tuning value outside its accepted range, reported at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in [0, 1] (got {value})")]
    ExponentOutOfRange { field: &'static str, value: f32 },

    #[error("hard spawn multiplier must lie in (0, 1] (got {0})")]
    HardSpawnMultiplier(f32),

    #[error("{field} must be at least 1 (got {value})")]
    BelowOne { field: &'static str, value: f32 },

    #[error("min spawn interval {min} exceeds base spawn interval {base}")]
    SpawnFloorAboveBase { min: f32, base: f32 },

    #[error("max obstacle speed {max} is below base obstacle speed {base}")]
    SpeedCeilingBelowBase { max: f32, base: f32 },

    #[error("crouch height {crouch} must not exceed stand height {stand}")]
    CrouchTallerThanStand { crouch: f32, stand: f32 },

    #[error("seam fix offset {seam} must be smaller than tile width {width}")]
    SeamWiderThanTile { seam: f32, width: f32 },

    #[error("obstacle catalog is empty")]
    EmptyCatalog,

    #[error("config parse error: {0}")]
    Parse(String),
}

/// Storage backend failure.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
