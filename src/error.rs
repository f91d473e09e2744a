//! Error types for creature construction, pools and persistence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("creature blueprint has no body nodes")]
    EmptyBody,

    #[error("body arrays differ in length: {radii} radii, {links} link distances, {flex} flex limits")]
    MismatchedBody {
        radii: usize,
        links: usize,
        flex: usize,
    },

    #[error("quadruped blueprint is missing its limb templates")]
    MissingLimbs,

    #[error("limb anchor {anchor} is outside the body (1..{body_len})")]
    LimbAnchorOutOfRange { anchor: usize, body_len: usize },

    #[error("failed to grow creature pool: {0}")]
    PoolAllocation(#[from] std::collections::TryReserveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid high score: {0}")]
    ParseScore(#[from] std::num::ParseIntError),

    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
