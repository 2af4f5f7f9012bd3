use thiserror::Error;

/// Structural problems rejected when a [`Scene`](crate::Scene) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("solid {index} has a zero extent")]
    EmptySolid { index: usize },
    #[error("segment {index} has zero length")]
    EmptySegment { index: usize },
    #[error("actor {index} has a zero extent")]
    EmptyActor { index: usize },
    #[error("gravity sign must be 1 or -1, got {0}")]
    GravitySign(i32),
}
