//! Error types for physics world operations.

use crate::world::BodyHandle;

/// Errors returned by [`World`](crate::world::World) operations.
///
/// Interaction code never surfaces these: a missed pick or a stale handle
/// during a drag is a no-op, not a failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Radius must be positive and finite.
    #[error("radius must be positive and finite")]
    InvalidRadius,
    /// Window dimensions must both be non-zero.
    #[error("viewport {width}x{height} has no area")]
    InvalidViewport { width: u32, height: u32 },
    /// The handle does not name a body in this world.
    #[error("body {0:?} is not in the world")]
    BodyNotFound(BodyHandle),
}
