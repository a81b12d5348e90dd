pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Why a motion request on the falling piece was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum MotionError {
    #[display("falling piece would collide")]
    Collision,
    #[display("session is not accepting motion")]
    Inactive,
}
