//! Rig Engine - Entity store and scene.
//!
//! The engine manages the core data structures:
//! - Store: arena index allocation and parallel columns
//! - Scene: assembly, capability dispatch, propagation, validation
//!
//! # Architecture
//!
//! Entities are NOT objects. They are indices into parallel columns:
//!
//! ```text
//! Index 0: Pivot      (x=480, y=540, visible=true, ...)
//! Index 1: Handle     (x=480, y=340, visible=true, pivot=0, ...)
//! Index 2: Follower   (x=480, y=340, visible=true, pivot=0, handle=1, ...)
//! Index 3: Decorative (sources=(0, 1), ...)
//! ```
//!
//! This keeps the reactor graph safe by construction (ids never dangle,
//! entities are never removed once added) and the observable columns
//! reactive (each cell is a stable slot that never moves).

mod scene;
mod store;

pub use scene::{Scene, SceneError};
pub use store::EntityStore;
