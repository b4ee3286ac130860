//! # armature
//!
//! Reactive 2D rig core - constrained arm kinematics and pointer
//! interaction.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals)
//! for fine-grained reactivity.
//!
//! ## Architecture
//!
//! armature uses a parallel arrays (ECS-style) architecture where entities
//! are indices into columnar arrays rather than objects. The externally
//! observed columns (position, rotation, radius, visibility) are reactive
//! slots the host's render layer can track.
//!
//! The interaction and update flow is:
//!
//! ```text
//! pointer events -> InputRouter -> touch/drag/release
//!                     -> Handle constraint solver
//!                     -> reactor propagation (Follower, Decoratives)
//! frame tick -> update/react pass -> FrameSnapshot -> host draw pass
//! ```
//!
//! This crate is an embedded library: the host owns the surface, the asset
//! pipeline, and the frame scheduling, delivers pointer and resize events,
//! and reads final transforms once per frame. There is no I/O here.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Point, EntityId, EntityKind, Capabilities)
//! - [`math`] - Scalar interpolation and angle wrapping
//! - [`engine`] - Entity store, scene assembly, reactor propagation
//! - [`rig`] - Constraint solvers (handle arc, follower lag) and assembly
//! - [`state`] - InputRouter state machine, viewport breakpoints
//! - [`pipeline`] - Frame tick and draw snapshot

pub mod engine;
pub mod math;
pub mod pipeline;
pub mod rig;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{EntityStore, Scene, SceneError};

pub use rig::{
    build_rig, capture_offset, constrain, drag_candidate, ease, project, FollowerParams, Rig,
    DEFAULT_STRETCH, HOVER_SCALE,
};

pub use state::{
    InputRouter, RigMetrics, Viewport, MAX_CAPTURE_REDIRECTS, MIN_TOUCH_RADIUS,
    MOBILE_WIDTH_BREAKPOINT, SHORT_HEIGHT_BREAKPOINT,
};

pub use pipeline::{tick, DrawEntry, FrameSnapshot};
