//! Frame Pipeline
//!
//! Connects the entity system to the host's render loop.
//!
//! # Data Flow
//!
//! ```text
//! pointer events -> InputRouter -> Scene (touch/drag/release)
//!                                   |
//! host frame loop -> tick() --------+-> advance + notify reactors
//!                                   '-> FrameSnapshot -> host draw pass
//! ```
//!
//! The update/react pass finalizes every transform before the snapshot is
//! taken, so the draw pass never sees a partially updated frame.

mod frame;

pub use frame::{tick, DrawEntry, FrameSnapshot};
