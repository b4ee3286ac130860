//! State Module - Interaction and layout state.
//!
//! - **Pointer** - InputRouter, hover/touch/drag transitions, capture
//!   redirection
//! - **Viewport** - breakpoints and the rig metrics derived from them

mod pointer;
mod viewport;

pub use pointer::{InputRouter, MAX_CAPTURE_REDIRECTS};
pub use viewport::{
    RigMetrics, Viewport, MIN_TOUCH_RADIUS, MOBILE_WIDTH_BREAKPOINT, SHORT_HEIGHT_BREAKPOINT,
};
