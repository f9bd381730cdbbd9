//! Widget orchestration: the three widgets, the events they consume, and
//! the [`handler::Site`] that routes events to them.

pub mod event;
pub mod handler;
pub mod hero;
pub mod lightbox;
pub mod scroll;
