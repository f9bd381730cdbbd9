//! Widget models: headline rotation, modal state, reveal bookkeeping,
//! header and menu state.
//!
//! Nothing in this module touches a document.  The widgets in
//! [`crate::app`] apply these models to a [`crate::page::Page`].

pub mod header;
pub mod headline;
pub mod modal;
pub mod reveal;
pub mod rotation;
