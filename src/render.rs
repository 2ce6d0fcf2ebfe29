//! Rendering subsystem.
//!
//! [`service::display_loop`] owns a render coordinator and serializes the commands
//! defined in [`protocol`]; [`ui`] turns the snapshots it produces into terminal frames.

pub mod protocol;
pub mod service;
pub mod ui;

pub use service::display_loop;
