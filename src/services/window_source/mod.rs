//! WindowSource service: responsibility and boundaries
//!
//! This module is responsible ONLY for building the ordered list of candidate
//! windows (id + formatted "class  name" line). It reads window-system state
//! and never changes it; activation belongs to the dispatcher.

mod dry_run;
mod format;
mod select;
mod x11_source;
mod r#trait;

pub use self::r#trait::{create_window_source, WindowSourceTrait};
