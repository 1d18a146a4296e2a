//! Dispatcher service: responsibility and boundaries
//!
//! This module acts on the menu outcome: activate the chosen window or launch
//! the typed text as a shell command. It never enumerates windows or draws.

#[allow(clippy::module_inception)]
mod dispatcher;
mod dry_dispatcher;
mod launcher;
mod r#trait;

pub use self::r#trait::{create_dispatcher, DispatcherTrait};
