//! X11 plumbing: connection/atoms, property introspection, monitors,
//! keyboard mapping and the menu backend. No switching logic lives here.

mod backend;
mod keymap;
mod monitors;
mod placement;
mod properties;
mod session;

pub use self::backend::X11MenuBackend;
pub use self::session::X11Session;
