pub mod dispatcher;
pub mod menu;
pub mod window_source;
pub mod x11;

pub use dispatcher::create_dispatcher;
pub use menu::{Menu, MenuRequest};
pub use window_source::create_window_source;
pub use x11::{X11MenuBackend, X11Session};
