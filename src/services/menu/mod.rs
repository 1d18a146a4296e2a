//! Menu service: responsibility and boundaries
//!
//! This module owns the interactive filter menu: the text box, the filtered
//! view over the candidate lines, keyboard navigation and the modal event
//! loop. It knows nothing about windows or X11; everything window-system
//! specific goes through `MenuBackendTrait`.

mod event_queue;
mod grab;
#[cfg(test)]
pub(crate) mod headless;
#[allow(clippy::module_inception)]
mod menu;
mod state;
mod textbox;
mod r#trait;

pub use self::menu::{Menu, MenuRequest, MenuResult};
pub use self::r#trait::{MenuBackendTrait, MenuFrame};
pub use self::state::MenuOutcome;
