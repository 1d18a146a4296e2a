use crate::error::Result;
use crate::events::WindowList;
use crate::services::menu::MenuResult;
use crate::services::x11::X11Session;
use std::rc::Rc;

/// Trait for dispatchers that act on the menu result
pub trait DispatcherTrait {
    /// Activate the chosen window or launch the typed command.
    ///
    /// On a successful launch this never returns: the process image is replaced.
    fn dispatch(&self, result: &MenuResult, windows: &WindowList) -> Result<()>;
}

/// Factory function to create an appropriate dispatcher based on the dry_run flag
pub fn create_dispatcher(session: Rc<X11Session>, dry_run: bool) -> Box<dyn DispatcherTrait> {
    if dry_run {
        Box::new(super::dry_dispatcher::DryRunDispatcher::new())
    } else {
        Box::new(super::dispatcher::X11Dispatcher::new(session))
    }
}
