use crate::config::Config;
use crate::error::Result;
use crate::events::WindowList;
use crate::services::x11::X11Session;
use std::rc::Rc;

/// Trait for window sources that build the switcher's candidate list
pub trait WindowSourceTrait {
    /// Enumerate candidate windows, topmost first
    fn list_windows(&self) -> Result<WindowList>;
}

/// Factory function to create an appropriate window source based on the dry_run flag
pub fn create_window_source(
    session: Rc<X11Session>,
    config: Rc<Config>,
    dry_run: bool,
) -> Box<dyn WindowSourceTrait> {
    if dry_run {
        Box::new(super::dry_run::DryRunWindowSource::new(config))
    } else {
        Box::new(super::x11_source::X11WindowSource::new(session, config))
    }
}
