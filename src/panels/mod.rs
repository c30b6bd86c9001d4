mod control_panel;
mod preview_panel;

pub use control_panel::{PanelOutput, SessionAction, control_panel};
pub use preview_panel::preview_panel;
