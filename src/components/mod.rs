// Render helpers shared by the screens

pub mod checkbox;
pub mod footer;
pub mod header;
pub mod help_overlay;

pub use checkbox::checkbox_label;
pub use footer::{Footer, FOOTER_HEIGHT};
pub use header::{Header, HEADER_HEIGHT};
pub use help_overlay::HelpOverlay;
