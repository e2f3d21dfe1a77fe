pub mod layout;
pub mod path;
pub mod table_navigation;

pub use layout::{center_popup, create_standard_layout};
pub use path::{get_config_dir, get_config_path, get_home_dir, get_log_dir};
pub use table_navigation::{TableStateExt, DEFAULT_PAGE_SIZE};
