//! Screen controllers.
//!
//! Each controller owns its view state and implements [`Screen`]. Controllers
//! never touch the network or the navigation stack directly: they return a
//! [`ScreenAction`] and the app carries it out.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     App                      │
//! │   NavigationStack<Box<dyn Screen>>           │
//! │     Home ── Fetch ──► Fetcher ── on_fetch ─┐ │
//! │       ▲                                    │ │
//! │       └──── Back ◄── ListInstance ◄─ Push ─┘ │
//! └──────────────────────────────────────────────┘
//! ```

pub mod home;
pub mod list_instance;
pub mod screen_trait;

pub use home::{HomeScreen, HomeState};
pub use list_instance::{ListInstanceScreen, Pane};
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
