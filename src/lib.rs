//! listview - browse shared lists from the terminal
//!
//! A home screen lists the current user's lists; opening one shows its items
//! and the other users sharing it, each of whom can be opened in turn. Every
//! view is a new activation on a navigation stack, and requests are tied to
//! the activation that issued them.

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod fetch;
pub mod keymap;
pub mod model;
pub mod navigation;
pub mod screens;
pub mod styles;
pub mod time_label;
pub mod tui;
pub mod utils;

pub use api::{FetchError, ListClient};
pub use config::Config;
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
