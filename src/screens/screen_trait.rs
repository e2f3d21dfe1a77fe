//! Screen trait and associated types.
//!
//! Screens own their state, render themselves and answer events with a
//! [`ScreenAction`]. They never touch the navigation stack or the network
//! directly: pushes, pops and fetches are requests the app carries out.

use crate::config::Config;
use crate::fetch::{FetchRequest, FetchResult};
use crate::keymap::Keymap;
use crate::navigation::Route;
use crate::time_label::RelativeTimeFormatter;
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources for one render pass.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    pub formatter: &'a RelativeTimeFormatter,
    /// Reference time for every relative label drawn in this pass.
    pub now: DateTime<Utc>,
    /// Whether a back navigation is possible from the rendered screen.
    pub can_go_back: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        config: &'a Config,
        formatter: &'a RelativeTimeFormatter,
        now: DateTime<Utc>,
        can_go_back: bool,
    ) -> Self {
        Self {
            config,
            formatter,
            now,
            can_go_back,
        }
    }
}

/// Resources for handling events.
pub struct ScreenContext<'a> {
    pub keymap: &'a Keymap,
}

impl<'a> ScreenContext<'a> {
    pub fn new(keymap: &'a Keymap) -> Self {
        Self { keymap }
    }
}

/// What a screen asks the app to do after an event or fetch result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    /// Run a request on behalf of this activation.
    Fetch(FetchRequest),
    /// Push a new activation.
    Push(Route),
    /// Pop this activation.
    Back,
    /// Toggle the key binding overlay.
    ShowHelp,
    /// Leave the application.
    Quit,
}

/// A screen controller living on the navigation stack.
pub trait Screen {
    /// Route name, for logs.
    fn name(&self) -> &'static str;

    /// Draw the screen into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Called once, right after the activation is pushed. Not called again
    /// when the activation becomes visible after a pop.
    fn on_activate(&mut self) -> ScreenAction {
        ScreenAction::None
    }

    /// Deliver the result of a request this activation issued.
    fn on_fetch(&mut self, result: FetchResult) -> ScreenAction;

    /// Whether the screen waits on a request it issued.
    fn is_awaiting(&self) -> bool {
        false
    }
}
