use crate::api::ListClient;
use crate::components::HelpOverlay;
use crate::config::Config;
use crate::fetch::Fetcher;
use crate::keymap::Action;
use crate::navigation::{ActivationId, NavigationStack, Route};
use crate::screens::{
    HomeScreen, ListInstanceScreen, RenderContext, Screen, ScreenAction, ScreenContext,
};
use crate::time_label::RelativeTimeFormatter;
use crate::tui::Tui;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// How long the loop waits for input before draining fetch results again.
const TICK: Duration = Duration::from_millis(100);

/// Build the controller for a route.
fn screen_for(route: Route) -> Box<dyn Screen> {
    match route {
        Route::Home => Box::new(HomeScreen::new()),
        Route::ListInstance(params) => Box::new(ListInstanceScreen::new(params)),
    }
}

/// The navigation stack of screen controllers and the fetcher serving them.
///
/// Carries out the [`ScreenAction`]s controllers return. Actions that concern
/// the surrounding application (help, quit) are handed back to the caller.
pub struct Navigator {
    stack: NavigationStack<Box<dyn Screen>>,
    fetcher: Fetcher,
}

impl Navigator {
    /// A stack holding the home screen. Nothing is fetched until [`start`].
    ///
    /// [`start`]: Navigator::start
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            stack: NavigationStack::new(screen_for(Route::Home)),
            fetcher,
        }
    }

    /// Activate the root screen.
    pub fn start(&mut self) -> ScreenAction {
        let root = self.stack.top_mut();
        let id = root.id;
        info!("Activating {} ({})", root.entry.name(), id);
        let action = root.entry.on_activate();
        self.dispatch(id, action)
    }

    /// Deliver finished requests to the activations that issued them.
    /// Returns the number of results delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        for outcome in self.fetcher.poll() {
            let Some(activation) = self.stack.get_mut(outcome.activation) else {
                debug!(
                    "Discarding result of request {} for gone activation {}",
                    outcome.request_id, outcome.activation
                );
                continue;
            };
            match &outcome.result {
                Ok(_) => info!(
                    "Request {} finished for {} ({})",
                    outcome.request_id,
                    activation.entry.name(),
                    outcome.activation
                ),
                Err(e) => error!(
                    "Request {} failed for {} ({}): {}",
                    outcome.request_id,
                    activation.entry.name(),
                    outcome.activation,
                    e
                ),
            }
            let action = activation.entry.on_fetch(outcome.result);
            delivered += 1;
            // Help and quit only come from input.
            self.dispatch(outcome.activation, action);
        }
        delivered
    }

    /// Route an input event to the visible screen.
    pub fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let top = self.stack.top_mut();
        let id = top.id;
        let action = top.entry.handle_event(event, ctx)?;
        Ok(self.dispatch(id, action))
    }

    /// Carry out `action`, issued by activation `origin`. Returns what is
    /// left for the application to handle.
    pub fn dispatch(&mut self, origin: ActivationId, action: ScreenAction) -> ScreenAction {
        match action {
            ScreenAction::None => ScreenAction::None,
            ScreenAction::Fetch(request) => {
                if self.stack.contains(origin) {
                    self.fetcher.submit(origin, request);
                } else {
                    warn!("Not fetching {} for gone activation {}", request.describe(), origin);
                }
                ScreenAction::None
            }
            ScreenAction::Push(route) => {
                if self.stack.top().id != origin {
                    warn!(
                        "Ignoring push of {} from hidden activation {}",
                        route.name(),
                        origin
                    );
                    return ScreenAction::None;
                }
                let name = route.name();
                if let Route::ListInstance(params) = &route {
                    debug!("Opening view {}", params.key());
                }
                let id = self.stack.push(screen_for(route));
                info!("Navigated to {} ({}), depth {}", name, id, self.stack.depth());
                debug!("Stack: {}", self.trail().join(" > "));
                let action = self.stack.top_mut().entry.on_activate();
                self.dispatch(id, action)
            }
            ScreenAction::Back => {
                match self.stack.pop() {
                    Some(popped) => {
                        info!(
                            "Left {} ({}), depth {}",
                            popped.entry.name(),
                            popped.id,
                            self.stack.depth()
                        );
                        self.fetcher.cancel(popped.id);
                    }
                    None => debug!("Back at the root, nothing to pop"),
                }
                ScreenAction::None
            }
            other => other,
        }
    }

    /// Draw the visible screen.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        config: &Config,
        formatter: &RelativeTimeFormatter,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let ctx = RenderContext::new(config, formatter, now, self.stack.depth() > 1);
        self.stack.top_mut().entry.render(frame, area, &ctx)
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn top_id(&self) -> ActivationId {
        self.stack.top().id
    }

    pub fn top_name(&self) -> &'static str {
        self.stack.top().entry.name()
    }

    /// Screen names from the root to the visible screen.
    pub fn trail(&self) -> Vec<&'static str> {
        self.stack.iter().map(|a| a.entry.name()).collect()
    }

    /// Whether the visible screen waits on a request.
    pub fn is_busy(&self) -> bool {
        self.stack.top().entry.is_awaiting()
    }

    pub fn pending_count(&self) -> usize {
        self.fetcher.pending_count()
    }
}

/// Main application state
pub struct App {
    config: Config,
    config_path: PathBuf,
    tui: Tui,
    navigator: Navigator,
    formatter: RelativeTimeFormatter,
    show_help: bool,
    should_quit: bool,
    // Declared last so screens and the fetcher go before the runtime.
    runtime: Runtime,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let client = ListClient::new(&config.host, config.request_timeout())
            .context("Failed to create HTTP client")?;
        let fetcher = Fetcher::new(client, runtime.handle().clone());
        let tui = Tui::new()?;
        let formatter = RelativeTimeFormatter::new(config.relative_time.clone());

        info!("Using list service at {}", config.host);

        Ok(Self {
            config,
            config_path,
            tui,
            navigator: Navigator::new(fetcher),
            formatter,
            show_help: false,
            should_quit: false,
            runtime,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        self.navigator.start();

        let result = self.event_loop();

        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.navigator.pump();
            self.draw()?;

            if self.should_quit {
                info!("Quitting");
                return Ok(());
            }

            if let Some(event) = self.tui.poll_event(TICK)? {
                self.handle_event(event)?;
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        // One reference time per pass so every label agrees.
        let now = Utc::now();
        let config = &self.config;
        let formatter = &self.formatter;
        let navigator = &mut self.navigator;
        let show_help = self.show_help;
        let config_path = self.config_path.display().to_string();

        self.tui.terminal_mut().draw(|frame| {
            let area = frame.area();
            if let Err(e) = navigator.render(frame, area, config, formatter, now) {
                error!("Failed to render {}: {}", navigator.top_name(), e);
            }
            if show_help {
                HelpOverlay::render(frame, area, &config.keymap, &config_path);
            }
        })?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if self.show_help {
            if let Event::Key(key) = &event {
                match self.config.keymap.action_for(key) {
                    Some(Action::Quit) => self.should_quit = true,
                    Some(_) => self.show_help = false,
                    None => {}
                }
            }
            return Ok(());
        }

        let ctx = ScreenContext::new(&self.config.keymap);
        match self.navigator.handle_event(event, &ctx)? {
            ScreenAction::ShowHelp => self.show_help = true,
            ScreenAction::Quit => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }
}
