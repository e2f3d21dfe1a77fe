//! Home screen: the current user's lists, newest first.
//!
//! The screen starts in [`HomeState::Loading`] and moves to
//! [`HomeState::Ready`] once the bootstrap request succeeds. A failed
//! bootstrap is logged and leaves the screen loading; there is no retry.

use crate::components::{Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::fetch::{FetchRequest, FetchResponse, FetchResult};
use crate::keymap::Action;
use crate::model::{sort_newest_first, ListSummary, User};
use crate::navigation::Route;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, ROW_HIGHLIGHT_SYMBOL};
use crate::time_label::RelativeTimeFormatter;
use crate::utils::{create_standard_layout, TableStateExt, DEFAULT_PAGE_SIZE};
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Row, Table, TableState};
use ratatui::Frame;
use tracing::{info, warn};

/// View state of the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeState {
    Loading,
    Ready {
        /// Sorted newest first.
        lists: Vec<ListSummary>,
        user: User,
    },
}

pub struct HomeScreen {
    state: HomeState,
    table_state: TableState,
    /// A list was selected and its view is being fetched.
    opening: bool,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            state: HomeState::Loading,
            table_state: TableState::default(),
            opening: false,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == HomeState::Loading
    }

    /// Lists in display order. Empty while loading.
    pub fn lists(&self) -> &[ListSummary] {
        match &self.state {
            HomeState::Loading => &[],
            HomeState::Ready { lists, .. } => lists,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            HomeState::Loading => None,
            HomeState::Ready { user, .. } => Some(user),
        }
    }

    /// `[name, relative label]` for every list, in display order.
    pub fn rows(&self, formatter: &RelativeTimeFormatter, now: DateTime<Utc>) -> Vec<[String; 2]> {
        self.lists()
            .iter()
            .map(|list| [list.name.clone(), formatter.format(list.creation_time, now)])
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.lists().len() {
            self.table_state.select(Some(index));
        }
    }

    fn open_selected(&mut self) -> ScreenAction {
        if self.opening {
            info!("Ignoring selection while a list is being opened");
            return ScreenAction::None;
        }
        let total = self.lists().len();
        let Some(index) = self.table_state.selected_or_first(total) else {
            return ScreenAction::None;
        };
        let HomeState::Ready { lists, user } = &self.state else {
            return ScreenAction::None;
        };
        let list = lists[index].clone();
        info!("Opening list '{}' for @{}", list.name, user.username);
        self.opening = true;
        ScreenAction::Fetch(FetchRequest::ListInstance {
            list,
            user: user.clone(),
        })
    }

    fn handle_action(&mut self, action: Action) -> ScreenAction {
        let total = self.lists().len();
        match action {
            Action::Quit => ScreenAction::Quit,
            Action::Help => ScreenAction::ShowHelp,
            Action::Confirm => self.open_selected(),
            Action::MoveUp => {
                self.table_state.move_up_by(1, total);
                ScreenAction::None
            }
            Action::MoveDown => {
                self.table_state.move_down_by(1, total);
                ScreenAction::None
            }
            Action::PageUp => {
                self.table_state.move_up_by(DEFAULT_PAGE_SIZE, total);
                ScreenAction::None
            }
            Action::PageDown => {
                self.table_state.move_down_by(DEFAULT_PAGE_SIZE, total);
                ScreenAction::None
            }
            Action::GoToTop => {
                self.table_state.select_first_row(total);
                ScreenAction::None
            }
            Action::GoToEnd => {
                self.table_state.select_last_row(total);
                ScreenAction::None
            }
            // Home is the root: nothing to go back to, one table only.
            Action::Cancel | Action::NextPane | Action::PrevPane => ScreenAction::None,
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().style(theme().text_style());
        frame.render_widget(block, area);
    }
}

impl Screen for HomeScreen {
    fn name(&self) -> &'static str {
        "Home"
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        if self.is_loading() {
            self.render_placeholder(frame, area);
            return Ok(());
        }

        let t = theme();
        let (header_area, content_area, footer_area) =
            create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);

        let description = match self.user() {
            Some(user) => format!("Lists shared with @{}, newest first.", user.username),
            None => String::new(),
        };
        Header::render(frame, header_area, "Your Lists", &description);

        let rows: Vec<Row> = self
            .rows(ctx.formatter, ctx.now)
            .into_iter()
            .map(|cells| Row::new(cells).style(t.text_style()))
            .collect();

        let table = Table::new(rows, [Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .header(Row::new(["Your Lists", ""]).style(t.title_style()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(t.border_focused_style()),
            )
            .row_highlight_style(t.highlight_style())
            .highlight_symbol(ROW_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(table, content_area, &mut self.table_state);

        Footer::render(
            frame,
            footer_area,
            &ctx.config.keymap.footer_hints(ctx.can_go_back, false),
            self.opening,
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let total = self.lists().len();
        match event {
            Event::Key(key) => Ok(ctx
                .keymap
                .action_for(&key)
                .map(|action| self.handle_action(action))
                .unwrap_or_default()),
            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::ScrollUp => self.table_state.move_up_by(1, total),
                    MouseEventKind::ScrollDown => self.table_state.move_down_by(1, total),
                    _ => {}
                }
                Ok(ScreenAction::None)
            }
            _ => Ok(ScreenAction::None),
        }
    }

    fn on_activate(&mut self) -> ScreenAction {
        ScreenAction::Fetch(FetchRequest::Home)
    }

    fn on_fetch(&mut self, result: FetchResult) -> ScreenAction {
        match result {
            Ok(FetchResponse::Home(response)) => {
                if !self.is_loading() {
                    warn!("Ignoring repeated home bootstrap result");
                    return ScreenAction::None;
                }
                let mut lists = response.lists;
                sort_newest_first(&mut lists);
                info!(
                    "Loaded {} lists for @{}",
                    lists.len(),
                    response.user.username
                );
                if !lists.is_empty() {
                    self.table_state.select(Some(0));
                }
                self.state = HomeState::Ready {
                    lists,
                    user: response.user,
                };
                ScreenAction::None
            }
            Ok(FetchResponse::ListInstance(params)) => {
                self.opening = false;
                ScreenAction::Push(Route::ListInstance(params))
            }
            Err(e) => {
                if self.is_loading() {
                    warn!("Home bootstrap failed, staying in loading state: {}", e);
                } else {
                    self.opening = false;
                    warn!("Failed to open list: {}", e);
                }
                ScreenAction::None
            }
        }
    }

    fn is_awaiting(&self) -> bool {
        self.is_loading() || self.opening
    }
}
