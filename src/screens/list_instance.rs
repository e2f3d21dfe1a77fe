//! One user's view of a list.
//!
//! Everything shown here comes from the activation's [`ListInstanceParams`];
//! the screen issues no request on mount. Selecting another user fetches that
//! user's view of the same list and pushes a new activation.

use crate::components::{checkbox_label, Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::fetch::{FetchRequest, FetchResponse, FetchResult};
use crate::keymap::Action;
use crate::model::{ListInstanceParams, User};
use crate::navigation::Route;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, ROW_HIGHLIGHT_SYMBOL};
use crate::time_label::RelativeTimeFormatter;
use crate::utils::{create_standard_layout, TableStateExt, DEFAULT_PAGE_SIZE};
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders, Row, Table, TableState};
use ratatui::Frame;
use tracing::{info, warn};

/// Header of the sibling-user table
pub const OTHER_USERS_HEADER: &str = "Other Users With This List";

/// Which table has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Items,
    OtherUsers,
}

impl Pane {
    fn toggle(self) -> Self {
        match self {
            Pane::Items => Pane::OtherUsers,
            Pane::OtherUsers => Pane::Items,
        }
    }
}

pub struct ListInstanceScreen {
    params: Box<ListInstanceParams>,
    focus: Pane,
    items_state: TableState,
    users_state: TableState,
    /// Another user's view is being fetched.
    opening: bool,
}

impl ListInstanceScreen {
    pub fn new(params: Box<ListInstanceParams>) -> Self {
        let mut items_state = TableState::default();
        items_state.select_first_row(params.items.len());
        let mut users_state = TableState::default();
        users_state.select_first_row(params.other_users.len());

        // Start on the only actionable table when there is nothing to browse.
        let focus = if params.items.is_empty() && !params.other_users.is_empty() {
            Pane::OtherUsers
        } else {
            Pane::Items
        };

        Self {
            params,
            focus,
            items_state,
            users_state,
            opening: false,
        }
    }

    pub fn params(&self) -> &ListInstanceParams {
        &self.params
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    /// `@user's <list> List`
    pub fn title(&self) -> String {
        format!(
            "@{}'s {} List",
            self.params.user.username, self.params.list.name
        )
    }

    /// Checkbox cell text per item.
    pub fn item_rows(&self) -> Vec<String> {
        self.params
            .items
            .iter()
            .map(|item| checkbox_label(&item.name, item.checked))
            .collect()
    }

    /// `[username, label]` per sibling user. Every row carries the list's own
    /// creation time: it is the same list for all of them.
    pub fn other_user_rows(
        &self,
        formatter: &RelativeTimeFormatter,
        now: DateTime<Utc>,
    ) -> Vec<[String; 2]> {
        let label = formatter.format(self.params.list.creation_time, now);
        self.params
            .other_users
            .iter()
            .map(|user| [user.username.clone(), label.clone()])
            .collect()
    }

    pub fn select_other_user(&mut self, index: usize) {
        if index < self.params.other_users.len() {
            self.focus = Pane::OtherUsers;
            self.users_state.select(Some(index));
        }
    }

    fn focused_state(&mut self) -> (&mut TableState, usize) {
        match self.focus {
            Pane::Items => (&mut self.items_state, self.params.items.len()),
            Pane::OtherUsers => (&mut self.users_state, self.params.other_users.len()),
        }
    }

    fn open_selected_user(&mut self) -> ScreenAction {
        if self.focus != Pane::OtherUsers {
            // Items are read-only.
            return ScreenAction::None;
        }
        if self.opening {
            info!("Ignoring selection while another view is being opened");
            return ScreenAction::None;
        }
        let total = self.params.other_users.len();
        let Some(index) = self.users_state.selected_or_first(total) else {
            return ScreenAction::None;
        };
        let other: User = self.params.other_users[index].clone();
        info!(
            "Opening @{}'s view of '{}'",
            other.username, self.params.list.name
        );
        self.opening = true;
        ScreenAction::Fetch(FetchRequest::ListInstance {
            list: self.params.list.clone(),
            user: other,
        })
    }

    fn handle_action(&mut self, action: Action) -> ScreenAction {
        match action {
            Action::Quit => return ScreenAction::Quit,
            Action::Help => return ScreenAction::ShowHelp,
            Action::Cancel => return ScreenAction::Back,
            Action::Confirm => return self.open_selected_user(),
            Action::NextPane | Action::PrevPane => {
                self.focus = self.focus.toggle();
                return ScreenAction::None;
            }
            _ => {}
        }

        let (state, total) = self.focused_state();
        match action {
            Action::MoveUp => state.move_up_by(1, total),
            Action::MoveDown => state.move_down_by(1, total),
            Action::PageUp => state.move_up_by(DEFAULT_PAGE_SIZE, total),
            Action::PageDown => state.move_down_by(DEFAULT_PAGE_SIZE, total),
            Action::GoToTop => state.select_first_row(total),
            Action::GoToEnd => state.select_last_row(total),
            _ => {}
        }
        ScreenAction::None
    }

    fn pane_block(&self, pane: Pane) -> Block<'static> {
        let t = theme();
        let border_style = if self.focus == pane {
            t.border_focused_style()
        } else {
            t.border_style()
        };
        Block::default().borders(Borders::ALL).border_style(border_style)
    }
}

impl Screen for ListInstanceScreen {
    fn name(&self) -> &'static str {
        "ListInstance"
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header_area, content_area, footer_area) =
            create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);

        let title = self.title();
        let checked = self.params.items.iter().filter(|i| i.checked).count();
        Header::render(
            frame,
            header_area,
            &title,
            &format!(
                "{} of {} items checked, created {}.",
                checked,
                self.params.items.len(),
                ctx.formatter.format(self.params.list.creation_time, ctx.now)
            ),
        );

        let [items_area, users_area] =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(content_area);

        let item_rows: Vec<Row> = self
            .params
            .items
            .iter()
            .zip(self.item_rows())
            .map(|(item, label)| {
                let style = if item.checked {
                    t.checked_style()
                } else {
                    t.text_style()
                };
                Row::new([label]).style(style)
            })
            .collect();
        let items_table = Table::new(item_rows, [Constraint::Fill(1)])
            .header(Row::new([title]).style(t.title_style()))
            .block(self.pane_block(Pane::Items))
            .row_highlight_style(t.highlight_style())
            .highlight_symbol(ROW_HIGHLIGHT_SYMBOL);

        let user_rows: Vec<Row> = self
            .other_user_rows(ctx.formatter, ctx.now)
            .into_iter()
            .map(|cells| Row::new(cells).style(t.text_style()))
            .collect();
        let users_table = Table::new(
            user_rows,
            [Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)],
        )
        .header(Row::new([OTHER_USERS_HEADER, ""]).style(t.title_style()))
        .block(self.pane_block(Pane::OtherUsers))
        .row_highlight_style(t.highlight_style())
        .highlight_symbol(ROW_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(items_table, items_area, &mut self.items_state);
        frame.render_stateful_widget(users_table, users_area, &mut self.users_state);

        Footer::render(
            frame,
            footer_area,
            &ctx.config.keymap.footer_hints(ctx.can_go_back, true),
            self.opening,
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        match event {
            Event::Key(key) => Ok(ctx
                .keymap
                .action_for(&key)
                .map(|action| self.handle_action(action))
                .unwrap_or_default()),
            Event::Mouse(mouse) => {
                let (state, total) = self.focused_state();
                match mouse.kind {
                    MouseEventKind::ScrollUp => state.move_up_by(1, total),
                    MouseEventKind::ScrollDown => state.move_down_by(1, total),
                    _ => {}
                }
                Ok(ScreenAction::None)
            }
            _ => Ok(ScreenAction::None),
        }
    }

    fn on_fetch(&mut self, result: FetchResult) -> ScreenAction {
        self.opening = false;
        match result {
            Ok(FetchResponse::ListInstance(params)) => {
                ScreenAction::Push(Route::ListInstance(params))
            }
            Ok(FetchResponse::Home(_)) => {
                warn!("List screen received a home response, ignoring");
                ScreenAction::None
            }
            Err(e) => {
                warn!("Failed to open another user's view: {}", e);
                ScreenAction::None
            }
        }
    }

    fn is_awaiting(&self) -> bool {
        self.opening
    }
}
