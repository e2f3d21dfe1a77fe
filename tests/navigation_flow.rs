//! End-to-end navigation against a stub list service: screens, stack and
//! fetcher wired together the way the app runs them, rendered to a test
//! backend.

mod common;

use chrono::Utc;
use common::{
    get, json, request_paths, serve, status, wait_until, HOME_JSON, KIM_GROCERIES_JSON,
    SAM_GROCERIES_JSON,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use listview::api::ListClient;
use listview::app::Navigator;
use listview::config::Config;
use listview::fetch::Fetcher;
use listview::keymap::Keymap;
use listview::screens::{ScreenAction, ScreenContext};
use listview::time_label::RelativeTimeFormatter;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

struct Harness {
    navigator: Navigator,
    server: MockServer,
    keymap: Keymap,
    config: Config,
    formatter: RelativeTimeFormatter,
    runtime: Runtime,
}

impl Harness {
    fn new(mocks: Vec<Mock>) -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(serve(mocks));
        let client = ListClient::new(&server.uri(), None).unwrap();
        let fetcher = Fetcher::new(client, runtime.handle().clone());
        Self {
            navigator: Navigator::new(fetcher),
            server,
            keymap: Keymap::default(),
            config: Config::default(),
            formatter: RelativeTimeFormatter::default(),
            runtime,
        }
    }

    fn requests(&self) -> Vec<String> {
        self.runtime.block_on(request_paths(&self.server))
    }

    fn press(&mut self, code: KeyCode) -> ScreenAction {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        self.navigator
            .handle_event(event, &ScreenContext::new(&self.keymap))
            .unwrap()
    }

    /// Pump fetch results until `check` holds.
    fn settle(&mut self, check: impl Fn(&Navigator) -> bool) {
        let navigator = &mut self.navigator;
        wait_until(|| {
            navigator.pump();
            check(&*navigator)
        });
    }

    fn screen_text(&mut self) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let now = Utc::now();
        let (navigator, config, formatter) = (&mut self.navigator, &self.config, &self.formatter);
        terminal
            .draw(|frame| {
                navigator
                    .render(frame, frame.area(), config, formatter, now)
                    .unwrap()
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }
}

fn standard_routes() -> Vec<Mock> {
    vec![
        get("/", json(HOME_JSON)),
        get("/list/7/u1", json(SAM_GROCERIES_JSON)),
        get("/list/7/u2", json(KIM_GROCERIES_JSON)),
    ]
}

#[test]
fn test_browse_sibling_and_back() {
    let mut h = Harness::new(
        standard_routes()
            .into_iter()
            .map(|mock| mock.expect(1))
            .collect(),
    );

    assert_eq!(h.navigator.start(), ScreenAction::None);
    assert!(h.navigator.is_busy());
    h.settle(|n| !n.is_busy());
    assert_eq!(h.navigator.top_name(), "Home");
    let home_text = h.screen_text();
    assert!(home_text.contains("Your Lists"));
    // Newest first.
    let groceries = home_text.find("Groceries").unwrap();
    let old = home_text.find("Old").unwrap();
    assert!(groceries < old);

    // Open the selected (newest) list as the current user.
    h.press(KeyCode::Enter);
    h.settle(|n| n.depth() == 2);
    assert_eq!(h.navigator.top_name(), "ListInstance");
    let sam_text = h.screen_text();
    assert!(sam_text.contains("@sam's Groceries List"));
    assert!(sam_text.contains("[x] milk"));
    assert!(sam_text.contains("[ ] eggs"));
    assert!(sam_text.contains("Other Users With This List"));
    assert!(sam_text.contains("kim"));

    // Hop to kim's view of the same list.
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    h.settle(|n| n.depth() == 3);
    let kim_text = h.screen_text();
    assert!(kim_text.contains("@kim's Groceries List"));
    assert!(kim_text.contains("[ ] bread"));
    assert_eq!(h.navigator.trail(), ["Home", "ListInstance", "ListInstance"]);

    assert_eq!(h.requests(), ["/", "/list/7/u1", "/list/7/u2"]);

    // Back restores sam's view without refetching.
    h.press(KeyCode::Esc);
    assert_eq!(h.navigator.depth(), 2);
    assert_eq!(h.screen_text(), sam_text);

    h.press(KeyCode::Esc);
    assert_eq!(h.navigator.depth(), 1);
    assert!(h.screen_text().contains("Your Lists"));

    // The root stays put.
    h.press(KeyCode::Esc);
    assert_eq!(h.navigator.depth(), 1);
    assert_eq!(h.requests().len(), 3);

    assert_eq!(h.press(KeyCode::Char('q')), ScreenAction::Quit);
    assert_eq!(h.press(KeyCode::Char('?')), ScreenAction::ShowHelp);
}

#[test]
fn test_same_view_twice_is_two_activations() {
    let mut h = Harness::new(standard_routes());
    h.navigator.start();
    h.settle(|n| !n.is_busy());

    h.press(KeyCode::Enter);
    h.settle(|n| n.depth() == 2);
    let first = h.navigator.top_id();
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    h.settle(|n| n.depth() == 3);
    // kim's view lists sam, which leads back to sam's view.
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    h.settle(|n| n.depth() == 4);

    assert_ne!(h.navigator.top_id(), first);
    assert_eq!(
        h.requests(),
        ["/", "/list/7/u1", "/list/7/u2", "/list/7/u1"]
    );
    assert!(h.screen_text().contains("@sam's Groceries List"));
}

#[test]
fn test_bootstrap_failure_stays_loading() {
    let mut h = Harness::new(vec![get("/", status(500, "down")).expect(1)]);
    h.navigator.start();
    h.settle(|n| n.pending_count() == 0);

    assert!(h.navigator.is_busy());
    assert!(!h.screen_text().contains("Your Lists"));
    // Selection is ignored while loading.
    h.press(KeyCode::Enter);
    assert_eq!(h.navigator.pending_count(), 0);
    assert_eq!(h.requests(), ["/"]);
}

#[test]
fn test_list_failure_keeps_home() {
    let mut h = Harness::new(vec![
        get("/", json(HOME_JSON)).expect(1),
        get("/list/7/u1", json("not json")).expect(1),
    ]);
    h.navigator.start();
    h.settle(|n| !n.is_busy());

    h.press(KeyCode::Enter);
    assert!(h.navigator.is_busy());
    h.settle(|n| !n.is_busy());
    assert_eq!(h.navigator.depth(), 1);
    assert_eq!(h.navigator.top_name(), "Home");
}

#[test]
fn test_pop_discards_pending_sibling_fetch() {
    let mut h = Harness::new(vec![
        get("/", json(HOME_JSON)).expect(1),
        get("/list/7/u1", json(SAM_GROCERIES_JSON)).expect(1),
        get(
            "/list/7/u2",
            json(KIM_GROCERIES_JSON).set_delay(Duration::from_millis(500)),
        )
        .expect(0..=1),
    ]);
    h.navigator.start();
    h.settle(|n| !n.is_busy());
    h.press(KeyCode::Enter);
    h.settle(|n| n.depth() == 2);

    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    assert_eq!(h.navigator.pending_count(), 1);
    h.press(KeyCode::Esc);
    assert_eq!(h.navigator.depth(), 1);
    assert_eq!(h.navigator.trail(), ["Home"]);
    assert_eq!(h.navigator.pending_count(), 0);

    std::thread::sleep(Duration::from_millis(800));
    assert_eq!(h.navigator.pump(), 0);
    assert_eq!(h.navigator.depth(), 1);
}
