use anyhow::{Context, Result};
use clap::Parser;
use listview::app::App;
use listview::cli::Cli;
use listview::styles::{init_theme, ThemeType};
use tracing::info;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let log_dir = listview::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "listview.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    if cli.execute()? {
        return Ok(());
    }

    let config = cli.load_config()?;
    let theme_type = config.theme.parse::<ThemeType>().unwrap_or_default();
    init_theme(theme_type);

    info!("Starting listview {}", env!("CARGO_PKG_VERSION"));
    let mut app = App::new(config, cli.config_path())?;
    app.run()
}
