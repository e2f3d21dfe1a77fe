//! Command-line interface.
//!
//! Without a subcommand the TUI starts. The subcommands print the same data
//! once and exit.

mod completions;

use crate::api::ListClient;
use crate::components::checkbox_label;
use crate::config::Config;
use crate::model::{sort_newest_first, HomeResponse, Id, ListInstanceParams, ListSummary, User};
use crate::time_label::RelativeTimeFormatter;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indoc::printdoc;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

/// Browse shared lists from the terminal
#[derive(Parser, Debug)]
#[command(name = "listview", version, about = "Browse shared lists from the terminal", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/listview/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the list service for this run
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print your lists, newest first
    Lists,
    /// Print one user's view of a list
    Show {
        /// Template id of the list
        template_id: String,
        /// Uid of the user whose view to show
        uid: String,
    },
    /// Generate shell completions
    Completions {
        /// Target shell (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
    /// Configuration file location
    ConfigPath,
    /// Shows logs location and how to view them
    Logs,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let config_path = self.config_path();
        let mut config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;
        self.apply_overrides(&mut config, std::env::var_os("NO_COLOR").is_some());
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config, no_color_env: bool) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if self.no_colors || no_color_env {
            config.theme = "nocolor".to_string();
        }
    }

    /// Run the subcommand, if any. Returns `false` when the TUI should start.
    pub fn execute(&self) -> Result<bool> {
        let Some(command) = &self.command else {
            return Ok(false);
        };

        match command {
            Commands::Lists => self.cmd_lists()?,
            Commands::Show { template_id, uid } => self.cmd_show(template_id, uid)?,
            Commands::Completions { shell } => {
                completions::generate(*shell, &mut std::io::stdout())?
            }
            Commands::ConfigPath => println!("{}", self.config_path().display()),
            Commands::Logs => {
                let log_file = crate::utils::get_log_dir().join("listview.log");
                printdoc! {"
                    {}
                    View logs in real-time: tail -f {:?}
                    ",
                    log_file.display(),
                    log_file
                };
            }
        }
        Ok(true)
    }

    fn client(config: &Config) -> Result<(Runtime, ListClient)> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let client = ListClient::new(&config.host, config.request_timeout())?;
        Ok((runtime, client))
    }

    fn cmd_lists(&self) -> Result<()> {
        let config = self.load_config()?;
        let (runtime, client) = Self::client(&config)?;
        let home = runtime
            .block_on(client.fetch_home())
            .context("Failed to fetch lists")?;

        let formatter = RelativeTimeFormatter::new(config.relative_time.clone());
        for line in format_lists(home, &formatter, Utc::now()) {
            println!("{}", line);
        }
        Ok(())
    }

    fn cmd_show(&self, template_id: &str, uid: &str) -> Result<()> {
        let config = self.load_config()?;
        let (runtime, client) = Self::client(&config)?;
        let template_id = Id::new(template_id);
        let uid = Id::new(uid);

        let (home, list) = runtime.block_on(async {
            tokio::try_join!(client.fetch_home(), client.fetch_list(&template_id, &uid))
        })
        .context("Failed to fetch list")?;
        info!("Showing list {}/{}", template_id, uid);

        let summary = home
            .lists
            .iter()
            .find(|l| l.template_id == template_id)
            .cloned()
            .unwrap_or_else(|| ListSummary {
                name: template_id.to_string(),
                template_id: template_id.clone(),
                creation_time: 0,
            });
        let user = if home.user.uid == uid {
            home.user
        } else {
            User {
                username: uid.to_string(),
                uid,
            }
        };

        let params = ListInstanceParams::from_response(summary, user, list);
        let formatter = RelativeTimeFormatter::new(config.relative_time.clone());
        print!("{}", format_list_view(&params, &formatter, Utc::now()));
        Ok(())
    }
}

/// One line per list, newest first: name and relative label.
pub fn format_lists(
    home: HomeResponse,
    formatter: &RelativeTimeFormatter,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lists = home.lists;
    sort_newest_first(&mut lists);
    let width = lists.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
    lists
        .iter()
        .map(|l| {
            format!(
                "{:width$}  {}",
                l.name,
                formatter.format(l.creation_time, now),
                width = width
            )
        })
        .collect()
}

/// Plain-text rendition of one list view.
pub fn format_list_view(
    params: &ListInstanceParams,
    formatter: &RelativeTimeFormatter,
    now: DateTime<Utc>,
) -> String {
    let mut out = format!(
        "@{}'s {} List\n",
        params.user.username, params.list.name
    );
    for item in &params.items {
        out.push_str(&format!("  {}\n", checkbox_label(&item.name, item.checked)));
    }
    if !params.other_users.is_empty() {
        let label = formatter.format(params.list.creation_time, now);
        out.push_str("\nOther Users With This List\n");
        for user in &params.other_users {
            out.push_str(&format!("  {}  {}\n", user.username, label));
        }
    }
    out
}
