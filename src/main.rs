use {
  anyhow::{Context, anyhow},
  app::App,
  client::{Client, Endpoints},
  command::Command,
  command_dispatch::CommandDispatch,
  comment::{Comment, CommentForest, More},
  comment_record::CommentRecord,
  confirm_dialog::ConfirmDialog,
  credentials::Credentials,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dir_browser::DirBrowser,
  effect::Effect,
  error::{ExportError, FetchError, TaskError},
  event::Event,
  field::Field,
  form::Form,
  futures::future::{BoxFuture, FutureExt},
  help_view::HelpView,
  list_view::ListView,
  listing::{
    CommentData, LinkData, Listing, MoreChildrenResponse, MoreData, Thing,
  },
  mode::Mode,
  pending_count::PendingCount,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  reqwest::{
    StatusCode,
    header::{CONTENT_TYPE, USER_AGENT},
  },
  save_dir::SaveDirectory,
  serde::{Deserialize, Deserializer, de},
  serde_json::Value,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::{HashMap, VecDeque},
    env,
    fs::{self, File, OpenOptions},
    io::{self, IsTerminal, Stdout, Write},
    mem,
    path::{Path, PathBuf},
    process,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
  },
  submission::Submission,
  task::{ExportJob, ExportTask},
  thiserror::Error,
  tokio::{
    runtime::Handle,
    sync::{
      Mutex as AsyncMutex,
      mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  url::Url,
  utils::{centered_rect, deserialize_replies, tail, truncate},
};

mod app;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_record;
mod confirm_dialog;
mod credentials;
mod dir_browser;
mod effect;
mod error;
mod event;
mod exporter;
mod fetcher;
mod field;
mod form;
mod help_view;
mod list_view;
mod listing;
mod mode;
mod pending_count;
mod save_dir;
mod state;
mod submission;
mod task;
#[cfg(test)]
mod test_helpers;
mod utils;

const APP_TITLE: &str = "Top Level Reddit Comments";

const FORM_STATUS: &str = "tab next field • ctrl+s save • ctrl+o choose location • f1 help • esc quit";

const BROWSE_STATUS: &str = "↑/k up • ↓/j down • enter open • backspace parent • s select • esc cancel";

const CONFIRM_STATUS: &str = "y yes • n no • ←/→ choose • enter confirm";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const CANCELLED_STATUS: &str = "Save cancelled by user.";
const COUNTING_STATUS: &str = "Counting top-level comments...";
const MISSING_URL_STATUS: &str = "Error: enter a Reddit post URL";
const SAVING_STATUS: &str = "Saving comments...";

const LOG_FILE_VAR: &str = "REDDIT_COMMENTS_LOG";

const HELP_TEXT: &str = "\
Form:
  tab         next field
  shift+tab   previous field
  ctrl+s      save comments
  ctrl+o      choose save location
  f1          toggle this help
  esc         quit

URL field:
  type        edit the post URL
  backspace   delete the last character
  ctrl+u      clear the URL
  enter       save comments

Comment limit:
  ↑ / +       increase by one
  ↓ / -       decrease by one
  pg↑ / pg↓   change by ten
  0-9         type a limit (1 to 1000)
  backspace   delete the last digit

Save all:
  space       toggle saving every comment

Save location:
  ↑ / k       move selection up
  ↓ / j       move selection down
  enter       open the selected directory
  backspace   go to the parent directory
  s           use the directory being browsed
  esc         keep the current location
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging() -> Result {
  let Ok(path) = env::var(LOG_FILE_VAR) else {
    return Ok(());
  };

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&path)
    .with_context(|| format!("could not open log file {path}"))?;

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_target(true)
    .try_init()
    .map_err(|error| anyhow!("{error}"))?;

  info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");

  Ok(())
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  initialize_logging().context("could not initialize logging")?;

  let credentials =
    Credentials::from_env().context("could not load Reddit credentials")?;

  let client = Client::new(credentials, Endpoints::default());

  let save_directory =
    SaveDirectory::load().context("could not load save location")?;

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, save_directory);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
