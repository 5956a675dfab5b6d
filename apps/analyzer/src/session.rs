//! Interactive session: the tab switcher plus both views, driven by typed
//! commands and by completion events from in-flight requests.
//!
//! Requests run on spawned tasks and report back through an unbounded channel.
//! The only guard against duplicate requests is each view's busy flag.
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::ResumeApi;
use crate::config::Config;
use crate::errors::{ClientError, ViewError};
use crate::file::SelectedFile;
use crate::models::{AnalysisResult, ResumeRecord};
use crate::render::{self, history::render_history};
use crate::views::{HistoryView, Tab, TabSwitcher, UploadView};

pub const HELP: &str = "\
Commands:
  analyse | history     switch to that tab
  tab [analyse|history] switch tab (toggles when no tab is given)
  select <path>         choose a PDF resume to analyse
  upload                send the selected PDF for analysis
  refresh               reload the resume history
  show                  redraw the current tab
  help                  show this message
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    ToggleTab,
    Select(PathBuf),
    Upload,
    Refresh,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "analyse" | "analyze" => Ok(Command::Tab(Tab::Analyse)),
            "history" => Ok(Command::Tab(Tab::History)),
            "tab" if rest.is_empty() => Ok(Command::ToggleTab),
            "tab" => rest.parse().map(Command::Tab),
            "select" | "open" if rest.is_empty() => Err("Usage: select <path-to-pdf>".to_string()),
            "select" | "open" => Ok(Command::Select(PathBuf::from(rest))),
            "upload" | "submit" => Ok(Command::Upload),
            "refresh" | "reload" => Ok(Command::Refresh),
            "show" | "view" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
        }
    }
}

/// Completion of a request started by the session.
#[derive(Debug)]
pub enum AppEvent {
    UploadFinished(Result<AnalysisResult, ClientError>),
    HistoryFetched(Result<Vec<ResumeRecord>, ClientError>),
}

/// What the terminal should print in response to a command or event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking alert: shown prominently before the prompt returns.
    Alert(String),
    Info(String),
    Screen(String),
    Exit,
}

pub struct Session {
    api: Arc<dyn ResumeApi>,
    tabs: TabSwitcher,
    upload: UploadView,
    history: HistoryView,
    events: mpsc::UnboundedSender<AppEvent>,
    max_upload_bytes: u64,
}

impl Session {
    pub fn new(
        api: Arc<dyn ResumeApi>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            api,
            tabs: TabSwitcher::default(),
            upload: UploadView::new(config.max_upload_bytes),
            history: HistoryView::default(),
            events,
            max_upload_bytes: config.max_upload_bytes,
        };
        (session, rx)
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    pub fn upload_view(&self) -> &UploadView {
        &self.upload
    }

    pub fn history_view(&self) -> &HistoryView {
        &self.history
    }

    pub fn prompt(&self) -> String {
        let busy = if self.upload.is_uploading() {
            " (analyzing…)"
        } else if self.history.is_loading() {
            " (loading…)"
        } else {
            ""
        };
        format!("{}{}> ", self.tabs.active().label().to_ascii_lowercase(), busy.yellow())
    }

    /// Tab bar followed by the active view.
    pub fn screen(&self) -> String {
        let body = match self.tabs.active() {
            Tab::Analyse => render::render_upload_view(&self.upload, self.max_upload_bytes),
            Tab::History => render_history(&self.history),
        };
        format!("{}\n\n{}", render::render_tab_bar(self.tabs.active()), body)
    }

    pub async fn handle_command(&mut self, command: Command) -> Vec<Notice> {
        debug!(?command, "Handling command");
        match command {
            Command::Tab(tab) => {
                self.switch_to(tab);
                vec![Notice::Screen(self.screen())]
            }
            Command::ToggleTab => {
                let tab = self.tabs.toggle();
                self.switch_to(tab);
                vec![Notice::Screen(self.screen())]
            }
            Command::Select(path) => {
                self.switch_to(Tab::Analyse);
                self.select(path).await
            }
            Command::Upload => {
                self.switch_to(Tab::Analyse);
                self.upload()
            }
            Command::Refresh => {
                if self.switch_to(Tab::History) {
                    return vec![Notice::Screen(self.screen())];
                }
                match self.history.refresh() {
                    Ok(()) => {
                        self.start_fetch();
                        vec![Notice::Screen(self.screen())]
                    }
                    Err(e) => vec![Notice::Info(e.to_string())],
                }
            }
            Command::Show => vec![Notice::Screen(self.screen())],
            Command::Help => vec![Notice::Info(HELP.to_string())],
            Command::Quit => vec![Notice::Exit],
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Notice> {
        let mut notices = Vec::new();
        let redraw = match event {
            AppEvent::UploadFinished(result) => {
                if let Some(alert) = self.upload.finish_upload(result) {
                    notices.push(Notice::Alert(alert.to_string()));
                }
                self.tabs.active() == Tab::Analyse
            }
            AppEvent::HistoryFetched(result) => {
                self.history.finish_fetch(result);
                self.tabs.active() == Tab::History
            }
        };
        if redraw {
            notices.push(Notice::Screen(self.screen()));
        }
        notices
    }

    /// Selects `tab`, mounting the history view the first time it is shown.
    /// Returns true if that mount started a fetch.
    fn switch_to(&mut self, tab: Tab) -> bool {
        self.tabs.select(tab);
        if tab == Tab::History && self.history.mount() {
            self.start_fetch();
            return true;
        }
        false
    }

    async fn select(&mut self, path: PathBuf) -> Vec<Notice> {
        let result = match SelectedFile::from_path(&path, self.max_upload_bytes).await {
            Ok(file) => self.upload.select_file(file),
            Err(e) => {
                self.upload.clear_selection();
                Err(e)
            }
        };
        match result {
            Ok(()) => vec![Notice::Screen(self.screen())],
            Err(e) => vec![Notice::Alert(e.to_string())],
        }
    }

    fn upload(&mut self) -> Vec<Notice> {
        match self.upload.begin_upload() {
            Ok(file) => {
                self.start_upload(file);
                vec![Notice::Screen(self.screen())]
            }
            Err(ViewError::Busy) => vec![Notice::Info(ViewError::Busy.to_string())],
            Err(ViewError::Invalid(e)) => vec![Notice::Alert(e.to_string())],
        }
    }

    fn start_upload(&self, file: SelectedFile) {
        info!(file = %file.name, "Analyzing resume");
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.upload_resume(&file).await;
            if events.send(AppEvent::UploadFinished(result)).is_err() {
                debug!("Session closed before upload finished");
            }
        });
    }

    fn start_fetch(&self) {
        info!("Fetching resume history");
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.list_resumes().await;
            if events.send(AppEvent::HistoryFetched(result)).is_err() {
                debug!("Session closed before history fetch finished");
            }
        });
    }
}
