use tracing::error;

use crate::errors::{ClientError, ViewError};
use crate::models::ResumeRecord;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch resumes";

/// The three mutually exclusive states of the history list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HistoryState {
    #[default]
    Unfetched,
    Loading,
    /// Either the records or the error banner text. A failure leaves no records.
    Loaded(Result<Vec<ResumeRecord>, String>),
}

#[derive(Debug, Default)]
pub struct HistoryView {
    state: HistoryState,
    mounted: bool,
}

impl HistoryView {
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, HistoryState::Loading)
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.is_loading() {
            "Loading..."
        } else {
            "Refresh"
        }
    }

    /// First display of the view. Returns true if the automatic fetch was started.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.refresh().is_ok()
    }

    /// Manual refresh; disabled while a fetch is in flight.
    pub fn refresh(&mut self) -> Result<(), ViewError> {
        if self.is_loading() {
            return Err(ViewError::Busy);
        }
        self.mounted = true;
        self.state = HistoryState::Loading;
        Ok(())
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<ResumeRecord>, ClientError>) {
        self.state = match result {
            Ok(records) => HistoryState::Loaded(Ok(records)),
            Err(e) => {
                error!("Fetching resume history failed: {e}");
                HistoryState::Loaded(Err(FETCH_FAILED_MESSAGE.to_string()))
            }
        };
    }

    pub fn records(&self) -> &[ResumeRecord] {
        match &self.state {
            HistoryState::Loaded(Ok(records)) => records,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            HistoryState::Loaded(Err(message)) => Some(message),
            _ => None,
        }
    }
}
