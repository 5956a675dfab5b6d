use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Analyse,
    History,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Analyse, Tab::History];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Analyse => "Analyse",
            Tab::History => "History",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyse" | "analyze" | "upload" => Ok(Tab::Analyse),
            "history" => Ok(Tab::History),
            other => Err(format!("Unknown tab '{other}' (expected 'analyse' or 'history')")),
        }
    }
}

/// Which of the two views is on screen.
#[derive(Debug, Default)]
pub struct TabSwitcher {
    active: Tab,
}

impl TabSwitcher {
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Returns true when the active tab actually changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        let changed = self.active != tab;
        self.active = tab;
        changed
    }

    pub fn toggle(&mut self) -> Tab {
        self.active = match self.active {
            Tab::Analyse => Tab::History,
            Tab::History => Tab::Analyse,
        };
        self.active
    }
}
