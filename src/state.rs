use std::collections::VecDeque;
use std::path::PathBuf;

use crate::monte_carlo::SimulationResult;
use crate::profile::TeamProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Home,
    Away,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::Home => "Home",
            Slot::Away => "Away",
        }
    }
}

/// Session state for the terminal: the currently loaded profiles, the last
/// simulation result and the console log. The engine itself never sees this;
/// both profiles are passed to it explicitly per call.
pub struct AppState {
    pub home_path: PathBuf,
    pub away_path: PathBuf,
    pub home: Option<TeamProfile>,
    pub away: Option<TeamProfile>,
    pub trials: usize,
    pub result: Option<SimulationResult>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(home_path: PathBuf, away_path: PathBuf, trials: usize) -> Self {
        Self {
            home_path,
            away_path,
            home: None,
            away: None,
            trials,
            result: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn profile(&self, slot: Slot) -> Option<&TeamProfile> {
        match slot {
            Slot::Home => self.home.as_ref(),
            Slot::Away => self.away.as_ref(),
        }
    }

    pub fn set_profile(&mut self, slot: Slot, profile: TeamProfile) {
        // A new profile invalidates any result computed from the old one.
        self.result = None;
        match slot {
            Slot::Home => self.home = Some(profile),
            Slot::Away => self.away = Some(profile),
        }
    }

    pub fn matchup_label(&self) -> String {
        match (&self.home, &self.away) {
            (Some(h), Some(a)) => format!("{} vs {}", h.name, a.name),
            _ => "No matchup loaded".to_string(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
