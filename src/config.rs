use std::collections::HashMap;
use std::env;

pub const ENV_TEAMS: &str = "CLUB_FIXTURES_TEAMS";
pub const ENV_CALENDAR: &str = "CLUB_FIXTURES_CALENDAR";
pub const ENV_FLAG_PREFIX: &str = "CLUB_FIXTURES_FLAG_";

const DEFAULT_TEAMS: &[&str] = &["SEN"];

/// Per-team display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSettings {
    /// Id of the menu element showing the countdown to the team's next match.
    pub menu_flag_id: String,
}

impl TeamSettings {
    pub fn for_key(team_key: &str) -> Self {
        Self {
            menu_flag_id: format!("menu-flag-{}", team_key.to_ascii_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Teams refreshed on each pass, in display order.
    pub teams: Vec<String>,
    pub settings: HashMap<String, TeamSettings>,
    /// Team whose full calendar page is being shown, if any.
    pub active_calendar: Option<String>,
}

impl CoordinatorConfig {
    pub fn new(teams: Vec<String>, active_calendar: Option<String>) -> Self {
        let settings = teams
            .iter()
            .map(|key| (key.clone(), TeamSettings::for_key(key)))
            .collect();
        Self {
            teams,
            settings,
            active_calendar,
        }
    }

    /// Seniors, under-9 and under-11 boys, with the seniors calendar open.
    pub fn club_defaults() -> Self {
        let teams = ["SEN", "U9", "U11M"].map(String::from).to_vec();
        let mut config = Self::new(teams, Some("SEN".to_string()));
        config.settings.insert(
            "SEN".to_string(),
            TeamSettings {
                menu_flag_id: "menu-flag-seniors".to_string(),
            },
        );
        config
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| var(key).filter(|val| !val.trim().is_empty());

        let teams = match lookup(ENV_TEAMS) {
            Some(raw) => parse_keys(&raw),
            None => DEFAULT_TEAMS.iter().map(|k| k.to_string()).collect(),
        };
        let active_calendar = lookup(ENV_CALENDAR)
            .map(|val| val.trim().to_string())
            .or_else(|| teams.first().cloned());

        let mut config = Self::new(teams, active_calendar);
        for key in &config.teams {
            if let Some(flag) = lookup(&format!("{ENV_FLAG_PREFIX}{key}")) {
                config.settings.insert(
                    key.clone(),
                    TeamSettings {
                        menu_flag_id: flag.trim().to_string(),
                    },
                );
            }
        }
        config
    }

    pub fn settings_for(&self, team_key: &str) -> TeamSettings {
        self.settings
            .get(team_key)
            .cloned()
            .unwrap_or_else(|| TeamSettings::for_key(team_key))
    }

    pub fn is_active_calendar(&self, team_key: &str) -> bool {
        self.active_calendar.as_deref() == Some(team_key)
    }
}

fn parse_keys(raw: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for part in raw.split([',', ';', ' ']) {
        let key = part.trim();
        if !key.is_empty() && !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}
