//! French display strings for the club site.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::model::{MatchWithVenue, Team, Venue};
use crate::temporal::{Countdown, CountdownUnit};

/// Shown instead of a countdown while a match is being played.
pub const ONGOING_LABEL: &str = "ATM";
pub const PAST_MATCH_NOTE: &str = "Résultat à retrouver sur nos réseaux !";
pub const RELOAD_NOTICE: &str =
    "La page va être rechargée dans quelques secondes, merci de votre compréhension !";

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Short menu badge: `J-3`, `H-5`, `M-12`.
pub fn menu_flag_label(countdown: &Countdown) -> String {
    let n = countdown.amount;
    match countdown.unit {
        CountdownUnit::Day => format!("J-{n}"),
        CountdownUnit::Hour => format!("H-{n}"),
        CountdownUnit::Minute => format!("M-{n}"),
        CountdownUnit::Ongoing => ONGOING_LABEL.to_string(),
    }
}

pub fn calendar_countdown_label(countdown: &Countdown) -> String {
    let n = countdown.amount;
    match countdown.unit {
        CountdownUnit::Day => format!("Dans {n} jour(s)"),
        CountdownUnit::Hour => format!("Dans {n} heure(s)"),
        CountdownUnit::Minute => format!("Dans {n} minute(s)"),
        CountdownUnit::Ongoing => ONGOING_LABEL.to_string(),
    }
}

/// `05/10/2024`
pub fn date_without_time(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// `Le 5 octobre 2024 à 20h30`
pub fn full_date(at: NaiveDateTime) -> String {
    format!(
        "Le {} {} {} à {}h{:02}",
        at.day(),
        MONTHS[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}

/// Element id for a past-match card, unique per kickoff: `20241005_2030`.
pub fn match_anchor_id(at: NaiveDateTime) -> String {
    at.format("%Y%m%d_%H%M").to_string()
}

pub fn opponents_title(opponents: &[Team]) -> String {
    match opponents {
        [only] => format!("Match contre {}", only.name),
        _ => format!("Match contre {} équipes", opponents.len()),
    }
}

pub fn venue_line(venue: &Venue) -> String {
    format!("Lieu : {} à {}", venue.name, venue.city)
}

pub fn season_over_notice(season_label: &str) -> String {
    format!(
        "La saison {season_label} est probablement terminée, nous vous invitons à revenir \
         régulièrement et à recharger le site pour vérifier s'il y a ou non de nouvelles \
         rencontres, merci de votre compréhension."
    )
}

/// Lines of one match card: title, countdown or date, detail, venue.
pub fn match_card(m: &MatchWithVenue, countdown: Option<&Countdown>) -> [String; 4] {
    let (when, detail) = match countdown {
        Some(c) => (calendar_countdown_label(c), full_date(m.start)),
        None => (date_without_time(m.start), PAST_MATCH_NOTE.to_string()),
    };
    [opponents_title(&m.opponents), when, detail, venue_line(&m.venue)]
}
