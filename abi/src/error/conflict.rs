// postgres reports exclusion violations on rsvp.reservations like:
// "Key (room_number, stay)=(101, [2026-10-20,2026-10-22)) conflicts with existing key (room_number, stay)=(101, [2026-10-19,2026-10-21))."

use chrono::NaiveDate;
use regex::Regex;
use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationConflictInfo {
    Parsed(ReservationConflict),
    /// an update ran into a reservation other than the one being updated
    Rebooked(ReservationConflict),
    /// raw database detail, kept for logs but never shown to callers
    Unparsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationConflict {
    pub new: ReservationWindow,
    pub old: ReservationWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationWindow {
    pub rid: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReservationWindow {
    pub fn new(rid: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            rid: rid.into(),
            start,
            end,
        }
    }
}

impl fmt::Display for ReservationConflictInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(conflict) => write!(
                f,
                "Room {} is already booked in the period from {} to {}.",
                conflict.new.rid, conflict.new.start, conflict.new.end
            ),
            Self::Rebooked(conflict) => write!(
                f,
                "Room {} is already booked by another reservation in the new period.",
                conflict.new.rid
            ),
            Self::Unparsed(_) => write!(f, "The room is already booked in the requested period."),
        }
    }
}

impl From<&str> for ReservationConflictInfo {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(conflict) => Self::Parsed(conflict),
            Err(_) => Self::Unparsed(s.to_string()),
        }
    }
}

impl ReservationConflictInfo {
    /// reword a conflict found while updating an existing reservation
    pub fn rebooked(self) -> Self {
        match self {
            Self::Parsed(conflict) => Self::Rebooked(conflict),
            other => other,
        }
    }
}

impl From<ReservationConflict> for ReservationConflictInfo {
    fn from(conflict: ReservationConflict) -> Self {
        Self::Parsed(conflict)
    }
}

impl FromStr for ReservationConflict {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedInfo::from_str(s)?.try_into()
    }
}

impl TryFrom<ParsedInfo> for ReservationConflict {
    type Error = ();

    fn try_from(value: ParsedInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            new: value.new.try_into()?,
            old: value.old.try_into()?,
        })
    }
}

impl TryFrom<HashMap<String, String>> for ReservationWindow {
    type Error = ();

    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        let stay = value.get("stay").ok_or(())?.replace('"', "");

        let mut split = stay.splitn(2, ',');
        let start = parse_date(split.next().ok_or(())?)?;
        let end = parse_date(split.next().ok_or(())?)?;

        Ok(Self {
            rid: value.get("room_number").ok_or(())?.trim().to_string(),
            start,
            end,
        })
    }
}

struct ParsedInfo {
    new: HashMap<String, String>,
    old: HashMap<String, String>,
}

impl FromStr for ParsedInfo {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(
            r#"\((?P<k1>[a-zA-Z0-9_-]+)\s*,\s*(?P<k2>[a-zA-Z0-9_-]+)\)=\((?P<v1>.+?)\s*,\s*\[(?P<v2>[^\)\]]+)"#,
        )
        .map_err(|_| ())?;

        let mut maps = re.captures_iter(s).map(|cap| {
            let mut map = HashMap::new();
            map.insert(cap["k1"].to_string(), cap["v1"].to_string());
            map.insert(cap["k2"].to_string(), cap["v2"].to_string());
            map
        });

        let (new, old) = match (maps.next(), maps.next(), maps.next()) {
            (Some(new), Some(old), None) => (new, old),
            _ => return Err(()),
        };

        Ok(Self { new, old })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ()> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ())
}
