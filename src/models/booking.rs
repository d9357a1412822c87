use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub venue: Option<String>,
    pub notes: Option<String>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "UPCOMING",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_active(&self) -> bool {
        *self != BookingStatus::Cancelled
    }

    /// Only `UPCOMING` may move forward; `COMPLETED` and `CANCELLED` are terminal.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (BookingStatus::Upcoming, BookingStatus::Completed)
                | (BookingStatus::Upcoming, BookingStatus::Cancelled)
        )
    }
}

/// Form submitted for a selected calendar day.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub client_id: String,
    pub venue: Option<String>,
    pub notes: Option<String>,
    pub service_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub client_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub notes: Option<String>,
    pub status: Option<BookingStatus>,
    pub service_id: Option<String>,
}

/// Validates a 24-hour `HH:MM` time-of-day string.
pub fn parse_slot_time(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}
