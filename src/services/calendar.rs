use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::booking::parse_slot_time;
use crate::models::Booking;

/// Month view cells, Sunday-first. Leading `None`s pad the first week so the
/// 1st lands in its weekday column.
pub fn month_grid(date: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(date);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells = vec![None; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .map(Some),
    );
    cells
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// First day of the month `delta` months away from `date`.
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let first = first_of_month(date);
    let step = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        first.checked_add_months(step)
    } else {
        first.checked_sub_months(step)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
}

pub fn bucket_by_day(grid: &[Option<NaiveDate>], bookings: &[Booking]) -> Vec<Option<DayCell>> {
    grid.iter()
        .map(|cell| {
            cell.map(|date| DayCell {
                date,
                bookings: bookings.iter().filter(|b| b.date == date).cloned().collect(),
            })
        })
        .collect()
}

pub fn slot_start(booking: &Booking) -> NaiveDateTime {
    let time = parse_slot_time(&booking.time)
        .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .unwrap_or_default();
    booking.date.and_time(time)
}

fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

pub fn generate_ics(
    booking: &Booking,
    business_name: &str,
    slot_minutes: u32,
    stamp: NaiveDateTime,
) -> String {
    let start = slot_start(booking);
    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = (start + Duration::minutes(slot_minutes as i64))
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = stamp.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@avvai", booking.id);

    let summary = escape_text(&format!(
        "Appointment: {} ({business_name})",
        booking.client_name
    ));
    let description = escape_text(booking.notes.as_deref().unwrap_or("No additional notes"));
    let location = booking
        .venue
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| format!("LOCATION:{}\r\n", escape_text(v)))
        .unwrap_or_default();
    let status = match booking.status.is_active() {
        true => "CONFIRMED",
        false => "CANCELLED",
    };

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Avvai//Bookings//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         {location}\
         DESCRIPTION:{description}\r\n\
         STATUS:{status}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    )
}
