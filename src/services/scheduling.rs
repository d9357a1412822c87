use chrono::NaiveDate;

use crate::models::Booking;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    SlotOccupied { date: NaiveDate, time: String },
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::SlotOccupied { .. } => {
                write!(
                    f,
                    "This time slot is already booked! Please choose another time."
                )
            }
        }
    }
}

impl std::error::Error for SchedulingError {}

/// A slot is a point in time: only an exact `HH:MM` match on the same
/// calendar day collides. Cancelled bookings never occupy a slot.
pub fn is_slot_occupied(
    bookings: &[Booking],
    date: NaiveDate,
    time: &str,
    exclude_id: Option<&str>,
) -> bool {
    bookings.iter().any(|b| {
        Some(b.id.as_str()) != exclude_id
            && b.status.is_active()
            && b.date == date
            && b.time == time
    })
}

pub fn check_slot(
    bookings: &[Booking],
    date: NaiveDate,
    time: &str,
    exclude_id: Option<&str>,
) -> Result<(), SchedulingError> {
    if is_slot_occupied(bookings, date, time, exclude_id) {
        return Err(SchedulingError::SlotOccupied {
            date,
            time: time.to_string(),
        });
    }
    Ok(())
}
