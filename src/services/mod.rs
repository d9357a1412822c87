pub mod access;
pub mod bookings;
pub mod calendar;
pub mod messaging;
pub mod reminders;
pub mod scheduling;
