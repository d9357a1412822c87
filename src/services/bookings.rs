use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::models::booking::parse_slot_time;
use crate::models::{
    Booking, BookingPatch, BookingStatus, ClientDirectory, NewBooking, Service,
};
use crate::services::scheduling;

pub const UNKNOWN_CLIENT: &str = "Unknown";

/// A tenant's booking collection. Every mutation goes through the command
/// methods below, which run the slot check before touching anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingBook {
    bookings: Vec<Booking>,
}

impl BookingBook {
    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    pub fn all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn on_day(&self, date: NaiveDate) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.date == date).collect()
    }

    pub fn is_slot_occupied(&self, date: NaiveDate, time: &str, exclude_id: Option<&str>) -> bool {
        scheduling::is_slot_occupied(&self.bookings, date, time, exclude_id)
    }

    pub fn create(
        &mut self,
        input: NewBooking,
        clients: &dyn ClientDirectory,
        services: &[Service],
    ) -> Result<&Booking, BookingError> {
        if input.client_id.trim().is_empty() {
            return Err(BookingError::MissingClient);
        }
        validate_time(&input.time)?;
        scheduling::check_slot(&self.bookings, input.date, &input.time, None)?;

        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: resolve_client_name(clients, &input.client_id),
            client_id: input.client_id,
            date: input.date,
            time: input.time,
            venue: input.venue,
            notes: append_service_note(input.notes, services, input.service_id.as_deref()),
            status: BookingStatus::Upcoming,
        };

        tracing::info!(
            booking_id = %booking.id,
            date = %booking.date,
            time = %booking.time,
            "booking created"
        );
        let idx = self.bookings.len();
        self.bookings.push(booking);
        Ok(&self.bookings[idx])
    }

    pub fn update(
        &mut self,
        id: &str,
        patch: BookingPatch,
        clients: &dyn ClientDirectory,
        services: &[Service],
    ) -> Result<&Booking, BookingError> {
        let idx = self.position(id)?;
        let current = &self.bookings[idx];

        let status = patch.status.unwrap_or(current.status);
        if !current.status.can_transition_to(status) {
            return Err(BookingError::IllegalTransition {
                current: current.status,
                requested: status,
            });
        }

        let client_id = patch.client_id.unwrap_or_else(|| current.client_id.clone());
        if client_id.trim().is_empty() {
            return Err(BookingError::MissingClient);
        }
        let time = patch.time.unwrap_or_else(|| current.time.clone());
        validate_time(&time)?;
        let date = patch.date.unwrap_or(current.date);

        if status.is_active() {
            scheduling::check_slot(&self.bookings, date, &time, Some(id))?;
        }

        let notes = append_service_note(
            patch.notes.or_else(|| current.notes.clone()),
            services,
            patch.service_id.as_deref(),
        );
        let venue = patch.venue.or_else(|| current.venue.clone());

        let booking = &mut self.bookings[idx];
        let previous = booking.status;
        booking.client_name = resolve_client_name(clients, &client_id);
        booking.client_id = client_id;
        booking.date = date;
        booking.time = time;
        booking.venue = venue;
        booking.notes = notes;
        booking.status = status;

        tracing::info!(
            booking_id = %booking.id,
            from = previous.as_str(),
            to = status.as_str(),
            "booking updated"
        );
        Ok(&*booking)
    }

    /// Cancellation never collides with anything, so there is no slot check.
    pub fn cancel(&mut self, id: &str, confirmed: bool) -> Result<&Booking, BookingError> {
        if !confirmed {
            return Err(BookingError::ConfirmationRequired);
        }
        let idx = self.position(id)?;
        let booking = &mut self.bookings[idx];
        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(BookingError::IllegalTransition {
                current: booking.status,
                requested: BookingStatus::Cancelled,
            });
        }
        booking.status = BookingStatus::Cancelled;

        tracing::info!(booking_id = %booking.id, "booking cancelled");
        Ok(&*booking)
    }

    fn position(&self, id: &str) -> Result<usize, BookingError> {
        self.bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }
}

fn validate_time(time: &str) -> Result<(), BookingError> {
    match parse_slot_time(time) {
        Some(_) => Ok(()),
        None => Err(BookingError::InvalidTime(time.to_string())),
    }
}

pub fn resolve_client_name(clients: &dyn ClientDirectory, client_id: &str) -> String {
    match clients.find(client_id) {
        Some(client) => client.name.clone(),
        None => {
            tracing::debug!(client_id, "client not found, using placeholder name");
            UNKNOWN_CLIENT.to_string()
        }
    }
}

pub fn append_service_note(
    notes: Option<String>,
    services: &[Service],
    service_id: Option<&str>,
) -> Option<String> {
    let Some(service) = service_id.and_then(|id| services.iter().find(|s| s.id == id)) else {
        return notes;
    };
    let line = service.note_line();
    match notes {
        Some(existing) if !existing.is_empty() => Some(format!("{existing}\n{line}")),
        _ => Some(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+1 555-0123".to_string(),
            status: Default::default(),
            source: Default::default(),
            venue: None,
            description: None,
        }
    }

    fn directory() -> Vec<Client> {
        vec![client("alice", "Alice"), client("bob", "Bob")]
    }

    fn services() -> Vec<Service> {
        vec![Service {
            id: "s1".to_string(),
            name: "Bridal Makeup".to_string(),
            price: "$250".to_string(),
            description: None,
        }]
    }

    fn new_booking(date: &str, time: &str, client_id: &str) -> NewBooking {
        NewBooking {
            date: day(date),
            time: time.to_string(),
            client_id: client_id.to_string(),
            venue: None,
            notes: None,
            service_id: None,
        }
    }

    fn active_at(book: &BookingBook, date: &str, time: &str) -> usize {
        book.all()
            .iter()
            .filter(|b| b.status.is_active() && b.date == day(date) && b.time == time)
            .count()
    }

    #[test]
    fn test_create_sets_upcoming_and_name() {
        let mut book = BookingBook::default();
        let clients = directory();
        let b = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap();
        assert_eq!(b.status, BookingStatus::Upcoming);
        assert_eq!(b.client_name, "Alice");
        assert!(!b.id.is_empty());
    }

    #[test]
    fn test_double_booking_rejected_without_mutation() {
        let mut book = BookingBook::default();
        let clients = directory();
        book.create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap();

        let err = book
            .create(new_booking("2024-03-05", "09:00", "bob"), &clients, &[])
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotOccupied(_)));
        assert_eq!(book.len(), 1);
        assert_eq!(book.all()[0].client_name, "Alice");
    }

    #[test]
    fn test_cancel_frees_slot() {
        let mut book = BookingBook::default();
        let clients = directory();
        let a = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let cancelled = book.cancel(&a, true).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let b = book
            .create(new_booking("2024-03-05", "09:00", "bob"), &clients, &[])
            .unwrap();
        assert_eq!(b.client_name, "Bob");
        assert_eq!(book.len(), 2);
        assert_eq!(active_at(&book, "2024-03-05", "09:00"), 1);
    }

    #[test]
    fn test_cancel_requires_confirmation() {
        let mut book = BookingBook::default();
        let clients = directory();
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let err = book.cancel(&id, false).unwrap_err();
        assert!(matches!(err, BookingError::ConfirmationRequired));
        assert_eq!(book.get(&id).unwrap().status, BookingStatus::Upcoming);
    }

    #[test]
    fn test_update_same_slot_excludes_self() {
        let mut book = BookingBook::default();
        let clients = directory();
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let updated = book
            .update(
                &id,
                BookingPatch {
                    time: Some("09:00".to_string()),
                    notes: Some("bring mirror".to_string()),
                    venue: Some("Studio 2".to_string()),
                    ..Default::default()
                },
                &clients,
                &[],
            )
            .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("bring mirror"));
        assert_eq!(updated.venue.as_deref(), Some("Studio 2"));
    }

    #[test]
    fn test_update_ignores_cancelled_neighbours() {
        let mut book = BookingBook::default();
        let clients = directory();
        for _ in 0..3 {
            let id = book
                .create(new_booking("2024-03-05", "09:00", "bob"), &clients, &[])
                .unwrap()
                .id
                .clone();
            book.cancel(&id, true).unwrap();
        }
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let patch = BookingPatch {
            notes: Some("updated".to_string()),
            ..Default::default()
        };
        assert!(book.update(&id, patch, &clients, &[]).is_ok());
    }

    #[test]
    fn test_update_into_taken_slot_rejected() {
        let mut book = BookingBook::default();
        let clients = directory();
        book.create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap();
        let id = book
            .create(new_booking("2024-03-05", "10:00", "bob"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let patch = BookingPatch {
            time: Some("09:00".to_string()),
            notes: Some("should not stick".to_string()),
            ..Default::default()
        };
        let err = book.update(&id, patch, &clients, &[]).unwrap_err();
        assert!(matches!(err, BookingError::SlotOccupied(_)));

        let unchanged = book.get(&id).unwrap();
        assert_eq!(unchanged.time, "10:00");
        assert_eq!(unchanged.notes, None);
        assert_eq!(active_at(&book, "2024-03-05", "09:00"), 1);
    }

    #[test]
    fn test_update_to_cancelled_skips_slot_check() {
        let mut book = BookingBook::default();
        let clients = directory();
        book.create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap();
        let id = book
            .create(new_booking("2024-03-05", "10:00", "bob"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let patch = BookingPatch {
            time: Some("09:00".to_string()),
            status: Some(BookingStatus::Cancelled),
            ..Default::default()
        };
        let b = book.update(&id, patch, &clients, &[]).unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert_eq!(active_at(&book, "2024-03-05", "09:00"), 1);
    }

    #[test]
    fn test_cancelled_booking_cannot_be_revived() {
        let mut book = BookingBook::default();
        let clients = directory();
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();
        book.cancel(&id, true).unwrap();

        let patch = BookingPatch {
            status: Some(BookingStatus::Upcoming),
            ..Default::default()
        };
        let err = book.update(&id, patch, &clients, &[]).unwrap_err();
        assert!(matches!(err, BookingError::IllegalTransition { .. }));
        assert_eq!(book.get(&id).unwrap().status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_completed_cannot_be_cancelled() {
        let mut book = BookingBook::default();
        let clients = directory();
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();
        let patch = BookingPatch {
            status: Some(BookingStatus::Completed),
            ..Default::default()
        };
        book.update(&id, patch, &clients, &[]).unwrap();

        let err = book.cancel(&id, true).unwrap_err();
        assert!(matches!(err, BookingError::IllegalTransition { .. }));
    }

    #[test]
    fn test_client_name_follows_client_changes() {
        let mut book = BookingBook::default();
        let mut clients = directory();
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let patch = BookingPatch {
            client_id: Some("bob".to_string()),
            ..Default::default()
        };
        assert_eq!(book.update(&id, patch, &clients, &[]).unwrap().client_name, "Bob");

        clients[1].name = "Robert".to_string();
        let patch = BookingPatch {
            client_id: Some("bob".to_string()),
            ..Default::default()
        };
        assert_eq!(
            book.update(&id, patch, &clients, &[]).unwrap().client_name,
            "Robert"
        );

        let patch = BookingPatch {
            client_id: Some("ghost".to_string()),
            ..Default::default()
        };
        assert_eq!(
            book.update(&id, patch, &clients, &[]).unwrap().client_name,
            UNKNOWN_CLIENT
        );
    }

    #[test]
    fn test_unknown_client_gets_placeholder() {
        let mut book = BookingBook::default();
        let b = book
            .create(new_booking("2024-03-05", "09:00", "nobody"), &directory(), &[])
            .unwrap();
        assert_eq!(b.client_name, "Unknown");
    }

    #[test]
    fn test_missing_client_rejected() {
        let mut book = BookingBook::default();
        let err = book
            .create(new_booking("2024-03-05", "09:00", ""), &directory(), &[])
            .unwrap_err();
        assert!(matches!(err, BookingError::MissingClient));
        assert!(book.is_empty());
    }

    #[test]
    fn test_invalid_time_rejected() {
        let mut book = BookingBook::default();
        let err = book
            .create(new_booking("2024-03-05", "9am", "alice"), &directory(), &[])
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidTime(_)));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut book = BookingBook::default();
        let err = book
            .update("missing", BookingPatch::default(), &directory(), &[])
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
        assert!(matches!(book.cancel("missing", true), Err(BookingError::NotFound(_))));
    }

    #[test]
    fn test_reschedule_to_other_day() {
        let mut book = BookingBook::default();
        let clients = directory();
        let id = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .id
            .clone();
        book.create(new_booking("2024-03-06", "09:00", "bob"), &clients, &[])
            .unwrap();

        let patch = BookingPatch {
            date: Some(day("2024-03-06")),
            ..Default::default()
        };
        assert!(matches!(
            book.update(&id, patch, &clients, &[]),
            Err(BookingError::SlotOccupied(_))
        ));

        let patch = BookingPatch {
            date: Some(day("2024-03-07")),
            ..Default::default()
        };
        assert_eq!(book.update(&id, patch, &clients, &[]).unwrap().date, day("2024-03-07"));
        assert_eq!(book.on_day(day("2024-03-05")).len(), 0);
    }

    #[test]
    fn test_service_appended_to_notes() {
        let mut book = BookingBook::default();
        let mut input = new_booking("2024-03-05", "09:00", "alice");
        input.notes = Some("Trial run".to_string());
        input.service_id = Some("s1".to_string());
        let b = book.create(input, &directory(), &services()).unwrap();
        assert_eq!(
            b.notes.as_deref(),
            Some("Trial run\nService: Bridal Makeup ($250)")
        );
    }

    #[test]
    fn test_append_service_note_edge_cases() {
        let services = services();
        assert_eq!(
            append_service_note(None, &services, Some("s1")).as_deref(),
            Some("Service: Bridal Makeup ($250)")
        );
        assert_eq!(
            append_service_note(Some(String::new()), &services, Some("s1")).as_deref(),
            Some("Service: Bridal Makeup ($250)")
        );
        assert_eq!(
            append_service_note(Some("keep".to_string()), &services, Some("nope")).as_deref(),
            Some("keep")
        );
    }

    #[test]
    fn test_create_returns_stored_booking() {
        let mut book = BookingBook::default();
        let clients = directory();
        book.create(new_booking("2024-03-05", "08:00", "bob"), &clients, &[])
            .unwrap();
        let created = book
            .create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap()
            .clone();
        assert_eq!(book.get(&created.id), Some(&created));
        assert_eq!(book.all().last(), Some(&created));
    }

    #[test]
    fn test_update_missing_client_reported_before_slot_conflict() {
        let mut book = BookingBook::default();
        let clients = directory();
        book.create(new_booking("2024-03-05", "09:00", "alice"), &clients, &[])
            .unwrap();
        let id = book
            .create(new_booking("2024-03-05", "10:00", "bob"), &clients, &[])
            .unwrap()
            .id
            .clone();

        let patch = BookingPatch {
            client_id: Some(String::new()),
            time: Some("09:00".to_string()),
            ..Default::default()
        };
        let err = book.update(&id, patch, &clients, &[]).unwrap_err();
        assert!(matches!(err, BookingError::MissingClient));
        assert_eq!(book.get(&id).unwrap().time, "10:00");
    }

    #[test]
    fn test_no_double_booking_over_mixed_sequence() {
        let mut book = BookingBook::default();
        let clients = directory();
        let dates = ["2024-03-05", "2024-03-06"];
        let times = ["09:00", "09:30", "10:00"];
        let mut ids = vec![];

        for round in 0..4 {
            for (d, date) in dates.iter().enumerate() {
                for (i, time) in times.iter().enumerate() {
                    let client = if (round + d + i) % 2 == 0 { "alice" } else { "bob" };
                    let taken = active_at(&book, date, time) > 0;
                    match book.create(new_booking(date, time, client), &clients, &[]) {
                        Ok(b) => {
                            assert!(!taken, "created over an active booking at {date} {time}");
                            ids.push(b.id.clone());
                        }
                        Err(e) => {
                            assert!(taken);
                            assert!(matches!(e, BookingError::SlotOccupied(_)));
                        }
                    }
                }
            }

            let cancelled = ids[round].clone();
            if book.get(&cancelled).unwrap().status == BookingStatus::Upcoming {
                book.cancel(&cancelled, true).unwrap();
            }

            // move the newest booking onto another day and time
            let id = ids.last().cloned().unwrap();
            let target_date = dates[round % dates.len()];
            let target_time = times[round % times.len()];
            let holder = book
                .all()
                .iter()
                .find(|b| {
                    b.id != id
                        && b.status.is_active()
                        && b.date == day(target_date)
                        && b.time == target_time
                })
                .map(|b| b.id.clone());
            let patch = BookingPatch {
                date: Some(day(target_date)),
                time: Some(target_time.to_string()),
                ..Default::default()
            };
            match (book.update(&id, patch, &clients, &[]), holder) {
                (Ok(b), None) => {
                    assert_eq!(b.date, day(target_date));
                    assert_eq!(b.time, target_time);
                }
                (Err(BookingError::SlotOccupied(_)), Some(_)) => {}
                (result, holder) => panic!(
                    "unexpected update outcome {:?} with slot holder {holder:?}",
                    result.map(|b| b.id.clone())
                ),
            }

            for date in dates {
                for time in times {
                    assert!(active_at(&book, date, time) <= 1);
                }
            }
        }
    }
}
