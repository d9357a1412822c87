use std::sync::Arc;

use serde::Serialize;

use crate::errors::BookingError;
use crate::models::{Booking, BookingStatus, Client, NotificationConfig};
use crate::services::messaging::{Channel, MessagingProvider};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reminder {
    pub channel: Channel,
    pub to: String,
    pub body: String,
}

pub fn reminder_text(booking: &Booking, business_name: &str) -> String {
    let when = booking.date.format("%A, %B %-d, %Y");
    let venue = booking
        .venue
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| format!(" at {v}"))
        .unwrap_or_default();
    let host = if business_name.is_empty() {
        String::new()
    } else {
        format!(" with {business_name}")
    };
    format!(
        "Hi {}, this is a reminder of your booking{host} on {when} at {}{venue}.",
        booking.client_name, booking.time
    )
}

/// One reminder per enabled channel the client has contact details for.
pub fn build_reminders(
    booking: &Booking,
    client: Option<&Client>,
    notifications: &NotificationConfig,
    business_name: &str,
) -> Result<Vec<Reminder>, BookingError> {
    if booking.status != BookingStatus::Upcoming {
        return Err(BookingError::NotRemindable(booking.status));
    }
    let Some(client) = client else {
        tracing::warn!(booking_id = %booking.id, "no client record, reminder has no recipient");
        return Ok(vec![]);
    };

    let body = reminder_text(booking, business_name);
    let mut reminders = vec![];
    let phone = client.phone.trim();
    let email = client.email.trim();

    if notifications.whatsapp && !phone.is_empty() {
        reminders.push(Reminder {
            channel: Channel::WhatsApp,
            to: phone.to_string(),
            body: body.clone(),
        });
    }
    if notifications.sms && !phone.is_empty() {
        reminders.push(Reminder {
            channel: Channel::Sms,
            to: phone.to_string(),
            body: body.clone(),
        });
    }
    if notifications.email && !email.is_empty() {
        reminders.push(Reminder {
            channel: Channel::Email,
            to: email.to_string(),
            body,
        });
    }
    Ok(reminders)
}

/// Fire-and-forget: delivery outcomes are only logged.
pub fn dispatch(messaging: Arc<dyn MessagingProvider>, booking_id: String, reminders: Vec<Reminder>) {
    for reminder in reminders {
        let messaging = Arc::clone(&messaging);
        let booking_id = booking_id.clone();
        tokio::spawn(async move {
            match messaging
                .send_message(reminder.channel, &reminder.to, &reminder.body)
                .await
            {
                Ok(()) => tracing::info!(
                    booking_id = %booking_id,
                    channel = reminder.channel.as_str(),
                    "reminder sent"
                ),
                Err(e) => tracing::warn!(
                    booking_id = %booking_id,
                    channel = reminder.channel.as_str(),
                    error = %e,
                    "reminder delivery failed"
                ),
            }
        });
    }
}
