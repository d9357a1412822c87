use chrono::Local;

use crate::db::snapshot::Tenants;
use crate::models::{
    Booking, BookingStatus, Client, ClientSource, ClientStatus, FeatureFlags, Service, Tenant,
    UserRole,
};
use crate::services::bookings::BookingBook;

fn client(id: &str, name: &str, email: &str, phone: &str, status: ClientStatus, source: ClientSource) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        status,
        source,
        venue: None,
        description: None,
    }
}

fn service(id: &str, name: &str, price: &str, description: &str) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        description: Some(description.to_string()),
    }
}

/// Demo workspace used when the store is empty.
pub fn demo_tenants() -> Tenants {
    let mut sarah = Tenant::new("art_1", "Sarah Jenkins", UserRole::Artist);
    sarah.business_name = "Sarah J. Photography".to_string();
    sarah.services = vec![
        service("s1", "Bridal Makeup", "$250", "Full bridal package including hair."),
        service("s2", "Party Makeup", "$80", "Light glam for events."),
    ];
    let mut alice = client(
        "1",
        "Alice Johnson",
        "alice@example.com",
        "+1 555-0123",
        ClientStatus::Booked,
        ClientSource::Manual,
    );
    alice.venue = Some("Grand Imperial Hotel".to_string());
    alice.description =
        Some("Bridal makeup for 2 days. Preferences: Natural look, allergic to latex.".to_string());
    let mut bob = client(
        "2",
        "Bob Smith",
        "bob@example.com",
        "+1 555-0199",
        ClientStatus::Lead,
        ClientSource::Bot,
    );
    bob.description = Some("Inquired about maternity shoot packages.".to_string());
    sarah.clients = vec![alice, bob];
    sarah.bookings = BookingBook::from_bookings(vec![Booking {
        id: "101".to_string(),
        client_id: "1".to_string(),
        client_name: "Alice Johnson".to_string(),
        date: Local::now().date_naive(),
        time: "14:00".to_string(),
        venue: Some("Grand Imperial Hotel".to_string()),
        notes: Some("Consultation for web design".to_string()),
        status: BookingStatus::Upcoming,
    }]);

    let mut mike = Tenant::new("art_2", "Mike Ross", UserRole::Artist);
    mike.business_name = "Ross Legal Consulting".to_string();
    mike.features = FeatureFlags {
        booking_enabled: false,
        bot_enabled: false,
        ..FeatureFlags::default()
    };

    let admin = Tenant::new("admin", "Platform Admin", UserRole::Admin);

    [sarah, mike, admin]
        .into_iter()
        .map(|t| (t.id.clone(), t))
        .collect()
}
