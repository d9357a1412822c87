pub mod booking;
pub mod client;
pub mod tenant;

pub use booking::{Booking, BookingPatch, BookingStatus, NewBooking};
pub use client::{Client, ClientDirectory, ClientSource, ClientStatus};
pub use tenant::{
    Feature, FeatureFlags, FeaturePatch, NotificationConfig, NotificationPatch, Service, Tenant,
    UserRole,
};
