use serde::{Deserialize, Serialize};

use super::Client;
use crate::services::bookings::BookingBook;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Artist,
    Individual,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    pub crm_enabled: bool,
    pub booking_enabled: bool,
    pub bot_enabled: bool,
    pub meetings_enabled: bool,
    pub tasks_enabled: bool,
    pub files_enabled: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            crm_enabled: true,
            booking_enabled: true,
            bot_enabled: true,
            meetings_enabled: true,
            tasks_enabled: true,
            files_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Crm,
    Booking,
    Bot,
    Meetings,
    Tasks,
    Files,
}

impl FeatureFlags {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Crm => self.crm_enabled,
            Feature::Booking => self.booking_enabled,
            Feature::Bot => self.bot_enabled,
            Feature::Meetings => self.meetings_enabled,
            Feature::Tasks => self.tasks_enabled,
            Feature::Files => self.files_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: Option<String>,
}

impl Service {
    pub fn note_line(&self) -> String {
        format!("Service: {} ({})", self.name, self.price)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationConfig {
    pub whatsapp: bool,
    pub email: bool,
    pub sms: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            whatsapp: true,
            email: true,
            sms: false,
        }
    }
}

/// Partial update of a tenant's module switches; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FeaturePatch {
    pub crm_enabled: Option<bool>,
    pub booking_enabled: Option<bool>,
    pub bot_enabled: Option<bool>,
    pub meetings_enabled: Option<bool>,
    pub tasks_enabled: Option<bool>,
    pub files_enabled: Option<bool>,
}

impl FeatureFlags {
    pub fn apply(&mut self, patch: FeaturePatch) {
        let fields = [
            (&mut self.crm_enabled, patch.crm_enabled),
            (&mut self.booking_enabled, patch.booking_enabled),
            (&mut self.bot_enabled, patch.bot_enabled),
            (&mut self.meetings_enabled, patch.meetings_enabled),
            (&mut self.tasks_enabled, patch.tasks_enabled),
            (&mut self.files_enabled, patch.files_enabled),
        ];
        for (flag, value) in fields {
            if let Some(value) = value {
                *flag = value;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NotificationPatch {
    pub whatsapp: Option<bool>,
    pub email: Option<bool>,
    pub sms: Option<bool>,
}

impl NotificationConfig {
    pub fn apply(&mut self, patch: NotificationPatch) {
        if let Some(whatsapp) = patch.whatsapp {
            self.whatsapp = whatsapp;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(sms) = patch.sms {
            self.sms = sms;
        }
    }
}

fn default_slot_interval() -> u32 {
    60
}

/// One tenant's logically isolated data: profile, CRM clients and bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub business_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default = "default_slot_interval")]
    pub time_slot_interval: u32,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub bookings: BookingBook,
}

impl Tenant {
    pub fn new(id: &str, name: &str, role: UserRole) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            business_name: String::new(),
            role,
            features: FeatureFlags::default(),
            notifications: NotificationConfig::default(),
            time_slot_interval: default_slot_interval(),
            services: vec![],
            clients: vec![],
            bookings: BookingBook::default(),
        }
    }
}
