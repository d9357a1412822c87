use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub source: ClientSource,
    pub venue: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientStatus {
    #[default]
    Lead,
    Booked,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ClientSource {
    Bot,
    #[default]
    Manual,
}

/// Lookup side of the CRM, used to denormalize client names onto bookings.
pub trait ClientDirectory {
    fn find(&self, id: &str) -> Option<&Client>;
}

impl ClientDirectory for Vec<Client> {
    fn find(&self, id: &str) -> Option<&Client> {
        self.iter().find(|c| c.id == id)
    }
}
