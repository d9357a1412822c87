use std::collections::BTreeMap;

use anyhow::Context;
use rusqlite::{params, Connection};

use crate::models::Tenant;

pub type Tenants = BTreeMap<String, Tenant>;

/// Opaque key-value blob storage; the whole state is written on every save.
pub trait SnapshotStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, data: &str) -> anyhow::Result<()>;
}

impl SnapshotStore for Connection {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let result = self.query_row(
            "SELECT data FROM snapshots WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(data) => Ok(Some(data)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, data: &str) -> anyhow::Result<()> {
        self.execute(
            "INSERT INTO snapshots (key, data) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
               data = excluded.data,
               updated_at = datetime('now')",
            params![key, data],
        )?;
        Ok(())
    }
}

pub fn load_tenants(store: &dyn SnapshotStore, key: &str) -> anyhow::Result<Option<Tenants>> {
    let Some(data) = store.load(key)? else {
        return Ok(None);
    };
    let tenants = serde_json::from_str(&data)
        .with_context(|| format!("snapshot {key:?} is not valid tenant data"))?;
    Ok(Some(tenants))
}

pub fn save_tenants(store: &dyn SnapshotStore, key: &str, tenants: &Tenants) -> anyhow::Result<()> {
    let data = serde_json::to_string(tenants)?;
    store.save(key, &data)?;
    tracing::debug!(key, bytes = data.len(), "snapshot saved");
    Ok(())
}
