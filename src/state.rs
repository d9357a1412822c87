use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::snapshot::{self, Tenants};
use crate::errors::AppError;
use crate::models::Tenant;
use crate::seed;
use crate::services::messaging::MessagingProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub messaging: Arc<dyn MessagingProvider>,
    pub tenants: Mutex<Tenants>,
}

impl AppState {
    /// Restores the last snapshot, seeding demo tenants into an empty store
    /// when `SEED_DEMO` is on.
    pub fn load(
        config: AppConfig,
        conn: Connection,
        messaging: Arc<dyn MessagingProvider>,
    ) -> anyhow::Result<Self> {
        let tenants = match snapshot::load_tenants(&conn, &config.snapshot_key)? {
            Some(tenants) => {
                tracing::info!(tenants = tenants.len(), "restored snapshot");
                tenants
            }
            None if config.seed_demo => {
                let tenants = seed::demo_tenants();
                snapshot::save_tenants(&conn, &config.snapshot_key, &tenants)?;
                tracing::info!(tenants = tenants.len(), "seeded demo tenants");
                tenants
            }
            None => Tenants::new(),
        };

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            config,
            messaging,
            tenants: Mutex::new(tenants),
        })
    }

    pub fn with_tenant<T>(
        &self,
        tenant_id: &str,
        f: impl FnOnce(&Tenant) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let tenants = self.tenants.lock().unwrap();
        let tenant = tenants
            .get(tenant_id)
            .ok_or_else(|| AppError::NotFound(format!("tenant {tenant_id}")))?;
        f(tenant)
    }

    /// Runs one command against a tenant and writes the whole snapshot.
    /// If the write fails the tenant is rolled back, so callers never see a
    /// state that was not persisted.
    pub fn mutate_tenant<T>(
        &self,
        tenant_id: &str,
        f: impl FnOnce(&mut Tenant) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut tenants = self.tenants.lock().unwrap();
        let tenant = tenants
            .get_mut(tenant_id)
            .ok_or_else(|| AppError::NotFound(format!("tenant {tenant_id}")))?;

        let backup = tenant.clone();
        let value = match f(tenant) {
            Ok(value) => value,
            Err(e) => {
                *tenant = backup;
                return Err(e);
            }
        };

        let saved = {
            let db = self.db.lock().unwrap();
            snapshot::save_tenants(&*db, &self.config.snapshot_key, &tenants)
        };
        if let Err(e) = saved {
            tracing::error!(tenant = tenant_id, error = %e, "failed to persist snapshot");
            tenants.insert(tenant_id.to_string(), backup);
            return Err(AppError::Persistence(e.to_string()));
        }
        Ok(value)
    }
}
