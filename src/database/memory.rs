use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use super::store::AppointmentTypeStore;
use crate::{
    error::CatalogError,
    models::appointment_types::{AppointmentType, NewAppointmentType, UpdateAppointmentType},
};

#[derive(Default)]
struct Table {
    last_id: u64,
    rows: BTreeMap<u64, AppointmentType>,
}

impl Table {
    fn code_taken(&self, tenant_id: &str, code: &str, except: Option<u64>) -> bool {
        self.rows
            .values()
            .any(|row| row.tenant_id == tenant_id && row.code == code && Some(row.id) != except)
    }
}

/// In-process table. The mutex plays the role of the unique key; codes
/// compare byte for byte, like the `utf8mb4_bin` columns.
#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // a panicking writer never leaves a row half-applied
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AppointmentTypeStore for MemoryStore {
    fn insert(&self, data: NewAppointmentType) -> Result<AppointmentType, CatalogError> {
        let mut table = self.lock();
        if table.code_taken(&data.tenant_id, &data.code, None) {
            return Err(CatalogError::duplicate_code(&data.tenant_id, &data.code));
        }

        table.last_id += 1;
        let row = data.into_row(table.last_id);
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    fn find(&self, id: u64) -> Result<Option<AppointmentType>, CatalogError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    fn find_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> Result<Option<AppointmentType>, CatalogError> {
        Ok(self
            .lock()
            .rows
            .values()
            .find(|row| row.tenant_id == tenant_id && row.code == code)
            .cloned())
    }

    fn update(
        &self,
        id: u64,
        changes: &UpdateAppointmentType,
    ) -> Result<AppointmentType, CatalogError> {
        let mut table = self.lock();
        let tenant_id = match table.rows.get(&id) {
            Some(row) => row.tenant_id.clone(),
            None => return Err(CatalogError::NotFound(id)),
        };
        if let Some(code) = &changes.code {
            if table.code_taken(&tenant_id, code, Some(id)) {
                return Err(CatalogError::duplicate_code(&tenant_id, code));
            }
        }

        let row = table.rows.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    fn list(
        &self,
        tenant_id: &str,
        active_only: bool,
    ) -> Result<Vec<AppointmentType>, CatalogError> {
        let mut rows = self
            .lock()
            .rows
            .values()
            .filter(|row| row.tenant_id == tenant_id)
            .filter(|row| !active_only || row.is_active)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}
