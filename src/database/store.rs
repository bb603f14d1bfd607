use crate::{
    error::CatalogError,
    models::appointment_types::{AppointmentType, NewAppointmentType, UpdateAppointmentType},
};

/// Persistence for `appointment_types` rows.
///
/// `insert` and `update` must reject a second row with the same
/// `(tenant_id, code)` atomically, so concurrent writers see exactly one
/// success.
pub trait AppointmentTypeStore: Send + Sync {
    fn insert(&self, data: NewAppointmentType) -> Result<AppointmentType, CatalogError>;

    fn find(&self, id: u64) -> Result<Option<AppointmentType>, CatalogError>;

    fn find_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> Result<Option<AppointmentType>, CatalogError>;

    /// Fails with `NotFound` for an unknown id.
    fn update(
        &self,
        id: u64,
        changes: &UpdateAppointmentType,
    ) -> Result<AppointmentType, CatalogError>;

    /// Ordered by name, then id.
    fn list(&self, tenant_id: &str, active_only: bool)
        -> Result<Vec<AppointmentType>, CatalogError>;
}
