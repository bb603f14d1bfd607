//! Create, read, update and soft-deactivate operations over appointment types.
//!
//! The catalog owns validation and timestamps. Uniqueness of
//! `(tenant_id, code)` is left to the store, which enforces it at write time.

mod inputs;

use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike, Utc};
use uuid::Uuid;

use crate::{
    database::AppointmentTypeStore,
    error::CatalogError,
    models::{
        appointment_types::{
            check_code, check_fee, check_name, default_fee, AppointmentType, NewAppointmentType,
            UpdateAppointmentType, DEFAULT_DURATION_MINUTES,
        },
        colors::HexColor,
    },
};

pub use self::inputs::{AppointmentTypePatch, CreateAppointmentType};

#[derive(Clone)]
pub struct AppointmentTypeCatalog {
    store: Arc<dyn AppointmentTypeStore>,
}

/// Current UTC time at the precision of a `DATETIME(6)` column.
fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

impl AppointmentTypeCatalog {
    pub fn new(store: Arc<dyn AppointmentTypeStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, input: CreateAppointmentType) -> Result<AppointmentType, CatalogError> {
        let name = check_name(&input.name)?;
        let code = check_code(&input.code)?;
        let color = match input.color {
            Some(color) => HexColor::parse(color)?,
            None => HexColor::default(),
        };
        let base_consultation_fee = match input.base_consultation_fee {
            Some(fee) => check_fee(&fee)?,
            None => default_fee(),
        };

        let now = now();
        let data = NewAppointmentType {
            tenant_id: input.tenant_id.to_string(),
            name,
            code,
            description: normalize_description(input.description),
            duration_default: input.duration_default.unwrap_or(DEFAULT_DURATION_MINUTES),
            base_consultation_fee,
            is_active: input.is_active.unwrap_or(true),
            color: color.into_string(),
            created_at: now,
            updated_at: now,
        };

        match self.store.insert(data) {
            Ok(row) => {
                log::info!(
                    "created appointment type {} '{}' for tenant {}",
                    row.id,
                    row,
                    row.tenant_id
                );
                Ok(row)
            }
            Err(err) => {
                if err.is_constraint_violation() {
                    log::warn!("rejected appointment type for tenant {}: {}", input.tenant_id, err);
                }
                Err(err)
            }
        }
    }

    pub fn get(&self, id: u64) -> Result<AppointmentType, CatalogError> {
        self.store.find(id)?.ok_or(CatalogError::NotFound(id))
    }

    pub fn get_by_code(&self, tenant_id: Uuid, code: &str) -> Result<AppointmentType, CatalogError> {
        let tenant_id = tenant_id.to_string();
        let code = code.trim();
        self.store
            .find_by_code(&tenant_id, code)?
            .ok_or_else(|| CatalogError::CodeNotFound {
                tenant_id,
                code: code.to_string(),
            })
    }

    pub fn update(&self, id: u64, patch: AppointmentTypePatch) -> Result<AppointmentType, CatalogError> {
        let current = self.get(id)?;
        let changes = UpdateAppointmentType {
            name: patch.name.as_deref().map(check_name).transpose()?,
            code: patch.code.as_deref().map(check_code).transpose()?,
            description: patch.description.map(normalize_description),
            duration_default: patch.duration_default,
            base_consultation_fee: patch.base_consultation_fee.as_ref().map(check_fee).transpose()?,
            is_active: patch.is_active,
            color: patch
                .color
                .map(|color| HexColor::parse(color).map(HexColor::into_string))
                .transpose()?,
            // never let a clock step backwards move updated_at backwards
            updated_at: Some(now().max(current.updated_at)),
        };

        let row = self.store.update(id, &changes).map_err(|err| {
            if err.is_constraint_violation() {
                log::warn!("rejected update of appointment type {}: {}", id, err);
            }
            err
        })?;
        log::info!("updated appointment type {} '{}'", row.id, row);
        Ok(row)
    }

    /// Soft delete. Deactivating an inactive row is a no-op.
    pub fn deactivate(&self, id: u64) -> Result<AppointmentType, CatalogError> {
        let current = self.get(id)?;
        if !current.is_active {
            log::debug!("appointment type {} already inactive", id);
            return Ok(current);
        }

        let changes = UpdateAppointmentType {
            is_active: Some(false),
            updated_at: Some(now().max(current.updated_at)),
            ..Default::default()
        };
        let row = self.store.update(id, &changes)?;
        log::info!("deactivated appointment type {} '{}'", row.id, row);
        Ok(row)
    }

    pub fn list(&self, tenant_id: Uuid, active_only: bool) -> Result<Vec<AppointmentType>, CatalogError> {
        self.store.list(&tenant_id.to_string(), active_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use bigdecimal::BigDecimal;
    use std::{str::FromStr, thread};

    fn catalog() -> AppointmentTypeCatalog {
        AppointmentTypeCatalog::new(Arc::new(MemoryStore::new()))
    }

    fn consultation(tenant_id: Uuid) -> CreateAppointmentType {
        CreateAppointmentType {
            duration_default: Some(15),
            base_consultation_fee: Some(BigDecimal::from_str("0.00").unwrap()),
            ..CreateAppointmentType::new(tenant_id, "Consultation", "consultation")
        }
    }

    #[test]
    fn create_applies_defaults_and_lists() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();

        let created = catalog.create(consultation(t1)).unwrap();
        assert!(created.is_active);
        assert_eq!(created.color, "#3b82f6");
        assert_eq!(created.duration_default, 15);
        assert_eq!(created.base_consultation_fee.to_string(), "0.00");
        assert_eq!(created.tenant_id, t1.to_string());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.to_string(), "Consultation (consultation)");

        let listed = catalog.list(t1, false).unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn create_takes_optional_fields() {
        let catalog = catalog();
        let created = catalog
            .create(CreateAppointmentType {
                description: Some("Visit after treatment".to_string()),
                duration_default: Some(30),
                base_consultation_fee: Some(BigDecimal::from_str("45.5").unwrap()),
                is_active: Some(false),
                color: Some("#10B981".to_string()),
                ..CreateAppointmentType::new(Uuid::new_v4(), " Follow-up ", "follow_up")
            })
            .unwrap();
        assert_eq!(created.name, "Follow-up");
        assert_eq!(created.description.as_deref(), Some("Visit after treatment"));
        assert_eq!(created.duration_default, 30);
        assert_eq!(created.base_consultation_fee.to_string(), "45.50");
        assert!(!created.is_active);
        assert_eq!(created.color, "#10B981");
    }

    #[test]
    fn duplicate_code_in_tenant_is_rejected() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();
        catalog.create(consultation(t1)).unwrap();

        let err = catalog
            .create(CreateAppointmentType::new(t1, "Consultation 2", "consultation"))
            .unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(catalog.list(t1, false).unwrap().len(), 1);

        // other tenants keep their own codes
        assert!(catalog.create(consultation(Uuid::new_v4())).is_ok());
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();

        let blank_name = CreateAppointmentType::new(t1, "  ", "consultation");
        assert!(catalog.create(blank_name).unwrap_err().is_constraint_violation());

        let blank_code = CreateAppointmentType::new(t1, "Consultation", "");
        assert!(catalog.create(blank_code).unwrap_err().is_constraint_violation());

        for color in &["blue", "#12345g"] {
            let bad_color = CreateAppointmentType {
                color: Some(color.to_string()),
                ..CreateAppointmentType::new(t1, "Consultation", "consultation")
            };
            assert!(catalog.create(bad_color).unwrap_err().is_constraint_violation());
        }

        let bad_fee = CreateAppointmentType {
            base_consultation_fee: Some(BigDecimal::from_str("10.001").unwrap()),
            ..CreateAppointmentType::new(t1, "Consultation", "consultation")
        };
        assert!(catalog.create(bad_fee).unwrap_err().is_constraint_violation());

        assert!(catalog.list(t1, false).unwrap().is_empty());
    }

    #[test]
    fn concurrent_creates_have_one_winner() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();

        let handles = (0..8)
            .map(|_| {
                let catalog = catalog.clone();
                thread::spawn(move || catalog.create(consultation(t1)))
            })
            .collect::<Vec<_>>();
        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(CatalogError::is_constraint_violation));
    }

    #[test]
    fn update_applies_fields_and_advances_updated_at() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();
        let created = catalog.create(consultation(t1)).unwrap();

        let updated = catalog
            .update(
                created.id,
                AppointmentTypePatch {
                    name: Some("Initial consultation".to_string()),
                    duration_default: Some(20),
                    description: Some(Some("First visit".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Initial consultation");
        assert_eq!(updated.code, "consultation");
        assert_eq!(updated.duration_default, 20);
        assert_eq!(updated.description.as_deref(), Some("First visit"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let again = catalog
            .update(
                created.id,
                AppointmentTypePatch {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(again.description, None);
        assert!(again.updated_at >= updated.updated_at);
    }

    #[test]
    fn update_rejects_taken_code_and_bad_values() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();
        catalog.create(consultation(t1)).unwrap();
        let follow_up = catalog
            .create(CreateAppointmentType::new(t1, "Follow-up", "follow_up"))
            .unwrap();

        let taken = AppointmentTypePatch {
            code: Some("consultation".to_string()),
            ..Default::default()
        };
        assert!(catalog
            .update(follow_up.id, taken)
            .unwrap_err()
            .is_constraint_violation());

        let bad_color = AppointmentTypePatch {
            color: Some("red".to_string()),
            ..Default::default()
        };
        assert!(catalog
            .update(follow_up.id, bad_color)
            .unwrap_err()
            .is_constraint_violation());

        assert_eq!(catalog.get(follow_up.id).unwrap(), follow_up);
    }

    #[test]
    fn missing_rows_are_not_found() {
        let catalog = catalog();
        assert!(matches!(
            catalog.update(7, AppointmentTypePatch::default()),
            Err(CatalogError::NotFound(7))
        ));
        assert!(matches!(catalog.deactivate(7), Err(CatalogError::NotFound(7))));
        assert!(catalog.get(7).unwrap_err().is_not_found());
        assert!(catalog
            .get_by_code(Uuid::new_v4(), "consultation")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn deactivate_is_idempotent() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();
        let created = catalog.create(consultation(t1)).unwrap();

        let first = catalog.deactivate(created.id).unwrap();
        assert!(!first.is_active);
        let second = catalog.deactivate(created.id).unwrap();
        assert!(!second.is_active);
        assert_eq!(first, second);

        // soft delete keeps the row
        assert_eq!(catalog.get(created.id).unwrap().code, "consultation");
        assert_eq!(catalog.list(t1, false).unwrap().len(), 1);
        assert!(catalog.list(t1, true).unwrap().is_empty());
    }

    #[test]
    fn list_is_scoped_by_tenant() {
        let catalog = catalog();
        let (t1, t2) = (Uuid::new_v4(), Uuid::new_v4());
        catalog.create(consultation(t1)).unwrap();
        catalog
            .create(CreateAppointmentType::new(t2, "Vaccination", "vaccination"))
            .unwrap();

        let t1_rows = catalog.list(t1, false).unwrap();
        assert_eq!(t1_rows.len(), 1);
        assert_eq!(t1_rows[0].code, "consultation");

        let by_code = catalog.get_by_code(t2, "vaccination").unwrap();
        assert_eq!(by_code.name, "Vaccination");
        assert!(catalog.get_by_code(t1, "vaccination").is_err());
    }

    #[test]
    fn unknown_id_wins_over_bad_patch() {
        let catalog = catalog();
        let patch = AppointmentTypePatch {
            color: Some("red".to_string()),
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            catalog.update(99, patch),
            Err(CatalogError::NotFound(99))
        ));
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let store = Arc::new(MemoryStore::new());
        let catalog = AppointmentTypeCatalog::new(store.clone());
        let created_at = now();
        let ahead = created_at + chrono::Duration::days(365);
        let row = store
            .insert(NewAppointmentType {
                tenant_id: Uuid::new_v4().to_string(),
                name: "Consultation".to_string(),
                code: "consultation".to_string(),
                description: None,
                duration_default: DEFAULT_DURATION_MINUTES,
                base_consultation_fee: default_fee(),
                is_active: true,
                color: HexColor::default().into_string(),
                created_at,
                updated_at: ahead,
            })
            .unwrap();

        let updated = catalog
            .update(
                row.id,
                AppointmentTypePatch {
                    duration_default: Some(20),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.duration_default, 20);
        assert_eq!(updated.updated_at, ahead);

        let deactivated = catalog.deactivate(row.id).unwrap();
        assert!(!deactivated.is_active);
        assert_eq!(deactivated.updated_at, ahead);
        assert_eq!(deactivated.created_at, created_at);
    }

    #[test]
    fn codes_compare_exactly() {
        let catalog = catalog();
        let t1 = Uuid::new_v4();
        catalog
            .create(CreateAppointmentType::new(t1, "Consultation", "Consultation"))
            .unwrap();
        let lower = catalog.create(consultation(t1)).unwrap();
        assert_eq!(lower.code, "consultation");

        assert_eq!(catalog.list(t1, false).unwrap().len(), 2);
        assert_eq!(catalog.get_by_code(t1, "consultation").unwrap().id, lower.id);
        assert!(catalog.get_by_code(t1, "CONSULTATION").unwrap_err().is_not_found());
    }
}
