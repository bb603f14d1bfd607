use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("appointment type {0} not found")]
    NotFound(u64),
    #[error("appointment type with code '{code}' not found for tenant {tenant_id}")]
    CodeNotFound { tenant_id: String, code: String },
    #[error("database connection: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("database error: {0}")]
    Database(DieselError),
}

impl CatalogError {
    pub fn violation<S: ToString>(msg: S) -> Self {
        CatalogError::ConstraintViolation(msg.to_string())
    }

    pub fn duplicate_code(tenant_id: &str, code: &str) -> Self {
        CatalogError::ConstraintViolation(format!(
            "code '{}' already exists for tenant {}",
            code, tenant_id
        ))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, CatalogError::ConstraintViolation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::CodeNotFound { .. }
        )
    }
}

// A unique key hit at write time is the same failure as the pre-insert check.
impl From<DieselError> for CatalogError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                CatalogError::ConstraintViolation(info.message().to_string())
            }
            err => CatalogError::Database(err),
        }
    }
}
