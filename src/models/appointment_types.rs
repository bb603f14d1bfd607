use std::fmt;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;

use crate::{error::CatalogError, schema::appointment_types};

pub const NAME_MAX_CHARS: usize = 100;
pub const CODE_MAX_CHARS: usize = 50;
pub const DEFAULT_DURATION_MINUTES: u32 = 15;
pub const FEE_SCALE: i64 = 2;
/// `DECIMAL(10, 2)` leaves eight integer digits.
const FEE_LIMIT: i64 = 100_000_000;
/// Rescaling allocates a power of ten this large, so bound it first.
const FEE_MAX_EXPONENT: i64 = 18;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct AppointmentType {
    pub id: u64,
    pub tenant_id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub duration_default: u32,
    pub base_consultation_fee: BigDecimal,
    pub is_active: bool,
    pub color: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "appointment_types"]
pub struct NewAppointmentType {
    pub tenant_id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub duration_default: u32,
    pub base_consultation_fee: BigDecimal,
    pub is_active: bool,
    pub color: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewAppointmentType {
    pub fn into_row(self, id: u64) -> AppointmentType {
        AppointmentType {
            id,
            tenant_id: self.tenant_id,
            name: self.name,
            code: self.code,
            description: self.description,
            duration_default: self.duration_default,
            base_consultation_fee: self.base_consultation_fee,
            is_active: self.is_active,
            color: self.color,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// `None` leaves a column untouched. `description: Some(None)` sets it to NULL.
#[derive(Debug, Clone, AsChangeset, Default)]
#[table_name = "appointment_types"]
pub struct UpdateAppointmentType {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<Option<String>>,
    pub duration_default: Option<u32>,
    pub base_consultation_fee: Option<BigDecimal>,
    pub is_active: Option<bool>,
    pub color: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl UpdateAppointmentType {
    pub fn apply_to(&self, row: &mut AppointmentType) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(code) = &self.code {
            row.code = code.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
        if let Some(duration_default) = self.duration_default {
            row.duration_default = duration_default;
        }
        if let Some(fee) = &self.base_consultation_fee {
            row.base_consultation_fee = fee.clone();
        }
        if let Some(is_active) = self.is_active {
            row.is_active = is_active;
        }
        if let Some(color) = &self.color {
            row.color = color.clone();
        }
        if let Some(updated_at) = self.updated_at {
            row.updated_at = updated_at;
        }
    }
}

pub fn default_fee() -> BigDecimal {
    BigDecimal::from(0).with_scale(FEE_SCALE)
}

pub fn check_name(name: &str) -> Result<String, CatalogError> {
    check_required_text("name", name, NAME_MAX_CHARS)
}

pub fn check_code(code: &str) -> Result<String, CatalogError> {
    check_required_text("code", code, CODE_MAX_CHARS)
}

fn check_required_text(field: &str, value: &str, max_chars: usize) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::violation(format!("{} is required", field)));
    }
    if value.chars().count() > max_chars {
        return Err(CatalogError::violation(format!(
            "{} is longer than {} characters",
            field, max_chars
        )));
    }
    Ok(value.to_string())
}

/// Normalizes the fee to two fractional digits, rejecting values that would
/// lose precision or overflow the column.
pub fn check_fee(fee: &BigDecimal) -> Result<BigDecimal, CatalogError> {
    let (_, exponent) = fee.as_bigint_and_exponent();
    if exponent.abs() > FEE_MAX_EXPONENT {
        return Err(CatalogError::violation(
            "base_consultation_fee does not fit DECIMAL(10, 2)",
        ));
    }
    let scaled = fee.with_scale(FEE_SCALE);
    if &scaled != fee {
        return Err(CatalogError::violation(format!(
            "base_consultation_fee {} has more than {} fractional digits",
            fee, FEE_SCALE
        )));
    }
    if scaled.abs() >= BigDecimal::from(FEE_LIMIT) {
        return Err(CatalogError::violation(format!(
            "base_consultation_fee {} does not fit DECIMAL(10, 2)",
            fee
        )));
    }
    Ok(scaled)
}
