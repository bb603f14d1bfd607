use bigdecimal::BigDecimal;
use uuid::Uuid;

/// Fields for a new appointment type. `None` takes the column default.
#[derive(Debug, Clone)]
pub struct CreateAppointmentType {
    pub tenant_id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub duration_default: Option<u32>,
    pub base_consultation_fee: Option<BigDecimal>,
    pub is_active: Option<bool>,
    pub color: Option<String>,
}

impl CreateAppointmentType {
    pub fn new<N: Into<String>, C: Into<String>>(tenant_id: Uuid, name: N, code: C) -> Self {
        Self {
            tenant_id,
            name: name.into(),
            code: code.into(),
            description: None,
            duration_default: None,
            base_consultation_fee: None,
            is_active: None,
            color: None,
        }
    }
}

/// Changes to an existing appointment type; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct AppointmentTypePatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<Option<String>>,
    pub duration_default: Option<u32>,
    pub base_consultation_fee: Option<BigDecimal>,
    pub is_active: Option<bool>,
    pub color: Option<String>,
}
