use serde::Serialize;

use crate::models::appointment_types::AppointmentType;

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

/// Wire form of an appointment type row.
#[derive(Debug, Default, Serialize)]
pub struct AppointmentTypeItem {
    pub id: u64,
    pub tenant_id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub duration_default: u32,
    pub base_consultation_fee: String,
    pub is_active: bool,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
    pub display: String,
}

impl From<AppointmentType> for AppointmentTypeItem {
    fn from(data: AppointmentType) -> Self {
        Self {
            display: data.to_string(),
            created_at: crate::utils::format_time_str(&data.created_at),
            updated_at: crate::utils::format_time_str(&data.updated_at),
            base_consultation_fee: data.base_consultation_fee.to_string(),
            id: data.id,
            tenant_id: data.tenant_id,
            name: data.name,
            code: data.code,
            description: data.description,
            duration_default: data.duration_default,
            is_active: data.is_active,
            color: data.color,
        }
    }
}
