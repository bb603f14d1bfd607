use serde::Serialize;

use crate::protocol::AppointmentTypeItem;

#[derive(Default, Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub err: String,
    pub id: u64,
}

#[derive(Default, Serialize)]
pub struct ViewResponse {
    pub success: bool,
    pub err: String,
    pub appointment_type: Option<AppointmentTypeItem>,
}

#[derive(Default, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub err: String,
    pub appointment_types: Vec<AppointmentTypeItem>,
}

crate::impl_err_response! {
    CreateResponse,
    ViewResponse,
    SearchResponse,
}
