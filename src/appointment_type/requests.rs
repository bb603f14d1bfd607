use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateRequest {
    pub tenant_id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub duration_default: Option<u32>,
    pub base_consultation_fee: Option<String>,
    pub is_active: Option<bool>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct ViewRequest {
    pub id: u64,
}

#[derive(Deserialize)]
pub struct ViewByCodeRequest {
    pub tenant_id: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct ModifyRequest {
    pub id: u64,
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub duration_default: Option<u32>,
    pub base_consultation_fee: Option<String>,
    pub is_active: Option<bool>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct DeactivateRequest {
    pub id: u64,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub tenant_id: String,
    #[serde(default)]
    pub active_only: bool,
}
