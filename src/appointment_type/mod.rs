mod requests;
mod responses;

use crate::{
    catalog::{AppointmentTypeCatalog, AppointmentTypePatch, CreateAppointmentType},
    protocol::SimpleResponse,
    utils::{description_change, parse_fee_opt, parse_tenant_id, run_blocking},
};
use actix_web::{post, web, HttpResponse, Responder};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(view)
        .service(view_by_code)
        .service(modify)
        .service(deactivate)
        .service(search);
}

crate::post_funcs! {
    (create, "/create", CreateRequest, CreateResponse),
    (view, "/view", ViewRequest, ViewResponse),
    (view_by_code, "/view_by_code", ViewByCodeRequest, ViewResponse),
    (modify, "/modify", ModifyRequest, SimpleResponse),
    (deactivate, "/deactivate", DeactivateRequest, SimpleResponse),
    (search, "/search", SearchRequest, SearchResponse),
}

async fn create_impl(
    catalog: web::Data<AppointmentTypeCatalog>,
    info: web::Json<CreateRequest>,
) -> anyhow::Result<CreateResponse> {
    let info = info.into_inner();

    let input = CreateAppointmentType {
        tenant_id: parse_tenant_id(&info.tenant_id)?,
        name: info.name,
        code: info.code,
        description: info.description,
        duration_default: info.duration_default,
        base_consultation_fee: parse_fee_opt(info.base_consultation_fee)?,
        is_active: info.is_active,
        color: info.color,
    };
    let data = run_blocking(move || catalog.create(input)).await?;

    Ok(CreateResponse {
        success: true,
        err: "".to_string(),
        id: data.id,
    })
}

async fn view_impl(
    catalog: web::Data<AppointmentTypeCatalog>,
    info: web::Json<ViewRequest>,
) -> anyhow::Result<ViewResponse> {
    let id = info.id;
    let data = run_blocking(move || catalog.get(id)).await?;

    Ok(ViewResponse {
        success: true,
        err: "".to_string(),
        appointment_type: Some(data.into()),
    })
}

async fn view_by_code_impl(
    catalog: web::Data<AppointmentTypeCatalog>,
    info: web::Json<ViewByCodeRequest>,
) -> anyhow::Result<ViewResponse> {
    let info = info.into_inner();
    let tenant_id = parse_tenant_id(&info.tenant_id)?;
    let code = info.code;
    let data = run_blocking(move || catalog.get_by_code(tenant_id, &code)).await?;

    Ok(ViewResponse {
        success: true,
        err: "".to_string(),
        appointment_type: Some(data.into()),
    })
}

async fn modify_impl(
    catalog: web::Data<AppointmentTypeCatalog>,
    info: web::Json<ModifyRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    let id = info.id;
    let patch = AppointmentTypePatch {
        name: info.name,
        code: info.code,
        description: description_change(info.description),
        duration_default: info.duration_default,
        base_consultation_fee: parse_fee_opt(info.base_consultation_fee)?,
        is_active: info.is_active,
        color: info.color,
    };
    run_blocking(move || catalog.update(id, patch)).await?;

    Ok(SimpleResponse::ok())
}

async fn deactivate_impl(
    catalog: web::Data<AppointmentTypeCatalog>,
    info: web::Json<DeactivateRequest>,
) -> anyhow::Result<SimpleResponse> {
    let id = info.id;
    run_blocking(move || catalog.deactivate(id)).await?;

    Ok(SimpleResponse::ok())
}

async fn search_impl(
    catalog: web::Data<AppointmentTypeCatalog>,
    info: web::Json<SearchRequest>,
) -> anyhow::Result<SearchResponse> {
    let info = info.into_inner();
    let tenant_id = parse_tenant_id(&info.tenant_id)?;
    let active_only = info.active_only;
    let rows = run_blocking(move || catalog.list(tenant_id, active_only)).await?;

    Ok(SearchResponse {
        success: true,
        err: "".to_string(),
        appointment_types: rows.into_iter().map(Into::into).collect(),
    })
}
