#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    catalog: web::Data<AppointmentTypeCatalog>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](catalog, info).await {
                        Ok(response) => response,
                        Err(err) => <$response>::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use std::str::FromStr;

use actix_web::{error::BlockingError, web};
use anyhow::Context;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::CatalogError;

/// Runs a catalog call on the blocking pool, keeping its error message intact.
pub async fn run_blocking<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.map_err(|err| match err {
        BlockingError::Error(err) => anyhow::Error::new(err),
        BlockingError::Canceled => anyhow::anyhow!("Blocking task was canceled"),
    })
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn parse_tenant_id<S: AsRef<str>>(s: S) -> anyhow::Result<Uuid> {
    Uuid::parse_str(s.as_ref().trim()).context("Malformed tenant_id")
}

pub fn parse_fee_opt<S: AsRef<str>>(s: Option<S>) -> anyhow::Result<Option<BigDecimal>> {
    s.map(|s| BigDecimal::from_str(s.as_ref().trim()).context("Malformed base_consultation_fee"))
        .transpose()
}

/// An empty string clears the description.
pub fn description_change(s: Option<String>) -> Option<Option<String>> {
    s.map(|s| if s.trim().is_empty() { None } else { Some(s) })
}
