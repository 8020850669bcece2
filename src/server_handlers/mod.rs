pub mod courses;
pub mod upload;
pub mod generate;
pub mod preview;
pub mod docs;

pub use courses::*;
pub use upload::*;
pub use generate::*;
pub use preview::*;
pub use docs::*;

use std::sync::{Arc, OnceLock};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::Datelike;
use serde_json::json;
use tokio::sync::Semaphore;
use tracing::{error, warn};
use crate::error::GenerationError;

/// Respuesta de error uniforme: `{error_code, error_message}`
pub(crate) fn error_json(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error_code": status.as_u16(),
        "error_message": message.into(),
    }))
}

pub(crate) fn error_response(err: &GenerationError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(kind = ?err.kind(), "{}", err);
    } else {
        warn!(kind = ?err.kind(), "{}", err);
    }
    error_json(status, err.to_string())
}

/// Valor de formulario recortado; `None` si viene vacío
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Año por defecto cuando el formulario no lo trae
pub(crate) fn current_year() -> String {
    chrono::Local::now().year().to_string()
}

/// Nombres que terminan formando parte de una ruta en disco
pub(crate) fn is_safe_component(value: &str) -> bool {
    !value.contains("..") && !value.contains('/') && !value.contains('\\')
}

/// Ejecuta trabajo bloqueante (lectura de workbooks, generación) fuera del
/// runtime async, limitado a un trabajo por CPU.
pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    let sem = GLOBAL_SEM
        .get_or_init(|| Arc::new(Semaphore::new(std::cmp::max(1, num_cpus::get()))))
        .clone();

    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => return Err(error_json(StatusCode::INTERNAL_SERVER_ERROR, "failed to acquire semaphore")),
    };

    let handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        job()
    });

    match handle.await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(error_response(&e)),
        Err(e) => Err(error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("task join error: {}", e))),
    }
}
