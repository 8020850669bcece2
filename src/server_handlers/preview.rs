use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use crate::layout::plan_assignment_sheets;
use crate::config::AppConfig;
use crate::report::load_plan;
use super::{current_year, error_json, is_safe_component, non_empty};

#[derive(Debug, serde::Deserialize)]
pub struct PreviewRequest {
    pub nama_matkul: Option<String>,
    pub tahun: Option<String>,
}

/// POST /preview (JSON `{nama_matkul, tahun}`)
/// Dataset resuelto, hojas RPM planificadas y advertencias, sin generar el `.xlsx`.
pub async fn preview_handler(config: web::Data<AppConfig>, body: web::Json<PreviewRequest>) -> impl Responder {
    let body = body.into_inner();
    let course = match non_empty(body.nama_matkul.as_deref()) {
        Some(c) if is_safe_component(&c) => c,
        Some(_) => return error_json(StatusCode::BAD_REQUEST, "Nama mata kuliah tidak valid"),
        None => return error_json(StatusCode::BAD_REQUEST, "Nama mata kuliah wajib diisi"),
    };
    let year = non_empty(body.tahun.as_deref()).unwrap_or_else(current_year);
    if !is_safe_component(&year) {
        return error_json(StatusCode::BAD_REQUEST, "Tahun tidak valid");
    }

    let config = config.into_inner();
    match super::run_blocking(move || load_plan(&config, &course, &year)).await {
        Ok(dataset) => {
            let assignments = plan_assignment_sheets(&dataset);
            HttpResponse::Ok().json(json!({
                "dataset": dataset,
                "assignment_sheets": assignments,
                "warnings": dataset.warnings,
            }))
        }
        Err(resp) => resp,
    }
}
