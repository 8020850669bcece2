use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use tracing::info;
use crate::config::AppConfig;
use crate::report::{generate_course_report, XLSX_MIME};
use super::{current_year, error_json, is_safe_component, non_empty};

#[derive(Debug, serde::Deserialize)]
pub struct DownloadForm {
    pub nama_matkul: Option<String>,
    pub tahun: Option<String>,
}

/// POST /download-rps (form: `nama_matkul`, `tahun`)
/// Devuelve el workbook RPS + RPM + RUB como adjunto.
pub async fn download_rps_handler(config: web::Data<AppConfig>, form: web::Form<DownloadForm>) -> impl Responder {
    let form = form.into_inner();
    let course = match non_empty(form.nama_matkul.as_deref()) {
        Some(c) if is_safe_component(&c) => c,
        Some(_) => return error_json(StatusCode::BAD_REQUEST, "Nama mata kuliah tidak valid"),
        None => return error_json(StatusCode::BAD_REQUEST, "Nama mata kuliah wajib diisi"),
    };
    let year = non_empty(form.tahun.as_deref()).unwrap_or_else(current_year);
    if !is_safe_component(&year) {
        return error_json(StatusCode::BAD_REQUEST, "Tahun tidak valid");
    }
    info!(course = %course, year = %year, "generando RPS");

    let config = config.into_inner();
    let issued_on = chrono::Local::now().date_naive();
    match super::run_blocking(move || generate_course_report(&config, &course, &year, issued_on)).await {
        Ok(report) => HttpResponse::Ok()
            .content_type(XLSX_MIME)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(report.filename)],
            })
            .body(report.bytes),
        Err(resp) => resp,
    }
}
