use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use crate::algorithm::RUBRIC_CATALOG;
use crate::config::AppConfig;
use crate::excel::{SHEET_COURSES, SHEET_MAPPING};
use crate::report::XLSX_MIME;
use super::error_json;

/// GET /download-template
/// Plantilla vacía del workbook por asignatura
pub async fn download_template_handler(config: web::Data<AppConfig>) -> impl Responder {
    let path = &config.template_file;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "template.xlsx".to_string());

    match tokio::fs::read(path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(XLSX_MIME)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename)],
            })
            .body(bytes),
        Err(_) => error_json(
            StatusCode::NOT_FOUND,
            format!("File template '{}' tidak ditemukan", path.display()),
        ),
    }
}

/// GET /help
pub async fn help_handler(config: web::Data<AppConfig>) -> impl Responder {
    let rubrics: Vec<serde_json::Value> = RUBRIC_CATALOG
        .iter()
        .map(|r| json!({"tag": r.tag, "kind": r.kind, "title": r.title}))
        .collect();

    let help = json!({
        "description": "Generador de RPS (Rencana Pembelajaran Semester), RPM y rúbricas a partir del workbook curricular y del workbook subido por asignatura.",
        "routes": {
            "GET /courses": "lista de asignaturas del currículo",
            "POST /upload": "multipart: nama_matkul, tahun, rps_file (.xlsx)",
            "POST /download-rps": "form: nama_matkul, tahun (por defecto el año actual) -> RPS_RPM_RUB_{nama_matkul}_{tahun}.xlsx",
            "POST /preview": "JSON {nama_matkul, tahun} -> dataset resuelto y advertencias",
            "GET /download-template": "plantilla vacía del workbook por asignatura",
        },
        "preview_example": {"nama_matkul": "Algoritma dan Pemrograman", "tahun": "2025"},
        "curriculum_file": config.curriculum_file.to_string_lossy(),
        "curriculum_sheets": [SHEET_COURSES, SHEET_MAPPING],
        "upload_naming": "data_{nama_matkul}_{tahun}.xlsx; la hoja se llama como la primera palabra de la asignatura",
        "rubrics": rubrics,
    });

    HttpResponse::Ok().json(help)
}
