use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use crate::config::AppConfig;
use super::{current_year, error_json, is_safe_component, non_empty};

/// POST /upload (multipart: `nama_matkul`, `tahun`, `rps_file`)
/// Guarda el workbook como `data_{nama_matkul}_{tahun}.xlsx` en el
/// directorio de uploads.
pub async fn upload_handler(config: web::Data<AppConfig>, mut payload: Multipart) -> impl Responder {
    let mut course: Option<String> = None;
    let mut year: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => {
                warn!("multipart field error: {}", e);
                return error_json(StatusCode::BAD_REQUEST, format!("multipart tidak valid: {}", e));
            }
        };

        let name = field.content_disposition().get_name().unwrap_or("").to_string();
        let filename = field.content_disposition().get_filename().map(|s| s.to_string());

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => bytes.extend_from_slice(&data),
                Err(e) => {
                    warn!("upload stream error: {}", e);
                    return error_json(StatusCode::BAD_REQUEST, format!("upload terputus: {}", e));
                }
            }
        }

        match name.as_str() {
            "nama_matkul" => course = non_empty(Some(&String::from_utf8_lossy(&bytes))),
            "tahun" => year = non_empty(Some(&String::from_utf8_lossy(&bytes))),
            "rps_file" => {
                if let Some(fname) = filename.filter(|f| !f.trim().is_empty()) {
                    file = Some((fname, bytes));
                }
            }
            _ => {}
        }
    }

    let course = match course {
        Some(c) if is_safe_component(&c) => c,
        Some(_) => return error_json(StatusCode::BAD_REQUEST, "Nama mata kuliah tidak valid"),
        None => return error_json(StatusCode::BAD_REQUEST, "Nama mata kuliah wajib diisi"),
    };
    let year = year.unwrap_or_else(current_year);
    if !is_safe_component(&year) {
        return error_json(StatusCode::BAD_REQUEST, "Tahun tidak valid");
    }
    let (original_name, bytes) = match file {
        Some(f) => f,
        None => return error_json(StatusCode::BAD_REQUEST, "File RPS wajib diupload"),
    };
    if !original_name.to_lowercase().ends_with(".xlsx") {
        return error_json(StatusCode::BAD_REQUEST, "File harus berformat .xlsx");
    }

    if let Err(e) = tokio::fs::create_dir_all(&config.upload_dir).await {
        return error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("failed to create upload dir: {}", e));
    }
    let target = config.course_workbook_path(&course, &year);
    let write_result = async {
        let mut f = tokio::fs::File::create(&target).await?;
        f.write_all(&bytes).await?;
        f.flush().await
    }
    .await;
    if let Err(e) = write_result {
        return error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("failed to write upload: {}", e));
    }

    let saved = target.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    info!(course = %course, year = %year, file = %saved, bytes = bytes.len(), "workbook subido");
    HttpResponse::Ok().json(json!({"status": "ok", "course": course, "year": year, "saved": saved}))
}
