use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use crate::config::AppConfig;
use crate::excel::read_course_list;

/// GET /courses
/// Lista de asignaturas del workbook curricular
pub async fn courses_handler(config: web::Data<AppConfig>) -> impl Responder {
    let path = config.curriculum_file.clone();
    match super::run_blocking(move || read_course_list(&path)).await {
        Ok(courses) => HttpResponse::Ok().json(json!({"count": courses.len(), "courses": courses})),
        Err(resp) => resp,
    }
}
