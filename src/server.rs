use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use crate::config::AppConfig;
use crate::server_handlers::{
    courses_handler, download_rps_handler, download_template_handler, help_handler, preview_handler,
    upload_handler,
};

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    info!(bind = %bind_addr, curriculum = %config.curriculum_file.display(), "iniciando servidor");
    let data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .route("/courses", web::get().to(courses_handler))
            .route("/upload", web::post().to(upload_handler))
            .route("/download-rps", web::post().to(download_rps_handler))
            .route("/preview", web::post().to(preview_handler))
            .route("/download-template", web::get().to(download_template_handler))
            .route("/help", web::get().to(help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}
