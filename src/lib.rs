// Biblioteca raíz del crate `rpsgen`.
// Reexporta los módulos principales; `report` orquesta el flujo completo
// (lectura -> dataset -> xlsx) y `server` lo expone por HTTP.
pub mod config;
pub mod error;
pub mod models;
pub mod excel;
pub mod algorithm;
pub mod layout;
pub mod report;
pub mod server;
mod server_handlers;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use config::AppConfig;
pub use error::{ErrorKind, GenerationError, Result};
pub use report::{generate_course_report, load_plan, GeneratedReport};
