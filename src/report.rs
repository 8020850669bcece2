//! Pipeline completo de una petición: currículo + workbook de la asignatura
//! -> dataset resuelto -> `.xlsx`. Todo se lee de nuevo en cada llamada.

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::algorithm::{build_plan, PlanDataset};
use crate::config::AppConfig;
use crate::error::Result;
use crate::excel::{read_course_workbook, read_curriculum};
use crate::layout::{render_xlsx, ReportContext, ReportSummary};

/// Tipo MIME de la descarga
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug)]
pub struct GeneratedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub summary: ReportSummary,
    pub warnings: Vec<String>,
}

/// Nombre del adjunto: `RPS_RPM_RUB_{curso}_{año}.xlsx`
pub fn report_filename(course: &str, year: &str) -> String {
    format!("RPS_RPM_RUB_{}_{}.xlsx", course, year)
}

/// Carga y resuelve el dataset de una asignatura y año. Los errores se
/// devuelven sin registrar; el handler los registra al responder.
#[instrument(skip(config))]
pub fn load_plan(config: &AppConfig, course: &str, year: &str) -> Result<PlanDataset> {
    let (info, curriculum) = read_curriculum(&config.curriculum_file, course)?;
    let path = config.course_workbook_path(course, year);
    let data = read_course_workbook(&path, course)?;
    build_plan(info, year, curriculum, data)
}

/// Genera el reporte completo (RPS + RPM + RUB) como bytes `.xlsx`
#[instrument(skip(config))]
pub fn generate_course_report(
    config: &AppConfig,
    course: &str,
    year: &str,
    issued_on: NaiveDate,
) -> Result<GeneratedReport> {
    let dataset = load_plan(config, course, year)?;
    let logo = config.existing_logo();
    let ctx = ReportContext {
        institution: &config.institution,
        issued_on,
        logo: logo.as_deref(),
    };

    let (bytes, summary) = render_xlsx(&dataset, &ctx)?;

    info!(course, year, sheets = summary.sheet_names.len(), bytes = bytes.len(), "reporte generado");
    Ok(GeneratedReport {
        filename: report_filename(course, year),
        bytes,
        summary,
        warnings: dataset.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Cuenta eventos de nivel WARN o más grave
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() <= Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_failed_load_leaves_logging_to_caller() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
        let config = AppConfig {
            curriculum_file: "no-existe/kurikulum.xlsx".into(),
            upload_dir: "no-existe/uploads".into(),
            ..AppConfig::default()
        };

        let result = tracing::subscriber::with_default(subscriber, || {
            generate_course_report(&config, "Algoritma", "2025", chrono::NaiveDate::MIN)
        });
        assert!(result.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
