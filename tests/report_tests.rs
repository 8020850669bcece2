mod common;

use std::io::Cursor;
use std::path::Path;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use common::{course_rows, curriculum_course_rows, curriculum_mapping_rows, write_workbook, COURSE, YEAR};
use rpsgen::excel::{SHEET_COURSES, SHEET_MAPPING};
use rpsgen::report::report_filename;
use rpsgen::{generate_course_report, load_plan, AppConfig, ErrorKind};

fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        curriculum_file: dir.join("kurikulum.xlsx"),
        upload_dir: dir.join("uploads"),
        template_file: dir.join("template.xlsx"),
        logo_file: None,
        ..AppConfig::default()
    }
}

/// Escribe el currículo y, si se pide, el workbook de la asignatura
fn prepare(dir: &Path, course_sheet: Option<&str>) -> AppConfig {
    let config = config_in(dir);
    write_workbook(
        &config.curriculum_file,
        &[(SHEET_COURSES, curriculum_course_rows()), (SHEET_MAPPING, curriculum_mapping_rows())],
    );
    if let Some(sheet) = course_sheet {
        std::fs::create_dir_all(&config.upload_dir).expect("crear directorio de uploads");
        write_workbook(&config.course_workbook_path(COURSE, YEAR), &[(sheet, course_rows())]);
    }
    config
}

fn issued_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 17).expect("fecha válida")
}

#[test]
fn test_generate_report_from_workbooks() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let config = prepare(dir.path(), Some(COURSE));

    let report = generate_course_report(&config, COURSE, YEAR, issued_on()).expect("Debe generar el reporte");
    assert_eq!(report.filename, "RPS_RPM_RUB_Algoritma_2025.xlsx");
    assert!(report.warnings.iter().any(|w| w.contains("S3")));

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(report.bytes)).expect("Debe abrir el xlsx generado");
    let names = workbook.sheet_names();
    assert_eq!(names.len(), 13);
    assert_eq!(names.first().map(String::as_str), Some("RPS"));
    assert!(names.iter().any(|n| n == "RPM9 (Evaluasi UTS)"));
    assert_eq!(names.last().map(String::as_str), Some("RUB H1"));
    assert_eq!(names, report.summary.sheet_names);

    let rps = workbook.worksheet_range("RPS").expect("Debe leer la hoja RPS");
    assert_eq!(rps.get_value((1, 2)), Some(&Data::String("UNIVERSITAS WARMADEWA".to_string())));
    assert_eq!(rps.get_value((6, 1)), Some(&Data::String(COURSE.to_string())));
    assert_eq!(rps.get_value((6, 3)), Some(&Data::String("1101".to_string())));
    // Tgl. PENETAPAN es una fecha de Excel, no texto
    match rps.get_value((6, 10)) {
        Some(Data::DateTime(date)) => assert_eq!(date.as_f64(), 45886.0),
        other => panic!("se esperaba una fecha: {other:?}"),
    }

    let weekly = report.summary.section("RPS", "weekly").expect("sección semanal");
    let uts_row = weekly.row(7);
    assert_eq!(rps.get_value((uts_row, 3)), Some(&Data::String("Evaluasi UTS".to_string())));
    assert_eq!(rps.get_value((uts_row, 11)), Some(&Data::Float(20.0)));
}

#[test]
fn test_load_plan_reads_numbers_from_cells() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let config = prepare(dir.path(), Some(COURSE));

    let dataset = load_plan(&config, COURSE, YEAR).expect("Debe cargar el dataset");
    assert_eq!(dataset.course.code, "1101");
    assert_eq!(dataset.course.credits, 3);
    assert_eq!(dataset.sessions.len(), 14);
    assert_eq!(dataset.sessions[7].session.week_number, 8);
    assert_eq!(dataset.objectives.iter().map(|o| o.weight).sum::<i64>(), 100);
}

#[test]
fn test_missing_course_workbook_is_not_found() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let config = prepare(dir.path(), None);

    let err = generate_course_report(&config, COURSE, YEAR, issued_on()).expect_err("Sin workbook subido");
    assert_eq!(err.kind(), ErrorKind::InputNotFound);
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("data_Algoritma_2025.xlsx"));
}

#[test]
fn test_wrong_sheet_name_is_bad_request() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let config = prepare(dir.path(), Some("Lain"));

    let err = load_plan(&config, COURSE, YEAR).expect_err("Hoja con otro nombre");
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("'Algoritma'"));
}

#[test]
fn test_unknown_course_is_not_found() {
    let dir = tempfile::tempdir().expect("Debe crear directorio temporal");
    let config = prepare(dir.path(), Some(COURSE));

    let err = load_plan(&config, "Algoritme", YEAR).expect_err("Asignatura inexistente");
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("maksud Anda 'Algoritma'"));
}

#[test]
fn test_course_workbook_path_and_filename() {
    let config = config_in(Path::new("/tmp/rps"));
    assert_eq!(
        config.course_workbook_path("Basis Data", "2024"),
        Path::new("/tmp/rps/uploads/data_Basis Data_2024.xlsx")
    );
    assert_eq!(report_filename("Basis Data", "2024"), "RPS_RPM_RUB_Basis Data_2024.xlsx");
    assert!(config.existing_logo().is_none());
}
