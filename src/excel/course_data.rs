//! Lectura del workbook subido por asignatura y año (entrada B).
//!
//! Una sola hoja, nombrada con la primera palabra de la asignatura, con datos
//! desde la fila 2:
//! - A:E  pustaka utama, pustaka pendukung, team teaching, NIK, matkul syarat
//! - G:M  semana, SubCPMK, indicador, criterio, materia, peso, referencia
//! - O,P,Q,Y  CPL, CPMK, SubCPMK y peso total (tabla de pesos)
//! - AA:AE  clase, nº alumnos, día, sala, año académico

use std::path::Path;
use tracing::{debug, info};
use crate::error::{GenerationError, Result};
use crate::excel::io::{col, parse_number, read_sheets, SheetGrid};
use crate::excel::COURSE_DATA_FIRST_ROW;
use crate::models::{
    AssessmentKind, ClassSchedule, CourseWorkbook, SessionKind, WeeklySession, WeightMapping,
};

/// Nombre de la hoja esperada: primera palabra del nombre de la asignatura
pub fn course_sheet_name(course: &str) -> String {
    course.split_whitespace().next().unwrap_or(course).to_string()
}

fn push_non_empty(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        list.push(value.to_string());
    }
}

/// Construye la sesión semanal de la fila `r` si la columna de semana tiene
/// valor. Semana y peso son obligatorios y numéricos.
fn parse_session(grid: &SheetGrid, r: usize) -> Result<Option<WeeklySession>> {
    let week_raw = grid.cell(r, col("G"));
    if week_raw.is_empty() {
        return Ok(None);
    }
    let sheet = grid.name.as_str();
    let week = parse_number(week_raw)
        .filter(|w| *w >= 0.0)
        .ok_or_else(|| GenerationError::invalid(sheet, r + 1, "G", format!("minggu ke-'{}' bukan angka", week_raw)))?;

    let weight_raw = grid.cell(r, col("L"));
    let weight = parse_number(weight_raw)
        .ok_or_else(|| GenerationError::invalid(sheet, r + 1, "L", format!("bobot '{}' bukan angka", weight_raw)))?;

    let indicator = grid.cell(r, col("I"));
    let criteria = grid.cell(r, col("J"));
    let material = grid.cell(r, col("K"));

    Ok(Some(WeeklySession {
        week_number: week.trunc() as u32,
        subobjective_code: grid.cell(r, col("H")).to_string(),
        indicator_text: indicator.to_string(),
        criteria_text: criteria.to_string(),
        material_text: material.to_string(),
        weight_percent: weight,
        reference_text: grid.cell(r, col("M")).to_string(),
        kind: SessionKind::classify(criteria),
        assessment: AssessmentKind::classify(criteria),
        final_project: material.contains(WeeklySession::FINAL_PROJECT_MARKER),
    }))
}

/// Fila de la tabla de pesos: se identifica por el SubCPMK (columna Q)
fn parse_weight_mapping(grid: &SheetGrid, r: usize) -> Result<Option<WeightMapping>> {
    let sub = grid.cell(r, col("Q"));
    if sub.is_empty() {
        return Ok(None);
    }
    let total_raw = grid.cell(r, col("Y"));
    let weight = parse_number(total_raw)
        .ok_or_else(|| GenerationError::invalid(&grid.name, r + 1, "Y", format!("total bobot '{}' bukan angka", total_raw)))?;

    Ok(Some(WeightMapping {
        subobjective_code: sub.to_string(),
        objective_code: grid.cell(r, col("P")).to_string(),
        outcome_code: grid.cell(r, col("O")).to_string(),
        weight,
    }))
}

fn parse_class(grid: &SheetGrid, r: usize) -> Option<ClassSchedule> {
    let name = grid.cell(r, col("AA"));
    if name.is_empty() {
        return None;
    }
    Some(ClassSchedule {
        class_name: name.to_string(),
        student_count: parse_number(grid.cell(r, col("AB"))).map(|v| v.trunc() as u32),
        day: grid.cell(r, col("AC")).to_string(),
        room: grid.cell(r, col("AD")).to_string(),
        academic_year: grid.cell(r, col("AE")).to_string(),
    })
}

/// Extrae todas las tablas de la hoja. Las listas omiten celdas vacías; las
/// tablas con varias columnas se leen como registros por fila.
pub fn parse_course_workbook(grid: &SheetGrid) -> Result<CourseWorkbook> {
    let mut data = CourseWorkbook::default();

    for r in (COURSE_DATA_FIRST_ROW - 1)..grid.height() {
        push_non_empty(&mut data.main_references, grid.cell(r, col("A")));
        push_non_empty(&mut data.supporting_references, grid.cell(r, col("B")));
        push_non_empty(&mut data.teaching_team, grid.cell(r, col("C")));
        push_non_empty(&mut data.staff_ids, grid.cell(r, col("D")));
        push_non_empty(&mut data.prerequisites, grid.cell(r, col("E")));

        if let Some(session) = parse_session(grid, r)? {
            data.sessions.push(session);
        }
        if let Some(mapping) = parse_weight_mapping(grid, r)? {
            data.weight_mappings.push(mapping);
        }
        if let Some(class) = parse_class(grid, r) {
            data.classes.push(class);
        }
    }

    debug!(
        sheet = %grid.name,
        sessions = data.sessions.len(),
        mappings = data.weight_mappings.len(),
        "workbook de asignatura extraído"
    );
    Ok(data)
}

/// Lee `data_{course}_{year}.xlsx` y extrae su contenido
pub fn read_course_workbook<P: AsRef<Path>>(path: P, course: &str) -> Result<CourseWorkbook> {
    let sheet = course_sheet_name(course);
    let grids = read_sheets(path.as_ref(), &[sheet.as_str()])?;
    let grid = grids
        .first()
        .ok_or_else(|| GenerationError::SheetNotFound { path: path.as_ref().to_path_buf(), sheet: sheet.clone() })?;
    let data = parse_course_workbook(grid)?;
    info!(file = %path.as_ref().display(), sessions = data.sessions.len(), "workbook de asignatura cargado");
    Ok(data)
}
