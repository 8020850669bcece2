//! Lectura del workbook de referencia curricular (entrada A): lista de
//! asignaturas y tabla de mapeo asignatura -> CPMK -> SubCPMK -> CPL.

use std::path::Path;
use tracing::{debug, warn};
use crate::error::{GenerationError, Result};
use crate::excel::io::{col, normalize_name, parse_number, read_sheets, SheetGrid};
use crate::excel::{
    MAPPING_END_ROW, MAPPING_START_ROW, SHEET_COURSES, SHEET_MAPPING, COURSE_END_ROW, COURSE_START_ROW,
};
use crate::models::{CourseInfo, CourseObjective, CourseOutcome, CurriculumOutcomes, SubObjective};

/// Filas 1-based de Excel -> índices 0-based
fn excel_rows(start: usize, end: usize) -> std::ops::RangeInclusive<usize> {
    (start - 1)..=(end - 1)
}

/// Nombres de asignaturas (columna D) en orden de la hoja
pub fn parse_course_list(grid: &SheetGrid) -> Vec<String> {
    let d = col("D");
    excel_rows(COURSE_START_ROW, COURSE_END_ROW)
        .map(|r| grid.cell(r, d))
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}

/// Busca la asignatura por nombre (sin distinguir mayúsculas) y valida los
/// campos que el documento necesita: código y SKS numéricos.
pub fn parse_course_info(grid: &SheetGrid, course: &str) -> Result<CourseInfo> {
    let wanted = normalize_name(course);
    let row = excel_rows(COURSE_START_ROW, COURSE_END_ROW)
        .find(|&r| {
            let name = grid.cell(r, col("D"));
            !name.is_empty() && normalize_name(name) == wanted
        });

    let Some(r) = row else {
        let suggestion = closest_course(&parse_course_list(grid), course);
        return Err(GenerationError::CourseNotFound { course: course.to_string(), suggestion });
    };

    let sheet = grid.name.as_str();
    let code = parse_number(grid.cell(r, col("C")))
        .ok_or_else(|| GenerationError::invalid(sheet, r + 1, "C", "kode mata kuliah harus berupa angka"))?;
    let credits = parse_number(grid.cell(r, col("E")))
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| GenerationError::invalid(sheet, r + 1, "E", "bobot SKS harus berupa angka"))?;

    Ok(CourseInfo {
        name: grid.cell(r, col("D")).to_string(),
        code: format!("{}", code.trunc() as i64),
        semester: grid.cell(r, col("N")).to_string(),
        cluster: grid.cell(r, col("O")).to_string(),
        credits: credits.trunc() as u32,
    })
}

/// Nombre más parecido según Jaro-Winkler, para sugerirlo en el error
pub fn closest_course(courses: &[String], course: &str) -> Option<String> {
    let wanted = normalize_name(course);
    courses
        .iter()
        .map(|c| (strsim::jaro_winkler(&normalize_name(c), &wanted), c))
        .filter(|(score, _)| *score >= 0.8)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, c)| c.clone())
}

/// Agrega (código, descripción) si el código no se ha visto. Las celdas
/// combinadas dejan vacías las filas siguientes, que simplemente se saltan.
fn push_unique<T>(items: &mut Vec<T>, code: &str, make: impl FnOnce() -> T, code_of: impl Fn(&T) -> &str) {
    if code.is_empty() || items.iter().any(|it| code_of(it) == code) {
        return;
    }
    items.push(make());
}

/// CPL, CPMK y SubCPMK de la asignatura desde la hoja de mapeo
pub fn parse_outcomes(grid: &SheetGrid, course: &str) -> CurriculumOutcomes {
    let wanted = normalize_name(course);
    let mut out = CurriculumOutcomes::default();

    for r in excel_rows(MAPPING_START_ROW, MAPPING_END_ROW) {
        let mk = grid.cell(r, col("B"));
        if mk.is_empty() || normalize_name(mk) != wanted {
            continue;
        }

        let (cpl, cpl_desc) = (grid.cell(r, col("H")), grid.cell(r, col("I")));
        push_unique(&mut out.outcomes, cpl, || CourseOutcome {
            code: cpl.to_string(),
            description: cpl_desc.to_string(),
        }, |o| &o.code);

        let (cpmk, cpmk_desc) = (grid.cell(r, col("C")), grid.cell(r, col("D")));
        push_unique(&mut out.objectives, cpmk, || CourseObjective {
            code: cpmk.to_string(),
            description: cpmk_desc.to_string(),
            weight: 0,
        }, |o| &o.code);

        let (sub, sub_desc) = (grid.cell(r, col("E")), grid.cell(r, col("F")));
        push_unique(&mut out.subobjectives, sub, || SubObjective {
            code: sub.to_string(),
            description: sub_desc.to_string(),
        }, |s| &s.code);
    }

    debug!(
        course,
        cpl = out.outcomes.len(),
        cpmk = out.objectives.len(),
        subcpmk = out.subobjectives.len(),
        "mapeo curricular leído"
    );
    if out.subobjectives.is_empty() {
        warn!(course, "la asignatura no tiene SubCPMK en la hoja de mapeo");
    }
    out
}

/// Lista de asignaturas del workbook curricular
pub fn read_course_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let sheets = read_sheets(path, &[SHEET_COURSES])?;
    Ok(sheets.first().map(parse_course_list).unwrap_or_default())
}

/// Identidad + resultados de aprendizaje de una asignatura, abriendo el
/// workbook una sola vez.
pub fn read_curriculum<P: AsRef<Path>>(path: P, course: &str) -> Result<(CourseInfo, CurriculumOutcomes)> {
    let sheets = read_sheets(path, &[SHEET_COURSES, SHEET_MAPPING])?;
    let (courses, mapping) = match sheets.as_slice() {
        [courses, mapping] => (courses, mapping),
        _ => return Err(GenerationError::Layout("hojas del currículo incompletas".to_string())),
    };
    let info = parse_course_info(courses, course)?;
    let outcomes = parse_outcomes(mapping, course);
    Ok((info, outcomes))
}
