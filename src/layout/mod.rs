//! Maquetación del reporte: hoja `RPS`, anexos `RPM` y rúbricas `RUB`.
//! Las secciones piden filas a un `RowCursor` y escriben a través de
//! `SheetWriter`; nada aquí modifica el dataset.

pub mod cursor;
pub mod writer;
pub mod memory;
pub mod rps;
pub mod rpm;
pub mod rubric;

use std::path::Path;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::algorithm::PlanDataset;
use crate::config::InstitutionInfo;
use crate::error::Result;

pub use cursor::{RowCursor, RowSpan};
pub use memory::{CellValue, MemoryDocument, MemorySheet, MergedRange};
pub use rpm::{plan_assignment_sheets, AssignmentSheet};
pub use writer::{CellStyle, DocumentWriter, SheetWriter, XlsxDocument};

/// Datos externos al dataset que aparecen en las hojas
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub institution: &'a InstitutionInfo,
    /// Fecha de aprobación que se imprime en el RPS
    pub issued_on: NaiveDate,
    pub logo: Option<&'a Path>,
}

/// Sección de una hoja y las filas que ocupa
#[derive(Debug, Clone, Serialize)]
pub struct SectionSpan {
    pub sheet: String,
    pub section: &'static str,
    pub span: RowSpan,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary {
    pub sheet_names: Vec<String>,
    pub sections: Vec<SectionSpan>,
}

impl ReportSummary {
    pub fn section(&self, sheet: &str, section: &str) -> Option<RowSpan> {
        self.sections
            .iter()
            .find(|s| s.sheet == sheet && s.section == section)
            .map(|s| s.span)
    }
}

/// Escribe todas las hojas del reporte en `doc`, en orden: RPS, RPM, RUB.
pub fn generate_report<D: DocumentWriter>(doc: &mut D, dataset: &PlanDataset, ctx: &ReportContext) -> Result<ReportSummary> {
    let mut summary = ReportSummary::default();

    {
        let mut sheet = doc.add_sheet(rps::SHEET_NAME)?;
        let sections = rps::write_rps(&mut sheet, dataset, ctx)?;
        summary.sheet_names.push(rps::SHEET_NAME.to_string());
        summary.sections.extend(sections.into_iter().map(|(section, span)| SectionSpan {
            sheet: rps::SHEET_NAME.to_string(),
            section,
            span,
        }));
    }

    for plan in plan_assignment_sheets(dataset) {
        let mut sheet = doc.add_sheet(&plan.sheet_name)?;
        rpm::write_rpm(&mut sheet, dataset, ctx, &plan)?;
        summary.sheet_names.push(plan.sheet_name);
    }

    for binding in &dataset.rubrics {
        let name = rubric::sheet_name(binding.tag);
        let mut sheet = doc.add_sheet(&name)?;
        rubric::write_rubric(&mut sheet, dataset, ctx, binding)?;
        summary.sheet_names.push(name);
    }

    debug!(sheets = summary.sheet_names.len(), "reporte maquetado");
    Ok(summary)
}

/// Genera el `.xlsx` completo en memoria
pub fn render_xlsx(dataset: &PlanDataset, ctx: &ReportContext) -> Result<(Vec<u8>, ReportSummary)> {
    let mut doc = XlsxDocument::new();
    let summary = generate_report(&mut doc, dataset, ctx)?;
    Ok((doc.into_bytes()?, summary))
}

// ---- piezas compartidas entre plantillas ----

/// Cabecera de 4 filas (1..=4): logo en B, institución y título en
/// `C..=title_end`, código de documento en las dos columnas siguientes.
pub(crate) fn write_header<W: SheetWriter>(
    sheet: &mut W,
    ctx: &ReportContext,
    title: &str,
    title_style: CellStyle,
    title_end: u16,
    doc_code: &str,
) -> Result<()> {
    sheet.set_row_height(1, 22.0)?;
    sheet.set_row_height(2, 22.0)?;
    sheet.set_row_height(3, 22.0)?;
    sheet.set_row_height(4, 26.0)?;

    sheet.merge(1, 1, 4, 1, "", CellStyle::HeaderMedium)?;
    if let Some(logo) = ctx.logo {
        sheet.insert_logo(1, 1, logo)?;
    }

    let inst = ctx.institution;
    sheet.merge(1, 2, 1, title_end, &inst.university, CellStyle::HeaderMedium)?;
    sheet.merge(2, 2, 2, title_end, &inst.faculty, CellStyle::HeaderMedium)?;
    sheet.merge(3, 2, 3, title_end, &inst.program, CellStyle::HeaderMedium)?;
    sheet.merge(4, 2, 4, title_end, title, title_style)?;

    sheet.merge(1, title_end + 1, 2, title_end + 2, "Kode Dokumen", CellStyle::HeaderSmall)?;
    sheet.merge(3, title_end + 1, 4, title_end + 2, doc_code, CellStyle::HeaderSmall)?;
    Ok(())
}

/// `{prefijo}-{tipo}-{código}-{año}`
pub(crate) fn document_code(ctx: &ReportContext, kind: &str, dataset: &PlanDataset) -> String {
    format!("{}-{}-{}-{}", ctx.institution.doc_prefix, kind, dataset.course.code, dataset.year)
}

/// Bloque "DOSEN PENGAMPU" de 4 filas a partir de `first_row`. Con 5 o más
/// docentes sólo se muestra el primero.
pub(crate) fn write_team_block<W: SheetWriter>(
    sheet: &mut W,
    first_row: u32,
    last_col: u16,
    team: &[String],
) -> Result<()> {
    sheet.merge(first_row, 1, first_row + 3, 2, "DOSEN PENGAMPU", CellStyle::TitleLeft)?;
    for i in 0..4usize {
        let name = if team.len() < 5 {
            team.get(i).map(String::as_str).unwrap_or("")
        } else if i == 0 {
            team[0].as_str()
        } else {
            ""
        };
        sheet.merge(first_row + i as u32, 3, first_row + i as u32, last_col, name, CellStyle::TextLeft)?;
    }
    Ok(())
}

/// Peso en porcentaje para texto: sin decimales cuando es entero
pub(crate) fn format_weight(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
