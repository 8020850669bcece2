//! Anexos `RPM` (Rencana Penugasan Mahasiswa): una hoja por tarea o kuis
//! en orden semanal, más una hoja agregada por cada evaluación (UTS, UAS).

use serde::Serialize;
use crate::algorithm::PlanDataset;
use crate::error::Result;
use crate::layout::cursor::RowCursor;
use crate::layout::writer::{CellStyle, SheetWriter};
use crate::layout::{document_code, format_weight, write_header, write_team_block, ReportContext};
use crate::models::{AssessmentKind, SessionKind};

const LAST_COL: u16 = 9;

/// Contenido variable de una hoja RPM
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentSheet {
    pub sheet_name: String,
    /// Título de la tarea (criterio numerado o la etiqueta de la evaluación)
    pub title: String,
    pub subobjective: String,
    pub indicator: String,
    pub week: u32,
    pub weight: f64,
}

/// Acumulador de filas de una evaluación: pesos sumados, primera semana y
/// primer indicador.
struct EvaluationAccumulator {
    kind: SessionKind,
    week: Option<u32>,
    indicator: Option<String>,
    weight: f64,
}

impl EvaluationAccumulator {
    fn new(kind: SessionKind) -> Self {
        EvaluationAccumulator { kind, week: None, indicator: None, weight: 0.0 }
    }

    fn add(&mut self, week: u32, indicator: &str, weight: f64) {
        self.weight += weight;
        self.week.get_or_insert(week);
        self.indicator.get_or_insert_with(|| indicator.to_string());
    }

    fn into_sheet(self, index: usize) -> Option<AssignmentSheet> {
        let label = self.kind.label()?;
        let week = self.week?;
        Some(AssignmentSheet {
            sheet_name: format!("RPM{} ({})", index, label),
            title: label.to_string(),
            subobjective: label.to_string(),
            indicator: self.indicator.unwrap_or_default(),
            week,
            weight: self.weight,
        })
    }
}

/// Lista ordenada de hojas RPM. Tugas y Kuis llevan contadores separados;
/// el índice `RPM{n}` es global.
pub fn plan_assignment_sheets(dataset: &PlanDataset) -> Vec<AssignmentSheet> {
    let mut sheets = Vec::new();
    let (mut tasks, mut quizzes) = (0usize, 0usize);
    let mut midterm = EvaluationAccumulator::new(SessionKind::MidtermEval);
    let mut final_eval = EvaluationAccumulator::new(SessionKind::FinalEval);

    for resolved in &dataset.sessions {
        let s = &resolved.session;
        let label = match s.kind {
            SessionKind::MidtermEval => {
                midterm.add(s.week_number, &resolved.indicator_numbered, s.weight_percent);
                continue;
            }
            SessionKind::FinalEval => {
                final_eval.add(s.week_number, &resolved.indicator_numbered, s.weight_percent);
                continue;
            }
            SessionKind::Regular => match s.assessment {
                AssessmentKind::Task => {
                    tasks += 1;
                    format!("Tugas {}", tasks)
                }
                AssessmentKind::Quiz => {
                    quizzes += 1;
                    format!("Kuis {}", quizzes)
                }
                AssessmentKind::Other => continue,
            },
        };
        sheets.push(AssignmentSheet {
            sheet_name: format!("RPM{} ({})", sheets.len() + 1, label),
            title: resolved.criteria_numbered.clone(),
            subobjective: resolved.subobjective_description.clone(),
            indicator: resolved.indicator_numbered.clone(),
            week: s.week_number,
            weight: s.weight_percent,
        });
    }

    for acc in [midterm, final_eval] {
        if let Some(sheet) = acc.into_sheet(sheets.len() + 1) {
            sheets.push(sheet);
        }
    }
    sheets
}

/// Plantilla fija de la hoja RPM; las referencias ocupan las filas finales.
pub fn write_rpm<W: SheetWriter>(
    sheet: &mut W,
    dataset: &PlanDataset,
    ctx: &ReportContext,
    plan: &AssignmentSheet,
) -> Result<()> {
    let course = &dataset.course;
    let title = CellStyle::TitleLeft;
    let text = CellStyle::TextLeft;

    sheet.set_column_width(0, 0, 5.0)?;
    sheet.set_column_width(1, LAST_COL, 18.0)?;
    write_header(
        sheet,
        ctx,
        "RENCANA PENUGASAN MAHASISWA",
        CellStyle::HeaderBig,
        7,
        &document_code(ctx, "RPM", dataset),
    )?;

    sheet.merge(5, 1, 5, 2, "MATA KULIAH (MK)", title)?;
    sheet.merge(5, 3, 5, LAST_COL, &course.name, text)?;
    sheet.merge(6, 1, 6, 2, "KODE", title)?;
    sheet.merge(6, 3, 6, 4, &course.code, text)?;
    sheet.write_text(6, 5, "SKS", title)?;
    sheet.write_text(6, 6, &course.credits.to_string(), text)?;
    sheet.write_text(6, 7, "SEMESTER", title)?;
    sheet.merge(6, 8, 6, LAST_COL, &course.semester, text)?;
    write_team_block(sheet, 7, LAST_COL, &dataset.teaching_team)?;

    let week = format!("Minggu ke-{}", plan.week);
    let mut cursor = RowCursor::new(11);

    let form = cursor.take(2);
    sheet.merge(form.first, 1, form.first, 5, "BENTUK TUGAS", title)?;
    sheet.merge(form.first, 6, form.first, LAST_COL, "WAKTU PENGERJAAN TUGAS", title)?;
    sheet.merge(form.row(1), 1, form.row(1), 5, "Penugasan Individu", text)?;
    sheet.merge(form.row(1), 6, form.row(1), LAST_COL, &week, text)?;

    let blocks: [(&str, &str); 4] = [
        ("JUDUL TUGAS", plan.title.as_str()),
        ("SUB CAPAIAN PEMBELAJARAN MATA KULIAH", plan.subobjective.as_str()),
        ("DESKRIPSI TUGAS", plan.indicator.as_str()),
        ("METODE PENGERJAAN TUGAS", "Mahasiswa menjawab soal yang diberikan pada saat perkuliahan"),
    ];
    for (label, value) in blocks {
        let span = cursor.take(2);
        sheet.merge(span.first, 1, span.first, LAST_COL, label, title)?;
        sheet.merge(span.row(1), 1, span.row(1), LAST_COL, value, text)?;
    }

    let output = cursor.take(3);
    sheet.merge(output.first, 1, output.first, LAST_COL, "BENTUK DAN FORMAT LUARAN", title)?;
    sheet.write_text(output.row(1), 1, "a. Obyek Garapan", CellStyle::TitleCenter)?;
    sheet.merge(output.row(1), 2, output.row(1), LAST_COL, "Daftar soal", text)?;
    sheet.write_text(output.row(2), 1, "b. Bentuk Luaran", CellStyle::TitleCenter)?;
    sheet.merge(output.row(2), 2, output.row(2), LAST_COL, "Penjelasan dan analisis", text)?;

    let grading = cursor.take(5);
    let grading_rows = [
        "INDIKATOR, KRITERIA, dan BOBOT PENILAIAN".to_string(),
        format!("Indikator: {}", plan.indicator),
        String::new(),
        format!("Bobot Penilaian : {} % dari total 100% penilaian mata kuliah", format_weight(plan.weight)),
        "Kriteria Penilaian: Terlampir".to_string(),
    ];
    for (i, value) in grading_rows.iter().enumerate() {
        let style = if i == 0 { title } else { text };
        sheet.merge(grading.row(i), 1, grading.row(i), LAST_COL, value, style)?;
    }

    for (label, value) in [("JADWAL PELAKSANAAN", week.as_str()), ("LAIN-LAIN", "-")] {
        let span = cursor.take(2);
        sheet.merge(span.first, 1, span.first, LAST_COL, label, title)?;
        sheet.merge(span.row(1), 1, span.row(1), LAST_COL, value, text)?;
    }

    let refs = cursor.take(1 + dataset.main_references.len() + dataset.supporting_references.len());
    sheet.merge(refs.first, 1, refs.first, LAST_COL, "REFERENSI", title)?;
    for (i, r) in dataset
        .main_references
        .iter()
        .chain(dataset.supporting_references.iter())
        .enumerate()
    {
        let row = refs.row(1 + i);
        sheet.merge(row, 1, row, LAST_COL, r, text)?;
    }
    Ok(())
}
