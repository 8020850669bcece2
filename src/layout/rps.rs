//! Hoja principal `RPS` (Rencana Pembelajaran Semester).
//!
//! Columnas usadas: B (etiquetas) hasta L. Las filas 1..=10 son fijas
//! (cabecera, identidad del curso, autorización); desde la fila 11 cada
//! sección pide su altura al cursor.

use crate::algorithm::dataset::SubObjectiveAssessment;
use crate::algorithm::resolve::weight_as_int;
use crate::algorithm::PlanDataset;
use crate::error::Result;
use crate::layout::cursor::{RowCursor, RowSpan};
use crate::layout::writer::{CellStyle, SheetWriter};
use crate::layout::{document_code, write_header, ReportContext};

pub const SHEET_NAME: &str = "RPS";

const COL_B: u16 = 1;
const COL_C: u16 = 2;
const COL_D: u16 = 3;
const COL_L: u16 = 11;
/// Primera columna de la matriz CPL (D)
const FIRST_CPL_COL: u16 = COL_D;
const BODY_START_ROW: u32 = 11;

const GRADE_RANGES: &str = "Nilai akhir diatas dikonversikan kedalam huruf mutu menggunakan kriteria penilaian sebagai berikut:\n\
RENTANGAN NILAI :\n\
85.00 - 100.00 : A (UNGGUL - LULUS)\n\
75.00 - 84.99   : AB (BAIK SEKALI - LULUS)\n\
70.00 - 74.99   : B (BAIK - LULUS)\n\
60.00 - 69.99   : BC (CUKUP BAIK - TIDAK LULUS)\n\
55.00 - 59.99   : C (CUKUP - TIDAK LULUS)\n\
50.00 - 54.99   : CD (KURANG - TIDAK LULUS)\n\
44.00 - 49.99   : D (KURANG SEKALI - TIDAK LULUS)\n\
0.00 - 43.99     : E (GAGAL - TIDAK LULUS)";

/// Escribe la hoja completa y devuelve las secciones con sus filas
pub fn write_rps<W: SheetWriter>(
    sheet: &mut W,
    dataset: &PlanDataset,
    ctx: &ReportContext,
) -> Result<Vec<(&'static str, RowSpan)>> {
    let mut sections: Vec<(&'static str, RowSpan)> = Vec::new();

    sheet.set_column_width(0, 0, 5.0)?;
    sheet.set_column_width(COL_B, COL_B, 18.0)?;
    sheet.set_column_width(COL_C, COL_C, 36.0)?;
    sheet.set_column_width(COL_D, COL_L, 18.0)?;

    write_header(
        sheet,
        ctx,
        "RENCANA PEMBELAJARAN SEMESTER",
        CellStyle::HeaderBig,
        9,
        &document_code(ctx, "RPS", dataset),
    )?;
    write_identity(sheet, dataset, ctx)?;

    let mut cursor = RowCursor::new(BODY_START_ROW);
    let outcomes_first = cursor.position();

    // CPL
    let cpl = cursor.take(1 + dataset.outcomes.len());
    sheet.merge(cpl.first, COL_C, cpl.first, COL_L, "CPL-PRODI yang dibebankan pada MK", CellStyle::TitleLeft)?;
    for (i, o) in dataset.outcomes.iter().enumerate() {
        let row = cpl.row(i + 1);
        sheet.write_text(row, COL_C, &o.code, CellStyle::TextLeft)?;
        sheet.merge(row, COL_D, row, COL_L, &o.description, CellStyle::TextLeft)?;
    }
    sections.push(("cpl", cpl));

    // CPMK con peso agregado
    let cpmk = cursor.take(1 + dataset.objectives.len());
    sheet.merge(cpmk.first, COL_C, cpmk.first, COL_L - 1, "Capaian Pembelajaran Mata Kuliah (CPMK)", CellStyle::TitleLeft)?;
    sheet.write_text(cpmk.first, COL_L, "Bobot (%)", CellStyle::TitleLeft)?;
    for (i, o) in dataset.objectives.iter().enumerate() {
        let row = cpmk.row(i + 1);
        sheet.write_text(row, COL_C, &o.code, CellStyle::TextLeft)?;
        sheet.merge(row, COL_D, row, COL_L - 1, &o.description, CellStyle::TextLeft)?;
        sheet.write_number(row, COL_L, o.weight as f64, CellStyle::TextLeft)?;
    }
    sections.push(("cpmk", cpmk));

    // SubCPMK
    let subs = cursor.take(1 + dataset.subobjectives.len());
    sheet.merge(subs.first, COL_C, subs.first, COL_L, "Kemampuan akhir tiap tahapan belajar (Sub-CPMK)", CellStyle::TitleLeft)?;
    for (i, s) in dataset.subobjectives.iter().enumerate() {
        let row = subs.row(i + 1);
        sheet.write_text(row, COL_C, &s.code, CellStyle::TextLeft)?;
        sheet.merge(row, COL_D, row, COL_L, &s.description, CellStyle::TextLeft)?;
    }
    sections.push(("subcpmk", subs));

    let correlation = write_correlation(sheet, &mut cursor, dataset)?;
    sections.push(("correlation", correlation));

    sheet.merge(outcomes_first, COL_B, correlation.last(), COL_B, "Capaian Pembelajaran", CellStyle::TitleCenter)?;

    // Descripción
    let desc = cursor.take_one();
    sheet.set_row_height(desc, 110.0)?;
    sheet.write_text(desc, COL_B, "Deskripsi Singkat MK", CellStyle::TitleCenter)?;
    sheet.merge(desc, COL_C, desc, COL_L, &dataset.description, CellStyle::TextLeft)?;
    sections.push(("description", RowSpan { first: desc, len: 1 }));

    let materials = write_labeled_list(sheet, &mut cursor, "Bahan Kajian/Materi Pembelajaran", &dataset.study_materials)?;
    sections.push(("materials", materials));

    let references = write_references(sheet, &mut cursor, dataset)?;
    sections.push(("references", references));

    let team = write_labeled_list(sheet, &mut cursor, "Dosen Pengampu", &dataset.teaching_team)?;
    sections.push(("team", team));

    let prereq = write_labeled_list(sheet, &mut cursor, "Matakuliah Syarat", &dataset.prerequisites)?;
    sections.push(("prerequisites", prereq));

    let weekly_header = cursor.take(4);
    write_weekly_header(sheet, weekly_header.first)?;
    sections.push(("weekly_header", weekly_header));

    let weekly = write_weekly_body(sheet, &mut cursor, dataset)?;
    sections.push(("weekly", weekly));

    cursor.skip(1);

    let blueprint = write_blueprint(sheet, &mut cursor, dataset)?;
    sections.push(("blueprint", blueprint));

    Ok(sections)
}

/// Filas 5..=10: identidad de la asignatura y firmas
fn write_identity<W: SheetWriter>(sheet: &mut W, dataset: &PlanDataset, ctx: &ReportContext) -> Result<()> {
    let course = &dataset.course;

    sheet.merge(5, 1, 5, 2, "MATA KULIAH (MK)", CellStyle::Title)?;
    sheet.merge(5, 3, 5, 4, "KODE", CellStyle::Title)?;
    sheet.write_text(5, 5, "RUMPUN MK", CellStyle::Title)?;
    sheet.merge(5, 6, 5, 8, "BOBOT (SKS)", CellStyle::Title)?;
    sheet.write_text(5, 9, "SEMESTER", CellStyle::Title)?;
    sheet.merge(5, 10, 5, 11, "Tgl. PENETAPAN", CellStyle::Title)?;

    sheet.merge(6, 1, 8, 2, &course.name, CellStyle::Text)?;
    sheet.merge(6, 3, 8, 4, &course.code, CellStyle::Text)?;
    sheet.merge(6, 5, 8, 5, &course.cluster, CellStyle::Text)?;
    sheet.merge(6, 6, 8, 8, &course.credits.to_string(), CellStyle::Text)?;
    sheet.merge(6, 9, 8, 9, &course.semester, CellStyle::Text)?;
    sheet.merge_date(6, 10, 8, 11, ctx.issued_on, CellStyle::Date)?;

    sheet.merge(9, 1, 9, 2, "OTORISASI / PENGESAHAN", CellStyle::Title)?;
    sheet.merge(9, 3, 9, 5, "Dosen Pengembang RPS", CellStyle::Title)?;
    sheet.merge(9, 6, 9, 8, "Koordinator Mata Kuliah", CellStyle::Title)?;
    sheet.merge(9, 9, 9, 11, "Ketua Program Studi", CellStyle::Title)?;

    sheet.set_row_height(10, 110.0)?;
    let developer = dataset.teaching_team.first().map(String::as_str).unwrap_or("");
    sheet.merge(10, 1, 10, 2, "OTORISASI / PENGESAHAN", CellStyle::TextSignature)?;
    sheet.merge(10, 3, 10, 5, developer, CellStyle::TextSignature)?;
    sheet.merge(10, 6, 10, 8, &ctx.institution.coordinator, CellStyle::TextSignature)?;
    sheet.merge(10, 9, 10, 11, &ctx.institution.head_of_program, CellStyle::TextSignature)?;
    Ok(())
}

/// Matriz CPL x SubCPMK: título, cabecera de CPL, una fila por SubCPMK y
/// totales literales por columna.
fn write_correlation<W: SheetWriter>(sheet: &mut W, cursor: &mut RowCursor, dataset: &PlanDataset) -> Result<RowSpan> {
    let n = dataset.assessments.len();
    let span = cursor.take(3 + n);
    let header = span.row(1);
    let total = span.row(2 + n);

    sheet.merge(span.first, COL_C, span.first, COL_L, "Korelasi CPL terhadap Sub CPMK", CellStyle::TitleLeft)?;
    for row in header..=total {
        for col in COL_C..=COL_L {
            sheet.write_text(row, col, "", CellStyle::TextLeft)?;
        }
    }

    for (i, o) in dataset.outcomes.iter().enumerate() {
        sheet.write_text(header, FIRST_CPL_COL + i as u16, &o.code, CellStyle::TitleCenter)?;
    }
    for (i, a) in dataset.assessments.iter().enumerate() {
        let row = span.row(2 + i);
        sheet.write_text(row, COL_C, &a.subobjective_code, CellStyle::TitleCenter)?;
        if let (Some(col), Some(weight)) = (outcome_column(dataset, a), a.weight) {
            sheet.write_number(row, col, weight / 100.0, CellStyle::Percent)?;
        }
    }

    sheet.write_text(total, COL_C, "Total", CellStyle::TitleCenter)?;
    for (i, value) in dataset.outcome_totals.iter().enumerate() {
        sheet.write_number(total, FIRST_CPL_COL + i as u16, *value, CellStyle::PercentBold)?;
    }
    Ok(span)
}

/// Columna de la CPL resuelta de un SubCPMK, si está entre las de la asignatura
fn outcome_column(dataset: &PlanDataset, assessment: &SubObjectiveAssessment) -> Option<u16> {
    let code = assessment.outcome_code.as_deref()?;
    dataset
        .outcomes
        .iter()
        .position(|o| o.code == code)
        .map(|pos| FIRST_CPL_COL + pos as u16)
}

/// Etiqueta combinada en B y un elemento por fila en C..L ("-" si no hay)
fn write_labeled_list<W: SheetWriter>(
    sheet: &mut W,
    cursor: &mut RowCursor,
    label: &str,
    items: &[String],
) -> Result<RowSpan> {
    let span = cursor.take(items.len().max(1));
    sheet.merge(span.first, COL_B, span.last(), COL_B, label, CellStyle::TitleCenter)?;
    if items.is_empty() {
        sheet.merge(span.first, COL_C, span.first, COL_L, "-", CellStyle::TextLeft)?;
    }
    for (i, item) in items.iter().enumerate() {
        let row = span.row(i);
        sheet.merge(row, COL_C, row, COL_L, item, CellStyle::TextLeft)?;
    }
    Ok(span)
}

fn write_references<W: SheetWriter>(sheet: &mut W, cursor: &mut RowCursor, dataset: &PlanDataset) -> Result<RowSpan> {
    let main = &dataset.main_references;
    let supporting = &dataset.supporting_references;
    let span = cursor.take(2 + main.len() + supporting.len());

    sheet.merge(span.first, COL_B, span.last(), COL_B, "Pustaka", CellStyle::TitleCenter)?;
    sheet.merge(span.first, COL_C, span.first, COL_L, "Utama:", CellStyle::TitleLeft)?;
    for (i, r) in main.iter().enumerate() {
        let row = span.row(1 + i);
        sheet.merge(row, COL_C, row, COL_L, r, CellStyle::TextLeft)?;
    }
    let second = span.row(1 + main.len());
    sheet.merge(second, COL_C, second, COL_L, "Pendukung:", CellStyle::TitleLeft)?;
    for (i, r) in supporting.iter().enumerate() {
        let row = span.row(2 + main.len() + i);
        sheet.merge(row, COL_C, row, COL_L, r, CellStyle::TextLeft)?;
    }
    Ok(span)
}

/// Cabecera de 4 filas de la planificación semanal, columnas numeradas (1)..(8)
fn write_weekly_header<W: SheetWriter>(sheet: &mut W, w: u32) -> Result<()> {
    let t = CellStyle::Title;
    sheet.merge(w, 1, w + 2, 1, "Mg Ke-", t)?;
    sheet.write_text(w + 3, 1, "(1)", t)?;

    sheet.merge(w, 2, w + 2, 2, "Kemampuan akhir tiap tahapan belajar (Sub-CPMK)", t)?;
    sheet.write_text(w + 3, 2, "(2)", t)?;

    sheet.merge(w, 3, w, 6, "Penilaian", t)?;
    sheet.merge(w + 1, 3, w + 2, 4, "Indikator", t)?;
    sheet.merge(w + 1, 5, w + 2, 6, "Teknik dan Instrumen Penilaian", t)?;
    sheet.merge(w + 3, 3, w + 3, 4, "(3)", t)?;
    sheet.merge(w + 3, 5, w + 3, 6, "(4)", t)?;

    sheet.merge(w, 7, w + 1, 8, "Strategi Pembelajaran dan Metode Pembelajaran [Estimasi Waktu]", t)?;
    sheet.write_text(w + 2, 7, "Luring (offline)", t)?;
    sheet.write_text(w + 2, 8, "Daring (online)", t)?;
    sheet.write_text(w + 3, 7, "(5)", t)?;
    sheet.write_text(w + 3, 8, "(6)", t)?;

    sheet.merge(w, 9, w + 2, 10, "Materi Pembelajaran dan Daftar Referensi \n[Pustaka]", t)?;
    sheet.merge(w + 3, 9, w + 3, 10, "(7)", t)?;

    sheet.merge(w, 11, w + 2, 11, "Bobot Penilaian (%)", t)?;
    sheet.write_text(w + 3, 11, "(8)", t)?;
    Ok(())
}

fn write_weekly_body<W: SheetWriter>(sheet: &mut W, cursor: &mut RowCursor, dataset: &PlanDataset) -> Result<RowSpan> {
    let span = cursor.take(dataset.sessions.len());
    let sks = dataset.course.credits;

    for (i, resolved) in dataset.sessions.iter().enumerate() {
        let row = span.row(i);
        let s = &resolved.session;

        sheet.write_number(row, COL_B, s.week_number as f64, CellStyle::TextLeft)?;
        sheet.write_text(
            row,
            COL_C,
            &format!("{} ({}) ", resolved.subobjective_description, s.subobjective_code),
            CellStyle::TextLeft,
        )?;

        if s.kind.is_evaluation() {
            let text = if resolved.indicator_numbered.is_empty() {
                s.kind.label().unwrap_or("")
            } else {
                resolved.indicator_numbered.as_str()
            };
            sheet.merge(row, 3, row, 10, text, CellStyle::Title)?;
            sheet.write_number(row, COL_L, weight_as_int(s.weight_percent) as f64, CellStyle::TextLeft)?;
            continue;
        }

        sheet.merge(row, 3, row, 4, &resolved.indicator_numbered, CellStyle::TextLeft)?;
        sheet.merge(row, 5, row, 6, &resolved.criteria_numbered, CellStyle::TextLeft)?;

        let strategy = if resolved.criteria_numbered.contains("Tugas") {
            format!("Ekspository dan diskusi [TM : {sks}x50'] Task Based Learning [TB : {sks}x50']")
        } else {
            format!("Ekspository dan diskusi [TM : {sks}x50']")
        };
        sheet.write_text(row, 7, &strategy, CellStyle::TextLeft)?;
        sheet.write_text(row, 8, &format!("Link materi [BM : {sks}x50']"), CellStyle::TextLeft)?;
        sheet.merge(
            row,
            9,
            row,
            10,
            &format!("{} \n[{}]", resolved.material_numbered, s.reference_text),
            CellStyle::TextLeft,
        )?;
        sheet.write_number(row, COL_L, s.weight_percent, CellStyle::TextLeft)?;
    }
    Ok(span)
}

/// Etiquetas de columna del cierre: AA, BB, CC...
pub fn closing_labels(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let c = (b'A' + (i % 26) as u8) as char;
            format!("{c}{c}")
        })
        .collect()
}

/// Blueprint de evaluación (RAE): título, cabeceras, una fila por SubCPMK y
/// las filas JUMLAH / NILAI MATA KULIAH / NILAI CPL.
fn write_blueprint<W: SheetWriter>(sheet: &mut W, cursor: &mut RowCursor, dataset: &PlanDataset) -> Result<RowSpan> {
    let k = dataset.outcomes.len();
    let n = dataset.assessments.len();
    let span = cursor.take(7 + n);
    let p = span.first;
    // última columna de "KRITERIA PENILAIAN" y columna del peso
    let criteria_end = 2 + k as u16;
    let weight_col = criteria_end + 1;
    let range_last_col = COL_L.max(criteria_end + 2);

    sheet.merge(p, COL_B, p, COL_L, "BLUE PRINT PENILAIAN ATAU RENCANA ASESMEN DAN EVALUASI (RAE)", CellStyle::Title)?;
    sheet.merge(p + 1, COL_B, p + 1, criteria_end, "KRITERIA PENILAIAN", CellStyle::TitleGreen)?;
    sheet.merge(p + 1, weight_col, p + 1, range_last_col, "RANGE NILAI", CellStyle::TitleGreen)?;

    sheet.merge(p + 2, COL_B, p + 3, COL_B, "Bobot", CellStyle::Title)?;
    sheet.merge(p + 2, COL_C, p + 3, COL_C, "Teknik dan Penilaian", CellStyle::Title)?;
    for (i, o) in dataset.outcomes.iter().enumerate() {
        let col = FIRST_CPL_COL + i as u16;
        sheet.write_text(p + 2, col, &o.code, CellStyle::Title)?;
        let total = dataset.outcome_totals.get(i).copied().unwrap_or(0.0);
        sheet.write_number(p + 3, col, total, CellStyle::PercentBoldFill)?;
    }
    sheet.merge(p + 2, weight_col, p + 3, weight_col, "Bobot Asesmen", CellStyle::Title)?;

    let body_first = p + 4;
    let range_last_row = (p + 8).max(body_first + n as u32);
    sheet.merge(p + 2, weight_col + 1, range_last_row, range_last_col, GRADE_RANGES, CellStyle::Text)?;

    for (i, a) in dataset.assessments.iter().enumerate() {
        let row = body_first + i as u32;
        for col in FIRST_CPL_COL..=weight_col {
            sheet.write_text(row, col, "", CellStyle::Text)?;
        }
        sheet.write_text(row, COL_B, &a.subobjective_code, CellStyle::Text)?;
        sheet.write_text(row, COL_C, a.technique, CellStyle::Text)?;
        if let Some(col) = outcome_column(dataset, a) {
            let weight = a.weight.map(weight_as_int).unwrap_or(0);
            let text = format!("Nilai x {}% \n({})", weight, a.rubric_tags.join(", "));
            sheet.write_text(row, col, &text, CellStyle::Percent)?;
        }
        if let Some(weight) = a.weight {
            sheet.write_number(row, weight_col, weight, CellStyle::Text)?;
        }
    }

    let closing = body_first + n as u32;
    let labels = closing_labels(k);
    sheet.merge(closing, COL_B, closing, COL_C, "JUMLAH", CellStyle::TitleCenter)?;
    sheet.merge(closing + 1, COL_B, closing + 1, COL_C, "NILAI MATA KULIAH", CellStyle::TitleCenter)?;
    sheet.merge(closing + 2, COL_B, closing + 2, COL_C, "NILAI CPL", CellStyle::TitleCenter)?;
    if k > 0 {
        let last_cpl_col = FIRST_CPL_COL + k as u16 - 1;
        for (i, label) in labels.iter().enumerate() {
            let col = FIRST_CPL_COL + i as u16;
            let total = dataset.outcome_totals.get(i).copied().unwrap_or(0.0);
            sheet.write_text(closing, col, label, CellStyle::TitleCenter)?;
            sheet.write_text(closing + 2, col, &format!("{}/{} x100", label, total), CellStyle::TitleCenter)?;
        }
        sheet.merge(closing + 1, FIRST_CPL_COL, closing + 1, last_cpl_col, &labels.join(" + "), CellStyle::TitleCenter)?;
    }

    Ok(RowSpan { first: p, len: span.len.max(range_last_row - p + 1) })
}
