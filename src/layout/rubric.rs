// Hojas de rúbrica `RUB {etiqueta}`.

use crate::algorithm::{PlanDataset, RubricBinding};
use crate::error::Result;
use crate::layout::cursor::RowCursor;
use crate::layout::writer::{CellStyle, SheetWriter};
use crate::layout::{document_code, write_header, write_team_block, ReportContext};

const LAST_COL: u16 = 8;

pub fn sheet_name(tag: &str) -> String {
    format!("RUB {}", tag)
}

pub fn write_rubric<W: SheetWriter>(
    sheet: &mut W,
    dataset: &PlanDataset,
    ctx: &ReportContext,
    binding: &RubricBinding,
) -> Result<()> {
    let course = &dataset.course;
    let title = CellStyle::TitleLeft;
    let text = CellStyle::TextLeft;

    sheet.set_column_width(0, 0, 5.0)?;
    sheet.set_column_width(1, LAST_COL, 25.0)?;
    write_header(sheet, ctx, binding.title, CellStyle::HeaderSmall, 6, &document_code(ctx, "RUB", dataset))?;
    // la plantilla de rúbrica usa la misma altura en las 4 filas de cabecera
    sheet.set_row_height(4, 22.0)?;

    sheet.merge(5, 1, 5, 2, "MATA KULIAH", title)?;
    sheet.merge(5, 3, 5, LAST_COL, &course.name, text)?;
    sheet.merge(6, 1, 6, 2, "KODE", title)?;
    sheet.merge(6, 3, 6, LAST_COL, &course.code, text)?;
    write_team_block(sheet, 7, LAST_COL, &dataset.teaching_team)?;

    let mut cursor = RowCursor::new(11);
    let tasks = binding.tasks.join("\n ");
    let credits = course.credits.to_string();
    let fields: [(&str, &str); 5] = [
        ("SEMESTER", course.semester.as_str()),
        ("SKS", credits.as_str()),
        ("Tugas", tasks.as_str()),
        ("Tipe", binding.kind),
        ("Sifat", "Individu"),
    ];
    for (label, value) in fields {
        let row = cursor.take_one();
        sheet.merge(row, 1, row, 2, label, title)?;
        sheet.merge(row, 3, row, LAST_COL, value, text)?;
    }

    let achievements = cursor.take(binding.entries.len().max(1));
    sheet.merge(achievements.first, 1, achievements.last(), 2, "Capaian", title)?;
    for (i, entry) in binding.entries.iter().enumerate() {
        let row = achievements.row(i);
        sheet.write_text(
            row,
            3,
            &format!("{} ({})", entry.subobjective_code, entry.outcome_code),
            CellStyle::TitleCenter,
        )?;
        sheet.merge(row, 4, row, LAST_COL, &entry.subobjective_description, text)?;
    }
    Ok(())
}
