//! Documento en memoria: registra cada llamada de escritura para poder
//! inspeccionar la maquetación sin pasar por un `.xlsx`. Rechaza rangos
//! combinados que se solapan y nombres de hoja inválidos, igual que Excel.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use crate::error::{GenerationError, Result};
use crate::layout::writer::{check_range, CellStyle, DocumentWriter, SheetWriter};

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCell {
    pub value: CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl MergedRange {
    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.first_row..=self.last_row).contains(&row) && (self.first_col..=self.last_col).contains(&col)
    }

    pub fn overlaps(&self, other: &MergedRange) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }
}

#[derive(Debug, Default)]
pub struct MemorySheet {
    name: String,
    cells: BTreeMap<(u32, u16), RecordedCell>,
    merges: Vec<MergedRange>,
    column_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    images: Vec<(u32, u16, PathBuf)>,
}

impl MemorySheet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&RecordedCell> {
        self.cells.get(&(row, col))
    }

    pub fn text(&self, row: u32, col: u16) -> Option<&str> {
        match self.cells.get(&(row, col)) {
            Some(RecordedCell { value: CellValue::Text(t), .. }) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, row: u32, col: u16) -> Option<f64> {
        match self.cells.get(&(row, col)) {
            Some(RecordedCell { value: CellValue::Number(n), .. }) => Some(*n),
            _ => None,
        }
    }

    pub fn date(&self, row: u32, col: u16) -> Option<NaiveDate> {
        match self.cells.get(&(row, col)) {
            Some(RecordedCell { value: CellValue::Date(d), .. }) => Some(*d),
            _ => None,
        }
    }

    pub fn style(&self, row: u32, col: u16) -> Option<CellStyle> {
        self.cells.get(&(row, col)).map(|c| c.style)
    }

    pub fn merges(&self) -> &[MergedRange] {
        &self.merges
    }

    /// Rango combinado que cubre la celda, si hay
    pub fn merge_at(&self, row: u32, col: u16) -> Option<MergedRange> {
        self.merges.iter().copied().find(|m| m.contains(row, col))
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn images(&self) -> &[(u32, u16, PathBuf)] {
        &self.images
    }

    /// Primera celda (orden fila-columna) cuyo texto es exactamente `needle`
    pub fn find_text(&self, needle: &str) -> Option<(u32, u16)> {
        self.cells
            .iter()
            .find(|(_, c)| matches!(&c.value, CellValue::Text(t) if t == needle))
            .map(|(pos, _)| *pos)
    }

    /// Todas las celdas de texto que contienen `needle`
    pub fn find_containing(&self, needle: &str) -> Vec<(u32, u16)> {
        self.cells
            .iter()
            .filter(|(_, c)| matches!(&c.value, CellValue::Text(t) if t.contains(needle)))
            .map(|(pos, _)| *pos)
            .collect()
    }

    /// Última fila con contenido
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|(r, _)| *r).max()
    }

    fn record(&mut self, row: u32, col: u16, value: CellValue, style: CellStyle) {
        self.cells.insert((row, col), RecordedCell { value, style });
    }

    fn merge_value(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
        value: CellValue,
        style: CellStyle,
    ) -> Result<()> {
        check_range(first_row, first_col, last_row, last_col)?;
        if first_row != last_row || first_col != last_col {
            let range = MergedRange { first_row, first_col, last_row, last_col };
            if let Some(other) = self.merges.iter().find(|m| m.overlaps(&range)) {
                return Err(GenerationError::Layout(format!(
                    "hoja '{}': rango {:?} se solapa con {:?}",
                    self.name, range, other
                )));
            }
            self.merges.push(range);
        }
        self.record(first_row, first_col, value, style);
        Ok(())
    }
}

impl SheetWriter for MemorySheet {
    fn write_text(&mut self, row: u32, col: u16, text: &str, style: CellStyle) -> Result<()> {
        self.record(row, col, CellValue::Text(text.to_string()), style);
        Ok(())
    }

    fn write_number(&mut self, row: u32, col: u16, value: f64, style: CellStyle) -> Result<()> {
        self.record(row, col, CellValue::Number(value), style);
        Ok(())
    }

    fn merge(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16, text: &str, style: CellStyle) -> Result<()> {
        self.merge_value(first_row, first_col, last_row, last_col, CellValue::Text(text.to_string()), style)
    }

    fn merge_date(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16, date: NaiveDate, style: CellStyle) -> Result<()> {
        self.merge_value(first_row, first_col, last_row, last_col, CellValue::Date(date), style)
    }

    fn set_column_width(&mut self, first_col: u16, last_col: u16, width: f64) -> Result<()> {
        for c in first_col..=last_col {
            self.column_widths.insert(c, width);
        }
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.row_heights.insert(row, height);
        Ok(())
    }

    fn insert_logo(&mut self, row: u32, col: u16, path: &Path) -> Result<()> {
        self.images.push((row, col, path.to_path_buf()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    sheets: Vec<MemorySheet>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[MemorySheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

impl DocumentWriter for MemoryDocument {
    type Sheet<'a> = &'a mut MemorySheet;

    fn add_sheet(&mut self, name: &str) -> Result<&mut MemorySheet> {
        if name.is_empty() || name.chars().count() > 31 || name.contains(FORBIDDEN_SHEET_CHARS) {
            return Err(GenerationError::Layout(format!("nama sheet tidak valid: '{}'", name)));
        }
        if self.sheets.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
            return Err(GenerationError::Layout(format!("nama sheet duplikat: '{}'", name)));
        }
        self.sheets.push(MemorySheet { name: name.to_string(), ..MemorySheet::default() });
        let idx = self.sheets.len() - 1;
        Ok(&mut self.sheets[idx])
    }
}
