use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use crate::error::{GenerationError, Result};

/// Texto de una celda tal como lo ve el planificador: códigos de asignatura,
/// semanas y pesos llegan como números y se comparan como texto (`1101.0`
/// es `"1101"`). Errores de fórmula y celdas vacías quedan en `""`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

/// Normaliza nombres para comparar: minúsculas y espacios colapsados.
pub fn normalize_name(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Índice 0-based de una columna del workbook por sus letras (`"G"` es la
/// semana, `"AA"` la clase). Caracteres que no son letras se ignoran.
pub fn col(letters: &str) -> usize {
    letters
        .chars()
        .filter(char::is_ascii_alphabetic)
        .fold(0usize, |acc, ch| acc * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1))
        .saturating_sub(1)
}

/// Parsea un número tolerando `%`, espacios y coma decimal.
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_end_matches('%').trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Hoja leída completa en memoria con coordenadas absolutas 0-based.
/// Celdas fuera de rango se ven como cadena vacía.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub name: String,
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    /// Construye una grilla desde filas ya convertidas (fila 0 = fila 1 de Excel)
    pub fn from_rows(name: &str, rows: Vec<Vec<String>>) -> Self {
        SheetGrid { name: name.to_string(), rows }
    }

    /// calamine recorta el rango a la primera celda usada; aquí se reubican
    /// las celdas en su posición absoluta.
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let mut rows: Vec<Vec<String>> = Vec::new();
        if let Some((r0, c0)) = range.start() {
            for (r, c, cell) in range.used_cells() {
                let text = cell_text(cell);
                if text.is_empty() { continue; }
                let (ar, ac) = (r0 as usize + r, c0 as usize + c);
                if rows.len() <= ar {
                    rows.resize_with(ar + 1, Vec::new);
                }
                let row = &mut rows[ar];
                if row.len() <= ac {
                    row.resize(ac + 1, String::new());
                }
                row[ac] = text;
            }
        }
        SheetGrid { name: name.to_string(), rows }
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Número de filas (hasta la última con datos)
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Abre un workbook y carga las hojas pedidas. El handle del archivo se libera
/// al salir de esta función, también en los caminos de error.
pub fn read_sheets<P: AsRef<Path>>(path: P, sheets: &[&str]) -> Result<Vec<SheetGrid>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(GenerationError::WorkbookNotFound { path: path.to_path_buf() });
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| GenerationError::WorkbookUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let names = workbook.sheet_names();
    let mut out = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        if !names.iter().any(|n| n == sheet) {
            return Err(GenerationError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: sheet.to_string(),
            });
        }
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|source| GenerationError::WorkbookUnreadable { path: path.to_path_buf(), source })?;
        out.push(SheetGrid::from_range(sheet, &range));
    }
    Ok(out)
}
