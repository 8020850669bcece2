//! Errores de generación de documentos.
//!
//! Cada fallo se clasifica en una de tres familias (`ErrorKind`): datos de
//! entrada ausentes, datos de entrada inválidos y fallos internos. Los mensajes
//! están pensados para mostrarse directamente al usuario final, por eso van en
//! el mismo idioma que las etiquetas del documento.

use std::path::PathBuf;

/// Familia del error, usada para decidir el código HTTP y el nivel de log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    InputNotFound,
    InvalidInput,
    GenerationFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("File '{}' tidak ditemukan", path.display())]
    WorkbookNotFound { path: PathBuf },

    #[error("Sheet '{sheet}' tidak ditemukan dalam {}", path.display())]
    SheetNotFound { path: PathBuf, sheet: String },

    #[error("Mata kuliah '{course}' tidak terdaftar di kurikulum{}", suggestion.as_ref().map(|s| format!(" (maksud Anda '{}'?)", s)).unwrap_or_default())]
    CourseNotFound { course: String, suggestion: Option<String> },

    #[error("Error membuka file '{}': {source}", path.display())]
    WorkbookUnreadable {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Data tidak valid di sheet '{sheet}' baris {row} kolom {column}: {reason}")]
    InvalidField {
        sheet: String,
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Data wajib kosong: {0}")]
    MissingData(String),

    #[error("Terjadi kesalahan saat membuat file Excel: {0}")]
    Writer(#[from] rust_xlsxwriter::XlsxError),

    #[error("Terjadi kesalahan sistem: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terjadi kesalahan saat menyusun dokumen: {0}")]
    Layout(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::WorkbookNotFound { .. }
            | GenerationError::SheetNotFound { .. }
            | GenerationError::CourseNotFound { .. } => ErrorKind::InputNotFound,
            GenerationError::WorkbookUnreadable { .. }
            | GenerationError::InvalidField { .. }
            | GenerationError::MissingData(_) => ErrorKind::InvalidInput,
            GenerationError::Writer(_) | GenerationError::Io(_) | GenerationError::Layout(_) => {
                ErrorKind::GenerationFailure
            }
        }
    }

    /// Código HTTP asociado. Una hoja ausente es "not found" como familia pero
    /// se reporta como petición inválida: el archivo existe y el usuario subió
    /// un workbook con otra estructura.
    pub fn status_code(&self) -> u16 {
        match self {
            GenerationError::SheetNotFound { .. } => 400,
            other => match other.kind() {
                ErrorKind::InputNotFound => 404,
                ErrorKind::InvalidInput => 400,
                ErrorKind::GenerationFailure => 500,
            },
        }
    }

    pub(crate) fn invalid(sheet: &str, row: usize, column: &str, reason: impl Into<String>) -> Self {
        GenerationError::InvalidField {
            sheet: sheet.to_string(),
            row,
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
