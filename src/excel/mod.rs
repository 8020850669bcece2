//! Módulo `excel` dividido en submódulos para mantener el código organizado.
//!
//! Submódulos:
//! - `io`: helpers y utilidades para lectura/parseo de Excel (`SheetGrid`)
//! - `curriculum`: workbook de referencia curricular (lista de asignaturas y mapeo)
//! - `course_data`: workbook subido por asignatura y año

/// Helpers de IO y utilidades para parsing de Excel
pub mod io;

/// Lectura del currículo: `read_course_list`, `read_curriculum`
pub mod curriculum;

/// Lectura del workbook de la asignatura: `read_course_workbook`
pub mod course_data;

pub use io::{normalize_name, SheetGrid};
pub use curriculum::{read_course_list, read_curriculum};
pub use course_data::{course_sheet_name, read_course_workbook};

// Layout fijo del workbook curricular. No depende de los datos.
pub const SHEET_COURSES: &str = "9. Susunan Mata Kuliah";
pub const SHEET_MAPPING: &str = "15. Pemetaan MK-CPMK-Su";

/// Filas (1-based, inclusivas) de la lista de asignaturas
pub const COURSE_START_ROW: usize = 3;
pub const COURSE_END_ROW: usize = 69;

/// Filas (1-based, inclusivas) de la tabla de mapeo MK-CPMK-SubCPMK-CPL
pub const MAPPING_START_ROW: usize = 3;
pub const MAPPING_END_ROW: usize = 272;

/// Primera fila de datos (1-based) del workbook por asignatura
pub const COURSE_DATA_FIRST_ROW: usize = 2;
