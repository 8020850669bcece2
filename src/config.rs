//! Configuración de la aplicación leída desde variables de entorno (`.env`
//! opcional). Los valores por defecto son los del despliegue de la facultad.

use std::path::PathBuf;

/// Datos de la institución que aparecen en la cabecera de cada hoja.
#[derive(Clone, Debug)]
pub struct InstitutionInfo {
    pub university: String,
    pub faculty: String,
    pub program: String,
    /// Prefijo del código de documento, ej: `FTP-TKOM` -> `FTP-TKOM-RPS-...`
    pub doc_prefix: String,
    /// Coordinador de la asignatura (firma en la autorización del RPS)
    pub coordinator: String,
    /// Jefe del programa de estudio
    pub head_of_program: String,
}

impl Default for InstitutionInfo {
    fn default() -> Self {
        Self {
            university: "UNIVERSITAS WARMADEWA".to_string(),
            faculty: "FAKULTAS TEKNIK DAN PERENCANAAN".to_string(),
            program: "PROGRAM STUDI TEKNIK KOMPUTER".to_string(),
            doc_prefix: "FTP-TKOM".to_string(),
            coordinator: "I Made Adi Bhaskara, S.Kom., M.T.".to_string(),
            head_of_program: "Ir. I Made Surya Kumara, S.T., M.Sc.".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Workbook de referencia curricular (entrada A)
    pub curriculum_file: PathBuf,
    /// Directorio donde se guardan los workbooks por asignatura (entrada B)
    pub upload_dir: PathBuf,
    /// Plantilla vacía que se ofrece para descarga
    pub template_file: PathBuf,
    /// Logo de la cabecera; si no existe se omite
    pub logo_file: Option<PathBuf>,
    pub institution: InstitutionInfo,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            curriculum_file: PathBuf::from("data/Final Template Kurikulum 2025.xlsx"),
            upload_dir: PathBuf::from("uploads"),
            template_file: PathBuf::from("data/Template Rubrik.xlsx"),
            logo_file: Some(PathBuf::from("data/logo.png")),
            institution: InstitutionInfo::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let default = Self::default();
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let institution = InstitutionInfo {
            university: var("RPS_UNIVERSITY").unwrap_or(default.institution.university),
            faculty: var("RPS_FACULTY").unwrap_or(default.institution.faculty),
            program: var("RPS_PROGRAM").unwrap_or(default.institution.program),
            doc_prefix: var("RPS_DOC_PREFIX").unwrap_or(default.institution.doc_prefix),
            coordinator: var("RPS_COORDINATOR").unwrap_or(default.institution.coordinator),
            head_of_program: var("RPS_HEAD_OF_PROGRAM").unwrap_or(default.institution.head_of_program),
        };

        Self {
            bind_addr: var("RPS_BIND").unwrap_or(default.bind_addr),
            curriculum_file: var("RPS_CURRICULUM_FILE").map(PathBuf::from).unwrap_or(default.curriculum_file),
            upload_dir: var("RPS_UPLOAD_DIR").map(PathBuf::from).unwrap_or(default.upload_dir),
            template_file: var("RPS_TEMPLATE_FILE").map(PathBuf::from).unwrap_or(default.template_file),
            logo_file: var("RPS_LOGO_FILE").map(PathBuf::from).or(default.logo_file),
            institution,
        }
    }

    /// Ruta del workbook subido para una asignatura y año:
    /// `{upload_dir}/data_{course}_{year}.xlsx`
    pub fn course_workbook_path(&self, course: &str, year: &str) -> PathBuf {
        self.upload_dir.join(format!("data_{}_{}.xlsx", course, year))
    }

    /// Logo sólo si el archivo existe en disco.
    pub fn existing_logo(&self) -> Option<PathBuf> {
        self.logo_file.as_ref().filter(|p| p.is_file()).cloned()
    }
}
