// Estructuras de datos principales

use serde::Serialize;

/// CPL: resultado de aprendizaje del programa
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseOutcome {
    pub code: String,
    pub description: String,
}

/// CPMK: objetivo de aprendizaje de la asignatura. `weight` es el porcentaje
/// agregado desde la tabla de pesos (0 hasta que el resolver lo completa).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseObjective {
    pub code: String,
    pub description: String,
    pub weight: i64,
}

/// SubCPMK: sub-objetivo semanal, la unidad más fina que se evalúa
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubObjective {
    pub code: String,
    pub description: String,
}

/// Tipo de fila semanal. Se asigna una sola vez al extraer la fila.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionKind {
    Regular,
    MidtermEval,
    FinalEval,
}

impl SessionKind {
    pub const MIDTERM_MARKER: &'static str = "Evaluasi UTS";
    pub const FINAL_MARKER: &'static str = "Evaluasi UAS";

    /// Clasifica según el criterio de evaluación. El indicador y la materia
    /// pueden mencionar los exámenes sin serlo.
    pub fn classify(criteria: &str) -> SessionKind {
        if criteria.contains(Self::MIDTERM_MARKER) {
            SessionKind::MidtermEval
        } else if criteria.contains(Self::FINAL_MARKER) {
            SessionKind::FinalEval
        } else {
            SessionKind::Regular
        }
    }

    pub fn is_evaluation(self) -> bool {
        !matches!(self, SessionKind::Regular)
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            SessionKind::Regular => None,
            SessionKind::MidtermEval => Some(Self::MIDTERM_MARKER),
            SessionKind::FinalEval => Some(Self::FINAL_MARKER),
        }
    }
}

/// Instrumento de evaluación declarado en el criterio ("Tugas: ...", "Kuis: ...")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssessmentKind {
    Task,
    Quiz,
    Other,
}

impl AssessmentKind {
    pub fn classify(criteria: &str) -> AssessmentKind {
        if criteria.contains("Tugas") {
            AssessmentKind::Task
        } else if criteria.contains("Kuis") {
            AssessmentKind::Quiz
        } else {
            AssessmentKind::Other
        }
    }
}

/// Una fila de la planificación semanal (columnas G:M del workbook de la asignatura)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySession {
    pub week_number: u32,
    pub subobjective_code: String,
    pub indicator_text: String,
    pub criteria_text: String,
    pub material_text: String,
    pub weight_percent: f64,
    pub reference_text: String,
    pub kind: SessionKind,
    pub assessment: AssessmentKind,
    /// La materia marca el proyecto final: no se numera ni entra en la descripción
    pub final_project: bool,
}

impl WeeklySession {
    pub const FINAL_PROJECT_MARKER: &'static str = "Proyek Akhir";

    /// Cuenta para la numeración de materias y la descripción de la asignatura
    pub fn is_numbered_material(&self) -> bool {
        !self.kind.is_evaluation() && !self.final_project
    }
}

/// Fila de la tabla de pesos (columnas O, P, Q, Y): enlaza explícitamente un
/// SubCPMK con su CPMK, su CPL y su peso.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightMapping {
    pub subobjective_code: String,
    pub objective_code: String,
    pub outcome_code: String,
    pub weight: f64,
}

/// Clase/paralelo de la asignatura (columnas AA:AE)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSchedule {
    pub class_name: String,
    pub student_count: Option<u32>,
    pub day: String,
    pub room: String,
    pub academic_year: String,
}

/// Identidad de la asignatura en la hoja de lista de cursos del currículo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseInfo {
    pub name: String,
    pub code: String,
    pub semester: String,
    pub cluster: String,
    pub credits: u32,
}

/// CPL, CPMK y SubCPMK asociados a una asignatura en la tabla de mapeo
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurriculumOutcomes {
    pub outcomes: Vec<CourseOutcome>,
    pub objectives: Vec<CourseObjective>,
    pub subobjectives: Vec<SubObjective>,
}

/// Contenido normalizado del workbook subido para una asignatura y año
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseWorkbook {
    pub main_references: Vec<String>,
    pub supporting_references: Vec<String>,
    pub teaching_team: Vec<String>,
    pub staff_ids: Vec<String>,
    pub prerequisites: Vec<String>,
    pub sessions: Vec<WeeklySession>,
    pub weight_mappings: Vec<WeightMapping>,
    pub classes: Vec<ClassSchedule>,
}
