//! Construcción del dataset resuelto de una asignatura: numeraciones,
//! referencias cruzadas y agregados listos para la maquetación. El dataset
//! es inmutable una vez construido.

use serde::Serialize;
use tracing::{info, warn};
use crate::algorithm::numbering::{
    extract_by_tag, number_criteria_where, number_indicators_where, number_materials_where, rubric_tags_in,
};
use crate::algorithm::resolve::{
    aggregate_weight_by_group, build_correlation_totals, first_mapping, resolve_outcomes,
};
use crate::error::{GenerationError, Result};
use crate::models::{
    AssessmentKind, ClassSchedule, CourseInfo, CourseObjective, CourseOutcome, CourseWorkbook,
    CurriculumOutcomes, SubObjective, WeeklySession,
};

/// Rúbrica conocida: etiqueta, tipo y título de la hoja
#[derive(Debug, Clone, Copy)]
pub struct RubricSpec {
    pub tag: &'static str,
    pub kind: &'static str,
    pub title: &'static str,
}

/// Catálogo fijo, en el orden en que se emiten las hojas `RUB`
pub const RUBRIC_CATALOG: [RubricSpec; 7] = [
    RubricSpec { tag: "SP1", kind: "Skala Persepsi", title: "Rubrik Penilaian Presentasi Lisan Mahasiswa" },
    RubricSpec { tag: "H1", kind: "Holistik", title: "Rubrik Penilaian Penugasan Mahasiswa" },
    RubricSpec { tag: "H2", kind: "Holistik", title: "Rubrik Penilaian UTS/UAS Mahasiswa" },
    RubricSpec { tag: "H3", kind: "Holistik", title: "Rubrik Penilaian Rancangan Proposal Mahasiswa" },
    RubricSpec { tag: "A1", kind: "Analitik", title: "Rubrik Penilaian Presentasi Makalah Mahasiswa" },
    RubricSpec { tag: "A2", kind: "Analitik", title: "Rubrik Penilaian Project Based Learning Mahasiswa" },
    RubricSpec { tag: "A3", kind: "Analitik", title: "Rubrik Penilaian Capstone Project Mahasiswa" },
];

/// Técnica de evaluación del blueprint según haya tareas en el SubCPMK
pub const TECHNIQUE_WITH_TASKS: &str =
    "Ekspository dan diskusi (Oral Assessment), Multiple Choice Questions (MCQ) dan Short Answer Questions (SAQ)";
pub const TECHNIQUE_WITHOUT_TASKS: &str = "Kuis, diskusi, dan wawancara pemahaman (Oral Assessment)";

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSession {
    #[serde(flatten)]
    pub session: WeeklySession,
    pub subobjective_description: String,
    pub indicator_numbered: String,
    pub criteria_numbered: String,
    pub material_numbered: String,
}

/// Fila de la correlación CPL x SubCPMK y del blueprint de evaluación
#[derive(Debug, Clone, Serialize)]
pub struct SubObjectiveAssessment {
    pub subobjective_code: String,
    /// CPL resuelta desde la tabla de pesos (None si el SubCPMK no aparece)
    pub outcome_code: Option<String>,
    /// Peso en porcentaje entero tal como viene (25 = 25%)
    pub weight: Option<f64>,
    pub technique: &'static str,
    pub rubric_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RubricEntry {
    pub subobjective_code: String,
    pub subobjective_description: String,
    pub outcome_code: String,
}

/// Rúbrica con al menos un SubCPMK resuelto a CPL
#[derive(Debug, Clone, Serialize)]
pub struct RubricBinding {
    pub tag: &'static str,
    pub kind: &'static str,
    pub title: &'static str,
    pub entries: Vec<RubricEntry>,
    /// Criterios numerados de las filas que llevan la etiqueta
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanDataset {
    pub course: CourseInfo,
    pub year: String,
    pub outcomes: Vec<CourseOutcome>,
    pub objectives: Vec<CourseObjective>,
    pub subobjectives: Vec<SubObjective>,
    pub sessions: Vec<ResolvedSession>,
    /// Materias numeradas sin evaluaciones ni proyecto final
    pub study_materials: Vec<String>,
    pub description: String,
    pub main_references: Vec<String>,
    pub supporting_references: Vec<String>,
    pub teaching_team: Vec<String>,
    pub prerequisites: Vec<String>,
    pub classes: Vec<ClassSchedule>,
    pub assessments: Vec<SubObjectiveAssessment>,
    /// Total por CPL (fracción, 0.25 = 25%) en el orden de `outcomes`
    pub outcome_totals: Vec<f64>,
    pub rubrics: Vec<RubricBinding>,
    pub warnings: Vec<String>,
}

fn describe<'a>(subs: &'a [SubObjective], code: &str) -> &'a str {
    subs.iter()
        .find(|s| s.code == code)
        .map(|s| s.description.as_str())
        .unwrap_or("")
}

/// Aplica numeraciones, resuelve referencias y agrega pesos.
pub fn build_plan(
    course: CourseInfo,
    year: &str,
    curriculum: CurriculumOutcomes,
    data: CourseWorkbook,
) -> Result<PlanDataset> {
    if data.teaching_team.is_empty() {
        return Err(GenerationError::MissingData(format!(
            "team teaching untuk '{}' tahun {} belum diisi",
            course.name, year
        )));
    }

    let mut warnings: Vec<String> = Vec::new();
    let sessions = &data.sessions;
    let mappings = &data.weight_mappings;

    // --- Numeraciones ---
    let materials: Vec<&str> = sessions.iter().map(|s| s.material_text.as_str()).collect();
    let criteria: Vec<&str> = sessions.iter().map(|s| s.criteria_text.as_str()).collect();
    let indicators: Vec<&str> = sessions.iter().map(|s| s.indicator_text.as_str()).collect();
    let subs_per_row: Vec<&str> = sessions.iter().map(|s| s.subobjective_code.as_str()).collect();
    let weight_sub_codes: Vec<&str> = mappings.iter().map(|m| m.subobjective_code.as_str()).collect();

    let materials_numbered = number_materials_where(&materials, |i, _| !sessions[i].is_numbered_material());
    let criteria_numbered = number_criteria_where(&criteria, |i, _| sessions[i].kind.is_evaluation());
    let indicators_numbered =
        number_indicators_where(&subs_per_row, &weight_sub_codes, &indicators, |i, _| sessions[i].kind.is_evaluation());

    let plain_materials: Vec<&str> = sessions
        .iter()
        .filter(|s| s.is_numbered_material())
        .map(|s| s.material_text.as_str())
        .collect();
    let study_materials: Vec<String> = plain_materials
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. {}", i + 1, m))
        .collect();
    let description = format!(
        "Mata kuliah {} membahas konsep teoritis, metode, dan implementasi mengenai materi seperti {}.",
        course.name,
        plain_materials.join(", ")
    );

    let resolved_sessions: Vec<ResolvedSession> = sessions
        .iter()
        .enumerate()
        .map(|(i, s)| ResolvedSession {
            session: s.clone(),
            subobjective_description: describe(&curriculum.subobjectives, &s.subobjective_code).to_string(),
            indicator_numbered: indicators_numbered[i].clone(),
            criteria_numbered: criteria_numbered[i].clone(),
            material_numbered: materials_numbered[i].clone(),
        })
        .collect();

    // --- Pesos por CPMK (orden de primera aparición en la tabla de pesos) ---
    let cpmk_keys: Vec<&str> = mappings.iter().map(|m| m.objective_code.as_str()).collect();
    let cpmk_values: Vec<f64> = mappings.iter().map(|m| m.weight).collect();
    let cpmk_totals = aggregate_weight_by_group(&cpmk_keys, &cpmk_values);
    let objectives: Vec<CourseObjective> = curriculum
        .objectives
        .iter()
        .map(|o| {
            let weight = match cpmk_totals.iter().find(|(k, _)| *k == o.code) {
                Some((_, w)) => *w,
                None => {
                    warnings.push(format!("CPMK {} tidak memiliki bobot di tabel bobot", o.code));
                    0
                }
            };
            CourseObjective { weight, ..o.clone() }
        })
        .collect();

    // Los pesos semanales deben repartir el mismo total que la tabla de pesos
    let weekly_total: f64 = sessions.iter().map(|s| s.weight_percent).sum();
    let objective_total: i64 = cpmk_totals.iter().map(|(_, w)| w).sum();
    if (weekly_total - objective_total as f64).abs() > WEIGHT_TOLERANCE {
        warnings.push(format!(
            "total bobot mingguan {} tidak sama dengan total bobot CPMK {}",
            weekly_total, objective_total
        ));
    }

    // --- Correlación CPL x SubCPMK y blueprint ---
    let mut assessments: Vec<SubObjectiveAssessment> = Vec::with_capacity(curriculum.subobjectives.len());
    for sub in &curriculum.subobjectives {
        let mapping = first_mapping(mappings, &sub.code);
        if mapping.is_none() {
            warnings.push(format!("SubCPMK {} tidak ada di tabel bobot", sub.code));
        }
        let related: Vec<&WeeklySession> = sessions.iter().filter(|s| s.subobjective_code == sub.code).collect();
        let technique = if related.iter().any(|s| s.assessment == AssessmentKind::Task) {
            TECHNIQUE_WITH_TASKS
        } else {
            TECHNIQUE_WITHOUT_TASKS
        };
        let rubric_tags = related.iter().flat_map(|s| rubric_tags_in(&s.criteria_text)).collect();
        assessments.push(SubObjectiveAssessment {
            subobjective_code: sub.code.clone(),
            outcome_code: mapping.map(|m| m.outcome_code.clone()),
            weight: mapping.map(|m| m.weight),
            technique,
            rubric_tags,
        });
    }

    let outcome_codes: Vec<&str> = curriculum.outcomes.iter().map(|o| o.code.as_str()).collect();
    let matched: Vec<&SubObjectiveAssessment> = assessments.iter().filter(|a| a.outcome_code.is_some()).collect();
    let outcome_totals = build_correlation_totals(
        &matched.iter().map(|a| a.subobjective_code.as_str()).collect::<Vec<_>>(),
        &matched.iter().map(|a| a.outcome_code.as_deref().unwrap_or("")).collect::<Vec<_>>(),
        &matched.iter().map(|a| a.weight.unwrap_or(0.0)).collect::<Vec<_>>(),
        &outcome_codes,
    );
    for a in &matched {
        if let Some(code) = a.outcome_code.as_deref() {
            if !outcome_codes.contains(&code) {
                warnings.push(format!("CPL {} dari {} tidak terdaftar untuk mata kuliah ini", code, a.subobjective_code));
            }
        }
    }

    // --- Rúbricas ---
    let mut rubrics: Vec<RubricBinding> = Vec::new();
    for spec in RUBRIC_CATALOG.iter() {
        let tagged = extract_by_tag(spec.tag, &criteria, &subs_per_row);
        if tagged.is_empty() {
            continue;
        }
        let resolution = resolve_outcomes(tagged.iter(), mappings);
        for code in &resolution.unmatched {
            warnings.push(format!("SubCPMK {} pada rubrik {} tidak memiliki CPL", code, spec.tag));
        }
        if resolution.pairs.is_empty() {
            continue;
        }
        let needle = format!("[{}]", spec.tag);
        let tasks = resolved_sessions
            .iter()
            .filter(|s| s.session.criteria_text.contains(&needle))
            .map(|s| s.criteria_numbered.clone())
            .collect();
        let entries = resolution
            .pairs
            .into_iter()
            .map(|(sub, cpl)| RubricEntry {
                subobjective_description: describe(&curriculum.subobjectives, &sub).to_string(),
                subobjective_code: sub,
                outcome_code: cpl,
            })
            .collect();
        rubrics.push(RubricBinding { tag: spec.tag, kind: spec.kind, title: spec.title, entries, tasks });
    }

    for w in &warnings {
        warn!(course = %course.name, year, "{}", w);
    }
    info!(
        course = %course.name,
        year,
        sessions = resolved_sessions.len(),
        rubrics = rubrics.len(),
        warnings = warnings.len(),
        "dataset resuelto"
    );

    Ok(PlanDataset {
        course,
        year: year.to_string(),
        outcomes: curriculum.outcomes,
        objectives,
        subobjectives: curriculum.subobjectives,
        sessions: resolved_sessions,
        study_materials,
        description,
        main_references: data.main_references,
        supporting_references: data.supporting_references,
        teaching_team: data.teaching_team,
        prerequisites: data.prerequisites,
        classes: data.classes,
        assessments,
        outcome_totals,
        rubrics,
        warnings,
    })
}
