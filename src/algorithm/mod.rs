// Núcleo de transformación: renumeración, resolución de referencias cruzadas
// y construcción del dataset que consume la maquetación.
pub mod numbering;
pub mod resolve;
pub mod dataset;

pub use dataset::{build_plan, PlanDataset, ResolvedSession, RubricBinding, RubricEntry, SubObjectiveAssessment, RUBRIC_CATALOG};
pub use numbering::{extract_by_tag, number_criteria, number_indicators, number_materials};
pub use resolve::{aggregate_weight_by_group, build_correlation_totals, map_sub_to_cpl};
