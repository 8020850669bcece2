use rpsgen::algorithm::numbering::{rubric_tags_in, MATERIAL_EXCLUDE_MARKERS};
use rpsgen::algorithm::{extract_by_tag, number_criteria, number_indicators, number_materials};

#[test]
fn test_number_materials_skips_evaluations_and_final_project() {
    let materials = [
        "Pengantar",
        "Evaluasi UTS",
        "Variabel",
        "Proyek Akhir: Aplikasi",
        "Fungsi",
        "Evaluasi UAS",
    ];
    let numbered = number_materials(&materials, MATERIAL_EXCLUDE_MARKERS);

    assert_eq!(numbered.len(), materials.len());
    assert_eq!(
        numbered,
        vec![
            "1. Pengantar",
            "Evaluasi UTS",
            "2. Variabel",
            "Proyek Akhir: Aplikasi",
            "3. Fungsi",
            "Evaluasi UAS",
        ]
    );
}

#[test]
fn test_number_materials_empty_input() {
    let empty: [&str; 0] = [];
    assert!(number_materials(&empty, MATERIAL_EXCLUDE_MARKERS).is_empty());
}

#[test]
fn test_number_criteria_counts_per_kind() {
    let criteria = ["Tugas: a", "Kuis: b", "Tugas: c", "Evaluasi UTS", "Diskusi", "Kuis:  d "];
    let numbered = number_criteria(&criteria);
    assert_eq!(
        numbered,
        vec!["Tugas 1:a", "Kuis 1:b", "Tugas 2:c", "Evaluasi UTS", "Diskusi", "Kuis 2:d"]
    );
}

#[test]
fn test_number_criteria_single_task() {
    assert_eq!(number_criteria(&["Tugas: x"]), vec!["Tugas 1:x"]);
}

#[test]
fn test_number_indicators_per_subobjective() {
    let numbered = number_indicators(&["A", "A", "B"], &["A", "B"], &["i1", "i2", "i3"]);
    assert_eq!(numbered, vec!["1.1 i1", "1.2 i2", "2.1 i3"]);
}

#[test]
fn test_number_indicators_passthrough() {
    // evaluación, código desconocido e indicador vacío
    let numbered = number_indicators(
        &["A", "Z", "A", "B"],
        &["A", "B"],
        &["Evaluasi UTS", "sin mapeo", "", "i4"],
    );
    assert_eq!(numbered, vec!["Evaluasi UTS", "sin mapeo", "", "2.1 i4"]);
}

#[test]
fn test_number_indicators_counter_ignores_evaluation_rows() {
    let numbered = number_indicators(&["A", "A", "A"], &["A"], &["i1", "Evaluasi UAS", "i2"]);
    assert_eq!(numbered, vec!["1.1 i1", "Evaluasi UAS", "1.2 i2"]);
}

#[test]
fn test_extract_by_tag_collects_parallel_values() {
    let set = extract_by_tag("H1", &["X [H1]", "Y", "Z [H1]"], &["S1", "S2", "S3"]);
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["S1", "S3"]);
}

#[test]
fn test_extract_by_tag_requires_brackets_and_dedupes() {
    let set = extract_by_tag("A1", &["A1 sin corchetes", "[A1]", "otra [A1]"], &["S1", "S2", "S2"]);
    assert_eq!(set.len(), 1);
    assert!(set.contains("S2"));
}

#[test]
fn test_rubric_tags_in_order() {
    assert_eq!(rubric_tags_in("Tugas: x [H1] y [A2]"), vec!["H1", "A2"]);
    assert!(rubric_tags_in("Kuis: sin etiqueta").is_empty());
}
