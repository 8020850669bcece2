mod common;

use common::{course_rows, course_rows_with, curriculum_course_rows, curriculum_mapping_rows, put, COURSE, WEEKS};
use rpsgen::excel::course_data::parse_course_workbook;
use rpsgen::excel::curriculum::{closest_course, parse_course_info, parse_course_list, parse_outcomes};
use calamine::Data;
use rpsgen::excel::io::{cell_text, col, parse_number, SheetGrid};
use rpsgen::excel::{course_sheet_name, SHEET_COURSES, SHEET_MAPPING};
use rpsgen::models::{AssessmentKind, SessionKind};
use rpsgen::{ErrorKind, GenerationError};

#[test]
fn test_column_letters() {
    assert_eq!(col("A"), 0);
    assert_eq!(col("L"), 11);
    assert_eq!(col("Y"), 24);
    assert_eq!(col("AA"), 26);
    assert_eq!(col("AE"), 30);
}

#[test]
fn test_cell_text_keeps_codes_integral() {
    assert_eq!(cell_text(&Data::Float(1101.0)), "1101");
    assert_eq!(cell_text(&Data::Float(7.5)), "7.5");
    assert_eq!(cell_text(&Data::Int(3)), "3");
    assert_eq!(cell_text(&Data::String("  Buku A ".to_string())), "Buku A");
    assert_eq!(cell_text(&Data::Empty), "");
}

#[test]
fn test_parse_number_variants() {
    assert_eq!(parse_number("25"), Some(25.0));
    assert_eq!(parse_number(" 25% "), Some(25.0));
    assert_eq!(parse_number("12,5"), Some(12.5));
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("dua"), None);
}

#[test]
fn test_course_sheet_name_first_word() {
    assert_eq!(course_sheet_name("Algoritma dan Pemrograman"), "Algoritma");
    assert_eq!(course_sheet_name("Algoritma"), "Algoritma");
}

#[test]
fn test_parse_course_info_case_insensitive() {
    let grid = SheetGrid::from_rows(SHEET_COURSES, curriculum_course_rows());
    let info = parse_course_info(&grid, "  algoritma ").expect("Debe encontrar la asignatura");

    assert_eq!(info.name, COURSE);
    assert_eq!(info.code, "1101");
    assert_eq!(info.credits, 3);
    assert_eq!(info.semester, "1");
    assert_eq!(info.cluster, "Inti");
}

#[test]
fn test_parse_course_list_skips_header_rows() {
    let grid = SheetGrid::from_rows(SHEET_COURSES, curriculum_course_rows());
    assert_eq!(parse_course_list(&grid), vec![COURSE.to_string(), "Basis Data".to_string()]);
}

#[test]
fn test_parse_course_info_unknown_course_suggests() {
    let grid = SheetGrid::from_rows(SHEET_COURSES, curriculum_course_rows());
    let err = parse_course_info(&grid, "Algoritme").expect_err("Debe fallar con asignatura desconocida");

    assert_eq!(err.kind(), ErrorKind::InputNotFound);
    assert_eq!(err.status_code(), 404);
    match err {
        GenerationError::CourseNotFound { suggestion, .. } => assert_eq!(suggestion.as_deref(), Some(COURSE)),
        other => panic!("error inesperado: {other:?}"),
    }
}

#[test]
fn test_closest_course_rejects_distant_names() {
    let courses = vec![COURSE.to_string(), "Basis Data".to_string()];
    assert_eq!(closest_course(&courses, "Jaringan Komputer"), None);
}

#[test]
fn test_parse_course_info_non_numeric_credits() {
    let mut rows = curriculum_course_rows();
    put(&mut rows, 2, "E", "tiga");
    let grid = SheetGrid::from_rows(SHEET_COURSES, rows);
    let err = parse_course_info(&grid, COURSE).expect_err("SKS inválido");

    assert_eq!(err.status_code(), 400);
    assert!(matches!(err, GenerationError::InvalidField { ref column, row: 3, .. } if column == "E"));
}

#[test]
fn test_parse_outcomes_dedupes_and_skips_merged_blanks() {
    let grid = SheetGrid::from_rows(SHEET_MAPPING, curriculum_mapping_rows());
    let out = parse_outcomes(&grid, COURSE);

    let cpl: Vec<&str> = out.outcomes.iter().map(|o| o.code.as_str()).collect();
    let cpmk: Vec<&str> = out.objectives.iter().map(|o| o.code.as_str()).collect();
    let subs: Vec<&str> = out.subobjectives.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(cpl, vec!["CPL1", "CPL2"]);
    assert_eq!(cpmk, vec!["CPMK1", "CPMK2"]);
    assert_eq!(subs, vec!["S1", "S2", "S3"]);
    assert_eq!(out.outcomes[0].description, "Mampu berpikir logis");
}

#[test]
fn test_parse_outcomes_unknown_course_is_empty() {
    let grid = SheetGrid::from_rows(SHEET_MAPPING, curriculum_mapping_rows());
    let out = parse_outcomes(&grid, "Jaringan");
    assert!(out.outcomes.is_empty());
    assert!(out.subobjectives.is_empty());
}

#[test]
fn test_parse_course_workbook_lists_and_sessions() {
    let grid = SheetGrid::from_rows(COURSE, course_rows());
    let data = parse_course_workbook(&grid).expect("Debe extraer el workbook");

    assert_eq!(data.main_references, vec!["Buku A"]);
    assert_eq!(data.supporting_references, vec!["Buku B"]);
    assert_eq!(data.teaching_team, vec!["Dosen A", "Dosen B"]);
    assert!(data.prerequisites.is_empty());
    assert_eq!(data.sessions.len(), WEEKS.len());
    assert_eq!(data.weight_mappings.len(), 2);
    assert_eq!(data.classes.len(), 1);
    assert_eq!(data.classes[0].student_count, Some(40));

    let uts = &data.sessions[7];
    assert_eq!(uts.week_number, 8);
    assert_eq!(uts.kind, SessionKind::MidtermEval);
    assert_eq!(uts.weight_percent, 20.0);
    assert_eq!(data.sessions[13].kind, SessionKind::FinalEval);

    assert_eq!(data.sessions[0].assessment, AssessmentKind::Task);
    assert_eq!(data.sessions[1].assessment, AssessmentKind::Quiz);
    assert_eq!(data.sessions[2].assessment, AssessmentKind::Other);
    assert!(data.sessions[10].final_project);
    assert!(!data.sessions[10].is_numbered_material());
}

#[test]
fn test_parse_course_workbook_week_must_be_numeric() {
    let mut weeks = WEEKS;
    weeks[3][0] = "empat";
    let grid = SheetGrid::from_rows(COURSE, course_rows_with(&weeks));
    let err = parse_course_workbook(&grid).expect_err("Semana inválida");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.status_code(), 400);
    // fila 0-based 4 -> fila 5 de Excel
    assert!(matches!(err, GenerationError::InvalidField { row: 5, ref column, .. } if column == "G"));
    assert!(err.to_string().contains("empat"));
}

#[test]
fn test_parse_course_workbook_weight_with_percent() {
    let mut weeks = WEEKS;
    weeks[0][5] = "7,5%";
    let grid = SheetGrid::from_rows(COURSE, course_rows_with(&weeks));
    let data = parse_course_workbook(&grid).expect("Peso con formato porcentaje");
    assert_eq!(data.sessions[0].weight_percent, 7.5);
}

#[test]
fn test_session_kind_from_criteria_only() {
    assert_eq!(SessionKind::classify("Evaluasi UTS"), SessionKind::MidtermEval);
    assert_eq!(SessionKind::classify("Evaluasi UAS"), SessionKind::FinalEval);
    assert_eq!(SessionKind::classify("Kuis: Array"), SessionKind::Regular);

    let mut weeks = WEEKS;
    weeks[4][4] = "Persiapan Evaluasi UTS";
    weeks[13][4] = "Evaluasi UAS (materi setelah Evaluasi UTS)";
    let grid = SheetGrid::from_rows(COURSE, course_rows_with(&weeks));
    let data = parse_course_workbook(&grid).expect("Debe extraer el workbook");
    assert_eq!(data.sessions[4].kind, SessionKind::Regular);
    assert_eq!(data.sessions[4].assessment, AssessmentKind::Quiz);
    assert_eq!(data.sessions[13].kind, SessionKind::FinalEval);
}
