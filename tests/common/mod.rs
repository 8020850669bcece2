// Datos de prueba compartidos: la asignatura "Algoritma" con 14 semanas,
// construida con los mismos extractores que usa la aplicación.
#![allow(dead_code)]

use std::path::Path;
use rpsgen::algorithm::{build_plan, PlanDataset};
use rpsgen::excel::curriculum::{parse_course_info, parse_outcomes};
use rpsgen::excel::course_data::parse_course_workbook;
use rpsgen::excel::io::{col, SheetGrid};
use rpsgen::excel::{SHEET_COURSES, SHEET_MAPPING};

pub const COURSE: &str = "Algoritma";
pub const YEAR: &str = "2025";

/// semana, SubCPMK, indicador, criterio, materia, peso, referencia
pub type WeekRow = [&'static str; 7];

pub const WEEKS: [WeekRow; 14] = [
    ["1", "S1", "Mampu membuat flowchart", "Tugas: Flowchart [H1]", "Pengantar algoritma", "5", "Buku A"],
    ["2", "S1", "Mampu memahami variabel", "Kuis: Variabel [SP1]", "Variabel dan tipe data", "5", "Buku A"],
    ["3", "S2", "Mampu berdiskusi", "Diskusi kelompok", "Operator", "5", "Buku A"],
    ["4", "S2", "Mampu membuat percabangan", "Tugas: Percabangan [H1]", "Percabangan", "5", "Buku A"],
    ["5", "S2", "Mampu membuat perulangan", "Kuis: Perulangan", "Perulangan", "5", "Buku B"],
    ["6", "S3", "Mampu mempresentasikan", "Presentasi makalah [A1]", "Array", "5", "Buku B"],
    ["7", "S3", "Mampu mengolah array", "Tugas: Array", "Array lanjut", "5", "Buku B"],
    ["8", "S1", "Evaluasi UTS", "Evaluasi UTS", "Evaluasi UTS", "20", "-"],
    ["9", "S3", "Mampu membuat fungsi", "Kuis: Fungsi", "Fungsi", "5", "Buku A"],
    ["10", "S3", "Mampu berdiskusi", "Diskusi", "Prosedur", "5", "Buku A"],
    ["11", "S2", "Mampu membuat rekursi", "Tugas: Rekursi", "Proyek Akhir: Aplikasi", "5", "Buku B"],
    ["12", "S1", "Mampu mengurutkan data", "Kuis: Sorting", "Sorting", "5", "Buku B"],
    ["13", "S1", "Mampu berdiskusi", "Diskusi", "Searching", "5", "Buku A"],
    ["14", "S2", "Evaluasi UAS", "Evaluasi UAS", "Evaluasi UAS", "20", "-"],
];

/// Escribe `value` en la fila `r` (0-based), columna por letras
pub fn put(rows: &mut Vec<Vec<String>>, r: usize, letters: &str, value: &str) {
    let c = col(letters);
    if rows.len() <= r {
        rows.resize_with(r + 1, Vec::new);
    }
    let row = &mut rows[r];
    if row.len() <= c {
        row.resize(c + 1, String::new());
    }
    row[c] = value.to_string();
}

/// Hoja "9. Susunan Mata Kuliah"
pub fn curriculum_course_rows() -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    put(&mut rows, 1, "D", "Nama Mata Kuliah");
    for (r, (code, name, sks)) in [("1101", COURSE, "3"), ("1102", "Basis Data", "2")].iter().enumerate() {
        let r = r + 2;
        put(&mut rows, r, "C", code);
        put(&mut rows, r, "D", name);
        put(&mut rows, r, "E", sks);
        put(&mut rows, r, "N", "1");
        put(&mut rows, r, "O", "Inti");
    }
    rows
}

/// Hoja "15. Pemetaan MK-CPMK-Su". La tercera fila deja vacías CPMK y CPL
/// como lo haría una celda combinada.
pub fn curriculum_mapping_rows() -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    put(&mut rows, 1, "B", "Mata Kuliah");
    let entries: [[&str; 7]; 4] = [
        [COURSE, "CPMK1", "Memahami dasar algoritma", "S1", "Mampu menjelaskan algoritma", "CPL1", "Mampu berpikir logis"],
        [COURSE, "CPMK2", "Menerapkan struktur kontrol", "S2", "Mampu menerapkan struktur kontrol", "CPL2", "Mampu memecahkan masalah"],
        [COURSE, "", "", "S3", "Mampu mengolah data terstruktur", "", ""],
        ["Basis Data", "CPMK9", "Merancang basis data", "S9", "Mampu normalisasi", "CPL9", "Mampu merancang sistem"],
    ];
    for (i, e) in entries.iter().enumerate() {
        let r = i + 2;
        for (letters, value) in ["B", "C", "D", "E", "F", "H", "I"].iter().zip(e.iter()) {
            if !value.is_empty() {
                put(&mut rows, r, letters, value);
            }
        }
    }
    rows
}

/// Hoja "Algoritma" del workbook subido, con las semanas dadas
pub fn course_rows_with(weeks: &[WeekRow]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for (letters, header) in [
        ("A", "Pustaka Utama"), ("B", "Pustaka Pendukung"), ("C", "Team Teaching"), ("D", "NIK"),
        ("E", "Matkul Syarat"), ("G", "Minggu"), ("H", "SubCPMK"), ("I", "Indikator"), ("J", "Kriteria"),
        ("K", "Materi"), ("L", "Bobot"), ("M", "Pustaka"), ("O", "CPL"), ("P", "CPMK"), ("Q", "SubCPMK"),
        ("Y", "Total Bobot"), ("AA", "Kelas"),
    ] {
        put(&mut rows, 0, letters, header);
    }

    put(&mut rows, 1, "A", "Buku A");
    put(&mut rows, 1, "B", "Buku B");
    put(&mut rows, 1, "C", "Dosen A");
    put(&mut rows, 2, "C", "Dosen B");
    put(&mut rows, 1, "D", "123");

    for (i, w) in weeks.iter().enumerate() {
        let r = i + 1;
        for (letters, value) in ["G", "H", "I", "J", "K", "L", "M"].iter().zip(w.iter()) {
            put(&mut rows, r, letters, value);
        }
    }

    for (r, (cpl, cpmk, sub, total)) in [("CPL1", "CPMK1", "S1", "40"), ("CPL2", "CPMK2", "S2", "60")]
        .iter()
        .enumerate()
    {
        let r = r + 1;
        put(&mut rows, r, "O", cpl);
        put(&mut rows, r, "P", cpmk);
        put(&mut rows, r, "Q", sub);
        put(&mut rows, r, "Y", total);
    }

    put(&mut rows, 1, "AA", "A");
    put(&mut rows, 1, "AB", "40");
    put(&mut rows, 1, "AC", "Senin");
    put(&mut rows, 1, "AD", "R1");
    put(&mut rows, 1, "AE", "2025/2026");
    rows
}

pub fn course_rows() -> Vec<Vec<String>> {
    course_rows_with(&WEEKS)
}

/// Dataset resuelto a partir de filas de la hoja de la asignatura
pub fn plan_from_rows(rows: Vec<Vec<String>>) -> PlanDataset {
    let courses = SheetGrid::from_rows(SHEET_COURSES, curriculum_course_rows());
    let mapping = SheetGrid::from_rows(SHEET_MAPPING, curriculum_mapping_rows());
    let info = parse_course_info(&courses, COURSE).expect("la asignatura debe existir");
    let outcomes = parse_outcomes(&mapping, COURSE);
    let data = parse_course_workbook(&SheetGrid::from_rows(COURSE, rows)).expect("workbook válido");
    build_plan(info, YEAR, outcomes, data).expect("dataset válido")
}

pub fn algoritma_plan() -> PlanDataset {
    plan_from_rows(course_rows())
}

/// Escribe un `.xlsx` real con las hojas dadas. Los valores numéricos se
/// guardan como números, igual que en los workbooks reales.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<String>>)]) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    for (name, rows) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*name).expect("nombre de hoja válido");
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                match value.parse::<f64>() {
                    Ok(n) => ws.write_number(r as u32, c as u16, n).expect("escritura"),
                    Err(_) => ws.write_string(r as u32, c as u16, value).expect("escritura"),
                };
            }
        }
    }
    workbook.save(path).expect("guardar workbook");
}
