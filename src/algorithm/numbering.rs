//! Renumeración y agrupación de filas semanales.
//!
//! Las funciones con nombre "público" (`number_materials`, `number_criteria`,
//! `number_indicators`) deciden qué filas son de evaluación buscando los
//! marcadores en el texto. Las variantes `*_where` reciben el predicado
//! explícito; el constructor del dataset las usa con `SessionKind`, asignado
//! una sola vez al extraer.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;
use regex::Regex;

/// Marcadores de filas de evaluación (comparación por subcadena, sensible a mayúsculas)
pub const EVALUATION_MARKERS: &[&str] = &["Evaluasi UTS", "Evaluasi UAS"];

/// Marcadores que excluyen una materia de la numeración
pub const MATERIAL_EXCLUDE_MARKERS: &[&str] = &["Evaluasi UTS", "Evaluasi UAS", "Proyek Akhir"];

pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

/// Numera materias con un contador compartido que sólo avanza en las filas
/// no excluidas: `"{n}. {texto}"`.
pub fn number_materials<S: AsRef<str>>(materials: &[S], exclude_markers: &[&str]) -> Vec<String> {
    number_materials_where(materials, |_, m| contains_any(m, exclude_markers))
}

pub fn number_materials_where<S: AsRef<str>>(
    materials: &[S],
    mut skip: impl FnMut(usize, &str) -> bool,
) -> Vec<String> {
    let mut counter = 0usize;
    materials
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let m = m.as_ref();
            if skip(i, m) {
                m.to_string()
            } else {
                counter += 1;
                format!("{}. {}", counter, m)
            }
        })
        .collect()
}

/// Numera criterios `"{tipo}: {detalle}"` con un contador por tipo:
/// `"Tugas: x"` -> `"Tugas 1:x"`. Evaluaciones y textos sin `:` pasan igual.
pub fn number_criteria<S: AsRef<str>>(criteria: &[S]) -> Vec<String> {
    number_criteria_where(criteria, |_, c| contains_any(c, EVALUATION_MARKERS))
}

pub fn number_criteria_where<S: AsRef<str>>(
    criteria: &[S],
    mut skip: impl FnMut(usize, &str) -> bool,
) -> Vec<String> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    criteria
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let c = c.as_ref();
            if skip(i, c) {
                return c.to_string();
            }
            match c.split_once(':') {
                Some((kind, detail)) => {
                    let kind = kind.trim();
                    let count = counters.entry(kind.to_string()).or_insert(0);
                    *count += 1;
                    format!("{} {}:{}", kind, count, detail.trim())
                }
                None => c.to_string(),
            }
        })
        .collect()
}

/// Numera indicadores dentro de su SubCPMK: `"{pos}.{k} {indicador}"`, con
/// `pos` la posición 1-based del código en `all_codes` y `k` el contador
/// propio de ese código.
pub fn number_indicators<A, B, C>(sub_per_row: &[A], all_codes: &[B], indicators: &[C]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
    C: AsRef<str>,
{
    number_indicators_where(sub_per_row, all_codes, indicators, |_, ind| contains_any(ind, EVALUATION_MARKERS))
}

pub fn number_indicators_where<A, B, C>(
    sub_per_row: &[A],
    all_codes: &[B],
    indicators: &[C],
    mut skip: impl FnMut(usize, &str) -> bool,
) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
    C: AsRef<str>,
{
    let mut counters: HashMap<&str, usize> = HashMap::new();
    sub_per_row
        .iter()
        .zip(indicators.iter())
        .enumerate()
        .map(|(i, (sub, ind))| {
            let (sub, ind) = (sub.as_ref(), ind.as_ref());
            if ind.is_empty() {
                return String::new();
            }
            if skip(i, ind) {
                return ind.to_string();
            }
            match all_codes.iter().position(|c| c.as_ref() == sub) {
                Some(pos) => {
                    let count = counters.entry(sub).or_insert(0);
                    *count += 1;
                    format!("{}.{} {}", pos + 1, count, ind)
                }
                // código desconocido: texto crudo
                None => ind.to_string(),
            }
        })
        .collect()
}

/// Conjunto de `parallel[i]` cuyas filas tienen `"[{tag}]"` en el criterio
pub fn extract_by_tag<A, B>(tag: &str, criteria: &[A], parallel: &[B]) -> BTreeSet<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let needle = format!("[{}]", tag);
    criteria
        .iter()
        .zip(parallel.iter())
        .filter(|(c, _)| c.as_ref().contains(&needle))
        .map(|(_, p)| p.as_ref().to_string())
        .collect()
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(.*?)\]").expect("regex de etiquetas válida"))
}

/// Contenido de todas las etiquetas entre corchetes, en orden de aparición
pub fn rubric_tags_in(text: &str) -> Vec<String> {
    tag_regex()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
