//! Resolución de referencias cruzadas entre jerarquías con claves propias:
//! SubCPMK -> CPL, CPMK -> peso, y totales de la matriz de correlación.

use std::collections::HashMap;
use tracing::warn;
use crate::models::WeightMapping;

/// Peso porcentual como entero: truncamiento hacia cero (`int(float(x))`)
pub fn weight_as_int(value: f64) -> i64 {
    value.trunc() as i64
}

/// Para cada código, la CPL en la misma posición de su primera aparición en
/// `sub_table`. Los códigos sin correspondencia se descartan (se cuentan en
/// un warning).
pub fn map_sub_to_cpl<A, B, C>(sub_codes: &[A], sub_table: &[B], cpl_table: &[C]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
    C: AsRef<str>,
{
    let mut dropped = 0usize;
    let mapped: Vec<String> = sub_codes
        .iter()
        .filter_map(|code| {
            let hit = sub_table
                .iter()
                .position(|s| s.as_ref() == code.as_ref())
                .and_then(|idx| cpl_table.get(idx))
                .map(|cpl| cpl.as_ref().to_string());
            if hit.is_none() {
                dropped += 1;
            }
            hit
        })
        .collect();
    if dropped > 0 {
        warn!(dropped, "SubCPMK sin CPL en la tabla de pesos");
    }
    mapped
}

/// Resultado de resolver SubCPMK contra los registros de la tabla de pesos
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeResolution {
    /// (SubCPMK, CPL) resueltos, en el orden de entrada
    pub pairs: Vec<(String, String)>,
    /// Códigos sin registro en la tabla de pesos
    pub unmatched: Vec<String>,
}

/// Igual que `map_sub_to_cpl`, sobre registros emparejados
pub fn resolve_outcomes<'a, I>(sub_codes: I, mappings: &[WeightMapping]) -> OutcomeResolution
where
    I: IntoIterator<Item = &'a String>,
{
    let mut res = OutcomeResolution::default();
    for code in sub_codes {
        match first_mapping(mappings, code) {
            Some(m) => res.pairs.push((code.clone(), m.outcome_code.clone())),
            None => res.unmatched.push(code.clone()),
        }
    }
    res
}

/// Primer registro de la tabla de pesos para un SubCPMK
pub fn first_mapping<'a>(mappings: &'a [WeightMapping], sub_code: &str) -> Option<&'a WeightMapping> {
    mappings.iter().find(|m| m.subobjective_code == sub_code)
}

/// Suma `values[i]` (truncados a entero) por `keys[i]` y devuelve un total
/// por clave distinta en orden de primera aparición.
pub fn aggregate_weight_by_group<K: AsRef<str>>(keys: &[K], values: &[f64]) -> Vec<(String, i64)> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for (key, value) in keys.iter().zip(values.iter()) {
        let key = key.as_ref();
        let slot = totals.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *slot += weight_as_int(*value);
    }
    order
        .into_iter()
        .map(|k| (k.to_string(), totals.get(k).copied().unwrap_or(0)))
        .collect()
}

/// Totales por columna CPL (en el orden de `ordered_cpl`) acumulando
/// `weight_per_sub[i] / 100.0`. Filas cuya CPL no está en `ordered_cpl` se
/// descartan.
pub fn build_correlation_totals<A, B, C>(
    sub_codes: &[A],
    cpl_per_sub: &[B],
    weight_per_sub: &[f64],
    ordered_cpl: &[C],
) -> Vec<f64>
where
    A: AsRef<str>,
    B: AsRef<str>,
    C: AsRef<str>,
{
    let mut totals = vec![0.0f64; ordered_cpl.len()];
    let rows = sub_codes.len().min(cpl_per_sub.len()).min(weight_per_sub.len());
    for i in 0..rows {
        let cpl = cpl_per_sub[i].as_ref();
        if let Some(col) = ordered_cpl.iter().position(|c| c.as_ref() == cpl) {
            totals[col] += weight_per_sub[i] / 100.0;
        }
    }
    totals
}
