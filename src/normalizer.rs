//! Normalização dos registros extraídos
//!
//! Converte as formas brutas devolvidas pela extração nas formas internas:
//! - placa canônica: maiúsculas, somente A-Z e 0-9
//! - valor em reais: número JSON direto ou texto em convenção brasileira
//!   ("R$ 1.234,56"), com recuperação local quando o texto vem sujo
//!
//! Campos irrecuperáveis viram None; a normalização nunca derruba o lote.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::types::{Fine, Points, VehicleGroup};

lazy_static! {
    /// Primeira sequência numérica de um texto de valor ("130,16", "1.234,56")
    static ref NUMERIC_RUN: Regex = Regex::new(r"\d+(?:[.,]\d+)*").unwrap();
}

/// Grupo {placa, multas} como sai da fronteira de validação, antes de
/// qualquer canonicalização
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVehicle {
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub fines: Vec<RawFine>,
}

/// Campos brutos de uma multa conforme o esquema de resposta do modelo
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFine {
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub infraction_id: String,
    #[serde(default)]
    pub points: Option<Points>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
}

/// Valor bruto: o esquema pede número, mas o modelo às vezes devolve texto
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

/// Canonicaliza uma placa: maiúsculas e somente alfanuméricos ASCII.
/// Idempotente: uma placa já canônica volta inalterada.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Interpreta um valor monetário textual em convenção brasileira:
/// "." agrupa milhares e "," separa os centavos. Texto sem nenhum
/// dígito vira None, nunca um número inventado.
pub fn parse_amount_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(value) = decimalize(&cleaned).parse::<f64>() {
        return Some(value);
    }
    // Texto fora do padrão: recupera a primeira sequência numérica
    NUMERIC_RUN
        .find(&cleaned)
        .and_then(|m| decimalize(m.as_str()).parse::<f64>().ok())
}

/// Troca a convenção brasileira pela decimal de máquina
fn decimalize(s: &str) -> String {
    if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    }
}

fn normalize_amount(raw: Option<&RawAmount>) -> Option<f64> {
    match raw {
        Some(RawAmount::Number(n)) => Some(*n),
        Some(RawAmount::Text(t)) => parse_amount_text(t),
        None => None,
    }
}

/// Converte um lote bruto em grupos normalizados. Cada multa recebe um
/// identificador local novo; a placa canônica é desnormalizada em cada multa.
/// Grupos de placa vazia são mantidos aqui e descartados pela reconciliação.
pub fn normalize_batch(raw: Vec<RawVehicle>) -> Vec<VehicleGroup> {
    raw.into_iter()
        .map(|vehicle| {
            let plate = normalize_plate(&vehicle.plate);
            let fines = vehicle
                .fines
                .into_iter()
                .map(|fine| normalize_fine(fine, &plate))
                .collect();
            VehicleGroup { plate, fines }
        })
        .collect()
}

fn normalize_fine(raw: RawFine, plate: &str) -> Fine {
    Fine {
        id: Uuid::new_v4().to_string(),
        infraction_id: raw.infraction_id,
        date: raw.date,
        description: raw.description,
        location: raw.location,
        points: raw.points,
        amount: normalize_amount(raw.amount.as_ref()),
        plate: plate.to_string(),
        is_new: false,
        printed: false,
    }
}
