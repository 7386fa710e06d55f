//! Motor de reconciliação lote × histórico
//!
//! Casa um lote recém-extraído com o histórico persistido, por placa e por
//! Auto de Infração:
//! - marca novidade (isNew) quando o Auto não existia no registro anterior
//! - preserva a marca "impressa" das multas reimportadas
//! - substitui integralmente as multas da placa no histórico ("última
//!   consulta vence"); a política fica isolada em plate_fines_from_projection
//!
//! Datas e valores nunca entram no casamento: a identidade é somente o
//! Auto de Infração dentro da placa.

use crate::error::{MultaCheckError, Result};
use crate::history::{self, VehicleRecord};
use crate::types::{Fine, VehicleGroup};

/// Resultado de uma reconciliação bem-sucedida
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Projeção achatada do lote, na ordem dos grupos e das multas recebidas
    pub fines: Vec<Fine>,
    /// Placas identificadas, na ordem do lote
    pub plates: Vec<String>,
    /// Novo conteúdo do histórico: placas do lote à frente, limite aplicado
    pub history: Vec<VehicleRecord>,
}

/// Resultado de alternar a marca "impressa" de uma multa da projeção
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub fines: Vec<Fine>,
    pub history: Vec<VehicleRecord>,
}

/// Reconcilia um lote normalizado contra o histórico atual.
///
/// Grupos de placa vazia são descartados em silêncio. Um lote sem nenhum
/// grupo aproveitável é EmptyResult: nada muda no histórico.
pub fn reconcile(
    history: &[VehicleRecord],
    groups: &[VehicleGroup],
    checked_at: &str,
) -> Result<Reconciliation> {
    if groups.is_empty() {
        return Err(MultaCheckError::EmptyResult);
    }

    let mut fines = Vec::new();
    let mut plates = Vec::new();

    for group in groups {
        if group.plate.is_empty() {
            continue;
        }
        let previous = history.iter().find(|r| r.plate == group.plate);
        plates.push(group.plate.clone());
        for fine in &group.fines {
            fines.push(mark_against_history(fine, &group.plate, previous));
        }
    }

    if plates.is_empty() {
        return Err(MultaCheckError::EmptyResult);
    }

    let records: Vec<VehicleRecord> = plates
        .iter()
        .map(|plate| VehicleRecord {
            plate: plate.clone(),
            fines: plate_fines_from_projection(&fines, plate),
            last_check: checked_at.to_string(),
        })
        .collect();

    let history = history::upsert_front(history, &records);

    Ok(Reconciliation { fines, plates, history })
}

/// Marca uma multa do lote contra o registro anterior da placa: novidade por
/// Auto de Infração e marca "impressa" herdada (padrão false para inéditas)
fn mark_against_history(fine: &Fine, plate: &str, previous: Option<&VehicleRecord>) -> Fine {
    let earlier = previous.and_then(|record| {
        record.fines.iter().find(|f| f.infraction_id == fine.infraction_id)
    });
    let mut marked = fine.clone();
    marked.plate = plate.to_string();
    marked.is_new = earlier.is_none();
    marked.printed = earlier.map(|f| f.printed).unwrap_or(false);
    marked
}

/// Política de mesclagem do histórico: o registro da placa recebe TODAS as
/// multas daquela placa presentes na projeção, substituindo o que havia
/// antes. Multas ausentes do lote mais recente deixam de existir no
/// registro. Trocar a política de retenção é trocar esta função.
pub fn plate_fines_from_projection(fines: &[Fine], plate: &str) -> Vec<Fine> {
    fines
        .iter()
        .filter(|f| f.plate == plate)
        .map(stored_copy)
        .collect()
}

/// Cópia persistível: novidade é um efeito de exibição da sessão, o
/// documento gravado nunca a carrega
fn stored_copy(fine: &Fine) -> Fine {
    let mut stored = fine.clone();
    stored.is_new = false;
    stored
}

/// Alterna a marca "impressa" da multa identificada por `fine_id` na projeção
/// e rederiva as multas de cada placa presente na projeção nos registros já
/// existentes do histórico. A ordem do histórico e o lastCheck de cada
/// registro não mudam; um identificador desconhecido deixa tudo como está.
pub fn toggle_printed(
    projection: &[Fine],
    history: &[VehicleRecord],
    fine_id: &str,
) -> ToggleOutcome {
    let fines: Vec<Fine> = projection
        .iter()
        .map(|f| {
            if f.id == fine_id {
                let mut flipped = f.clone();
                flipped.printed = !f.printed;
                flipped
            } else {
                f.clone()
            }
        })
        .collect();

    let mut plates_in_view: Vec<&str> = Vec::new();
    for fine in &fines {
        if !fine.plate.is_empty() && !plates_in_view.contains(&fine.plate.as_str()) {
            plates_in_view.push(&fine.plate);
        }
    }

    let history = history
        .iter()
        .map(|record| {
            if plates_in_view.contains(&record.plate.as_str()) {
                VehicleRecord {
                    fines: plate_fines_from_projection(&fines, &record.plate),
                    ..record.clone()
                }
            } else {
                record.clone()
            }
        })
        .collect();

    ToggleOutcome { fines, history }
}
