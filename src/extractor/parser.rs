//! Fronteira de validação da resposta do modelo
//!
//! Localiza o trecho JSON no texto devolvido, valida o esquema esperado e
//! entrega grupos já normalizados. Nada fora deste módulo lida com o texto
//! bruto da resposta.

use crate::error::{MultaCheckError, Result};
use crate::normalizer::{self, RawVehicle};
use crate::types::VehicleGroup;

/// Extrai o trecho JSON da resposta
///
/// Ordem de busca:
/// 1. bloco ```json ... ```
/// 2. array cru [...]
/// 3. erro
pub fn extract_json(response: &str) -> Result<&str> {
    // Procura um bloco ```json ... ```
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // comprimento de "```json"
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // Procura um array cru [...]
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(MultaCheckError::ApiParse("JSON não encontrado na resposta".to_string()))
}

/// Valida e normaliza a resposta completa em grupos {placa, multas}
pub fn parse_vehicles(response: &str) -> Result<Vec<VehicleGroup>> {
    let json_str = extract_json(response)?;
    let raw: Vec<RawVehicle> = serde_json::from_str(json_str.trim())
        .map_err(|e| MultaCheckError::ApiParse(format!("fora do esquema esperado: {}", e)))?;
    Ok(normalizer::normalize_batch(raw))
}
