//! Colaborador externo de extração
//!
//! Converte o conteúdo colado do portal (texto ou foto) em grupos
//! {placa, multas} estruturados, via API Gemini. O processamento do texto
//! bruto acontece inteiramente do lado de fora; aqui só entram a chamada,
//! a fronteira de validação e a normalização.

pub mod gemini;
pub mod parser;

pub use gemini::GeminiClient;

use crate::config::Config;
use crate::error::Result;
use crate::types::VehicleGroup;

/// Conteúdo submetido à extração
#[derive(Debug, Clone)]
pub enum ExtractionInput {
    /// Texto copiado do portal
    Text(String),
    /// Foto ou captura de tela do portal
    Image { data: Vec<u8>, mime_type: String },
}

/// Extrai e normaliza os grupos de um conteúdo
pub async fn extract(config: &Config, input: ExtractionInput) -> Result<Vec<VehicleGroup>> {
    let client = GeminiClient::new(config)?;
    let response = client.generate(input).await?;
    parser::parse_vehicles(&response)
}
