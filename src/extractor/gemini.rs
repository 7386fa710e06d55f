//! Cliente da API Gemini (generateContent)
//!
//! Monta a requisição com instrução de sistema, esquema de resposta JSON e
//! temperatura baixa, e devolve o texto bruto do primeiro candidato.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::ExtractionInput;
use crate::config::Config;
use crate::error::{MultaCheckError, Result};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_INSTRUCTION: &str = "Você é um especialista em processamento de dados do portal \
SENATRAN/DETRAN. Sua missão é ler o conteúdo fornecido, localizar TODAS as PLACAS de veículos \
mencionadas e listar as infrações de cada uma delas separadamente. O 'Auto de Infração' é o \
identificador único de cada multa.";

const TEXT_PROMPT: &str =
    "Identifique TODAS as PLACAS de veículos e extraia as multas do texto a seguir.";

const IMAGE_PROMPT: &str = "Identifique TODAS as PLACAS de veículos e extraia todas as multas \
da imagem. Retorne uma lista para cada placa encontrada.";

/// Requisição da API Gemini
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

/// Resposta da API Gemini
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Esquema imposto à resposta: lista de veículos, cada um com placa e multas
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "description": "Lista de veículos e suas multas encontradas no conteúdo",
        "items": {
            "type": "OBJECT",
            "properties": {
                "plate": {
                    "type": "STRING",
                    "description": "A placa do veículo identificada (ex: ACV5H33)"
                },
                "fines": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "date": {
                                "type": "STRING",
                                "description": "Data e hora da multa (ex: 22/11/2025 10:52)"
                            },
                            "description": {
                                "type": "STRING",
                                "description": "Descrição detalhada da infração"
                            },
                            "location": {
                                "type": "STRING",
                                "description": "Local da infração, se disponível"
                            },
                            "infractionId": {
                                "type": "STRING",
                                "description": "Auto de Infração (ex: J005020835)"
                            },
                            "points": {
                                "type": "STRING",
                                "description": "Pontuação estimada"
                            },
                            "amount": {
                                "type": "NUMBER",
                                "description": "Valor em reais, apenas números (ex: 130.16)"
                            }
                        },
                        "required": ["date", "description", "infractionId", "amount"]
                    }
                }
            },
            "required": ["plate", "fines"]
        }
    })
}

fn build_request(input: ExtractionInput) -> GeminiRequest {
    let parts = match input {
        ExtractionInput::Text(text) => {
            vec![Part::Text { text: format!("{}\n\n{}", TEXT_PROMPT, text) }]
        }
        ExtractionInput::Image { data, mime_type } => vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type,
                    data: base64::engine::general_purpose::STANDARD.encode(data),
                },
            },
            Part::Text { text: IMAGE_PROMPT.to_string() },
        ],
    };

    GeminiRequest {
        contents: vec![Content { parts }],
        system_instruction: Content {
            parts: vec![Part::Text { text: SYSTEM_INSTRUCTION.to_string() }],
        },
        generation_config: GenerationConfig {
            temperature: 0.1,
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Cliente HTTP com a chave e o modelo configurados
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| MultaCheckError::ApiCall(e.to_string()))?;
        Ok(Self { http, api_key, model: config.model.clone() })
    }

    /// Envia o conteúdo e devolve o texto JSON bruto do modelo
    pub async fn generate(&self, input: ExtractionInput) -> Result<String> {
        let request = build_request(input);
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| MultaCheckError::ApiCall(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MultaCheckError::ApiCall(format!("HTTP {}", response.status())));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| MultaCheckError::ApiParse(e.to_string()))?;

        payload
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| MultaCheckError::ApiParse("resposta vazia do modelo".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // Serialização de requisição/resposta
    // =============================================

    #[test]
    fn test_request_texto_serializa_campos_da_api() {
        let request = build_request(ExtractionInput::Text("PLACA ACV5H33".to_string()));
        let json = serde_json::to_string(&request).expect("falha de serialização");
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"systemInstruction\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"temperature\":0.1"));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"responseSchema\""));
        assert!(json.contains("PLACA ACV5H33"));
    }

    #[test]
    fn test_request_imagem_embute_base64() {
        let request = build_request(ExtractionInput::Image {
            data: vec![0xFF, 0xD8, 0xFF],
            mime_type: "image/jpeg".to_string(),
        });
        let json = serde_json::to_string(&request).expect("falha de serialização");
        assert!(json.contains("\"inline_data\""));
        assert!(json.contains("\"mime_type\":\"image/jpeg\""));
        assert!(json.contains("\"data\":\"/9j/\""));
    }

    #[test]
    fn test_part_text_serializa_sem_tag() {
        let part = Part::Text { text: "Olá".to_string() };
        let json = serde_json::to_string(&part).expect("falha de serialização");
        assert_eq!(json, r#"{"text":"Olá"}"#);
    }

    #[test]
    fn test_response_deserializa_candidato() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "[{\"plate\": \"ACV5H33\", \"fines\": []}]"
                    }]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("falha de deserialização");
        assert_eq!(response.candidates.len(), 1);
        assert!(response.candidates[0].content.parts[0].text.contains("ACV5H33"));
    }

    #[test]
    fn test_schema_exige_auto_de_infracao() {
        let schema = response_schema();
        let required = schema["items"]["properties"]["fines"]["items"]["required"]
            .as_array()
            .unwrap();
        assert!(required.iter().any(|v| v == "infractionId"));
        assert!(required.iter().any(|v| v == "amount"));
    }
}
