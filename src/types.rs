//! Tipos centrais do domínio
//!
//! Compartilhados entre extração, reconciliação, histórico e relatório.
//! Os nomes de campo seguem o documento JSON persistido (camelCase).

use serde::{Deserialize, Serialize};

/// Pontuação da infração como vem do portal: às vezes número, às vezes texto
/// ("4" ou "Gravíssima - 7 pts"). Nenhuma aritmética é feita sobre ela.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Points {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Points::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Points::Number(n) => write!(f, "{}", n),
            Points::Text(t) => write!(f, "{}", t),
        }
    }
}

/// Uma multa de trânsito vinculada a uma placa
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fine {
    /// Identificador local gerado na normalização; serve para listagem e
    /// seleção na sessão, nunca para casamento entre lotes
    pub id: String,

    /// Auto de Infração: identificador oficial, chave natural da multa
    pub infraction_id: String,

    pub date: String, // DD/MM/AAAA HH:MM, como exibido pelo portal

    pub description: String,

    pub location: String,

    /// Pontuação quando o portal informa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Points>,

    /// Valor em reais; None quando o valor bruto não continha nenhum número
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    pub plate: String,

    /// Novidade frente ao histórico da placa no momento da reconciliação;
    /// sempre false na cópia persistida
    pub is_new: bool,

    /// Marcada como impressa/tratada pelo usuário; preservada entre lotes
    pub printed: bool,
}

/// Um grupo {placa, multas} de um lote extraído, já normalizado
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleGroup {
    pub plate: String,
    pub fines: Vec<Fine>,
}
