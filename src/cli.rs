use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multacheck")]
#[command(about = "Leitor de multas SENATRAN/DETRAN com IA e histórico por placa", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Saída detalhada
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Arquivo de histórico (padrão: ~/.config/multacheck/history.json)
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Processa um aviso de multas (texto ou foto) e atualiza o histórico
    Check {
        /// Arquivo com o conteúdo do portal, ou "-" para ler da entrada padrão
        #[arg(required = true)]
        input: String,

        /// Trata a entrada como imagem (JPEG/PNG/WebP)
        #[arg(short, long)]
        image: bool,
    },

    /// Exibe as multas registradas de uma placa
    Show {
        /// Placa consultada (ex: ACV5H33)
        #[arg(required = true)]
        placa: String,
    },

    /// Alterna a marca "impressa" de multas de uma placa
    Mark {
        /// Placa consultada
        #[arg(required = true)]
        placa: String,

        /// Auto de Infração; omita para escolher interativamente
        auto: Option<String>,
    },

    /// Lista as placas do histórico de consultas
    History {
        /// Apaga todo o histórico
        #[arg(long)]
        clear: bool,
    },

    /// Relatório filtrado com total e exportação CSV
    Report {
        /// Placa exata, ou "all" para todas
        #[arg(long, default_value = "all")]
        placa: String,

        /// Data inicial inclusiva (AAAA-MM-DD)
        #[arg(long)]
        inicio: Option<FilterDate>,

        /// Data final inclusiva (AAAA-MM-DD)
        #[arg(long)]
        fim: Option<FilterDate>,

        /// Exporta CSV; sem valor, usa relatorio_multas_<data>.csv
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        csv: Option<PathBuf>,
    },

    /// Exibe/edita a configuração
    Config {
        /// Define a chave da API Gemini
        #[arg(long)]
        set_api_key: Option<String>,

        /// Mostra a configuração atual
        #[arg(long)]
        show: bool,
    },
}

/// Data de filtro no formato AAAA-MM-DD
#[derive(Clone, Copy, Debug)]
pub struct FilterDate(pub NaiveDate);

impl std::str::FromStr for FilterDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(FilterDate)
            .map_err(|_| format!("Data inválida: {}. Use o formato AAAA-MM-DD", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_filter_date_iso() {
        let date = FilterDate::from_str("2024-01-31").unwrap();
        assert_eq!(date.0, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_filter_date_rejeita_formato_do_portal() {
        assert!(FilterDate::from_str("31/01/2024").is_err());
        assert!(FilterDate::from_str("2024-13-01").is_err());
        assert!(FilterDate::from_str("").is_err());
    }
}
