//! multacheck - leitor de multas SENATRAN/DETRAN
//!
//! Núcleo da aplicação: extração via IA de avisos colados pelo usuário,
//! reconciliação contra o histórico por placa, relatórios filtrados e
//! exportação CSV.
//!
//! Módulos principais:
//! - `extractor`: chamada à API Gemini e fronteira de validação
//! - `normalizer`: canonicalização de placas e valores
//! - `recon`: casamento lote × histórico por Auto de Infração
//! - `history`: documento persistido com limite de retenção
//! - `report` / `export`: consultas filtradas e CSV
//! - `app`: estado da sessão e transições puras

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod extractor;
pub mod history;
pub mod mark;
pub mod normalizer;
pub mod recon;
pub mod report;
pub mod types;

pub use error::{MultaCheckError, Result};
pub use types::{Fine, Points, VehicleGroup};
