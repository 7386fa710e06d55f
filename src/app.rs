//! Estado da aplicação e transições puras
//!
//! O estado em memória (projeção atual, histórico, status) é um valor único;
//! cada evento produz um novo estado via `reduce`, sem efeitos colaterais.
//! Persistir o histórico é responsabilidade do chamador, depois de cada
//! evento que o altera.

use crate::error::MultaCheckError;
use crate::history::VehicleRecord;
use crate::recon;
use crate::types::{Fine, VehicleGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Estado completo da sessão
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Placas da consulta atual, na ordem do lote
    pub current_plates: Vec<String>,
    /// Projeção transitória exibida ao usuário (carrega isNew)
    pub fines: Vec<Fine>,
    /// Fonte de verdade persistível
    pub history: Vec<VehicleRecord>,
    pub status: AppStatus,
    pub error_msg: String,
}

impl AppState {
    pub fn with_history(history: Vec<VehicleRecord>) -> Self {
        Self { history, ..Self::default() }
    }
}

/// Eventos que movem o estado
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Extração externa iniciada
    ExtractionStarted,
    /// Lote extraído e normalizado com sucesso
    BatchExtracted { groups: Vec<VehicleGroup>, checked_at: String },
    /// Falha do colaborador externo; a mensagem já vem pronta para o usuário
    ExtractionFailed { message: String },
    /// Recarrega na projeção o registro de uma placa do histórico
    LoadRecord { plate: String },
    /// Alterna a marca "impressa" de uma multa da projeção
    TogglePrinted { fine_id: String },
    /// Descarta a projeção e volta ao estado inicial (o histórico fica)
    Clear,
}

/// Transição de estado. Eventos de falha preservam a projeção anterior;
/// somente BatchExtracted e TogglePrinted podem alterar o histórico.
pub fn reduce(state: AppState, event: AppEvent) -> AppState {
    match event {
        AppEvent::ExtractionStarted => AppState {
            status: AppStatus::Loading,
            error_msg: String::new(),
            ..state
        },

        AppEvent::BatchExtracted { groups, checked_at } => {
            match recon::reconcile(&state.history, &groups, &checked_at) {
                Ok(outcome) => AppState {
                    current_plates: outcome.plates,
                    fines: outcome.fines,
                    history: outcome.history,
                    status: AppStatus::Success,
                    error_msg: String::new(),
                },
                Err(err) => AppState {
                    status: AppStatus::Error,
                    error_msg: err.to_string(),
                    ..state
                },
            }
        }

        AppEvent::ExtractionFailed { message } => AppState {
            status: AppStatus::Error,
            error_msg: message,
            ..state
        },

        AppEvent::LoadRecord { plate } => match state.history.iter().find(|r| r.plate == plate) {
            Some(record) => {
                let fines = record
                    .fines
                    .iter()
                    .map(|fine| {
                        let mut flat = fine.clone();
                        flat.plate = record.plate.clone();
                        flat
                    })
                    .collect();
                AppState {
                    current_plates: vec![record.plate.clone()],
                    fines,
                    status: AppStatus::Success,
                    error_msg: String::new(),
                    ..state
                }
            }
            None => AppState {
                status: AppStatus::Error,
                error_msg: MultaCheckError::PlateNotFound(plate).to_string(),
                ..state
            },
        },

        AppEvent::TogglePrinted { fine_id } => {
            let outcome = recon::toggle_printed(&state.fines, &state.history, &fine_id);
            AppState { fines: outcome.fines, history: outcome.history, ..state }
        }

        AppEvent::Clear => AppState {
            history: state.history,
            ..AppState::default()
        },
    }
}
