//! Marcação interativa de multas impressas
//!
//! Sessão de terminal sobre a projeção de uma placa: o usuário alterna a
//! marca "impressa" multa a multa e cada alternância é gravada na hora.

use std::path::Path;

use dialoguer::Input;

use crate::app::{self, AppEvent, AppState};
use crate::display::format_brl;
use crate::error::{MultaCheckError, Result};
use crate::history::HistoryFile;
use crate::types::Fine;

/// Ação escolhida na sessão
pub enum MarkAction {
    /// Alterna a multa da posição (índice zero-based)
    Toggle(usize),
    /// Entrada fora do intervalo ou não numérica
    Invalid,
    /// Encerra a sessão
    Quit,
}

/// Lista numerada da projeção, com a marca atual de cada multa
fn print_numbered(fines: &[Fine]) {
    for (i, fine) in fines.iter().enumerate() {
        let mark = if fine.printed { "x" } else { " " };
        println!(
            "  [{}] {:>2}. {}  {}  {}  {}",
            mark,
            i + 1,
            fine.infraction_id,
            fine.date,
            format_brl(fine.amount),
            fine.description,
        );
    }
}

fn prompt_mark_action(total: usize) -> Result<MarkAction> {
    let input: String = Input::new()
        .with_prompt("Número para alternar (q: sair)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| MultaCheckError::Interaction(e.to_string()))?;

    let trimmed = input.trim();

    match trimmed {
        "" | "q" | "Q" => Ok(MarkAction::Quit),
        _ => match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 && n <= total => Ok(MarkAction::Toggle(n - 1)),
            _ => Ok(MarkAction::Invalid),
        },
    }
}

/// Sessão interativa sobre a projeção já carregada em `state`.
/// Cada alternância é persistida imediatamente no arquivo de histórico.
pub fn run_interactive_mark(
    mut state: AppState,
    history_file: &mut HistoryFile,
    history_path: &Path,
) -> Result<()> {
    if state.fines.is_empty() {
        println!("Nenhuma multa registrada para esta placa.");
        return Ok(());
    }

    println!("Operação: digite o número da multa para alternar a marca, q para sair\n");

    loop {
        print_numbered(&state.fines);
        println!();

        match prompt_mark_action(state.fines.len())? {
            MarkAction::Toggle(index) => {
                let fine_id = state.fines[index].id.clone();
                let infraction = state.fines[index].infraction_id.clone();
                state = app::reduce(state, AppEvent::TogglePrinted { fine_id });

                history_file.replace(state.history.clone());
                history_file.save(history_path)?;

                let marked = state.fines[index].printed;
                println!(
                    "  → {} {}\n",
                    infraction,
                    if marked { "marcada como impressa" } else { "desmarcada" }
                );
            }
            MarkAction::Invalid => {
                println!("  → Entrada inválida\n");
            }
            MarkAction::Quit => break,
        }
    }

    Ok(())
}
