use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;

use multacheck::app::{self, AppEvent, AppState, AppStatus};
use multacheck::cli::{Cli, Commands};
use multacheck::config::Config;
use multacheck::error::{MultaCheckError, Result};
use multacheck::extractor::{self, ExtractionInput};
use multacheck::history::HistoryFile;
use multacheck::{display, export, mark, normalizer, report};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let history_path = match cli.history_file {
        Some(path) => path,
        None => HistoryFile::default_path()?,
    };

    match cli.command {
        Commands::Check { input, image } => {
            println!("🚗 multacheck - consulta de multas\n");

            // 1. Entrada
            println!("[1/3] Lendo entrada...");
            let content = read_input(&input, image)?;
            println!("✔ Entrada carregada\n");

            // 2. Extração + reconciliação
            println!("[2/3] Extraindo multas com IA...");
            let mut history_file = HistoryFile::load(&history_path);
            let mut state = AppState::with_history(history_file.records().to_vec());
            state = app::reduce(state, AppEvent::ExtractionStarted);

            let event = match extractor::extract(&config, content).await {
                Ok(groups) => {
                    if cli.verbose {
                        println!("  {} grupo(s) retornado(s) pela extração", groups.len());
                    }
                    AppEvent::BatchExtracted { groups, checked_at: local_timestamp() }
                }
                Err(err) => AppEvent::ExtractionFailed { message: err.to_string() },
            };

            state = app::reduce(state, event);

            if state.status == AppStatus::Error {
                eprintln!("❌ {}", state.error_msg);
                std::process::exit(1);
            }
            println!(
                "✔ {} multa(s) em {} placa(s)\n",
                state.fines.len(),
                state.current_plates.len()
            );

            // 3. Persistência
            println!("[3/3] Salvando histórico...");
            history_file.replace(state.history.clone());
            history_file.save(&history_path)?;
            println!("✔ Histórico atualizado: {}\n", history_path.display());

            display::print_fines_table(&state.fines);

            let novas = state.fines.iter().filter(|f| f.is_new && !f.printed).count();
            if novas > 0 {
                println!("\n✅ {} multa(s) nova(s) desde a última consulta", novas);
            } else {
                println!("\n✅ Consulta concluída, nenhuma novidade");
            }
        }

        Commands::Show { placa } => {
            let plate = normalizer::normalize_plate(&placa);
            let history_file = HistoryFile::load(&history_path);
            let last_check = history_file.find(&plate).map(|r| r.last_check.clone());

            let mut state = AppState::with_history(history_file.records().to_vec());
            state = app::reduce(state, AppEvent::LoadRecord { plate: plate.clone() });
            if state.status == AppStatus::Error {
                eprintln!("❌ {}", state.error_msg);
                std::process::exit(1);
            }

            println!(
                "🚗 Placa {} - última consulta: {}\n",
                plate,
                last_check.unwrap_or_default()
            );
            display::print_fines_table(&state.fines);
        }

        Commands::Mark { placa, auto } => {
            let plate = normalizer::normalize_plate(&placa);
            let mut history_file = HistoryFile::load(&history_path);

            let mut state = AppState::with_history(history_file.records().to_vec());
            state = app::reduce(state, AppEvent::LoadRecord { plate: plate.clone() });
            if state.status == AppStatus::Error {
                eprintln!("❌ {}", state.error_msg);
                std::process::exit(1);
            }

            match auto {
                Some(auto) => {
                    let fine = state
                        .fines
                        .iter()
                        .find(|f| f.infraction_id == auto)
                        .ok_or_else(|| MultaCheckError::InfractionNotFound(auto.clone()))?;
                    let fine_id = fine.id.clone();
                    let marked = !fine.printed;

                    state = app::reduce(state, AppEvent::TogglePrinted { fine_id });
                    history_file.replace(state.history.clone());
                    history_file.save(&history_path)?;

                    println!(
                        "✔ {} {}",
                        auto,
                        if marked { "marcada como impressa" } else { "desmarcada" }
                    );
                }
                None => {
                    println!("🖨️ multacheck - marcação de multas - placa {}\n", plate);
                    mark::run_interactive_mark(state, &mut history_file, &history_path)?;
                }
            }
        }

        Commands::History { clear } => {
            let mut history_file = HistoryFile::load(&history_path);

            if clear {
                history_file.clear();
                history_file.save(&history_path)?;
                println!("✔ Histórico apagado");
            } else if history_file.is_empty() {
                println!("Histórico vazio.");
            } else {
                println!("Consultas recentes ({}):\n", history_file.len());
                for record in history_file.records() {
                    println!(
                        "  {:<9} {:>2} multa(s)  última consulta: {}",
                        record.plate,
                        record.fines.len(),
                        record.last_check
                    );
                }
            }
        }

        Commands::Report { placa, inicio, fim, csv } => {
            let history_file = HistoryFile::load(&history_path);

            let plate = if placa.eq_ignore_ascii_case("all") {
                report::PlateFilter::All
            } else {
                report::PlateFilter::Plate(normalizer::normalize_plate(&placa))
            };
            let filter = report::ReportFilter {
                plate,
                start: inicio.map(|d| d.0),
                end: fim.map(|d| d.0),
            };

            let result = report::build_report(history_file.records(), &filter);
            display::print_report(&result);

            if let Some(csv_path) = csv {
                if result.fines.is_empty() {
                    println!("\nNada a exportar para este filtro.");
                } else {
                    let path = if csv_path.as_os_str().is_empty() {
                        PathBuf::from(export::default_file_name(Local::now().date_naive()))
                    } else {
                        csv_path
                    };
                    export::write_csv(&path, &result.fines)?;
                    println!("\n✔ CSV exportado: {}", path.display());
                }
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ Chave de API configurada");
            }

            if show {
                println!("Configuração:");
                println!("  Modelo: {}", config.model);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!(
                    "  Chave de API: {}",
                    if config.api_key.is_some() { "configurada" } else { "não configurada" }
                );
                println!("  Histórico: {}", history_path.display());
            }
        }
    }

    Ok(())
}

/// Lê o conteúdo da consulta: arquivo de texto, entrada padrão ("-") ou imagem
fn read_input(source: &str, image: bool) -> Result<ExtractionInput> {
    if image {
        let path = Path::new(source);
        if !path.exists() {
            return Err(MultaCheckError::FileNotFound(source.to_string()));
        }
        let data = std::fs::read(path)?;
        return Ok(ExtractionInput::Image {
            data,
            mime_type: mime_type_for(path).to_string(),
        });
    }

    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        let path = Path::new(source);
        if !path.exists() {
            return Err(MultaCheckError::FileNotFound(source.to_string()));
        }
        std::fs::read_to_string(path)?
    };

    if text.trim().is_empty() {
        return Err(MultaCheckError::EmptyInput);
    }
    Ok(ExtractionInput::Text(text))
}

/// MIME pela extensão do arquivo; sem extensão conhecida, assume JPEG
fn mime_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Data e hora local no formato gravado em lastCheck
fn local_timestamp() -> String {
    Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}
