//! Consultas de relatório sobre o histórico
//!
//! Achata as multas de todas as placas (ou de uma só), filtra por intervalo
//! de datas com granularidade de dia e ordena da mais recente para a mais
//! antiga. Datas de infração fora do padrão DD/MM/AAAA não casam com nenhum
//! filtro de intervalo e vão para o fim da ordenação.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::history::VehicleRecord;
use crate::types::Fine;

/// Filtro de placa: todas ou uma placa exata (já canônica)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlateFilter {
    #[default]
    All,
    Plate(String),
}

/// Critérios da consulta; extremos do intervalo são inclusivos
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub plate: PlateFilter,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Resultado da consulta: multas ordenadas e soma dos valores
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub fines: Vec<Fine>,
    pub total: f64,
}

/// Data (sem hora) da infração; None quando o texto não segue DD/MM/AAAA
pub fn infraction_date(date: &str) -> Option<NaiveDate> {
    let day_part = date.split_whitespace().next()?;
    NaiveDate::parse_from_str(day_part, "%d/%m/%Y").ok()
}

/// Data e hora completas da infração; sem hora válida, assume meia-noite
pub fn infraction_datetime(date: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(date.trim(), "%d/%m/%Y %H:%M") {
        return Some(parsed);
    }
    infraction_date(date).map(|d| d.and_time(NaiveTime::MIN))
}

/// Executa a consulta sobre os registros do histórico
pub fn build_report(records: &[VehicleRecord], filter: &ReportFilter) -> Report {
    let mut fines: Vec<Fine> = records
        .iter()
        .filter(|record| match &filter.plate {
            PlateFilter::All => true,
            PlateFilter::Plate(plate) => &record.plate == plate,
        })
        .flat_map(|record| {
            record.fines.iter().map(|fine| {
                let mut flat = fine.clone();
                flat.plate = record.plate.clone();
                flat
            })
        })
        .filter(|fine| within_range(fine, filter))
        .collect();

    // Ordenação estável: empates e datas inválidas preservam a ordem de entrada
    fines.sort_by_key(|fine| std::cmp::Reverse(infraction_datetime(&fine.date)));

    let total = fines.iter().map(|f| f.amount.unwrap_or(0.0)).sum();
    Report { fines, total }
}

/// Sem intervalo, tudo passa. Com intervalo, só passa quem tem data válida
/// dentro dos extremos (inclusivos).
fn within_range(fine: &Fine, filter: &ReportFilter) -> bool {
    if filter.start.is_none() && filter.end.is_none() {
        return true;
    }
    let Some(date) = infraction_date(&fine.date) else {
        return false;
    };
    if let Some(start) = filter.start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = filter.end {
        if date > end {
            return false;
        }
    }
    true
}
