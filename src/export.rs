//! Exportação CSV do relatório filtrado

use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::Fine;

const CSV_HEADER: &str = "Placa,Data,Auto de Infracao,Descricao,Valor";

/// Gera o documento CSV das multas na ordem recebida. Vírgulas na descrição
/// viram ponto e vírgula para não quebrar as colunas; valores saem com duas
/// casas decimais e multas sem valor numérico saem como 0.00.
pub fn to_csv(fines: &[Fine]) -> String {
    let mut lines = Vec::with_capacity(fines.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for fine in fines {
        lines.push(
            [
                fine.plate.clone(),
                fine.date.clone(),
                fine.infraction_id.clone(),
                fine.description.replace(',', ";"),
                format!("{:.2}", fine.amount.unwrap_or(0.0)),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

pub fn write_csv(path: &Path, fines: &[Fine]) -> Result<()> {
    std::fs::write(path, to_csv(fines))?;
    Ok(())
}

/// Nome padrão do arquivo exportado: relatorio_multas_AAAA-MM-DD.csv
pub fn default_file_name(today: NaiveDate) -> String {
    format!("relatorio_multas_{}.csv", today.format("%Y-%m-%d"))
}
