//! Renderização em modo texto: moeda em reais e tabelas de multas

use crate::report::Report;
use crate::types::Fine;

/// Formata um valor no padrão brasileiro: R$ 1.234,56.
/// Sem valor numérico, exibe R$ 0,00.
pub fn format_brl(amount: Option<f64>) -> String {
    let value = amount.unwrap_or(0.0);
    let negative = value < 0.0;
    let cents_total = (value.abs() * 100.0).round() as u64;
    let reais = (cents_total / 100).to_string();
    let cents = cents_total % 100;

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, c) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, cents)
}

/// Encurta um texto para caber na coluna, terminando em "..."
fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Marcação de estado da multa na listagem
fn status_tag(fine: &Fine) -> &'static str {
    if fine.printed {
        " [IMPRESSA]"
    } else if fine.is_new {
        " [NOVA]"
    } else {
        ""
    }
}

/// Imprime a tabela de multas da projeção atual, com total acumulado
pub fn print_fines_table(fines: &[Fine]) {
    if fines.is_empty() {
        println!("Nenhuma multa registrada.");
        return;
    }

    println!(
        "  {:<9} {:<16} {:<12} {:<44} {:>12}",
        "Placa", "Data", "Auto", "Descrição", "Valor"
    );
    for fine in fines {
        println!(
            "  {:<9} {:<16} {:<12} {:<44} {:>12}{}",
            fine.plate,
            shorten(&fine.date, 16),
            shorten(&fine.infraction_id, 12),
            shorten(&fine.description, 44),
            format_brl(fine.amount),
            status_tag(fine),
        );
    }

    let total: f64 = fines.iter().map(|f| f.amount.unwrap_or(0.0)).sum();
    println!("\n  Total: {}", format_brl(Some(total)));
}

/// Imprime o resultado de uma consulta de relatório
pub fn print_report(report: &Report) {
    if report.fines.is_empty() {
        println!("Nenhuma multa encontrada para o filtro informado.");
        return;
    }

    println!("{} multa(s) encontrada(s)\n", report.fines.len());
    print_fines_table(&report.fines);
}
