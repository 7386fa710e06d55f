//! Testes de persistência do histórico
//!
//! Verifica carga permissiva, gravação atômica e o formato do documento

use multacheck::history::{HistoryFile, VehicleRecord, MAX_RECORDS};
use multacheck::types::Fine;
use tempfile::tempdir;

fn record(plate: &str, fines: Vec<Fine>) -> VehicleRecord {
    VehicleRecord {
        plate: plate.to_string(),
        fines,
        last_check: "01/01/2025 10:00:00".to_string(),
    }
}

fn fine(infraction: &str) -> Fine {
    Fine {
        id: "id-local".to_string(),
        infraction_id: infraction.to_string(),
        date: "22/11/2025 10:52".to_string(),
        description: "Avanço de sinal vermelho".to_string(),
        amount: Some(293.47),
        plate: "ACV5H33".to_string(),
        ..Fine::default()
    }
}

/// Arquivo inexistente vale como histórico vazio
#[test]
fn test_arquivo_inexistente_vale_vazio() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let history = HistoryFile::load(&path);
    assert!(history.is_empty());
}

/// Gravação e releitura preservam o conteúdo
#[test]
fn test_salvar_e_recarregar() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let mut history = HistoryFile::load(&path);
    history.replace(vec![record("ACV5H33", vec![fine("J005020835")])]);
    history.save(&path).expect("falha ao salvar histórico");

    let loaded = HistoryFile::load(&path);
    assert_eq!(loaded.len(), 1);

    let rec = loaded.find("ACV5H33").expect("registro não encontrado");
    assert_eq!(rec.fines.len(), 1);
    assert_eq!(rec.fines[0].infraction_id, "J005020835");
    assert_eq!(rec.fines[0].amount, Some(293.47));
    assert_eq!(rec.last_check, "01/01/2025 10:00:00");
}

/// Documento corrompido vale como histórico vazio
#[test]
fn test_arquivo_corrompido_vale_vazio() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    std::fs::write(&path, "{ json inválido }").unwrap();

    let history = HistoryFile::load(&path);
    assert!(history.is_empty());
}

/// Documento com tipo errado também vale como vazio
#[test]
fn test_documento_com_formato_errado_vale_vazio() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    std::fs::write(&path, r#"{"plate": "não é uma lista"}"#).unwrap();

    let history = HistoryFile::load(&path);
    assert!(history.is_empty());
}

/// A gravação não deixa arquivo temporário para trás
#[test]
fn test_gravacao_atomica_sem_residuo() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let mut history = HistoryFile::load(&path);
    history.replace(vec![record("ACV5H33", Vec::new())]);
    history.save(&path).expect("falha ao salvar histórico");

    assert!(path.exists());
    assert!(!dir.path().join("history.json.tmp").exists());
}

/// A gravação cria os diretórios intermediários
#[test]
fn test_gravacao_cria_diretorios() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("aninhado").join("fundo").join("history.json");

    let mut history = HistoryFile::load(&path);
    history.replace(vec![record("ACV5H33", Vec::new())]);
    history.save(&path).expect("falha ao salvar histórico");

    assert!(path.exists());
}

/// O documento gravado usa os nomes de campo do formato original (camelCase)
#[test]
fn test_formato_do_documento_camel_case() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let mut marked = fine("J005020835");
    marked.printed = true;

    let mut history = HistoryFile::load(&path);
    history.replace(vec![record("ACV5H33", vec![marked])]);
    history.save(&path).expect("falha ao salvar histórico");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.trim_start().starts_with('['));
    assert!(raw.contains("\"lastCheck\""));
    assert!(raw.contains("\"infractionId\""));
    assert!(raw.contains("\"isNew\""));
    assert!(raw.contains("\"printed\": true"));
}

/// Documento no formato original (gerado por outra versão) é aceito
#[test]
fn test_le_documento_no_formato_original() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let raw = r#"[
        {
            "plate": "ACV5H33",
            "lastCheck": "22/11/2025, 10:52:03",
            "fines": [
                {
                    "id": "3f1c9d6e",
                    "infractionId": "J005020835",
                    "date": "22/11/2025 10:52",
                    "description": "Avançar o sinal vermelho do semáforo",
                    "location": "Av. Paulista, 1000",
                    "points": 7,
                    "amount": 293.47,
                    "plate": "ACV5H33",
                    "isNew": false,
                    "printed": true
                }
            ]
        }
    ]"#;
    std::fs::write(&path, raw).unwrap();

    let history = HistoryFile::load(&path);
    let rec = history.find("ACV5H33").expect("registro não encontrado");
    assert_eq!(rec.fines[0].infraction_id, "J005020835");
    assert!(rec.fines[0].printed);
    assert!(!rec.fines[0].is_new);
}

/// Campos ausentes no documento assumem os padrões
#[test]
fn test_campos_ausentes_assumem_padrao() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let raw = r#"[
        {
            "plate": "ABC1D23",
            "fines": [
                {
                    "infractionId": "K100",
                    "date": "05/02/2025 14:00",
                    "description": "Multa avulsa"
                }
            ]
        }
    ]"#;
    std::fs::write(&path, raw).unwrap();

    let history = HistoryFile::load(&path);
    let rec = history.find("ABC1D23").expect("registro não encontrado");
    assert_eq!(rec.last_check, "");
    assert_eq!(rec.fines[0].amount, None);
    assert!(!rec.fines[0].printed);
    assert!(!rec.fines[0].is_new);
}

/// O limite de retenção sobrevive a gravação e releitura
#[test]
fn test_limite_de_retencao_persistido() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let mut history = HistoryFile::load(&path);
    for i in 0..(MAX_RECORDS + 5) {
        history.upsert_front(&[record(&format!("AAA{:04}", i), Vec::new())]);
    }
    history.save(&path).expect("falha ao salvar histórico");

    let loaded = HistoryFile::load(&path);
    assert_eq!(loaded.len(), MAX_RECORDS);
    // O mais recente fica na frente
    assert_eq!(loaded.records()[0].plate, format!("AAA{:04}", MAX_RECORDS + 4));
}

/// Limpeza apaga todos os registros
#[test]
fn test_clear_esvazia_o_documento() {
    let dir = tempdir().expect("falha ao criar diretório temporário");
    let path = dir.path().join("history.json");

    let mut history = HistoryFile::load(&path);
    history.replace(vec![record("ACV5H33", Vec::new())]);
    history.save(&path).expect("falha ao salvar histórico");

    history.clear();
    history.save(&path).expect("falha ao salvar histórico");

    let loaded = HistoryFile::load(&path);
    assert!(loaded.is_empty());
}
