//! Histórico persistido de consultas por placa
//!
//! Documento JSON único com no máximo 20 registros, do mais recente para o
//! mais antigo. A leitura é permissiva: arquivo ausente ou corrompido vale
//! como histórico vazio. A gravação é atômica no documento inteiro
//! (arquivo temporário + rename).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MultaCheckError, Result};
use crate::types::Fine;

/// Limite de registros retidos; o excedente mais antigo é descartado
pub const MAX_RECORDS: usize = 20;

const HISTORY_FILE_NAME: &str = "history.json";

/// Registro de uma placa consultada: o resultado integral da última consulta
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRecord {
    pub plate: String,
    pub fines: Vec<Fine>,
    pub last_check: String, // data/hora local da consulta, DD/MM/AAAA HH:MM:SS
}

/// Mescla registros novos no histórico: para cada registro, remove qualquer
/// entrada da mesma placa e insere na frente. O resultado fica limitado a
/// MAX_RECORDS, descartando o fundo da lista.
pub fn upsert_front(existing: &[VehicleRecord], incoming: &[VehicleRecord]) -> Vec<VehicleRecord> {
    let mut merged = existing.to_vec();
    for record in incoming {
        merged.retain(|r| r.plate != record.plate);
        merged.insert(0, record.clone());
    }
    merged.truncate(MAX_RECORDS);
    merged
}

/// Documento de histórico com seu ciclo de carga e gravação
#[derive(Debug, Clone, Default)]
pub struct HistoryFile {
    records: Vec<VehicleRecord>,
}

impl HistoryFile {
    /// Caminho padrão: ~/.config/multacheck/history.json
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MultaCheckError::Config("Diretório home não encontrado".to_string()))?;
        Ok(home.join(".config").join("multacheck").join(HISTORY_FILE_NAME))
    }

    /// Carrega o histórico do disco. Qualquer falha de leitura ou de formato
    /// resulta em histórico vazio, nunca em erro.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(records) => Self { records },
            Err(_) => Self::default(),
        }
    }

    /// Grava o documento inteiro de forma atômica: escreve em um arquivo
    /// temporário ao lado do destino e então renomeia por cima.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writer.flush()?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn find(&self, plate: &str) -> Option<&VehicleRecord> {
        self.records.iter().find(|r| r.plate == plate)
    }

    /// Substitui o conteúdo inteiro (resultado de uma reconciliação)
    pub fn replace(&mut self, records: Vec<VehicleRecord>) {
        self.records = records;
    }

    /// Mescla registros na frente, respeitando o limite de retenção
    pub fn upsert_front(&mut self, incoming: &[VehicleRecord]) {
        self.records = upsert_front(&self.records, incoming);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
