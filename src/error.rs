use thiserror::Error;

#[derive(Error, Debug)]
pub enum MultaCheckError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Chave de API não configurada. Use `multacheck config --set-api-key SUA_CHAVE` para configurar")]
    MissingApiKey,

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Nenhum texto para processar. Cole o conteúdo do portal e tente novamente")]
    EmptyInput,

    #[error("Falha ao processar dados. Verifique sua conexão ou tente novamente ({0})")]
    ApiCall(String),

    #[error("Falha ao processar dados. Verifique sua conexão ou tente novamente (resposta: {0})")]
    ApiParse(String),

    #[error("Nenhuma placa ou multa foi identificada no conteúdo fornecido")]
    EmptyResult,

    #[error("Placa não encontrada no histórico: {0}")]
    PlateNotFound(String),

    #[error("Auto de Infração não encontrado na consulta atual: {0}")]
    InfractionNotFound(String),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de interação: {0}")]
    Interaction(String),
}

pub type Result<T> = std::result::Result<T, MultaCheckError>;
