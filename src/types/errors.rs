//! Tipos de erro do flowwatch.

use thiserror::Error;

/// Tipo de resultado padrão do flowwatch.
pub type FlowWatchResult<T> = Result<T, FlowWatchError>;

/// Erros possíveis no flowwatch.
#[derive(Error, Debug)]
pub enum FlowWatchError {
    #[error("Capacidade inválida para o cache: {0} (deve ser maior que zero)")]
    InvalidCapacity(usize),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Observação inválida: {0}")]
    InvalidObservation(String),

    #[error("{0}")]
    Other(String),
}

impl FlowWatchError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
