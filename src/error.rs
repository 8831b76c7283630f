use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Erro: Token do GitHub Copilot ausente. Defina a variável de ambiente {env_var}.")]
    MissingToken { env_var: String },

    #[error("Erro na requisição: {status} {status_text}. Detalhes: {body}")]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error(
        "Erro de rede: Não foi possível conectar à API do GitHub. Verifique sua conexão com a internet."
    )]
    Network(#[source] reqwest::Error),

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resposta inválida da API: {0}")]
    Decode(String),

    #[error("config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Ferramenta desconhecida: {0}")]
    UnknownTool(String),
}

impl From<serde_json::Error> for UsageError {
    fn from(err: serde_json::Error) -> Self {
        UsageError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UsageError>;
