use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown dataset kind '{0}' (expected sinistros, pessoas or veiculos)")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
