use fptoken_core::{StoreError, TokenError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de token: {0}")]
    Token(#[from] TokenError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Token(TokenError::Store(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
    }

    #[test]
    fn test_token_variant_from() {
        let err: CoreError = TokenError::InvalidValidity(0.0).into();
        assert!(err.to_string().starts_with("Error de token: invalid validity window"));
        let err: CoreError = StoreError::Poisoned.into();
        assert_eq!(err.to_string(), "Error de token: store lock poisoned");
    }
}
