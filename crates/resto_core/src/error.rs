use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestoError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Uniform login failure. The message is deliberately identical for
    /// unknown-email and wrong-password so callers cannot tell them apart.
    #[error("Password or email incorrect")]
    BadCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RestoError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::BadCredentials => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Internal(_) => 500,
        }
    }
}
