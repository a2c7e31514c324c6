use sea_orm::DbErr;

/// Failure taxonomy shared by every service operation. The HTTP layer maps
/// these onto status codes (400 / 404 / 403 / 400 / 500) without inspecting
/// the message text.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PermissionDenied(String),
    /// The gateway declined to open a session or could not be reached. The
    /// reason is kept for logs; callers surface a generic message.
    #[error("payment initiation failed: {0}")]
    PaymentInitiation(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
