use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt::{self, Display};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure categories raised below the HTTP layer. Callers branch on these
/// instead of on rendered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CampaignCantGet,
    CampaignCantUpdate,
    CampaignCantCreate,
    CampaignCantExist,
    CampaignCantGetList,
    CampaignNotFound,
    TitleTaken,
    ProductCantCreate,
    ProductCantUpdate,
    ProductCantDelete,
    ProductNotExists,
    StoreCantCreate,
    StoreCantDelete,
    StoreCantGet,
    StoreNotExists,
    CampaignStatusCantUpdate,
    TxFailed,
    TxNotFound,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::CampaignCantGet => "unable to get campaign",
            ErrorKind::CampaignCantUpdate => "unable to update campaign",
            ErrorKind::CampaignCantCreate => "unable to crate campaign",
            ErrorKind::CampaignCantExist => "unable to check existence of campaign",
            ErrorKind::CampaignCantGetList => "unable to get campaign list",
            ErrorKind::CampaignNotFound => "campaign not exists",
            ErrorKind::TitleTaken => "campaign title already exists",
            ErrorKind::ProductCantCreate => "unable to create product(s)",
            ErrorKind::ProductCantUpdate => "unable to update product(s)",
            ErrorKind::ProductCantDelete => "unable to delete product",
            ErrorKind::ProductNotExists => "campaign product not exists",
            ErrorKind::StoreCantCreate => "unable to create store(s)",
            ErrorKind::StoreCantDelete => "unable to delete store(s)",
            ErrorKind::StoreCantGet => "unable to get campaign store",
            ErrorKind::StoreNotExists => "campaign store not exists",
            ErrorKind::CampaignStatusCantUpdate => "unable to update campaign status",
            ErrorKind::TxFailed => "transaction failed",
            ErrorKind::TxNotFound => "transaction not found",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
}

impl DomainError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.as_str().to_string(),
        }
    }

    /// Attaches the underlying cause, rendered as `<kind>: <cause>`.
    pub fn wrap<E: Display>(kind: ErrorKind, cause: E) -> Self {
        Self {
            kind,
            message: format!("{kind}: {cause}"),
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("Bad Request : {message}"))
    }

    pub fn conflict(message: impl Display) -> Self {
        Self::new(StatusCode::CONFLICT, format!("Conflict Error : {message}"))
    }

    pub fn not_found(message: impl Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("Entity Not Found : {message}"),
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Not Authorised")
    }

    pub fn internal<E: Display>(error: E) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Server Error : {error}"),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(MessageResponse {
            code: status.as_u16(),
            message: self.message,
        });
        (status, body).into_response()
    }
}

/// `{"code","message"}` envelope shared by command results and errors.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub code: u16,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
        })
    }
}

impl From<DomainError> for AppError {
    fn from(value: DomainError) -> Self {
        match value.kind() {
            ErrorKind::TitleTaken => AppError::conflict(value),
            ErrorKind::CampaignNotFound => AppError::not_found(value),
            ErrorKind::ProductNotExists => AppError::bad_request(value),
            _ => AppError::internal(value),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(value: diesel::result::Error) -> Self {
        AppError::internal(value)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        AppError::internal(value)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError::internal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_kind_and_cause() {
        let err = DomainError::wrap(ErrorKind::StoreCantGet, "connection reset");
        assert!(err.is(ErrorKind::StoreCantGet));
        assert_eq!(
            err.to_string(),
            "unable to get campaign store: connection reset"
        );
    }

    #[test]
    fn bare_kind_renders_its_message() {
        let err = DomainError::new(ErrorKind::StoreNotExists);
        assert_eq!(err.to_string(), "campaign store not exists");
    }

    #[test]
    fn http_errors_carry_envelope_prefixes() {
        assert_eq!(
            AppError::bad_request("invalid user id").message(),
            "Bad Request : invalid user id"
        );
        assert_eq!(
            AppError::conflict("campaign with given name already exists").message(),
            "Conflict Error : campaign with given name already exists"
        );
        let internal = AppError::internal("boom");
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message(), "Internal Server Error : boom");
    }

    #[test]
    fn domain_errors_map_to_status_by_kind() {
        let conflict = AppError::from(DomainError::with_message(
            ErrorKind::TitleTaken,
            "campaign with title 'spring' already exists. please provide another title",
        ));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let missing = AppError::from(DomainError::new(ErrorKind::CampaignNotFound));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let storage = AppError::from(DomainError::wrap(ErrorKind::CampaignCantCreate, "disk"));
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            storage.message(),
            "Internal Server Error : unable to crate campaign: disk"
        );
    }
}
