//! Classification of the storage errors every crate runs into.

use std::io;

use serde_json::error::Category;

use super::app_error::AppError;
use super::kind::ErrorKind;

fn io_kind(kind: io::ErrorKind) -> ErrorKind {
    match kind {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::TimedOut => ErrorKind::Timeout,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => ErrorKind::InvalidInput,
        io::ErrorKind::PermissionDenied => ErrorKind::Misconfigured,
        _ => ErrorKind::Unavailable,
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::new(io_kind(err.kind()), "Storage I/O failed").with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => AppError::new(ErrorKind::Unavailable, "Reading JSON failed"),
            Category::Syntax | Category::Data | Category::Eof => AppError::new(
                ErrorKind::InvalidInput,
                format!("Malformed JSON at line {} column {}", err.line(), err.column()),
            ),
        }
        .with_source(err)
    }
}

/// Kind of a PostgreSQL SQLSTATE code
///
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
#[cfg(feature = "sqlx")]
fn postgres_kind(code: &str) -> ErrorKind {
    match code {
        "23505" => ErrorKind::Conflict,
        "57014" => ErrorKind::Timeout,
        // undefined table / column: schema not created
        "42P01" | "42703" => ErrorKind::Misconfigured,
        _ => match code.get(..2) {
            Some("23") => ErrorKind::InvalidInput,
            Some("08" | "53" | "57") => ErrorKind::Unavailable,
            Some("28") => ErrorKind::Misconfigured,
            _ => ErrorKind::Internal,
        },
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::RowNotFound => ErrorKind::NotFound,
            sqlx::Error::PoolTimedOut => ErrorKind::Timeout,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                ErrorKind::Unavailable
            }
            sqlx::Error::Configuration(_) => ErrorKind::Misconfigured,
            sqlx::Error::Database(db_err) => db_err
                .code()
                .map_or(ErrorKind::Internal, |code| postgres_kind(&code)),
            _ => ErrorKind::Internal,
        };

        AppError::new(kind, "Database operation failed").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_kinds() {
        let err: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.kind(), ErrorKind::Misconfigured);

        let err: AppError = io::Error::other("disk").into();
        assert!(err.is_transient());
    }

    #[test]
    fn test_malformed_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"Notch\": }").unwrap_err();
        let err: AppError = json_err.into();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("line 2"));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_postgres_codes() {
        assert_eq!(postgres_kind("23505"), ErrorKind::Conflict);
        assert_eq!(postgres_kind("23514"), ErrorKind::InvalidInput);
        assert_eq!(postgres_kind("42P01"), ErrorKind::Misconfigured);
        assert_eq!(postgres_kind("53300"), ErrorKind::Unavailable);
        assert_eq!(postgres_kind("57P01"), ErrorKind::Unavailable);
        assert_eq!(postgres_kind("57014"), ErrorKind::Timeout);
        assert_eq!(postgres_kind("XX000"), ErrorKind::Internal);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_errors() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }
}
