use actix_web::ResponseError;
use fauxgem_registry_core::ErrorResponse;

pub mod app;
pub mod config;
pub mod request_log;
pub mod routes;

pub use request_log::RequestLog;

pub type Repo = actix_web::web::Data<fauxgem_registry_core::GemRepository>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Fixture(#[from] fauxgem_registry_core::Error),

    #[error("blocking task failed: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),

    #[error("config error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("validation errors: {0}")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("io error: {0:?}")]
    IoError(#[from] std::io::Error),

    #[error(
        "Unexpected requests!\nExpected:\n\t{}\n\nActual:\n\t{}",
        expected.join("\n\t"),
        actual.join("\n\t")
    )]
    UnexpectedRequests {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn to_error_response(&self) -> ErrorResponse {
        tracing::error!("Handling error: {:?}", self);
        match self {
            Error::Fixture(err) => {
                ErrorResponse::from_public_error(err.public_type(), Some(err.to_string()))
            },
            _ => ErrorResponse::internal(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> actix_web::http::StatusCode {
        // fixture problems are test-setup defects, never client errors
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> actix_web::HttpResponse<actix_web::body::BoxBody> {
        let response = self.to_error_response();
        actix_web::HttpResponse::build(self.status_code()).json(response)
    }
}
