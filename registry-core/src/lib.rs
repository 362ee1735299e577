use std::path::PathBuf;
use utoipa::ToSchema;

pub mod codec;
pub mod models;
pub mod repo;

#[cfg(any(test, feature = "test"))]
pub mod fixtures;

pub use repo::GemRepository;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fixture file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("io error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fixture: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("failed to encode fixture: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("malformed fixture '{}': {source}", path.display())]
    WithPath {
        path: PathBuf,
        #[source]
        source: Box<Self>,
    },
}

impl Error {
    pub fn with_path(path: impl Into<PathBuf>) -> impl FnOnce(Self) -> Self {
        let path = path.into();
        move |source| {
            Error::WithPath {
                path,
                source: Box::new(source),
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound { path }
            } else {
                Error::Io { path, source }
            }
        }
    }

    /// The error with any path context peeled off.
    pub fn root(&self) -> &Self {
        match self {
            Error::WithPath { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Error::FileNotFound { .. })
    }

    pub fn public_type(&self) -> PublicErrorType {
        match self.root() {
            Error::FileNotFound { .. } => PublicErrorType::FileNotFound,
            Error::Decode(..) => PublicErrorType::MalformedFixture,
            _ => PublicErrorType::InternalServerError,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(serde::Serialize, serde::Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PublicErrorType {
    InternalServerError,

    FileNotFound,
    MalformedFixture,
}

impl Into<&'static str> for &PublicErrorType {
    fn into(self) -> &'static str {
        match self {
            PublicErrorType::InternalServerError => "internal-server-error",
            PublicErrorType::FileNotFound => "file-not-found",
            PublicErrorType::MalformedFixture => "malformed-fixture",
        }
    }
}

impl std::fmt::Debug for PublicErrorType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let s: &'static str = self.into();
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for PublicErrorType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let s: &'static str = self.into();
        write!(f, "{}", s)
    }
}

#[derive(serde::Serialize, serde::Deserialize, ToSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse {
    pub error: PublicErrorType,
    pub error_description: Option<String>,
}

impl ErrorResponse {
    pub fn internal() -> Self {
        Self {
            error: PublicErrorType::InternalServerError,
            error_description: None,
        }
    }

    pub fn from_public_error(
        error: PublicErrorType,
        desc: Option<String>,
    ) -> Self {
        Self {
            error,
            error_description: desc,
        }
    }
}
