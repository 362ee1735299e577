use config::{Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Base name of the optional config file (`fauxgem.toml`, `fauxgem.yaml`, ...).
pub const NAME: &str = "fauxgem";

/// Environment variables override the file as `FAUXGEM_ADDR`,
/// `FAUXGEM_GEM_REPO` and `FAUXGEM_ALL_REQUESTS`.
pub const ENV_PREFIX: &str = "FAUXGEM";

fn default_addr() -> String {
    "127.0.0.1:8000".into()
}

fn default_gem_repo() -> PathBuf {
    PathBuf::from("tmp/gems/remote1")
}

fn non_empty_path(path: &PathBuf) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_path"));
    }
    Ok(())
}

#[derive(Deserialize, Debug, Validate)]
pub struct Config {
    #[validate(length(min = 1))]
    #[serde(default = "default_addr", alias = "ADDR")]
    pub addr: String,

    #[validate(custom(function = "non_empty_path"))]
    #[serde(default = "default_gem_repo", alias = "GEM_REPO")]
    pub gem_repo: PathBuf,

    /// Newline separated URLs the run is expected to request.
    #[serde(default, alias = "ALL_REQUESTS")]
    pub all_requests: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            gem_repo: default_gem_repo(),
            all_requests: None,
        }
    }
}

impl Config {
    /// Reads `<dir>/fauxgem.*` (if present) and the process environment.
    pub fn new<S: AsRef<str>>(dir: Option<S>) -> crate::Result<Self> {
        Self::load(dir, None)
    }

    /// Like [`Config::new`], with `env` standing in for the process
    /// environment when given.
    pub fn load<S: AsRef<str>>(
        dir: Option<S>,
        env: Option<config::Map<String, String>>,
    ) -> crate::Result<Self> {
        let file_name = format!(
            "{}",
            PathBuf::from(
                dir.map(|s| String::from(s.as_ref()))
                    .unwrap_or("./".into())
            )
            .join(NAME)
            .display()
        );

        let this: Self = config::Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        this.validate()?;

        tracing::debug!("loaded config: {this:?}");

        Ok(this)
    }

    pub fn gem_repository(&self) -> fauxgem_registry_core::GemRepository {
        fauxgem_registry_core::GemRepository::new(&self.gem_repo)
    }
}
