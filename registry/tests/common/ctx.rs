//! Test registry context - a temporary gem repository plus the app serving it

use actix_web::{dev::ServiceResponse, test, web};
use fauxgem_registry::{RequestLog, bind_app};
use fauxgem_registry_core::{
    GemRepository,
    fixtures::{self, GemFixture},
};
use tempfile::TempDir;

use super::RequestBuilder;

/// Host header sent with every test request.
pub const HOST: &str = "localgemserver.test";

/// Test registry context providing a fixture repository, the shared request
/// log and the app for integration tests
pub struct TestRegistryCtx {
    #[allow(unused)] // kept alive
    dir: TempDir,

    pub repo: web::Data<GemRepository>,
    pub log: RequestLog,
}

/// The gems most tests need.
pub fn default_gems() -> Vec<GemFixture> {
    vec![
        fixtures::gem("rack", "1.0.0"),
        fixtures::gem("rack", "1.1.0.pre"),
        fixtures::gem("activesupport", "2.3.2"),
        fixtures::gem("rails", "2.3.2")
            .dep("activesupport", "= 2.3.2")
            .dep("rack", "~> 1.0, >= 1.0.0")
            .dev_dep("rspec", ">= 0"),
        fixtures::gem("platform_specific", "1.0").platform("java"),
        fixtures::gem("thin", "1.0")
            .dep("rack", ">= 0")
            .in_both_indexes(),
    ]
}

impl TestRegistryCtx {
    /// Create a context serving [`default_gems`]
    pub fn new() -> Self {
        Self::with_gems(default_gems())
    }

    /// Create a context serving exactly `gems`
    pub fn with_gems(gems: Vec<GemFixture>) -> Self {
        fauxgem_testing::logging();

        let dir = tempfile::tempdir().unwrap();
        let repo = fixtures::repo(dir.path())
            .gems(gems)
            .write()
            .unwrap();

        Self {
            dir,
            repo: web::Data::new(repo),
            log: RequestLog::new(),
        }
    }

    /// Absolute path of a file below the repository root
    pub fn path(
        &self,
        relative: &str,
    ) -> std::path::PathBuf {
        self.repo.root().join(relative)
    }

    /// The URL the request log records for `path_and_query`
    pub fn url(
        &self,
        path_and_query: &str,
    ) -> String {
        format!("http://{HOST}{path_and_query}")
    }

    /// Build the actix-web test app using the bind_app! macro
    pub async fn app(
        &self
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    > {
        let repo = self.repo.clone();
        let log = self.log.clone();

        test::init_service(bind_app!(repo, log)()).await
    }

    /// Start a GET request builder
    pub fn get<'a>(
        &'a self,
        path: &str,
    ) -> RequestBuilder<'a> {
        RequestBuilder::get(self, path)
    }
}
