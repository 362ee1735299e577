use crate::{RequestLog, config::Config};
use actix_web::{
    HttpServer,
    dev::{Server, ServerHandle, ServiceRequest},
    web,
};
use fauxgem_registry_core::GemRepository;
use std::net::TcpListener;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(tags(
    (name = "gems", description = "Raw fixture files"),
    (name = "api", description = "Dependency API"),
))]
pub struct ApiDoc;

/// `scheme://host/path?query` of the request, as recorded in the request log.
pub fn request_url(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("{}://{}{}", info.scheme(), info.host(), path)
}

pub fn record_request(
    log: &RequestLog,
    req: &ServiceRequest,
) {
    log.record(request_url(req));
}

/// Builds an app factory serving `$repo` (a `web::Data<GemRepository>`) and
/// recording every request into `$log` (a `RequestLog`).
#[macro_export]
macro_rules! bind_app {
    ($repo: ident, $log: ident $(,)?) => {
        move || {
            let log = $log.clone();
            ::utoipa_actix_web::AppExt::into_utoipa_app(::actix_web::App::new())
                .openapi(<$crate::app::ApiDoc as ::utoipa::OpenApi>::openapi())
                .app_data($repo.clone())
                // Raw fixture routes
                .service($crate::routes::gems::quick_spec)
                .service($crate::routes::gems::fetch_spec)
                .service($crate::routes::gems::download_gem)
                .service($crate::routes::gems::specs_index)
                .service($crate::routes::gems::prerelease_specs_index)
                // Dependency API
                .service($crate::routes::api::dependencies)
                .into_app()
                .wrap_fn(move |req, srv| {
                    $crate::app::record_request(&log, &req);
                    ::actix_web::dev::Service::call(srv, req)
                })
        }
    };
}

/// Runs a server on an already bound listener.
pub fn serve(
    repo: GemRepository,
    log: RequestLog,
    listener: TcpListener,
) -> crate::Result<Server> {
    let repo = web::Data::new(repo);

    tracing::info!(
        "serving {} on http://{}",
        repo.root().display(),
        listener.local_addr()?
    );

    Ok(HttpServer::new(bind_app!(repo, log))
        .listen(listener)?
        .run())
}

/// A started server that checks its request log once it stops.
pub struct CheckedServer {
    server: Server,
    log: RequestLog,
    expected: Option<String>,
}

impl CheckedServer {
    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Serves until shutdown, then compares the request log with the
    /// configured `all_requests`.
    pub async fn run(self) -> crate::Result<()> {
        self.server.await?;

        self.log
            .verify_expected(self.expected.as_deref())
            .inspect_err(|err| tracing::error!("{err}"))
    }
}

/// Starts serving `config.gem_repo` on `listener`.
pub fn start(
    config: Config,
    log: RequestLog,
    listener: TcpListener,
) -> crate::Result<CheckedServer> {
    let server = serve(config.gem_repository(), log.clone(), listener)?;

    Ok(CheckedServer {
        server,
        log,
        expected: config.all_requests,
    })
}

/// Binds `config.addr` and runs until shutdown, failing when the requests
/// made differ from `config.all_requests`.
pub async fn start_server(
    config: Config,
    log: RequestLog,
) -> crate::Result<()> {
    let listener = TcpListener::bind(&config.addr)?;

    start(config, log, listener)?.run().await
}
