use crate::Repo;
use actix_web::{HttpResponse, Responder, get, web};
use fauxgem_registry_core::codec;

const API: &str = "api";

#[derive(serde::Deserialize, Debug)]
pub struct DependenciesQuery {
    /// Comma separated gem names
    pub gems: Option<String>,
}

impl DependenciesQuery {
    pub fn gem_names(&self) -> Vec<String> {
        self.gems
            .as_deref()
            .filter(|gems| !gems.is_empty())
            .map(|gems| {
                gems.split(',')
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// List runtime dependencies of every indexed release of the named gems
#[utoipa::path(
    tag = API,
    params(
        ("gems" = Option<String>, Query, description = "Comma separated gem names"),
    ),
    responses(
        (status = 200, description = "MessagePack encoded list of dependency records", body = Vec<fauxgem_registry_core::models::DependencyRecord>),
        (status = 500, description = "Fixture file missing or malformed", body = fauxgem_registry_core::ErrorResponse),
    )
)]
#[get("/api/v1/dependencies")]
pub async fn dependencies(
    query: web::Query<DependenciesQuery>,
    repo: Repo,
) -> crate::Result<impl Responder> {
    let names = query.gem_names();

    let body = web::block(move || {
        let records = repo.dependencies_for(&names)?;
        codec::encode(&records)
    })
    .await??;

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .body(body))
}
