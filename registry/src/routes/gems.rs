use crate::Repo;
use actix_web::{
    HttpResponse, Responder, get,
    http::StatusCode,
    web::{self, Redirect},
};
use fauxgem_registry_core::repo::{PRERELEASE_SPECS_INDEX, SPECS_INDEX};

const GEMS: &str = "gems";

fn octet_stream(bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/octet-stream")
        .body(bytes)
}

/// Redirect a quick spec lookup to the actual file
#[utoipa::path(
    tag = GEMS,
    params(
        ("id" = String, Path, description = "Spec file name, e.g. `rack-1.0.0.gemspec.rz`"),
    ),
    responses(
        (status = 302, description = "Redirect to /fetch/actual/gem/{id}"),
    )
)]
#[get("/quick/Marshal.4.8/{id}")]
pub async fn quick_spec(id: web::Path<String>) -> impl Responder {
    Redirect::to(format!("/fetch/actual/gem/{}", id.into_inner()))
        .using_status_code(StatusCode::FOUND)
}

/// Fetch a compressed gemspec verbatim
#[utoipa::path(
    tag = GEMS,
    params(
        ("id" = String, Path, description = "Spec file name below quick/Marshal.4.8"),
    ),
    responses(
        (status = 200, description = "Raw `.gemspec.rz` bytes"),
        (status = 500, description = "Fixture file missing", body = fauxgem_registry_core::ErrorResponse),
    )
)]
#[get("/fetch/actual/gem/{id}")]
pub async fn fetch_spec(
    id: web::Path<String>,
    repo: Repo,
) -> crate::Result<impl Responder> {
    let id = id.into_inner();
    let bytes = web::block(move || repo.read_quick(&id)).await??;
    Ok(octet_stream(bytes))
}

/// Download a gem archive verbatim
#[utoipa::path(
    tag = GEMS,
    params(
        ("id" = String, Path, description = "Archive file name, e.g. `rack-1.0.0.gem`"),
    ),
    responses(
        (status = 200, description = "Raw archive bytes"),
        (status = 500, description = "Fixture file missing", body = fauxgem_registry_core::ErrorResponse),
    )
)]
#[get("/gems/{id}")]
pub async fn download_gem(
    id: web::Path<String>,
    repo: Repo,
) -> crate::Result<impl Responder> {
    let id = id.into_inner();
    let bytes = web::block(move || repo.read_gem(&id)).await??;
    Ok(octet_stream(bytes))
}

/// The gzipped release specs index
#[utoipa::path(
    tag = GEMS,
    responses(
        (status = 200, description = "Raw `specs.4.8.gz` bytes"),
        (status = 500, description = "Fixture file missing", body = fauxgem_registry_core::ErrorResponse),
    )
)]
#[get("/specs.4.8.gz")]
pub async fn specs_index(repo: Repo) -> crate::Result<impl Responder> {
    let bytes = web::block(move || repo.read(format!("{SPECS_INDEX}.gz"))).await??;
    Ok(octet_stream(bytes))
}

/// The gzipped prerelease specs index
#[utoipa::path(
    tag = GEMS,
    responses(
        (status = 200, description = "Raw `prerelease_specs.4.8.gz` bytes"),
        (status = 500, description = "Fixture file missing", body = fauxgem_registry_core::ErrorResponse),
    )
)]
#[get("/prerelease_specs.4.8.gz")]
pub async fn prerelease_specs_index(repo: Repo) -> crate::Result<impl Responder> {
    let bytes = web::block(move || repo.read(format!("{PRERELEASE_SPECS_INDEX}.gz"))).await??;
    Ok(octet_stream(bytes))
}
