use fauxgem_registry::{RequestLog, config::Config};
use tracing::Level;

#[actix_web::main]
async fn main() -> fauxgem_registry::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let c = Config::new::<&str>(None)?;

    fauxgem_registry::app::start_server(c, RequestLog::new()).await
}
