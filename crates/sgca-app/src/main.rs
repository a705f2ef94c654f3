use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use sgca_app::app::api::routes;
use sgca_app::config::ConfigHandler;
use sgca_app::db_handler::DbProviderHandler;
use sgca_core::config::load_config;
use sgca_db::db::connection::create_pool;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(
        name = %config.info.name,
        version = %config.info.version,
        "Iniciando el servicio"
    );

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "No se pudo actualizar el nivel de logs");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Nivel de logs inválido, se conserva debug");
    }

    let database_url = config.database.url.clone();
    tokio::task::spawn_blocking(move || sgca_db::run_migrations(&database_url)).await??;
    tracing::info!("Migraciones aplicadas");

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(DbProviderHandler { provider: pool })
        .hoop(ConfigHandler { settings: config })
        .push(routes());

    tracing::info!("Servidor escuchando en {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
