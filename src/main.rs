//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use steel_inventory::config::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env antes de tudo (RUST_LOG pode estar lá)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("steel_inventory=info")),
        )
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env().context("Configuração inválida")?;
    let bind_addr = config.bind_addr.clone();
    tracing::info!("🌐 Serviço de inventário remoto: {}", config.inventory_api_url);

    let app_state = AppState::new(config)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;

    // Carga inicial: uma falha aqui não derruba o servidor, a próxima leitura tenta de novo
    if let Err(e) = app_state.inventory_service.refresh().await {
        tracing::warn!("⚠️ Carga inicial do inventário falhou: {}", e);
    }

    let app = steel_inventory::app(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {bind_addr}"))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}
