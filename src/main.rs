use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rodadex_api::config::{database::run_migrations, DatabaseConfig, EnvironmentConfig};
use rodadex_api::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("⚽ Rodadex API");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    // Inicializar base de datos
    let pool = match DatabaseConfig::from(&config).create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::from_config(pool, config)?;
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("⚽ Futebol:");
    info!("   GET  /api/fixtures/next?teamId=&next= - Próximos partidos");
    info!("   GET  /api/fixtures/league?leagueId=&season=&round= - Partidos de la liga");
    info!("   GET  /api/standings?leagueId=&season= - Clasificación");
    info!("   GET  /api/media/team?name= - Escudo y banner");
    info!("   GET  /api/teams/search?name=&league= - Buscar equipos");
    info!("   GET  /api/teams/combined?name=&next= - Equipo + partidos + media");
    info!("   GET  /api/teams/:id - Equipo por id");
    info!("🗄️ Caché (JWT):");
    info!("   GET    /api/cache/stats - Estadísticas");
    info!("   DELETE /api/cache - Vaciar caché");
    info!("   DELETE /api/cache/:key - Eliminar clave");
    info!("👤 Auth:");
    info!("   POST /api/auth/register - Registro");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("⭐ Favoritos (JWT):");
    info!("   GET    /api/favorites - Listar");
    info!("   POST   /api/favorites - Añadir");
    info!("   DELETE /api/favorites/:teamId - Eliminar");
    info!("   GET    /api/favorites/:teamId/check - Comprobar");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
