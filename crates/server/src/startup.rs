use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::faculty::{
    repository::{FacultyRepository, SeaOrmFacultyRepository},
    FacultyService,
};
use service::student::{
    repository::{SeaOrmStudentRepository, StudentRepository},
    StudentService,
};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse().map_err(|_| StartupError::BindAddr(raw))
}

/// Wire SeaORM repositories into the services.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    let students: Arc<dyn StudentRepository> = Arc::new(SeaOrmStudentRepository { db: db.clone() });
    let faculties: Arc<dyn FacultyRepository> = Arc::new(SeaOrmFacultyRepository { db });
    ServerState::new(
        StudentService::new(students).with_print_delay(Duration::from_millis(cfg.print.delay_ms)),
        FacultyService::new(faculties),
    )
}

/// Public entry: connect, migrate, build the app and run the HTTP server.
/// Expects `cfg` already validated and logging installed by the caller.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(&cfg.database)).await?;
    migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
    info!("migrations applied");

    let state = build_state(db, &cfg);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_hostnames() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 8080;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);

        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::BindAddr(_))));
    }
}
