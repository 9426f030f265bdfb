/// CRUD operations against a live database
pub mod crud_tests;


use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::db::{connect_with_config, DatabaseConfig};

// Migrations run once per test process; `false` means the database is unusable.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::load().unwrap_or_else(|e| panic!("invalid test database config: {e}"));
    cfg.min_connections = 1;
    cfg.max_connections = 5;
    cfg.connect_timeout = Duration::from_secs(3);
    cfg.acquire_timeout = Duration::from_secs(3);
    cfg
}

/// Connected and migrated database, or `None` when tests should be skipped
/// (`SKIP_DB_TESTS` set or no database reachable).
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let db = match connect_with_config(&test_config()).await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    return false;
                }
            };
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("skip: migrate up failed: {}", e);
                return false;
            }
            true
        })
        .await;
    if !migrated {
        return None;
    }
    connect_with_config(&test_config()).await.ok()
}

mod value_tests {
    use crate::faculty;

    #[test]
    fn faculty_equality_is_by_value() {
        let a = faculty::Model { id: 1, name: "Gryffindor".into(), color: "red".into() };
        let b = faculty::Model { id: 1, name: "Gryffindor".into(), color: "red".into() };
        let c = faculty::Model { id: 1, name: "Gryffindor".into(), color: "gold".into() };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn faculty_json_has_id_name_color() {
        let f = faculty::Model { id: 2, name: "Slytherin".into(), color: "green".into() };
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v, serde_json::json!({"id": 2, "name": "Slytherin", "color": "green"}));
    }
}
