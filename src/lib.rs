pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use logic::{AdmissionError, AdmissionResult, AdmissionServices};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use config::{AppConfig, StorageBackend};
use std::sync::Arc;

/// Build the services over the configured store, optionally seed them, and
/// serve the router until the listener fails.
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    match config.database.backend {
        StorageBackend::Postgres => {
            let database_url = config.database_url();
            let postgres_store =
                PostgresStore::new(&database_url, config.max_connections()).await?;
            log::info!("Running database migrations...");
            postgres_store.migrate().await?;
            serve_store(Arc::new(postgres_store), config).await
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory store; data is lost on shutdown");
            serve_store(Arc::new(MemoryStore::new()), config).await
        }
    }
}

async fn serve_store<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let services = Arc::new(AdmissionServices::new(store));

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        log::info!("Loading seed data...");
        seed::load_seed_data(&*services).await?;
    }

    let app = routes::create_router::<S>().with_state(services);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Admission server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn services_share_one_store() {
        let store = Arc::new(MemoryStore::new());
        let services = AdmissionServices::new(Arc::clone(&store));

        let university = services
            .catalog
            .add_university(NewUniversity {
                name: "Shared".to_string(),
            })
            .await
            .unwrap();

        use crate::store::traits::UniversityStore;
        assert!(store
            .get_university(university.university_id)
            .await
            .unwrap()
            .is_some());
    }

    #[test]
    fn course_response_serializes_camel_case() {
        let json = serde_json::to_value(CourseResponse {
            course_id: 3,
            course_name: "B.Tech".to_string(),
            eligibility: "12th".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"courseId": 3, "courseName": "B.Tech", "eligibility": "12th"})
        );
    }
}
