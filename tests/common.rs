use glencity_booking::{
    api::router::create_router,
    config::Config,
    infra::{
        factory::{build_state, run_sqlite_migrations},
        repositories::{
            sqlite_booking_repo::SqliteBookingRepo,
            sqlite_catalog_repo::SqliteCatalogRepo,
        },
        seed::seed_catalog,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            seed_catalog: true,
            db_max_connections: 1,
        };

        let catalog_repo = Arc::new(SqliteCatalogRepo::new(pool.clone()));
        seed_catalog(catalog_repo.as_ref())
            .await
            .expect("Failed to seed test catalog");

        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let state = Arc::new(build_state(config, catalog_repo, booking_repo));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn send_json(&self, method: &str, uri: &str, payload: Value) -> Response {
        self.router.clone().oneshot(
            Request::builder().method(method).uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap()
    }

    /// Looks up a seeded catalog entry by name and returns its id.
    pub async fn catalog_id(&self, collection: &str, name: &str) -> i64 {
        let items = parse_body(self.get(&format!("/api/{}", collection)).await).await;
        items.as_array().unwrap().iter()
            .find(|item| item["name"] == name)
            .unwrap_or_else(|| panic!("{} missing from {}", name, collection))["id"]
            .as_i64()
            .unwrap()
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn booking_payload(email: &str, accommodation_id: i64, check_in: &str, check_out: &str, guests: i32) -> Value {
    json!({
        "guestName": "Ada Lovelace",
        "guestEmail": email,
        "guestPhone": "+44 20 7946 0000",
        "accommodationId": accommodation_id,
        "checkIn": check_in,
        "checkOut": check_out,
        "guests": guests,
    })
}
