//! Test harness with testcontainers for integration testing.
//!
//! Uses one shared Postgres container across all tests. The container and
//! migrations are initialized on the first test, then reused.

use std::sync::Arc;

use anyhow::{Context, Result};
use review_core::common::{OrderId, UserId};
use review_core::domains::reviews::store::PostgresReviewStore;
use review_core::kernel::{BaseIdGenerator, ServerDeps, SnowflakeGenerator};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    /// One generator for the whole run so IDs never collide between tests
    id_generator: Arc<SnowflakeGenerator>,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        let id_generator = SnowflakeGenerator::from_start_time("2024-01-01 00:00:00", 7)
            .context("Failed to create ID generator")?;

        Ok(Self {
            db_url,
            id_generator: Arc::new(id_generator),
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness backed by the shared Postgres container.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let review = create_review(input, &ctx.deps).await.unwrap();
/// }
/// ```
pub struct TestHarness {
    /// Database pool for direct assertions
    pub db_pool: PgPool,
    /// Production dependencies: Postgres store and snowflake IDs
    pub deps: ServerDeps,
    id_generator: Arc<SnowflakeGenerator>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let deps = ServerDeps::new(
            Arc::new(PostgresReviewStore::new(db_pool.clone())),
            infra.id_generator.clone(),
        );

        Ok(Self {
            db_pool,
            deps,
            id_generator: infra.id_generator.clone(),
        })
    }

    /// An order ID no other test uses
    pub fn fresh_order_id(&self) -> OrderId {
        OrderId::from_raw(self.id_generator.generate())
    }

    /// A user ID no other test uses
    pub fn fresh_user_id(&self) -> UserId {
        UserId::from_raw(self.id_generator.generate())
    }
}
