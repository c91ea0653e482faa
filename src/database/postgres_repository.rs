use sqlx::PgPool;

/// Request-scoped handle over the shared pool. Every repository trait is implemented on it.
#[derive(Clone)]
pub struct PostgresRepository {
    pub pool: PgPool,
}
