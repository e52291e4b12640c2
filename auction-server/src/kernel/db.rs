use {
    anyhow::anyhow,
    sqlx::{
        postgres::PgPoolOptions,
        Pool,
        Postgres,
    },
};

pub type DB = Pool<Postgres>;

const MAX_DB_CONNECTIONS: u32 = 10;

/// Connects to Postgres and brings the schema up to date.
pub async fn connect(database_url: &str) -> anyhow::Result<DB> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))?;
    Ok(pool)
}
