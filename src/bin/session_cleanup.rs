//! Deletes refresh sessions that can never validate again (revoked or past
//! their expiry). Intended to run from cron.

use chrono::Utc;

use rental_backend::{
    config::Config, db::connection::create_pool, repositories::sessions as session_repo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let pool = create_pool(&config.database_url).await?;

    let deleted = session_repo::delete_dead_sessions(&pool, Utc::now()).await?;
    if deleted > 0 {
        tracing::info!("Deleted {} dead sessions", deleted);
    }

    sqlx::query("VACUUM (ANALYZE) sessions")
        .execute(&pool)
        .await?;

    Ok(())
}
