//! Bootstrap data inserted at startup.

use sqlx::PgPool;

use crate::{
    config::Config,
    models::user::{User, UserRole},
    repositories::users as user_repo,
    utils::password::hash_password,
};

/// Ensures the bootstrap admin account exists. The account holds every role
/// so it can exercise any endpoint out of the box.
pub async fn seed_admin_user(pool: &PgPool, config: &Config) -> anyhow::Result<()> {
    if user_repo::find_user_by_username(pool, &config.admin_username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)?;
    let admin = User::new(
        config.admin_username.clone(),
        format!("{}@admin.local", config.admin_username),
        password_hash,
        UserRole::ALL.to_vec(),
    );
    user_repo::insert_user(pool, &admin).await?;
    tracing::info!(username = %admin.username, "Seeded bootstrap admin user");

    Ok(())
}
