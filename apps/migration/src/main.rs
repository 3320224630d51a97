//! Migration CLI tool.
//!
//! Reads `DATABASE_URL`; run `migration up` to create the posts table.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    cli::run_cli(migration::Migrator).await;
}
