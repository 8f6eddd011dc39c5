//! Embedded PostgreSQL provisioning for repository tests.
//!
//! One cluster is shared per test binary. Every test gets its own database
//! with the `recipes` table created from `sql/recipes.sql`, so suites never
//! see each other's rows.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

const RECIPES_DDL: &str = include_str!("../../sql/recipes.sql");
const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns threads, and the
        // shared handle serialises its own initialisation.
        unsafe {
            std::env::set_var("PG_PASSWORD", "recipes_embedded_test");
        }
    }
}

/// Start (or reuse) the process-wide embedded cluster.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed: {error}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(error.to_string()),
        }
    }
}

/// Create a fresh database holding an empty `recipes` table.
///
/// Returns the connection URL.
pub fn provision_recipe_database(cluster: &ClusterHandle) -> Result<String, String> {
    let name = format!("recipes_test_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    let url = cluster.connection().database_url(name.as_str()).to_string();

    execute(&url, RECIPES_DDL)?;
    Ok(url)
}

/// Drop the `recipes` table to simulate a store with a missing schema.
pub fn drop_recipes_table(url: &str) -> Result<(), String> {
    execute(url, "DROP TABLE IF EXISTS recipes;")
}

fn execute(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
