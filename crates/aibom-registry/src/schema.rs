// [crates/aibom-registry/src/schema.rs]
//! El registro de jobs es una unica tabla usada solo como un mapa
//! `job_id -> {owner_id, staging_dir}`. No hay columna de estado: el
//! estado siempre se deriva del broker.

use libsql::Connection;

const CREATE_JOBS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    job_id      TEXT PRIMARY KEY,
    owner_id    TEXT NOT NULL,
    staging_dir TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
"#;

const CREATE_OWNER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_jobs_owner_id ON jobs (owner_id);
"#;

pub async fn apply_schema(connection: &Connection) -> Result<(), libsql::Error> {
    connection.execute(CREATE_JOBS_TABLE, ()).await?;
    connection.execute(CREATE_OWNER_INDEX, ()).await?;
    Ok(())
}
