// [crates/aibom-registry/src/repository.rs]
//! Unica autoridad de persistencia para el registro de jobs. No expone
//! ningun setter de estado: el estado es siempre una consulta al
//! broker, nunca una columna de esta tabla.

use crate::errors::RegistryError;
use aibom_core::Job;
use chrono::Utc;
use libsql::{params, Connection};
use tracing::instrument;

pub struct JobRepository {
    connection: Connection,
}

impl JobRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Inserta un nuevo job. Falla con `DuplicateJobId` si `job_id` ya
    /// existe en la tabla.
    #[instrument(skip(self))]
    pub async fn create(&self, job_id: &str, owner_id: &str, staging_dir: &str) -> Result<Job, RegistryError> {
        let existing = self.get(job_id).await;
        if existing.is_ok() {
            return Err(RegistryError::DuplicateJobId(job_id.to_string()));
        }

        self.connection
            .execute(
                "INSERT INTO jobs (job_id, owner_id, staging_dir, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![job_id, owner_id, staging_dir, Utc::now().to_rfc3339()],
            )
            .await?;

        Ok(Job::new(job_id, owner_id, staging_dir))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, job_id: &str) -> Result<Job, RegistryError> {
        let mut rows = self
            .connection
            .query(
                "SELECT job_id, owner_id, staging_dir FROM jobs WHERE job_id = ?1",
                params![job_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Job::new(
                row.get::<String>(0)?,
                row.get::<String>(1)?,
                row.get::<String>(2)?,
            )),
            None => Err(RegistryError::JobNotFound(job_id.to_string())),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Job>, RegistryError> {
        let mut rows = self
            .connection
            .query(
                "SELECT job_id, owner_id, staging_dir FROM jobs WHERE owner_id = ?1 ORDER BY created_at ASC",
                params![owner_id],
            )
            .await?;

        let mut jobs = Vec::new();
        while let Some(row) = rows.next().await? {
            jobs.push(Job::new(
                row.get::<String>(0)?,
                row.get::<String>(1)?,
                row.get::<String>(2)?,
            ));
        }
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::apply_schema;
    use libsql::Builder;

    async fn in_memory_repository() -> JobRepository {
        let database = Builder::new_local(":memory:").build().await.unwrap();
        let connection = database.connect().unwrap();
        apply_schema(&connection).await.unwrap();
        JobRepository::new(connection)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = in_memory_repository().await;
        let job = repo.create("task-1", "owner-a", "staging-1").await.unwrap();
        let fetched = repo.get(&job.job_id).await.unwrap();
        assert_eq!(fetched, job);
    }

    #[tokio::test]
    async fn duplicate_job_id_is_rejected() {
        let repo = in_memory_repository().await;
        repo.create("task-1", "owner-a", "staging-1").await.unwrap();
        let err = repo.create("task-1", "owner-b", "staging-2").await.unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateJobId(_)));
    }

    #[tokio::test]
    async fn list_by_owner_returns_only_that_owners_jobs() {
        let repo = in_memory_repository().await;
        repo.create("task-1", "owner-a", "staging-1").await.unwrap();
        repo.create("task-2", "owner-a", "staging-2").await.unwrap();
        repo.create("task-3", "owner-b", "staging-3").await.unwrap();

        let jobs = repo.list_by_owner("owner-a").await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(|j| j.owner_id == "owner-a"));
    }

    #[tokio::test]
    async fn missing_job_yields_not_found() {
        let repo = in_memory_repository().await;
        let err = repo.get("does-not-exist").await.unwrap_err();
        assert!(matches!(err, RegistryError::JobNotFound(_)));
    }
}
