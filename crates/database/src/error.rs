use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database operation failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to commit the unit of work: {0}")]
    CommitFailed(#[source] sqlx::Error),

    #[error("Failed to roll back the unit of work: {0}")]
    RollbackFailed(#[source] sqlx::Error),
}
