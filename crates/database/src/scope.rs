use crate::error::DbError;
use futures::future::BoxFuture;
use sqlx::postgres::{PgConnection, Postgres};
use sqlx::{PgPool, Transaction};

/// Lifecycle state of a [`SessionScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// The transaction is open and accepting statements.
    Open,
    /// The transaction committed; its writes are visible to later readers.
    Committed,
    /// The transaction rolled back; none of its writes are visible.
    RolledBack,
    /// The underlying connection has been released back to the pool.
    Closed,
}

/// One database session bound to one unit of work.
///
/// A scope wraps a transaction checked out of the shared pool. It is owned
/// by a single task for a single sequential unit of work — typically one
/// inbound request — and is never shared across tasks. Statements are
/// issued against [`SessionScope::session`]; the scope ends by consuming
/// itself through [`commit`](SessionScope::commit) or
/// [`rollback`](SessionScope::rollback).
///
/// If a scope is dropped while still open (early return, panic, task
/// cancellation), the inner transaction rolls back and the connection is
/// returned to the pool, so no exit path can leak a connection or leave a
/// transaction dangling.
pub struct SessionScope {
    // Present from construction until commit/rollback consumes it. Only
    // `Drop` ever observes `None`.
    tx: Option<Transaction<'static, Postgres>>,
    state: ScopeState,
}

impl SessionScope {
    /// Opens a fresh scope on a connection from the pool.
    ///
    /// Each call begins a new transaction; callers never reuse a scope
    /// across units of work. Waiting on the pool suspends the task when
    /// all connections are checked out.
    pub async fn begin(pool: &PgPool) -> Result<Self, DbError> {
        let tx = pool.begin().await?;
        Ok(Self {
            tx: Some(tx),
            state: ScopeState::Open,
        })
    }

    /// The current lifecycle state of this scope.
    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// The session handle statements are executed against.
    ///
    /// The handle serves one sequential unit of work; it is `&mut` precisely
    /// so the borrow checker rejects concurrent statements on one scope.
    pub fn session(&mut self) -> &mut PgConnection {
        // Invariant: `tx` is `Some` for the entire life of the scope; only
        // `commit`/`rollback` take it, and both consume `self`.
        self.tx
            .as_deref_mut()
            .expect("session scope used after commit or rollback")
    }

    /// Commits the unit of work, consuming the scope and reporting the
    /// terminal state it reached.
    ///
    /// On a failed COMMIT the transaction is already closed by the driver
    /// and the connection is discarded by the pool rather than returned in
    /// an unknown state, so a commit failure can never poison later units
    /// of work.
    pub async fn commit(mut self) -> Result<ScopeState, DbError> {
        match self.tx.take() {
            Some(tx) => match tx.commit().await {
                Ok(()) => Ok(ScopeState::Committed),
                Err(e) => Err(DbError::CommitFailed(e)),
            },
            None => Ok(ScopeState::Committed),
        }
    }

    /// Rolls the unit of work back, consuming the scope and reporting the
    /// terminal state it reached.
    ///
    /// A failed rollback is surfaced to the caller (and the connection is
    /// discarded by the pool); the scope still counts as finished.
    pub async fn rollback(mut self) -> Result<ScopeState, DbError> {
        match self.tx.take() {
            Some(tx) => {
                tx.rollback().await.map_err(DbError::RollbackFailed)?;
                Ok(ScopeState::RolledBack)
            }
            None => Ok(ScopeState::RolledBack),
        }
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        if self.tx.is_some() {
            // Dropping the inner transaction rolls it back and releases the
            // connection. This is the cancellation/panic path; normal exits
            // go through commit or rollback.
            tracing::warn!("session scope dropped while open; rolling back");
        }
        self.state = ScopeState::Closed;
    }
}

/// Runs one unit of work inside a fresh scope.
///
/// This is the entry point every endpoint uses: it opens a scope, hands it
/// to `op`, commits when `op` returns `Ok`, and rolls back when it returns
/// `Err`. When both the operation and the rollback fail, the rollback
/// failure is logged and the operation's error propagates.
///
/// Note that "no row matched" is not an error here — operations report it
/// as `Ok(None)`, which commits (a no-op) and lets the caller surface a
/// not-found outcome.
///
/// # Example
///
/// ```ignore
/// let created = with_scope(&pool, |scope| {
///     Box::pin(async move {
///         repository::insert_class(scope, class_id, &name, &teacher).await
///     })
/// })
/// .await?;
/// ```
pub async fn with_scope<T, F>(pool: &PgPool, op: F) -> Result<T, DbError>
where
    T: Send,
    F: for<'s> FnOnce(&'s mut SessionScope) -> BoxFuture<'s, Result<T, DbError>>,
{
    let mut scope = SessionScope::begin(pool).await?;
    match op(&mut scope).await {
        Ok(value) => {
            scope.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = scope.rollback().await {
                tracing::error!(error = ?rollback_err, "rollback failed after operation error");
            }
            Err(err)
        }
    }
}
