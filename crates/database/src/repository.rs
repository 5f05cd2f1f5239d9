use crate::error::DbError;
use crate::scope::SessionScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a row from the `classes` table (the parent record).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ClassRecord {
    pub class_id: Uuid,
    pub class_name: String,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

/// Represents a row from the `class_notices` table (the child record).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ClassNoticeRecord {
    pub notice_id: i64,
    pub class_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inserts a new class and returns the created row.
pub async fn insert_class(
    scope: &mut SessionScope,
    class_id: Uuid,
    class_name: &str,
    teacher_id: &str,
) -> Result<ClassRecord, DbError> {
    let row = sqlx::query_as::<_, ClassRecord>(
        r#"
        INSERT INTO classes (class_id, class_name, teacher_id, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING class_id, class_name, teacher_id, created_at
        "#,
    )
    .bind(class_id)
    .bind(class_name)
    .bind(teacher_id)
    .fetch_one(scope.session())
    .await?;

    Ok(row)
}

/// Fetches a single class by id. `Ok(None)` means no such class.
pub async fn fetch_class(
    scope: &mut SessionScope,
    class_id: Uuid,
) -> Result<Option<ClassRecord>, DbError> {
    let row = sqlx::query_as::<_, ClassRecord>(
        "SELECT class_id, class_name, teacher_id, created_at FROM classes WHERE class_id = $1",
    )
    .bind(class_id)
    .fetch_optional(scope.session())
    .await?;

    Ok(row)
}

/// Fetches all classes, newest first.
/// In a real app, this would support pagination with OFFSET and LIMIT.
pub async fn fetch_class_list(scope: &mut SessionScope) -> Result<Vec<ClassRecord>, DbError> {
    let rows = sqlx::query_as::<_, ClassRecord>(
        "SELECT class_id, class_name, teacher_id, created_at FROM classes ORDER BY created_at DESC",
    )
    .fetch_all(scope.session())
    .await?;

    Ok(rows)
}

/// Inserts a notice under a class and returns the created row.
///
/// The foreign key on `class_id` makes this fail for an unknown class;
/// that surfaces as a `QueryError` and rolls the unit of work back.
pub async fn insert_notice(
    scope: &mut SessionScope,
    class_id: Uuid,
    message: &str,
) -> Result<ClassNoticeRecord, DbError> {
    let row = sqlx::query_as::<_, ClassNoticeRecord>(
        r#"
        INSERT INTO class_notices (class_id, message, created_at, updated_at)
        VALUES ($1, $2, NOW(), NOW())
        RETURNING notice_id, class_id, message, created_at, updated_at
        "#,
    )
    .bind(class_id)
    .bind(message)
    .fetch_one(scope.session())
    .await?;

    Ok(row)
}

/// Fetches the notices of a class ordered by creation time, newest first.
pub async fn fetch_notice_list(
    scope: &mut SessionScope,
    class_id: Uuid,
) -> Result<Vec<ClassNoticeRecord>, DbError> {
    let rows = sqlx::query_as::<_, ClassNoticeRecord>(
        r#"
        SELECT notice_id, class_id, message, created_at, updated_at
        FROM class_notices
        WHERE class_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(class_id)
    .fetch_all(scope.session())
    .await?;

    Ok(rows)
}

/// Updates a notice's message. `Ok(None)` means the predicate matched no
/// row (wrong notice id or wrong class) and nothing was altered.
pub async fn update_notice(
    scope: &mut SessionScope,
    class_id: Uuid,
    notice_id: i64,
    message: &str,
) -> Result<Option<ClassNoticeRecord>, DbError> {
    let row = sqlx::query_as::<_, ClassNoticeRecord>(
        r#"
        UPDATE class_notices
        SET message = $1, updated_at = NOW()
        WHERE notice_id = $2 AND class_id = $3
        RETURNING notice_id, class_id, message, created_at, updated_at
        "#,
    )
    .bind(message)
    .bind(notice_id)
    .bind(class_id)
    .fetch_optional(scope.session())
    .await?;

    Ok(row)
}

/// Deletes a notice, returning the deleted row. `Ok(None)` means there was
/// nothing to delete, so a repeated delete reports not-found.
pub async fn delete_notice(
    scope: &mut SessionScope,
    class_id: Uuid,
    notice_id: i64,
) -> Result<Option<ClassNoticeRecord>, DbError> {
    let row = sqlx::query_as::<_, ClassNoticeRecord>(
        r#"
        DELETE FROM class_notices
        WHERE notice_id = $1 AND class_id = $2
        RETURNING notice_id, class_id, message, created_at, updated_at
        "#,
    )
    .bind(notice_id)
    .bind(class_id)
    .fetch_optional(scope.session())
    .await?;

    Ok(row)
}
