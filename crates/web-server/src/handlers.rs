use crate::responses::{
    BaseResponse, ClassNoticeReq, ClassNoticeResp, ClassReq, ClassResp,
};
use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use cache::{build_key, fetch_or_load};
use database::{repository, with_scope};
use std::sync::Arc;
use uuid::Uuid;

/// # POST /api/classes
/// Creates a class inside one unit of work.
pub async fn create_class(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassReq>,
) -> Result<Json<BaseResponse<ClassResp>>, AppError> {
    let class_id = Uuid::new_v4();
    let ClassReq {
        class_name,
        teacher_id,
    } = body;

    let created = with_scope(&state.pool, move |scope| {
        Box::pin(async move {
            repository::insert_class(scope, class_id, &class_name, &teacher_id).await
        })
    })
    .await
    .map_err(|e| AppError::operation_failed("CLASS_CREATE_FAILED", e))?;

    Ok(Json(BaseResponse::new(created.into())))
}

/// # GET /api/classes/list
/// Lists all classes, served through the read-through cache.
pub async fn read_class_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BaseResponse<Vec<ClassResp>>>, AppError> {
    let key = build_key("read_class_list", std::iter::empty::<&str>());

    let classes = fetch_or_load(state.cache.as_ref(), &key, state.cache_ttl, || async {
        with_scope(&state.pool, |scope| {
            Box::pin(async move { repository::fetch_class_list(scope).await.map(Some) })
        })
        .await
    })
    .await?;

    let classes = classes.unwrap_or_default();
    Ok(Json(BaseResponse::new(
        classes.into_iter().map(ClassResp::from).collect(),
    )))
}

/// # GET /api/classes/:class_id
/// Fetches one class, served through the read-through cache. Absence is
/// never cached, so an id created moments later is found immediately.
pub async fn read_class(
    Path(class_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BaseResponse<ClassResp>>, AppError> {
    let key = build_key("read_class", [class_id.to_string()]);

    let class = fetch_or_load(state.cache.as_ref(), &key, state.cache_ttl, || async {
        with_scope(&state.pool, move |scope| {
            Box::pin(async move { repository::fetch_class(scope, class_id).await })
        })
        .await
    })
    .await?;

    let class = class.ok_or(AppError::NotFound("CLASS_NOT_FOUND"))?;
    Ok(Json(BaseResponse::new(class.into())))
}

/// # POST /api/classes/:class_id/notices
/// Creates a notice under a class. An unknown class trips the foreign key,
/// which rolls the unit of work back.
pub async fn create_class_notice(
    Path(class_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassNoticeReq>,
) -> Result<Json<BaseResponse<ClassNoticeResp>>, AppError> {
    let message = body.message;

    let created = with_scope(&state.pool, move |scope| {
        Box::pin(async move { repository::insert_notice(scope, class_id, &message).await })
    })
    .await
    .map_err(|e| AppError::operation_failed("NOTICE_CREATE_FAILED", e))?;

    Ok(Json(BaseResponse::new(created.into())))
}

/// # GET /api/classes/:class_id/notices/list
/// Lists a class's notices, newest first.
pub async fn read_class_notice_list(
    Path(class_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BaseResponse<Vec<ClassNoticeResp>>>, AppError> {
    let notices = with_scope(&state.pool, move |scope| {
        Box::pin(async move { repository::fetch_notice_list(scope, class_id).await })
    })
    .await?;

    if notices.is_empty() {
        return Err(AppError::NotFound("NOTICE_NOT_FOUND"));
    }

    Ok(Json(BaseResponse::new(
        notices.into_iter().map(ClassNoticeResp::from).collect(),
    )))
}

/// # PUT /api/classes/:class_id/notices/:notice_id
/// Updates a notice's message. A predicate that matches nothing commits a
/// no-op and reports not-found; a database failure rolls back.
pub async fn update_class_notice(
    Path((class_id, notice_id)): Path<(Uuid, i64)>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassNoticeReq>,
) -> Result<Json<BaseResponse<ClassNoticeResp>>, AppError> {
    let message = body.message;

    let updated = with_scope(&state.pool, move |scope| {
        Box::pin(async move {
            repository::update_notice(scope, class_id, notice_id, &message).await
        })
    })
    .await
    .map_err(|e| AppError::operation_failed("NOTICE_UPDATE_FAILED", e))?;

    let updated = updated.ok_or(AppError::NotFound("NOTICE_NOT_FOUND"))?;
    Ok(Json(BaseResponse::new(updated.into())))
}

/// # DELETE /api/classes/:class_id/notices/:notice_id
/// Deletes a notice and returns the deleted row; deleting it again
/// reports not-found.
pub async fn delete_class_notice(
    Path((class_id, notice_id)): Path<(Uuid, i64)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BaseResponse<ClassNoticeResp>>, AppError> {
    let deleted = with_scope(&state.pool, move |scope| {
        Box::pin(async move { repository::delete_notice(scope, class_id, notice_id).await })
    })
    .await
    .map_err(|e| AppError::operation_failed("NOTICE_DELETE_FAILED", e))?;

    let deleted = deleted.ok_or(AppError::NotFound("NOTICE_NOT_FOUND"))?;
    Ok(Json(BaseResponse::new(deleted.into())))
}
