//! CRUD handlers shared by every record kind.
//!
//! Each handler is generic over the record kind `R` and is mounted once per
//! kind by [`super::record_routes`].

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mediscreen_core::Record;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::state::{AppState, HasStore};

/// Query string for `GET /{kind}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameQuery {
    pub last_name: String,
    pub first_name: String,
}

/// Reject the record with its first violation, if any.
fn ensure_valid<R: Record>(record: &R) -> Result<()> {
    match record.violations().first() {
        Some(violation) => Err(AppError::invalid_body::<R>(violation)),
        None => Ok(()),
    }
}

/// `GET /{kind}?lastName=&firstName=` - fetch one record by name.
///
/// # Errors
///
/// 404 if no record matches both names.
pub async fn show<R>(
    State(state): State<AppState>,
    Query(key): Query<NameQuery>,
) -> Result<Json<R>>
where
    R: Record + Serialize,
    AppState: HasStore<R>,
{
    HasStore::<R>::store(&state)
        .find_by_name(&key.last_name, &key.first_name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::name_not_found::<R>(&key.last_name, &key.first_name))
}

/// `GET /{kind}s` - fetch every record.
///
/// # Errors
///
/// 500 if the store fails.
pub async fn list<R>(State(state): State<AppState>) -> Result<Json<Vec<R>>>
where
    R: Record + Serialize,
    AppState: HasStore<R>,
{
    let records = HasStore::<R>::store(&state).find_all().await?;
    Ok(Json(records))
}

/// `POST /{kind}` - validate and insert a new record.
///
/// Any identifier in the body is ignored; the store assigns a fresh one.
///
/// # Errors
///
/// 400 if the body breaks a field rule.
pub async fn create<R>(
    State(state): State<AppState>,
    Json(mut record): Json<R>,
) -> Result<(StatusCode, String)>
where
    R: Record + DeserializeOwned,
    AppState: HasStore<R>,
{
    ensure_valid(&record)?;

    record.clear_id();
    let saved = HasStore::<R>::store(&state).save(record).await?;
    tracing::debug!(kind = R::KIND, id = ?saved.id(), "Record created");

    Ok((StatusCode::CREATED, format!("{} sucessfully saved", R::LABEL)))
}

/// `PUT /{kind}/{uuid}` - overwrite every field of an existing record.
///
/// # Errors
///
/// 404 if the identifier is unknown, then 400 if the body breaks a field rule.
pub async fn update<R>(
    State(state): State<AppState>,
    Path(id): Path<R::Id>,
    Json(body): Json<R>,
) -> Result<String>
where
    R: Record + DeserializeOwned,
    R::Id: DeserializeOwned,
    AppState: HasStore<R>,
{
    let store = HasStore::<R>::store(&state);
    let mut record = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::id_not_found::<R>(id))?;

    ensure_valid(&body)?;

    record.overwrite_with(body);
    store.save(record).await?;

    Ok(format!("{} successfully updated", R::LABEL))
}

/// `DELETE /{kind}/{uuid}` - remove an existing record.
///
/// # Errors
///
/// 404 if the identifier is unknown.
pub async fn destroy<R>(
    State(state): State<AppState>,
    Path(id): Path<R::Id>,
) -> Result<String>
where
    R: Record,
    R::Id: DeserializeOwned,
    AppState: HasStore<R>,
{
    let store = HasStore::<R>::store(&state);
    let record = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::id_not_found::<R>(id))?;

    store.delete(&record).await?;

    Ok(format!(
        "The {} has been successfully deleted in the database.",
        R::KIND
    ))
}
