use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use service::errors::ServiceError;
use service::pagination::{Page, PageQuery};
use service::store_service::{self, SupplierContact};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// items per page, default 10
    pub page_size: Option<u64>,
    /// 0-based page index, default 0
    pub page_index: Option<u64>,
    /// substring matched against name or address
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TopSuppliersQuery {
    pub store_id: i32,
}

/// Candidate store record; the id is assigned by the database.
#[derive(Debug, Deserialize, Serialize)]
pub struct StoreInput {
    pub name: String,
    pub address: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub friendliness_level: f32,
}

#[utoipa::path(
    get, path = "/api/stores/getall", tag = "stores",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of stores"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<models::store::Model>>, JsonApiError> {
    let mut page = PageQuery::default();
    if let Some(s) = q.page_size {
        page.page_size = s;
    }
    if let Some(i) = q.page_index {
        page.page_index = i;
    }
    match store_service::list_stores(&state.db, page, q.keyword.as_deref()).await {
        Ok(p) => {
            info!(total = p.total_items, pages = p.total_pages, "list stores");
            Ok(Json(p))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "list stores failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/api/stores/{id}", tag = "stores",
    params(("id" = i32, Path, description = "Store ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::store::Model>, StatusCode> {
    match store_service::get_store(&state.db, id).await {
        Ok(Some(m)) => Ok(Json(m)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    post, path = "/api/stores/postone", tag = "stores",
    request_body = crate::openapi::StoreInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Name conflict or validation error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<StoreInput>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<models::store::Model>), JsonApiError> {
    match store_service::create_store(
        &state.db,
        &input.name,
        &input.address,
        input.opening_time,
        input.closing_time,
        input.friendliness_level,
    )
    .await
    {
        Ok(m) => {
            info!(id = m.id, name = %m.name, "created store");
            let location = format!("/api/stores/{}", m.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(m)))
        }
        Err(e @ ServiceError::Conflict(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Name Conflict", Some(e.to_string())))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create store failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/api/stores/{id}", tag = "stores",
    params(("id" = i32, Path, description = "Store ID")),
    request_body = crate::openapi::StoreInputDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Name conflict or validation error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<StoreInput>,
) -> Result<StatusCode, JsonApiError> {
    match store_service::update_store(
        &state.db,
        id,
        &input.name,
        &input.address,
        input.opening_time,
        input.closing_time,
        input.friendliness_level,
    )
    .await
    {
        Ok(m) => {
            info!(id = m.id, "updated store");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e @ ServiceError::Conflict(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Name Conflict", Some(e.to_string())))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e @ ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "update store failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/stores/{id}", tag = "stores",
    params(("id" = i32, Path, description = "Store ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> StatusCode {
    match store_service::delete_store(&state.db, id).await {
        Ok(true) => {
            info!(id, "deleted store");
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            error!(err = %e, "delete store failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[utoipa::path(
    get, path = "/api/stores/suppliers/highest-friendliness", tag = "stores",
    params(TopSuppliersQuery),
    responses(
        (status = 200, description = "Suppliers tied at the maximum friendliness"),
        (status = 404, description = "Store Not Found")
    )
)]
pub async fn top_suppliers(
    State(state): State<ServerState>,
    Query(q): Query<TopSuppliersQuery>,
) -> Result<Json<Vec<SupplierContact>>, JsonApiError> {
    match store_service::top_suppliers(&state.db, q.store_id).await {
        Ok(list) => {
            info!(store_id = q.store_id, count = list.len(), "top suppliers");
            Ok(Json(list))
        }
        Err(e @ ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "top suppliers failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Query Failed", Some(e.to_string())))
        }
    }
}
