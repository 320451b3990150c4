use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ApiResponse, AppJson, CurrentUser, ErrorBody, UuidPath};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{CategoryFilter, CategoryResponse, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

/// OpenAPI documentation for the categories API
#[derive(OpenApi)]
#[openapi(
    paths(list_categories, create_category, get_category, update_category, delete_category),
    components(schemas(CategoryResponse, CreateCategory, UpdateCategory, ErrorBody)),
    tags(
        (name = "Categories", description = "Event category endpoints")
    )
)]
pub struct ApiDoc;

/// Create the categories router with all HTTP endpoints
///
/// All routes require a logged-in user; categories themselves are shared,
/// not per-user.
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(shared_service)
}

/// List categories, optionally filtered by name fragment
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = Vec<CategoryResponse>),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    CurrentUser(_user_id): CurrentUser,
    Query(filter): Query<CategoryFilter>,
) -> CategoryResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = service.list_categories(filter).await?;
    let data: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok("Categories retrieved successfully", data))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    CurrentUser(_user_id): CurrentUser,
    AppJson(input): AppJson<CreateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(
            "Category created successfully",
            CategoryResponse::from(category),
        ),
    ))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    CurrentUser(_user_id): CurrentUser,
    UuidPath(id): UuidPath,
) -> CategoryResult<ApiResponse<CategoryResponse>> {
    let category = service.get_category(id).await?;
    Ok(ApiResponse::ok(
        "Category found",
        CategoryResponse::from(category),
    ))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    CurrentUser(_user_id): CurrentUser,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<UpdateCategory>,
) -> CategoryResult<ApiResponse<CategoryResponse>> {
    let category = service.update_category(id, input).await?;
    Ok(ApiResponse::ok(
        "Category updated successfully",
        CategoryResponse::from(category),
    ))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted successfully"),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    CurrentUser(_user_id): CurrentUser,
    UuidPath(id): UuidPath,
) -> CategoryResult<ApiResponse<()>> {
    service.delete_category(id).await?;
    Ok(ApiResponse::message_only("Category deleted successfully"))
}
