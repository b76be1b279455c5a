use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    Page, ValidatedJson,
    errors::responses::{
        BadRequestDuplicateResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PageParams, PatchProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "Products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        patch_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, PatchProduct, Page<Product>),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestDuplicateResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List a page of products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "A page of products", body = Page<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(page): Query<PageParams>,
) -> ProductResult<Json<Page<Product>>> {
    let products = service.list_products(page.skip, page.limit).await?;

    // An empty page is an error here, not an empty envelope
    if products.is_empty() {
        return Err(ProductError::Empty);
    }

    Ok(Json(Page::new(products, page.skip, page.limit)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestDuplicateResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = PatchProduct,
    responses(
        (status = 200, description = "Product patched successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<PatchProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.patch_product(&id, input).await?;
    Ok(Json(product))
}

/// Replace the full mutable field set of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(&id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
