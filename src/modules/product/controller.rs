use super::model::{IdRequestBody, Product};
use super::service::ProductService;
use crate::common::Created;
use crate::di::{Container, Injectable};
use crate::error::{CatalogError, Result};
use crate::pipe::extract::{IdParam, ValidJson};
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;

/// HTTP surface for products. Validates shape, dispatches to the service and
/// maps outcomes to status codes; nothing else.
pub struct ProductController {
    service: Arc<ProductService>,
}

impl ProductController {
    pub fn new(service: Arc<ProductService>) -> Self {
        Self { service }
    }

    pub fn base_path() -> &'static str {
        "/products"
    }

    pub fn location_of(id: i32) -> String {
        format!("{}/{}", Self::base_path(), id)
    }

    pub async fn list(&self) -> Result<Json<Vec<Product>>> {
        Ok(Json(self.service.get_all_products().await?))
    }

    pub async fn get_one(&self, id: i32) -> Result<Json<Product>> {
        self.service
            .get_product_by_id(id)
            .await?
            .map(Json)
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    pub async fn lookup(&self, body: IdRequestBody) -> Result<Json<Product>> {
        self.get_one(body.id()).await
    }

    pub async fn create(&self, product: Product) -> Result<Created<Product>> {
        let stored = self.service.create_product(product).await?;
        Ok(Created::new(Self::location_of(stored.id), stored))
    }

    pub async fn update(&self, id: i32, product: Product) -> Result<StatusCode> {
        if product.id == 0 {
            return Err(CatalogError::validation(
                "id",
                "request body must carry the product id",
            ));
        }
        if product.id != id {
            return Err(CatalogError::validation(
                "id",
                format!("body id {} does not match path id {}", product.id, id),
            ));
        }
        if self.service.update_product(id, product).await? {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(CatalogError::product_not_found(id))
        }
    }

    pub async fn delete(&self, id: i32) -> Result<StatusCode> {
        if self.service.delete_product(id).await? {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(CatalogError::product_not_found(id))
        }
    }

    pub fn router<S>(controller: Arc<Self>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let base = Self::base_path();
        let item = format!("{}/{{id}}", base);
        let lookup = format!("{}/lookup-by-id", base);

        Router::new()
            .route(
                base,
                get({
                    let controller = controller.clone();
                    move || {
                        let controller = controller.clone();
                        async move { controller.list().await.into_response() }
                    }
                })
                .post({
                    let controller = controller.clone();
                    move |ValidJson(product): ValidJson<Product>| {
                        let controller = controller.clone();
                        async move { controller.create(product).await.into_response() }
                    }
                }),
            )
            .route(
                &lookup,
                post({
                    let controller = controller.clone();
                    move |ValidJson(body): ValidJson<IdRequestBody>| {
                        let controller = controller.clone();
                        async move { controller.lookup(body).await.into_response() }
                    }
                }),
            )
            .route(
                &item,
                get({
                    let controller = controller.clone();
                    move |IdParam(id): IdParam| {
                        let controller = controller.clone();
                        async move { controller.get_one(id).await.into_response() }
                    }
                })
                .put({
                    let controller = controller.clone();
                    move |IdParam(id): IdParam, ValidJson(product): ValidJson<Product>| {
                        let controller = controller.clone();
                        async move { controller.update(id, product).await.into_response() }
                    }
                })
                .delete({
                    let controller = controller.clone();
                    move |IdParam(id): IdParam| {
                        let controller = controller.clone();
                        async move { controller.delete(id).await.into_response() }
                    }
                }),
            )
    }
}

impl Injectable for ProductController {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self::new(container.resolve::<ProductService>()?))
    }
}
