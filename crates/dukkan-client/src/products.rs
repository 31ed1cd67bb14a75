//! # Product Endpoints
//!
//! Product listing and CRUD against the remote collaborator.
//!
//! Two listing shapes exist on purpose:
//! - `GET /products` is server-paged and searchable (the management table)
//! - `GET /products-for-sales` returns the full catalog in one response,
//!   which the sale form needs to show live stock for every choice

use dukkan_core::types::{Page, Product, ProductInput, ProductsQuery};
use serde::Serialize;
use tracing::info;

use crate::error::ClientResult;
use crate::http::{ApiClient, DataEnvelope};

#[derive(Serialize)]
struct BulkDeleteBody<'a> {
    ids: &'a [i64],
}

impl ApiClient {
    /// `GET /products` - one page of the searchable product table.
    pub async fn list_products(&self, query: &ProductsQuery) -> ClientResult<Page<Product>> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if !query.search.is_empty() {
            params.push(("search", query.search.clone()));
        }
        self.get_json("products", &params).await
    }

    /// `GET /products-for-sales` - the full catalog for the sale form.
    pub async fn list_products_for_sales(&self) -> ClientResult<Vec<Product>> {
        let envelope: DataEnvelope<Vec<Product>> =
            self.get_json("products-for-sales", &[]).await?;
        Ok(envelope.data)
    }

    /// `POST /products` - create a product, returning the stored row.
    pub async fn create_product(&self, input: &ProductInput) -> ClientResult<Product> {
        let envelope: DataEnvelope<Product> = self.post_json("products", input).await?;
        info!(product_id = envelope.data.id, name = %envelope.data.name, "Product created");
        Ok(envelope.data)
    }

    /// `PUT /products/{id}` - update a product, returning the stored row.
    pub async fn update_product(&self, id: i64, input: &ProductInput) -> ClientResult<Product> {
        let envelope: DataEnvelope<Product> =
            self.put_json(&format!("products/{id}"), input).await?;
        info!(product_id = id, "Product updated");
        Ok(envelope.data)
    }

    /// `DELETE /products/{id}`.
    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("products/{id}")).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// `POST /products/bulk-delete` - delete a selection in one request.
    pub async fn bulk_delete_products(&self, ids: &[i64]) -> ClientResult<()> {
        self.post_json_no_response("products/bulk-delete", &BulkDeleteBody { ids })
            .await?;
        info!(count = ids.len(), "Products bulk-deleted");
        Ok(())
    }

    /// `DELETE /products/delete-all` - clear the entire catalog.
    pub async fn delete_all_products(&self) -> ClientResult<()> {
        self.delete("products/delete-all").await?;
        info!("All products deleted");
        Ok(())
    }
}
