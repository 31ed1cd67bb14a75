//! # Category Endpoints
//!
//! Category listing and CRUD. Like products, two listing shapes: the
//! paged management table and a flat `categories-for-select` list for
//! dropdowns.

use dukkan_core::types::{CategoriesQuery, Category, CategoryInput, Page};
use tracing::info;

use crate::error::ClientResult;
use crate::http::{ApiClient, DataEnvelope};

impl ApiClient {
    /// `GET /categories` - one page of the searchable category table.
    pub async fn list_categories(&self, query: &CategoriesQuery) -> ClientResult<Page<Category>> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if !query.search.is_empty() {
            params.push(("search", query.search.clone()));
        }
        self.get_json("categories", &params).await
    }

    /// `GET /categories-for-select` - the full list for dropdowns.
    pub async fn list_categories_for_select(&self) -> ClientResult<Vec<Category>> {
        let envelope: DataEnvelope<Vec<Category>> =
            self.get_json("categories-for-select", &[]).await?;
        Ok(envelope.data)
    }

    /// `POST /categories`.
    pub async fn create_category(&self, input: &CategoryInput) -> ClientResult<Category> {
        let envelope: DataEnvelope<Category> = self.post_json("categories", input).await?;
        info!(category_id = envelope.data.id, name = %envelope.data.name, "Category created");
        Ok(envelope.data)
    }

    /// `PUT /categories/{id}`.
    pub async fn update_category(&self, id: i64, input: &CategoryInput) -> ClientResult<Category> {
        let envelope: DataEnvelope<Category> =
            self.put_json(&format!("categories/{id}"), input).await?;
        info!(category_id = id, "Category updated");
        Ok(envelope.data)
    }

    /// `DELETE /categories/{id}` - fails at the collaborator when
    /// products still reference the category.
    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("categories/{id}")).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }
}
