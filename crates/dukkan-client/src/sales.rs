//! # Sale Endpoints
//!
//! Sale listing and CRUD against the remote collaborator.
//!
//! ## Stock Side-Effects (server-side, never client-side)
//! ```text
//! POST   /sales       →  product.quantity -= sale.quantity   (atomic)
//! PUT    /sales/{id}  →  product.quantity -= delta           (atomic)
//! DELETE /sales/{id}  →  product.quantity += sale.quantity   (atomic)
//! ```
//!
//! The bodies submitted here come exclusively from
//! [`dukkan_core::reconcile`]: a [`SaleDraft`] for create and a
//! [`SaleRevision`] for update. That is what guarantees every request was
//! locally validated first.

use dukkan_core::reconcile::{SaleDraft, SaleRevision};
use dukkan_core::types::{Page, Sale, SalesQuery};
use tracing::info;

use crate::error::ClientResult;
use crate::http::{ApiClient, DataEnvelope};

impl ApiClient {
    /// `GET /sales` - one page of the sales history, newest first.
    pub async fn list_sales(&self, query: &SalesQuery) -> ClientResult<Page<Sale>> {
        let params = [
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        self.get_json("sales", &params).await
    }

    /// `POST /sales` - record a sale; the server decrements stock.
    pub async fn create_sale(&self, draft: &SaleDraft) -> ClientResult<Sale> {
        let envelope: DataEnvelope<Sale> = self.post_json("sales", draft).await?;
        info!(
            sale_id = envelope.data.id,
            product_id = draft.product_id,
            quantity = draft.quantity,
            "Sale recorded"
        );
        Ok(envelope.data)
    }

    /// `PUT /sales/{id}` - revise a sale; the server applies the
    /// quantity delta to stock.
    pub async fn update_sale(&self, id: i64, revision: &SaleRevision) -> ClientResult<Sale> {
        let envelope: DataEnvelope<Sale> =
            self.put_json(&format!("sales/{id}"), revision).await?;
        info!(sale_id = id, quantity = revision.quantity, "Sale updated");
        Ok(envelope.data)
    }

    /// `DELETE /sales/{id}` - void a sale; the server restores the
    /// sold units to stock inside its deletion transaction. Deleting a
    /// sale that is already gone fails with 404 (no double restore).
    pub async fn delete_sale(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("sales/{id}")).await?;
        info!(sale_id = id, "Sale deleted, stock restored server-side");
        Ok(())
    }
}
