//! # Media Collaborator Contracts
//!
//! Black-box edges the product form talks to: barcode decoding fills the
//! reference-number field, image upload yields a URL stored on the
//! Product. Concrete engines live outside this workspace; these traits
//! pin down the contract workflow code programs against.

use crate::error::ClientResult;

/// Decodes a barcode from a captured camera frame.
#[allow(async_fn_in_trait)]
pub trait BarcodeDecoder {
    /// Returns the decoded symbol text, or `None` when the frame holds
    /// no readable barcode. Frames arrive as raw encoded image bytes.
    async fn decode(&self, frame: &[u8]) -> ClientResult<Option<String>>;
}

/// Uploads a product image and returns its public URL.
#[allow(async_fn_in_trait)]
pub trait ImageUploader {
    /// Uploads `bytes` under `file_name`; the returned URL is what gets
    /// stored in `Product::image_url`.
    async fn upload(&self, file_name: &str, bytes: &[u8]) -> ClientResult<String>;
}
