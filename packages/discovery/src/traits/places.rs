//! Place-search provider trait.

use async_trait::async_trait;

use crate::error::Result;

/// One hit from a place search.
#[derive(Debug, Clone, Default)]
pub struct PlaceHit {
    pub name: String,
    pub rating: Option<f32>,
    /// Opaque photo references; turn into URLs via [`PlaceSearch::photo_url`].
    pub photo_references: Vec<String>,
    pub formatted_address: Option<String>,
    pub price_level: Option<u8>,
    pub types: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Text search against a place directory, used as the third step of
/// the image-resolution chain.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Search places matching a free-form query.
    async fn search(&self, query: &str) -> Result<Vec<PlaceHit>>;

    /// Build a fetchable photo URL from an opaque photo reference.
    fn photo_url(&self, reference: &str, max_width: u32) -> String;
}
