//! Generation-provider trait.

use async_trait::async_trait;

use crate::error::Result;

/// Single synchronous call boundary to the external text-generation
/// provider: prompt in, raw text out.
///
/// Implementations wrap a specific provider and must apply a bounded
/// timeout. No retry happens at this level; retry policy, if any,
/// belongs to whoever calls the stage.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Complete a prompt and return the raw text response.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt with a specific model id. The default
    /// implementation ignores the override.
    async fn generate_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let _ = model;
        self.generate(prompt).await
    }
}
