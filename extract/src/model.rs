use async_trait::async_trait;

use crate::intake::FloorPlanImage;

/// A vision-language model that answers a prompt about an image with free text.
///
/// Implementations wrap a concrete backend. An `Err` means the call itself
/// failed (network, quota, backend error) and is never retried; a successful
/// call with unusable text is the retry loop's business.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Sends `image` and `prompt` in one call and returns the model's text.
    async fn generate(&self, image: &FloorPlanImage, prompt: &str) -> Result<String, String>;
}
