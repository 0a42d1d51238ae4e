use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for the content suggestion endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct NicheRequest {
    /// The content niche to generate ideas for.
    #[validate(length(min = 1, message = "Niche cannot be empty"))]
    pub niche: String,
}

/// Ordered content suggestions, one per processed trend.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub content_suggestions: Vec<String>,
}
