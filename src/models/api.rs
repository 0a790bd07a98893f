use serde::{ Serialize, Deserialize };
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelatedArticlesRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelatedArticlesResponse {
    pub related_text: Value,
    #[serde(default)]
    pub articles_list: Vec<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles_list: Option<Vec<Value>>,
}

/// Batched `/chat` body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatSummaryResponse {
    pub summary: String,
    pub related_text: Value,
}
