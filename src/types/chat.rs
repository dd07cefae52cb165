use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{MissingField, StructuredResponse, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// 从导师对话中归纳出的产品简报
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatBrief {
    pub product_description: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub geographical_focus: String,
}

impl StructuredResponse for ChatBrief {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.product_description, "productDescription")
    }
}
