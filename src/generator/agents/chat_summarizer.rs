use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{FeatureAgent, PromptTemplate, section};
use crate::types::chat::{ChatBrief, ChatMessage, ChatRole};

/// 把导师对话归纳为产品简报
pub struct ChatSummarizer {
    transcript: Vec<ChatMessage>,
}

impl ChatSummarizer {
    pub fn new(transcript: Vec<ChatMessage>) -> Self {
        Self { transcript }
    }

    fn conversation(&self) -> String {
        self.transcript
            .iter()
            .filter(|m| !m.text.trim().is_empty())
            .map(|m| {
                let speaker = match m.role {
                    ChatRole::User => "User",
                    ChatRole::Model => "Mentor",
                };
                format!("{}: {}", speaker, m.text.trim())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FeatureAgent for ChatSummarizer {
    type Output = ChatBrief;

    fn feature(&self) -> Feature {
        Feature::ChatSummary
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You extract the business idea a user has developed during a mentoring conversation.".to_string(),
            opening_instruction: "Summarize the user's business idea based on the following conversation.".to_string(),
            closing_instruction: r#"## Task
- 'productDescription': a detailed, 2-3 sentence description of the idea.
- 'industry': the relevant industry. If it is not mentioned explicitly, infer it from the description.
- 'geographicalFocus': the geographical focus (e.g. 'Magyarország', 'Budapest'). If it is not mentioned, use 'Magyarország'."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let has_user_turn = self
            .transcript
            .iter()
            .any(|m| m.role == ChatRole::User && !m.text.trim().is_empty());
        if !has_user_turn {
            return Err(GenerationError::invalid_input(
                self.feature(),
                "the conversation contains no user message",
            ));
        }
        Ok(section(
            "Conversation",
            &format!("---\n{}\n---", self.conversation()),
        ))
    }
}
