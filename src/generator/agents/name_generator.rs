use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::AnalysisResult;
use crate::types::marketing::ProductNameSuggestions;

pub struct NameGenerator {
    analysis: AnalysisResult,
    user_input: String,
}

impl NameGenerator {
    pub fn new(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            analysis,
            user_input: user_input.to_string(),
        }
    }
}

impl FeatureAgent for NameGenerator {
    type Output = ProductNameSuggestions;

    fn feature(&self) -> Feature {
        Feature::ProductNames
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a creative marketing and branding expert who invents memorable product and brand names.".to_string(),
            opening_instruction: "Based on the market research analysis and product description below, suggest 10-15 product or brand names. Focus on the keywords, the personas and the market sentiment.".to_string(),
            closing_instruction: r#"## Task
The keys of the object are the name categories and the values are arrays of suggestions. Every suggestion has a 'name' and a one-sentence 'reasoning' explaining why it fits the product.
- DESCRIPTIVE: clear, descriptive names.
- EVOCATIVE: atmospheric names that appeal to emotions.
- MODERN: modern, trendy names, possibly English-sounding.
- PLAYFUL: playful, creative names.
- PREMIUM: elegant, premium-sounding names.
Put at least 2-3 names in every category."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let user_input = require_input(self.feature(), &self.user_input, "user input")?;
        let mut content = section("Original idea / product", &format!("\"{}\"", user_input));
        content.push_str(&json_section("Detailed analysis", &self.analysis));
        Ok(content)
    }
}
