use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::AnalysisResult;
use crate::types::marketing::BrandIdentity;

/// 品牌视觉：色板、字体搭配、情绪板
pub struct BrandDesigner {
    analysis: AnalysisResult,
    user_input: String,
}

impl BrandDesigner {
    pub fn new(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            analysis,
            user_input: user_input.to_string(),
        }
    }
}

impl FeatureAgent for BrandDesigner {
    type Output = BrandIdentity;

    fn feature(&self) -> Feature {
        Feature::BrandIdentity
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an experienced brand and visual designer. A brand identity must reflect the nature of the product, the style of the audience and the market positioning.".to_string(),
            opening_instruction: "Based on the market research analysis below, design a possible brand identity. Focus on the personas, the keywords and the market sentiment.".to_string(),
            closing_instruction: format!(
                r#"## Task
- 'colorPalette': EXACTLY {} colors with a 'hex' code and an evocative 'name'. The palette must be harmonious: one or two main colors, complementary colors and neutral shades.
- 'fontPairing': a readable, aesthetic 'headlineFont' and 'bodyFont', each with its Google Fonts 'url'. Use Google Fonts only.
- 'moodBoardDescription': 3-4 sentences about the visual mood: style (e.g. minimal, rustic, modern), imagery (e.g. natural light, vivid colors) and overall feeling."#,
                BrandIdentity::PALETTE_SIZE
            ),
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
