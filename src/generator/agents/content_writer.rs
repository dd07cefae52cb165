use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::AnalysisResult;
use crate::types::marketing::MarketingContent;

/// 营销内容包：社媒帖子、博客大纲、广告文案
pub struct ContentWriter {
    analysis: AnalysisResult,
    user_input: String,
}

impl ContentWriter {
    pub fn new(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            analysis,
            user_input: user_input.to_string(),
        }
    }
}

impl FeatureAgent for ContentWriter {
    type Output = MarketingContent;

    fn feature(&self) -> Feature {
        Feature::MarketingContent
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an experienced marketing copywriter. Your style is professional yet personal and always relevant to the target audience.".to_string(),
            opening_instruction: "Based on the market research analysis below, create a package of marketing materials.".to_string(),
            closing_instruction: format!(
                r#"## Task
For EVERY piece of content (social post, blog outline, ad copy) write a short, visually rich 'imagePrompt' IN ENGLISH for an image generation model, e.g. "A minimalist, eco-friendly bathroom scene with natural light, showcasing artisanal vegan soap bars on a wooden tray".
- 'socialMediaPosts': EXACTLY {} posts, 3 for Facebook and 3 for Instagram.
  Facebook: 1) opens with a problem and presents the solution, with emojis; 2) educational tip; 3) community question that starts a conversation.
  Instagram: 1) short inspiring story or feeling; 2) behind-the-scenes; 3) call for user-generated content.
  Every post has relevant 'hashtags'.
- 'blogPostOutline': an SEO-friendly, click-worthy 'title', an 'introduction', 3 'sections' with key points, a 'conclusion' with a call to action and 5-7 'seoKeywords' taken from the analysis text and keywords.
- 'adCopies': EXACTLY {} ads: one 'Google Ads' (30 character headline, 90 character description) and one 'Facebook Ads' (emotional headline, short description with a call to action)."#,
                MarketingContent::MIN_SOCIAL_POSTS,
                MarketingContent::MIN_AD_COPIES
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
