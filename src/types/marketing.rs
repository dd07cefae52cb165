use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{
    MissingField, StructuredResponse, require_at_least, require_items, require_text,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaPost {
    /// Facebook 或 Instagram
    pub platform: String,
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// 英文的配图生成提示词
    #[serde(default)]
    pub image_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BlogSection {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostOutline {
    pub title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub sections: Vec<BlogSection>,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub seo_keywords: Vec<String>,
    #[serde(default)]
    pub image_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdCopy {
    /// Google Ads 或 Facebook Ads
    pub platform: String,
    pub headline: String,
    pub description: String,
    #[serde(default)]
    pub image_prompt: String,
}

/// 营销内容包：6条社媒帖子、1份博客大纲、2条广告文案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContent {
    pub social_media_posts: Vec<SocialMediaPost>,
    pub blog_post_outline: BlogPostOutline,
    pub ad_copies: Vec<AdCopy>,
}

impl MarketingContent {
    pub const MIN_SOCIAL_POSTS: usize = 6;
    pub const MIN_AD_COPIES: usize = 2;
}

impl StructuredResponse for MarketingContent {
    fn validate(&self) -> Result<(), MissingField> {
        require_at_least(
            &self.social_media_posts,
            Self::MIN_SOCIAL_POSTS,
            "socialMediaPosts",
        )?;
        require_text(&self.blog_post_outline.title, "blogPostOutline.title")?;
        require_at_least(&self.ad_copies, Self::MIN_AD_COPIES, "adCopies")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MarketingChannel {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CampaignIdea {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoreMessaging {
    pub main_message: String,
    #[serde(default)]
    pub taglines: Vec<String>,
}

/// 周营销日历中的一条安排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CalendarEntry {
    pub day: String,
    pub time: String,
    pub activity: String,
    pub platform: String,
    #[serde(default)]
    pub notes: String,
}

/// 数字营销策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingStrategy {
    pub strategic_overview: String,
    pub suggested_channels: Vec<MarketingChannel>,
    pub core_messaging: CoreMessaging,
    #[serde(default)]
    pub campaign_ideas: Vec<CampaignIdea>,
    #[serde(default)]
    pub key_performance_indicators: Vec<String>,
    pub marketing_calendar: Vec<CalendarEntry>,
}

impl StructuredResponse for MarketingStrategy {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.strategic_overview, "strategicOverview")?;
        require_items(&self.suggested_channels, "suggestedChannels")?;
        require_items(&self.marketing_calendar, "marketingCalendar")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColorSwatch {
    pub hex: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FontChoice {
    pub name: String,
    /// Google Fonts 链接
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FontPairing {
    pub headline_font: FontChoice,
    pub body_font: FontChoice,
}

/// 品牌视觉识别
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandIdentity {
    pub color_palette: Vec<ColorSwatch>,
    pub font_pairing: FontPairing,
    pub mood_board_description: String,
}

impl BrandIdentity {
    pub const PALETTE_SIZE: usize = 6;
}

impl StructuredResponse for BrandIdentity {
    fn validate(&self) -> Result<(), MissingField> {
        require_at_least(&self.color_palette, Self::PALETTE_SIZE, "colorPalette")?;
        require_text(&self.mood_board_description, "moodBoardDescription")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductNameCategory {
    Descriptive,
    Evocative,
    Modern,
    Playful,
    Premium,
}

impl ProductNameCategory {
    pub const ALL: [ProductNameCategory; 5] = [
        ProductNameCategory::Descriptive,
        ProductNameCategory::Evocative,
        ProductNameCategory::Modern,
        ProductNameCategory::Playful,
        ProductNameCategory::Premium,
    ];
}

impl std::fmt::Display for ProductNameCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductNameCategory::Descriptive => write!(f, "DESCRIPTIVE"),
            ProductNameCategory::Evocative => write!(f, "EVOCATIVE"),
            ProductNameCategory::Modern => write!(f, "MODERN"),
            ProductNameCategory::Playful => write!(f, "PLAYFUL"),
            ProductNameCategory::Premium => write!(f, "PREMIUM"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProductNameSuggestion {
    pub name: String,
    /// 一句话说明为什么这个名字合适
    pub reasoning: String,
}

/// 按风格分类的产品名建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProductNameSuggestions {
    pub descriptive: Vec<ProductNameSuggestion>,
    pub evocative: Vec<ProductNameSuggestion>,
    #[serde(default)]
    pub modern: Vec<ProductNameSuggestion>,
    #[serde(default)]
    pub playful: Vec<ProductNameSuggestion>,
    #[serde(default)]
    pub premium: Vec<ProductNameSuggestion>,
}

impl ProductNameSuggestions {
    pub fn get(&self, category: ProductNameCategory) -> &[ProductNameSuggestion] {
        match category {
            ProductNameCategory::Descriptive => &self.descriptive,
            ProductNameCategory::Evocative => &self.evocative,
            ProductNameCategory::Modern => &self.modern,
            ProductNameCategory::Playful => &self.playful,
            ProductNameCategory::Premium => &self.premium,
        }
    }

    pub fn total(&self) -> usize {
        ProductNameCategory::ALL
            .iter()
            .map(|category| self.get(*category).len())
            .sum()
    }
}

impl StructuredResponse for ProductNameSuggestions {
    fn validate(&self) -> Result<(), MissingField> {
        require_items(&self.descriptive, "DESCRIPTIVE")?;
        require_items(&self.evocative, "EVOCATIVE")
    }
}
