use serde_json::json;

use crate::testing::{sample_analysis_json, sample_persona_json, sample_plan_json};
use crate::types::StructuredResponse;
use crate::types::analysis::{AnalysisResult, BuyerPersona, PointCategory, PricingTier, Source};
use crate::types::business::{BusinessPlanSet, BusinessPlanTemplate, MarketEntryProcess};
use crate::types::chat::ChatBrief;
use crate::types::marketing::{BrandIdentity, ProductNameCategory, ProductNameSuggestions};

#[test]
fn test_sample_analysis_decodes_and_validates() {
    let analysis: AnalysisResult = serde_json::from_value(sample_analysis_json()).unwrap();
    assert!(analysis.validate().is_ok());
    assert!(analysis.sources.is_empty());
    assert_eq!(analysis.main_competitors().count(), 1);
}

#[test]
fn test_unknown_point_category_falls_back_to_other() {
    let analysis: AnalysisResult = serde_json::from_value(sample_analysis_json()).unwrap();
    let weakness = &analysis.competitors[1].weaknesses[0];
    assert_eq!(weakness.category, PointCategory::Other);
    assert_eq!(analysis.competitors[1].pricing_summary, PricingTier::MidRange);
}

#[test]
fn test_analysis_with_empty_personas_is_incomplete() {
    let mut value = sample_analysis_json();
    value["personas"] = json!([]);
    let analysis: AnalysisResult = serde_json::from_value(value).unwrap();
    assert_eq!(analysis.validate().unwrap_err().field, "personas");
}

#[test]
fn test_analysis_with_blank_text_is_incomplete() {
    let mut value = sample_analysis_json();
    value["analysisText"] = json!("   ");
    let analysis: AnalysisResult = serde_json::from_value(value).unwrap();
    assert_eq!(analysis.validate().unwrap_err().field, "analysisText");
}

#[test]
fn test_analysis_without_swot_fails_decode_with_field_name() {
    let mut value = sample_analysis_json();
    value.as_object_mut().unwrap().remove("swotAnalysis");
    let err = serde_json::from_value::<AnalysisResult>(value).unwrap_err();
    assert!(err.to_string().contains("swotAnalysis"));
}

#[test]
fn test_dedupe_sources_by_uri() {
    let mut analysis: AnalysisResult = serde_json::from_value(sample_analysis_json()).unwrap();
    analysis.sources = vec![
        Source { uri: "https://a.hu".into(), title: "A".into() },
        Source { uri: "https://b.hu".into(), title: "B".into() },
        Source { uri: "https://a.hu".into(), title: "A másodszor".into() },
        Source { uri: "".into(), title: "üres".into() },
        Source { uri: "https://c.hu".into(), title: "".into() },
    ];
    analysis.dedupe_sources();

    let uris: Vec<_> = analysis.sources.iter().map(|s| s.uri.as_str()).collect();
    assert_eq!(uris, vec!["https://a.hu", "https://b.hu"]);
    assert_eq!(analysis.sources[0].title, "A");
}

#[test]
fn test_persona_age_accepts_numeric_string() {
    let mut value = sample_persona_json();
    value["age"] = json!("35");
    let persona: BuyerPersona = serde_json::from_value(value).unwrap();
    assert_eq!(persona.age, 35);
    assert!(persona.validate().is_ok());
}

#[test]
fn test_persona_with_zero_age_is_incomplete() {
    let mut value = sample_persona_json();
    value["age"] = json!(0);
    let persona: BuyerPersona = serde_json::from_value(value).unwrap();
    assert_eq!(persona.validate().unwrap_err().field, "age");
}

#[test]
fn test_persona_age_rejects_words() {
    let mut value = sample_persona_json();
    value["age"] = json!("harmincöt");
    assert!(serde_json::from_value::<BuyerPersona>(value).is_err());
}

#[test]
fn test_empty_plan_set_is_incomplete() {
    let plans: BusinessPlanSet = serde_json::from_value(json!([])).unwrap();
    assert_eq!(plans.validate().unwrap_err().field, "businessPlans");
}

#[test]
fn test_plan_set_reports_index_of_blank_title() {
    let plans: BusinessPlanSet =
        serde_json::from_value(json!([sample_plan_json("Lean"), sample_plan_json("")])).unwrap();
    assert_eq!(plans.validate().unwrap_err().field, "[1].title");
}

#[test]
fn test_plan_without_id_gets_empty_id() {
    let plans: BusinessPlanSet =
        serde_json::from_value(json!([sample_plan_json("Lean")])).unwrap();
    assert!(plans.0[0].id.is_empty());
    assert_eq!(plans.0[0].funding_options[0].kind, "Bootstrap");
}

#[test]
fn test_market_entry_requires_phases() {
    let process: MarketEntryProcess =
        serde_json::from_value(json!({ "strategicOverview": "x", "phases": [] })).unwrap();
    assert_eq!(process.validate().unwrap_err().field, "phases");
}

#[test]
fn test_brand_identity_requires_six_colors() {
    let value = json!({
        "colorPalette": [
            { "hex": "#112233", "name": "Éjkék" },
            { "hex": "#FF7F50", "name": "Korall" }
        ],
        "fontPairing": {
            "headlineFont": { "name": "Montserrat", "url": "https://fonts.google.com/specimen/Montserrat" },
            "bodyFont": { "name": "Lato", "url": "https://fonts.google.com/specimen/Lato" }
        },
        "moodBoardDescription": "Minimál, természetes fények."
    });
    let identity: BrandIdentity = serde_json::from_value(value).unwrap();
    assert_eq!(identity.validate().unwrap_err().field, "colorPalette");
}

#[test]
fn test_product_names_optional_categories_default_empty() {
    let value = json!({
        "DESCRIPTIVE": [{ "name": "Tiszta Szappan", "reasoning": "Egyértelmű." }],
        "EVOCATIVE": [{ "name": "Erdei Harmat", "reasoning": "Hangulatos." }]
    });
    let names: ProductNameSuggestions = serde_json::from_value(value).unwrap();
    assert!(names.validate().is_ok());
    assert!(names.get(ProductNameCategory::Premium).is_empty());
    assert_eq!(names.total(), 2);
}

#[test]
fn test_product_names_with_empty_evocative_is_incomplete() {
    let value = json!({
        "DESCRIPTIVE": [{ "name": "Tiszta Szappan", "reasoning": "Egyértelmű." }],
        "EVOCATIVE": []
    });
    let names: ProductNameSuggestions = serde_json::from_value(value).unwrap();
    assert_eq!(names.validate().unwrap_err().field, "EVOCATIVE");
}

#[test]
fn test_chat_brief_requires_description() {
    let brief: ChatBrief = serde_json::from_value(json!({
        "productDescription": "",
        "industry": "Kozmetika",
        "geographicalFocus": "Magyarország"
    }))
    .unwrap();
    assert_eq!(brief.validate().unwrap_err().field, "productDescription");
}

#[test]
fn test_business_plan_template_from_str() {
    assert_eq!(
        "lean_startup".parse::<BusinessPlanTemplate>().unwrap(),
        BusinessPlanTemplate::LeanStartup
    );
    assert_eq!(
        "GROWTH".parse::<BusinessPlanTemplate>().unwrap(),
        BusinessPlanTemplate::Growth
    );
    assert!("aggressive".parse::<BusinessPlanTemplate>().is_err());
}
