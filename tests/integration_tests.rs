use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use market_insight::cli::{AnalysisSource, AnalyzeArgs, Command};
use market_insight::config::Config;
use market_insight::generator::context::GeneratorContext;
use market_insight::generator::workflow::execute;
use market_insight::llm::client::TextGenerator;
use market_insight::store::{LocalStore, SavedAnalyses};
use market_insight::types::analysis::AnalysisResult;
use market_insight::types::chat::ChatMessage;
use market_insight::{Expect, extract_value};
use serde_json::json;
use tempfile::TempDir;

/// 按顺序回放预设响应的生成服务
struct Replay(Mutex<VecDeque<String>>);

impl Replay {
    fn new(responses: &[&str]) -> Self {
        Self(Mutex::new(responses.iter().map(|r| r.to_string()).collect()))
    }
}

#[async_trait]
impl TextGenerator for Replay {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no response left"))
    }

    async fn chat(&self, system_prompt: &str, _history: &[ChatMessage], message: &str) -> Result<String> {
        self.generate(system_prompt, message).await
    }

    fn model_name(&self) -> String {
        "replay".to_string()
    }
}

fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config {
        output_path: temp_dir.path().join("out"),
        internal_path: temp_dir.path().join("internal"),
        ..Default::default()
    };
    config.cache.cache_dir = temp_dir.path().join("internal").join("cache");
    config
}

const ANALYSIS_RESPONSE: &str = r####"Here is the analysis you asked for:
```json
{
  "analysisText": "### Target Market\n- Conscious shoppers",
  "competitors": [
    {
      "name": "Green Soap Ltd.",
      "strengths": [{ "text": "Strong brand", "category": "BRAND_REPUTATION" }],
      "weaknesses": [{ "text": "Expensive", "category": "PRICE" }],
      "sentiment": "POSITIVE",
      "pricingSummary": "PREMIUM",
      "isMainCompetitor": true,
    },
  ],
  "swotAnalysis": {
    "strengths": [{ "text": "Handmade", "impact": "HIGH" }],
    "weaknesses": [],
    "opportunities": [{ "text": "Online sales", "impact": "HIGH", "relatedCompetitor": "Green Soap Ltd." }],
    "threats": []
  },
  "marketOverview": { "marketSize": "1.5 Mrd HUF", "growthRate": "8.2% CAGR", "sentiment": "POSITIVE" },
  "personas": [{
    "name": "Eco Emma", "age": "31", "occupation": "Designer", "bio": "Lives in Budapest.",
    "motivations": ["Sustainability"], "frustrations": ["Greenwashing"],
    "communicationChannels": ["Instagram"], "quote": "Small steps matter."
  }],
  "sources": [
    { "uri": "https://example.hu/a", "title": "A" },
    { "uri": "https://example.hu/a", "title": "A again" }
  ]
}
```
Let me know if you need anything else."####;

#[test]
fn test_extractor_handles_prose_and_trailing_commas() {
    let value = extract_value(ANALYSIS_RESPONSE, Expect::Object).unwrap();
    assert_eq!(value["competitors"][0]["name"], "Green Soap Ltd.");

    let array = extract_value("Plans: [{\"title\": \"A\"},] done", Expect::Array).unwrap();
    assert_eq!(array, json!([{ "title": "A" }]));

    assert!(extract_value("I cannot help with that.", Expect::Object).is_err());
}

#[tokio::test]
async fn test_analysis_flow_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let generator = Arc::new(Replay::new(&[ANALYSIS_RESPONSE]));
    let context = GeneratorContext::with_generator(config.clone(), generator).unwrap();

    let args = AnalyzeArgs {
        product: Some("Handmade vegan soap".into()),
        industry: Some("Cosmetics".into()),
        save: Some("Soap project".into()),
        ..Default::default()
    };
    execute(&context, Command::Analyze(args)).await.unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("out/market_analysis.json")).unwrap();
    let analysis: AnalysisResult = serde_json::from_str(&written).unwrap();
    assert_eq!(analysis.sources.len(), 1);
    assert_eq!(analysis.personas[0].age, 31);

    drop(context);
    let mut store = LocalStore::open(&config.store_path()).unwrap();
    let saved = SavedAnalyses::new(&mut store).list().unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].id.starts_with("analysis-"));
    assert_eq!(saved[0].project_name, "Soap project");
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let analysis_file = temp_dir.path().join("analysis.json");

    let first = GeneratorContext::with_generator(
        config.clone(),
        Arc::new(Replay::new(&[ANALYSIS_RESPONSE])),
    )
    .unwrap();
    let args = AnalyzeArgs {
        topic: Some("eco household".into()),
        ..Default::default()
    };
    execute(&first, Command::Analyze(args.clone())).await.unwrap();
    std::fs::copy(temp_dir.path().join("out/market_analysis.json"), &analysis_file).unwrap();

    // 没有任何预设响应：只能命中缓存
    let second =
        GeneratorContext::with_generator(config.clone(), Arc::new(Replay::new(&[]))).unwrap();
    execute(&second, Command::Analyze(args)).await.unwrap();
    assert_eq!(second.cache_manager.report().hits, 1);

    let source = AnalysisSource {
        analysis_file: Some(analysis_file),
        input: Some("eco household".into()),
        ..Default::default()
    };
    let uvp = r#"{"headline": "Clean home", "subheadline": "Eco products", "keywords": ["eco"]}"#;
    let third =
        GeneratorContext::with_generator(config, Arc::new(Replay::new(&[uvp]))).unwrap();
    execute(&third, Command::Uvp { source }).await.unwrap();
    assert!(temp_dir.path().join("out/value_proposition.json").exists());
}
