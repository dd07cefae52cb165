//! 测试辅助：样例响应与脚本化的生成器

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::llm::client::TextGenerator;
use crate::types::analysis::AnalysisResult;
use crate::types::chat::ChatMessage;

pub fn sample_persona_json() -> Value {
    json!({
        "name": "Fenntartható Fanni",
        "age": 28,
        "occupation": "Marketing menedzser",
        "bio": "Fanni Budapesten él, fontos számára a környezetvédelem.",
        "motivations": ["Környezettudatosság", "Minőségi termékek"],
        "frustrations": ["Greenwashing"],
        "communicationChannels": ["Instagram", "Facebook csoportok"],
        "quote": "A kis lépések is számítanak."
    })
}

pub fn sample_analysis_json() -> Value {
    json!({
        "analysisText": "### Célpiac Elemzése\n- Tudatos vásárlók",
        "competitors": [
            {
                "name": "Zöld Szappan Kft.",
                "strengths": [{ "text": "Erős márka", "category": "BRAND_REPUTATION" }],
                "weaknesses": [{ "text": "Drága", "category": "PRICE" }],
                "sentiment": "POSITIVE",
                "pricingSummary": "PREMIUM",
                "isMainCompetitor": true
            },
            {
                "name": "Öko Bolt",
                "strengths": [{ "text": "Széles kínálat", "category": "QUALITY" }],
                "weaknesses": [{ "text": "Lassú szállítás", "category": "LOGISTICS" }],
                "sentiment": "NEUTRAL",
                "pricingSummary": "MID_RANGE"
            }
        ],
        "swotAnalysis": {
            "strengths": [{ "text": "Kézműves minőség", "impact": "HIGH" }],
            "weaknesses": [{ "text": "Kis kapacitás", "impact": "MEDIUM" }],
            "opportunities": [{ "text": "Online piac", "impact": "HIGH", "relatedCompetitor": "Öko Bolt" }],
            "threats": [{ "text": "Árverseny", "impact": "LOW" }]
        },
        "marketOverview": {
            "marketSize": "1.5 Mrd HUF",
            "growthRate": "8.2% CAGR",
            "sentiment": "POSITIVE"
        },
        "trends": [{
            "name": "Fenntartható termékek",
            "dataPoints": [{ "month": "Jan", "value": 65 }, { "month": "Feb", "value": 70 }]
        }],
        "personas": [sample_persona_json()],
        "regions": [{ "name": "Budapest", "intensity": 95 }],
        "keywords": ["környezetbarát", "vegán"],
        "contentSuggestions": ["DIY tippek"]
    })
}

pub fn sample_analysis() -> AnalysisResult {
    serde_json::from_value(sample_analysis_json()).expect("sample analysis is valid")
}

pub fn sample_plan_json(title: &str) -> Value {
    json!({
        "title": title,
        "strategyFocus": "Gyors piacra lépés",
        "executiveSummary": "Rövid összefoglaló.",
        "marketingStrategy": ["Instagram kampány", "Influencerek", "Hírlevél"],
        "financialPlan": {
            "initialInvestment": [{ "item": "Weboldal", "cost": "250.000 HUF" }],
            "monthlyOperationalCosts": [{ "item": "Hirdetés", "cost": "80.000 HUF/hó" }],
            "revenueProjections": [{ "item": "Havi 15 eladás", "cost": "150.000 HUF/hó" }]
        },
        "riskAssessment": ["Árverseny", "Beszállítói kockázat"],
        "fundingOptions": [{
            "type": "Bootstrap",
            "advantages": ["Teljes kontroll"],
            "disadvantages": ["Lassú növekedés"]
        }]
    })
}

pub fn sample_strategy_json() -> Value {
    json!({
        "strategicOverview": "Tartalomvezérelt stratégia kis költségkerettel.",
        "suggestedChannels": [{
            "name": "Tartalommarketing",
            "description": "A perszónák blogokat olvasnak.",
            "platforms": ["Céges blog", "Instagram"]
        }],
        "coreMessaging": { "mainMessage": "Tiszta bőr, tiszta lelkiismeret.", "taglines": ["Zölden tisztán"] },
        "campaignIdeas": [{ "name": "Indulási kampány", "description": "Influencer csomagok." }],
        "keyPerformanceIndicators": ["Heti 50 új feliratkozó"],
        "marketingCalendar": [{
            "day": "Hétfő",
            "time": "09:00",
            "activity": "Instagram poszt",
            "platform": "Instagram",
            "notes": "Vizuális fókusz"
        }]
    })
}

/// 所有目录都指向临时目录的配置
pub fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config {
        output_path: temp_dir.path().join("out"),
        internal_path: temp_dir.path().join("internal"),
        ..Default::default()
    };
    config.cache.cache_dir = temp_dir.path().join("internal").join("cache");
    config.llm.retry_delay_ms = 1;
    config
}

pub fn test_context(temp_dir: &TempDir, generator: Arc<ScriptedGenerator>) -> GeneratorContext {
    GeneratorContext::with_generator(test_config(temp_dir), generator)
        .expect("test context can be created")
}

/// 按顺序返回预设响应的生成器，同时记录收到的提示词
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            ..Default::default()
        }
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted response left")),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.next()
    }

    async fn chat(
        &self,
        system_prompt: &str,
        _history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), message.to_string()));
        self.next()
    }

    fn model_name(&self) -> String {
        "scripted".to_string()
    }
}
