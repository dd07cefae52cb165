use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use crate::i18n::TargetLanguage;
use crate::types::analysis::AnalysisType;
use crate::types::business::BusinessPlanTemplate;
use anyhow::{Context, Result};
use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Market Insight - 由Rust与AI驱动的市场调研引擎
#[derive(Parser, Debug)]
#[command(name = "market-insight")]
#[command(
    about = "AI-assisted market research engine: market analyses, business plans, marketing strategies and content from a product idea, a topic or a website."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 内部数据目录（本地存储与缓存）
    #[arg(long, global = true)]
    pub internal_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 目标语言 (hu, en, de, zh, fr)
    #[arg(long, global = true)]
    pub target_language: Option<String>,

    /// LLM Provider (openai, moonshot, deepseek, mistral, openrouter, anthropic, gemini, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于常规生成
    #[arg(long, global = true)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于长提示词，以及作为efficient失效情况下的兜底
    #[arg(long, global = true)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 最大并发数
    #[arg(long, global = true)]
    pub max_parallels: Option<usize>,

    /// 是否禁用缓存
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// 强制重新生成（忽略缓存）
    #[arg(long, global = true)]
    pub force_regenerate: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 市场分析
    Analyze(AnalyzeArgs),
    /// 三份商业计划
    BusinessPlans {
        #[command(flatten)]
        source: AnalysisSource,
        /// 计划模板 (default, lean-startup, growth, premium)
        #[arg(long, default_value = "default")]
        template: BusinessPlanTemplate,
        /// 把生成的计划保存到计划库
        #[arg(long)]
        save: bool,
    },
    /// 一页式商业计划
    SimplePlan {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 分阶段的市场进入流程
    MarketEntry {
        #[command(flatten)]
        source: AnalysisSource,
        /// 把计划库中的计划作为上下文
        #[arg(long)]
        with_saved_plans: bool,
    },
    /// 独特价值主张
    Uvp {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 管理层摘要
    Summary {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 营销内容包
    Content {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 详细的买家画像
    Persona {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 营销策略，基于简报或已有分析
    Strategy {
        #[command(flatten)]
        source: AnalysisSource,
        #[command(flatten)]
        brief: StrategyBriefArgs,
    },
    /// 品牌视觉识别
    Brand {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 产品名建议
    Names {
        #[command(flatten)]
        source: AnalysisSource,
    },
    /// 完整报告：分析之后并发生成所有下游内容
    Report(AnalyzeArgs),
    /// 与创意导师对话，输入 /analyze 生成市场分析，/exit 退出
    Mentor,
    /// 离线解析模型响应文本，不调用模型
    Extract {
        /// 输入文件，缺省时读取标准输入
        #[arg(long)]
        file: Option<PathBuf>,
        /// 期望JSON数组而不是对象
        #[arg(long)]
        array: bool,
    },
    /// 已保存的分析
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// 计划库
    Plans {
        #[command(subcommand)]
        action: PlansAction,
    },
}

/// 分析的输入：产品、主题、网站三选一
#[derive(ClapArgs, Debug, Clone, Default)]
#[command(group(ArgGroup::new("input").required(true).args(["product", "topic", "website"])))]
pub struct AnalyzeArgs {
    /// 产品或服务描述
    #[arg(long)]
    pub product: Option<String>,
    /// 主题关键词
    #[arg(long)]
    pub topic: Option<String>,
    /// 网站地址
    #[arg(long)]
    pub website: Option<String>,
    /// 行业（仅产品分析）
    #[arg(long)]
    pub industry: Option<String>,
    /// 地理范围
    #[arg(long)]
    pub geo: Option<String>,
    /// 以该项目名保存分析结果
    #[arg(long)]
    pub save: Option<String>,
}

/// 下游特性使用的分析来源
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct AnalysisSource {
    /// 已保存分析的id
    #[arg(long, conflicts_with = "analysis_file")]
    pub analysis: Option<String>,
    /// 分析结果JSON文件（分析结果本身或已保存的分析条目）
    #[arg(long)]
    pub analysis_file: Option<PathBuf>,
    /// 原始用户输入，使用分析文件时提供
    #[arg(long)]
    pub input: Option<String>,
    /// 原始输入类型，使用分析文件时提供
    #[arg(long, default_value = "product")]
    pub analysis_type: AnalysisType,
}

impl AnalysisSource {
    pub fn is_given(&self) -> bool {
        self.analysis.is_some() || self.analysis_file.is_some()
    }
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct StrategyBriefArgs {
    #[arg(long)]
    pub product: Option<String>,
    #[arg(long)]
    pub audience: Option<String>,
    #[arg(long)]
    pub goal: Option<String>,
    #[arg(long)]
    pub budget: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SavedAction {
    List,
    Show { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlansAction {
    List,
    /// 从JSON文件保存一份计划
    Save { file: PathBuf },
    Delete { id: String },
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<(Config, Command)> {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {:?}", config_path))?
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path)
                    .with_context(|| format!("无法读取默认配置文件 {:?}", default_config_path))?
            } else {
                Config::default()
            }
        };

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(internal_path) = self.internal_path {
            config.cache.cache_dir = internal_path.join("cache");
            config.internal_path = internal_path;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 ({})",
                    target_language_str, config.target_language
                );
            }
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 命令行开关只会打开，不会关闭配置文件中的设置
        config.force_regenerate |= self.force_regenerate;
        config.verbose |= self.verbose;

        Ok((config, self.command))
    }
}

// Include tests
#[cfg(test)]
mod tests;
