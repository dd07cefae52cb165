use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{
    AnalysisSource, AnalyzeArgs, Command, PlansAction, SavedAction, StrategyBriefArgs,
};
use crate::config::Config;
use crate::extractor::{Expect, extract_value};
use crate::generator::agents::{
    AnalysisRequest, AnalysisSummarizer, BrandDesigner, BusinessPlanner, ContentWriter,
    MarketAnalyst, MarketEntryPlanner, NameGenerator, PersonaBuilder, SimplePlanWriter,
    StrategyBrief, StrategyPlanner, Subject, ValuePropositionWriter,
};
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::FeatureAgent;
use crate::generator::mentor::MentorSession;
use crate::generator::outlet::{DiskOutlet, Outlet};
use crate::generator::studio::Studio;
use crate::llm::client::LLMClient;
use crate::store::{LocalStore, SavedAnalyses, SavedAnalysis, SavedBusinessPlans};
use crate::types::analysis::{AnalysisResult, AnalysisType};
use crate::types::business::BusinessPlan;
use crate::utils::threads::do_parallel_with_limit;

/// 启动工作流
pub async fn launch(config: &Config, command: Command) -> Result<()> {
    // 不需要模型的命令
    match command {
        Command::Extract { file, array } => return extract(file.as_deref(), array),
        Command::Saved { action } => return saved(config, action),
        Command::Plans { action } => return plans(config, action),
        _ => {}
    }

    let llm_client = LLMClient::new(&config.llm)?;
    // 启动时检查模型连接
    llm_client.check_connection().await?;

    let context = GeneratorContext::with_generator(config.clone(), Arc::new(llm_client))?;
    execute(&context, command).await?;

    let report = context.cache_manager.report();
    tracing::info!(
        hits = report.hits,
        misses = report.misses,
        writes = report.writes,
        "cache summary"
    );
    Ok(())
}

/// 下游特性使用的分析及其原始输入
#[derive(Debug, Clone)]
pub struct LoadedAnalysis {
    pub result: AnalysisResult,
    pub user_input: String,
    pub analysis_type: AnalysisType,
}

impl LoadedAnalysis {
    pub fn subject(&self) -> Subject {
        Subject::from_input(self.analysis_type, &self.user_input)
    }
}

impl From<SavedAnalysis> for LoadedAnalysis {
    fn from(saved: SavedAnalysis) -> Self {
        Self {
            result: saved.result,
            user_input: saved.user_input,
            analysis_type: saved.analysis_type,
        }
    }
}

/// 执行需要生成服务的命令
pub async fn execute(context: &GeneratorContext, command: Command) -> Result<()> {
    let studio = Studio::spawn();
    let outlet = DiskOutlet::new(&context.config.output_path);
    let runner = Runner {
        context,
        studio: &studio,
        outlet: &outlet,
    };

    match command {
        Command::Analyze(args) => {
            runner.analyze(&args).await?;
        }
        Command::Report(args) => runner.report(&args).await?,
        Command::Mentor => runner.mentor().await?,
        Command::BusinessPlans {
            source,
            template,
            save,
        } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = BusinessPlanner::new(
                &loaded.user_input,
                loaded.analysis_type,
                loaded.result,
                template,
            );
            let plans = runner.produce(agent).await.map_err(|e| runner.failure(e))?;
            if save {
                let mut store = context.store.lock().await;
                let mut library = SavedBusinessPlans::new(&mut store);
                for plan in plans.into_inner() {
                    if library.save(plan)? {
                        println!("💾 计划已保存到计划库");
                    }
                }
            }
        }
        Command::SimplePlan { source } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = SimplePlanWriter::new(loaded.result, &loaded.user_input);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::MarketEntry {
            source,
            with_saved_plans,
        } => {
            let loaded = load_analysis(context, &source).await?;
            let plans = if with_saved_plans {
                let mut store = context.store.lock().await;
                let plans = SavedBusinessPlans::new(&mut store).list()?;
                (!plans.is_empty()).then_some(plans)
            } else {
                None
            };
            let agent = MarketEntryPlanner::new(loaded.subject(), loaded.result, plans);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Uvp { source } => {
            let loaded = load_analysis(context, &source).await?;
            let subject = loaded.subject();
            let agent = ValuePropositionWriter::new(loaded.result, subject);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Summary { source } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = AnalysisSummarizer::new(loaded.result, &loaded.user_input);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Content { source } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = ContentWriter::new(loaded.result, &loaded.user_input);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Persona { source } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = PersonaBuilder::new(loaded.result, &loaded.user_input);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Strategy { source, brief } => {
            let agent = if source.is_given() {
                let loaded = load_analysis(context, &source).await?;
                StrategyPlanner::from_analysis(loaded.result, &loaded.user_input)
            } else {
                StrategyPlanner::from_brief(strategy_brief(brief))
            };
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Brand { source } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = BrandDesigner::new(loaded.result, &loaded.user_input);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Names { source } => {
            let loaded = load_analysis(context, &source).await?;
            let agent = NameGenerator::new(loaded.result, &loaded.user_input);
            runner.produce(agent).await.map_err(|e| runner.failure(e))?;
        }
        Command::Extract { file, array } => extract(file.as_deref(), array)?,
        Command::Saved { action } => saved(&context.config, action)?,
        Command::Plans { action } => plans(&context.config, action)?,
    }

    Ok(())
}

type FeatureOutcome = (Feature, Result<(), Arc<GenerationError>>);

struct Runner<'a> {
    context: &'a GeneratorContext,
    studio: &'a Studio,
    outlet: &'a DiskOutlet,
}

impl<'a> Runner<'a> {
    /// 在studio中执行Agent并把结果写入输出目录
    async fn produce<A: FeatureAgent>(&self, agent: A) -> Result<A::Output, Arc<GenerationError>> {
        let output = self.studio.run(&agent, self.context).await?;
        if let Err(e) = self.outlet.save(agent.feature(), &output).await {
            eprintln!("⚠️ 结果保存失败 [{}]: {}", agent.feature(), e);
        }
        Ok(output)
    }

    fn downstream<A: FeatureAgent + 'a>(&self, agent: A) -> LocalBoxFuture<'a, FeatureOutcome> {
        let runner = Runner {
            context: self.context,
            studio: self.studio,
            outlet: self.outlet,
        };
        async move {
            let feature = agent.feature();
            (feature, runner.produce(agent).await.map(|_| ()))
        }
        .boxed_local()
    }

    fn failure(&self, error: Arc<GenerationError>) -> anyhow::Error {
        eprintln!(
            "❌ {}",
            error.user_message(&self.context.config.target_language)
        );
        anyhow::Error::new(error)
    }

    async fn analyze(&self, args: &AnalyzeArgs) -> Result<LoadedAnalysis> {
        let request = analysis_request(args)?;
        let agent = MarketAnalyst::new(request.clone(), args.geo.clone());
        let result = self.produce(agent).await.map_err(|e| self.failure(e))?;

        let loaded = LoadedAnalysis {
            result,
            user_input: request.user_input().to_string(),
            analysis_type: request.analysis_type(),
        };

        if let Some(project_name) = &args.save {
            let mut store = self.context.store.lock().await;
            let saved = SavedAnalyses::new(&mut store).save(
                project_name,
                loaded.result.clone(),
                &loaded.user_input,
                loaded.analysis_type,
                None,
            )?;
            println!("💾 分析已保存: {} ({})", saved.project_name, saved.id);
        }

        Ok(loaded)
    }

    /// 先做市场分析，再并发生成所有下游内容。单个下游失败不影响其他特性
    async fn report(&self, args: &AnalyzeArgs) -> Result<()> {
        let started = Instant::now();
        let loaded = self.analyze(args).await?;
        let subject = loaded.subject();
        let analysis = &loaded.result;
        let user_input = loaded.user_input.as_str();

        let tasks = vec![
            self.downstream(BusinessPlanner::new(
                user_input,
                loaded.analysis_type,
                analysis.clone(),
                Default::default(),
            )),
            self.downstream(SimplePlanWriter::new(analysis.clone(), user_input)),
            self.downstream(MarketEntryPlanner::new(
                subject.clone(),
                analysis.clone(),
                None,
            )),
            self.downstream(ValuePropositionWriter::new(analysis.clone(), subject)),
            self.downstream(AnalysisSummarizer::new(analysis.clone(), user_input)),
            self.downstream(ContentWriter::new(analysis.clone(), user_input)),
            self.downstream(PersonaBuilder::new(analysis.clone(), user_input)),
            self.downstream(StrategyPlanner::from_analysis(analysis.clone(), user_input)),
            self.downstream(BrandDesigner::new(analysis.clone(), user_input)),
            self.downstream(NameGenerator::new(analysis.clone(), user_input)),
        ];
        let total = tasks.len();

        let outcomes =
            do_parallel_with_limit(tasks, self.context.config.llm.max_parallels).await;

        let mut succeeded = 0;
        for (feature, outcome) in outcomes {
            match outcome {
                Ok(()) => succeeded += 1,
                Err(e) => eprintln!(
                    "⚠️ [{}] {}",
                    feature,
                    e.user_message(&self.context.config.target_language)
                ),
            }
        }

        println!(
            "🎉 报告生成完成: {}/{} 项成功，耗时 {:.2}秒，输出目录: {}",
            succeeded,
            total,
            started.elapsed().as_secs_f64(),
            self.context.config.output_path.display()
        );
        Ok(())
    }

    async fn mentor(&self) -> Result<()> {
        let language = self.context.config.target_language.clone();
        let mut session = MentorSession::new(self.context.clone());

        let greeting = session.start().await?;
        println!("\n🧑‍🏫 {}\n", greeting);
        println!("💡 输入 /analyze 生成市场分析，/exit 退出");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "" => continue,
                "/exit" | "/quit" => break,
                "/analyze" => {
                    match session.analyze().await {
                        Ok(analysis) => {
                            if let Err(e) = self.outlet.save(Feature::MarketAnalysis, &analysis).await
                            {
                                eprintln!("⚠️ 结果保存失败: {}", e);
                            }
                        }
                        Err(e) => eprintln!("❌ {}", e.user_message(&language)),
                    }
                    if let Some(last) = session.transcript().last() {
                        println!("\n🧑‍🏫 {}\n", last.text);
                    }
                }
                message => match session.send(message).await {
                    Ok(reply) => println!("\n🧑‍🏫 {}\n", reply),
                    Err(e) => eprintln!("❌ {:#}", e),
                },
            }
        }

        Ok(())
    }
}

fn analysis_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    if let Some(description) = &args.product {
        return Ok(AnalysisRequest::Product {
            description: description.clone(),
            industry: args.industry.clone(),
        });
    }
    if let Some(keywords) = &args.topic {
        return Ok(AnalysisRequest::Topic {
            keywords: keywords.clone(),
        });
    }
    if let Some(url) = &args.website {
        return Ok(AnalysisRequest::Website { url: url.clone() });
    }
    bail!("one of --product, --topic or --website is required")
}

fn strategy_brief(args: StrategyBriefArgs) -> StrategyBrief {
    StrategyBrief {
        product: args.product.unwrap_or_default(),
        audience: args.audience.unwrap_or_default(),
        goal: args.goal.unwrap_or_default(),
        budget: args.budget.unwrap_or_default(),
    }
}

/// 从已保存的分析或分析文件中取得下游特性的输入
pub async fn load_analysis(
    context: &GeneratorContext,
    source: &AnalysisSource,
) -> Result<LoadedAnalysis> {
    if let Some(id) = &source.analysis {
        let mut store = context.store.lock().await;
        let saved = SavedAnalyses::new(&mut store)
            .find(id)?
            .ok_or_else(|| anyhow!("no saved analysis with id {}", id))?;
        return Ok(saved.into());
    }

    if let Some(path) = &source.analysis_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis file {}", path.display()))?;
        if let Ok(saved) = serde_json::from_str::<SavedAnalysis>(&content) {
            return Ok(saved.into());
        }
        let result: AnalysisResult = serde_json::from_str(&content)
            .with_context(|| format!("{} is not an analysis result", path.display()))?;
        return Ok(LoadedAnalysis {
            result,
            user_input: source.input.clone().unwrap_or_default(),
            analysis_type: source.analysis_type,
        });
    }

    bail!("either --analysis <id> or --analysis-file <path> is required")
}

/// 离线解析：输出恢复后的缩进JSON
pub fn extract_text(raw: &str, array: bool) -> Result<String> {
    let expect = if array { Expect::Array } else { Expect::Object };
    let value = extract_value(raw, expect)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn extract(file: Option<&Path>, array: bool) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };
    println!("{}", extract_text(&raw, array)?);
    Ok(())
}

fn saved(config: &Config, action: SavedAction) -> Result<()> {
    let mut store = LocalStore::open(&config.store_path())?;
    let mut library = SavedAnalyses::new(&mut store);

    match action {
        SavedAction::List => {
            let items = library.list()?;
            if items.is_empty() {
                println!("📭 还没有保存的分析");
            }
            for item in items {
                println!(
                    "{}  {}  [{}]  {}",
                    item.id,
                    item.saved_at.format("%Y-%m-%d %H:%M"),
                    item.analysis_type,
                    item.project_name
                );
            }
        }
        SavedAction::Show { id } => {
            let item = library
                .find(&id)?
                .ok_or_else(|| anyhow!("no saved analysis with id {}", id))?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        SavedAction::Delete { id } => {
            if library.delete(&id)? {
                println!("🗑️ 已删除: {}", id);
            } else {
                eprintln!("⚠️ 未找到: {}", id);
            }
        }
    }
    Ok(())
}

fn plans(config: &Config, action: PlansAction) -> Result<()> {
    let mut store = LocalStore::open(&config.store_path())?;
    let mut library = SavedBusinessPlans::new(&mut store);

    match action {
        PlansAction::List => {
            let items = library.list()?;
            if items.is_empty() {
                println!("📭 计划库为空");
            }
            for plan in items {
                println!("{}  {}", plan.id, plan.title);
            }
        }
        PlansAction::Save { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let plan: BusinessPlan = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a business plan", file.display()))?;
            let id = plan.id.clone();
            if library.save(plan)? {
                println!("💾 计划已保存: {}", id);
            } else {
                println!("ℹ️ 计划已在计划库中: {}", id);
            }
        }
        PlansAction::Delete { id } => {
            if library.delete(&id)? {
                println!("🗑️ 已删除: {}", id);
            } else {
                eprintln!("⚠️ 未找到: {}", id);
            }
        }
    }
    Ok(())
}
