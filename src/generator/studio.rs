//! Studio：持有每个特性生成状态的actor
//!
//! 所有状态迁移都在actor任务内部按消息顺序执行。不同特性可以同时生成，同一特性
//! 同一时刻只允许一个请求。

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::FeatureAgent;
use crate::generator::state::{GenerationEvent, GenerationState, Ticket, Transition, reduce};

const MAILBOX_SIZE: usize = 64;

enum StudioCommand {
    Begin {
        feature: Feature,
        reply: oneshot::Sender<Option<Ticket>>,
    },
    Finish {
        feature: Feature,
        ticket: Ticket,
        outcome: Result<Value, Arc<GenerationError>>,
        reply: oneshot::Sender<Transition>,
    },
    Reset {
        feature: Feature,
    },
    Snapshot {
        feature: Feature,
        reply: oneshot::Sender<GenerationState<Value>>,
    },
}

struct StudioActor {
    states: HashMap<Feature, GenerationState<Value>>,
    next_ticket: Ticket,
    receiver: mpsc::Receiver<StudioCommand>,
}

impl StudioActor {
    async fn run(mut self) {
        while let Some(command) = self.receiver.recv().await {
            self.handle(command);
        }
        tracing::debug!("studio mailbox closed");
    }

    fn handle(&mut self, command: StudioCommand) {
        match command {
            StudioCommand::Begin { feature, reply } => {
                self.next_ticket += 1;
                let ticket = self.next_ticket;
                let transition = self.apply(feature, GenerationEvent::Started(ticket));
                let granted = (transition == Transition::Applied).then_some(ticket);
                let _ = reply.send(granted);
            }
            StudioCommand::Finish {
                feature,
                ticket,
                outcome,
                reply,
            } => {
                let event = match outcome {
                    Ok(value) => GenerationEvent::Completed(ticket, value),
                    Err(error) => GenerationEvent::Failed(ticket, error),
                };
                let transition = self.apply(feature, event);
                if transition == Transition::Stale {
                    tracing::debug!(feature = %feature, ticket, "dropping stale generation result");
                }
                let _ = reply.send(transition);
            }
            StudioCommand::Reset { feature } => {
                self.apply(feature, GenerationEvent::Reset);
            }
            StudioCommand::Snapshot { feature, reply } => {
                let state = self.states.get(&feature).cloned().unwrap_or_default();
                let _ = reply.send(state);
            }
        }
    }

    fn apply(&mut self, feature: Feature, event: GenerationEvent<Value>) -> Transition {
        let state = self.states.remove(&feature).unwrap_or_default();
        let (state, transition) = reduce(state, event);
        self.states.insert(feature, state);
        transition
    }
}

/// Studio句柄，可以在任务之间克隆共享
#[derive(Clone)]
pub struct Studio {
    sender: mpsc::Sender<StudioCommand>,
}

impl Studio {
    /// 启动actor任务，需要在tokio运行时内调用
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        let actor = StudioActor {
            states: HashMap::new(),
            next_ticket: 0,
            receiver,
        };
        tokio::spawn(actor.run());
        Self { sender }
    }

    /// 为特性申请一个ticket。该特性已有请求在进行中时返回 `AlreadyInFlight`
    pub async fn begin(&self, feature: Feature) -> Result<Ticket, GenerationError> {
        let (reply, response) = oneshot::channel();
        self.send(feature, StudioCommand::Begin { feature, reply })
            .await?;
        match response.await {
            Ok(Some(ticket)) => Ok(ticket),
            Ok(None) => Err(GenerationError::AlreadyInFlight { feature }),
            Err(_) => Err(studio_stopped(feature)),
        }
    }

    /// 提交生成结果，ticket 过期时结果被丢弃
    pub async fn finish(
        &self,
        feature: Feature,
        ticket: Ticket,
        outcome: Result<Value, Arc<GenerationError>>,
    ) -> Transition {
        let (reply, response) = oneshot::channel();
        let command = StudioCommand::Finish {
            feature,
            ticket,
            outcome,
            reply,
        };
        if self.send(feature, command).await.is_err() {
            return Transition::Stale;
        }
        response.await.unwrap_or(Transition::Stale)
    }

    pub async fn reset(&self, feature: Feature) {
        let _ = self.send(feature, StudioCommand::Reset { feature }).await;
    }

    /// 特性当前状态的快照，结果以JSON形式保存
    pub async fn snapshot(&self, feature: Feature) -> GenerationState<Value> {
        let (reply, response) = oneshot::channel();
        if self
            .send(feature, StudioCommand::Snapshot { feature, reply })
            .await
            .is_err()
        {
            return GenerationState::Idle;
        }
        response.await.unwrap_or_default()
    }

    /// 在studio的管理下执行一个特性Agent
    pub async fn run<A: FeatureAgent>(
        &self,
        agent: &A,
        context: &GeneratorContext,
    ) -> Result<A::Output, Arc<GenerationError>> {
        let feature = agent.feature();
        let ticket = self.begin(feature).await.map_err(Arc::new)?;

        match agent.execute(context).await {
            Ok(output) => {
                let value = serde_json::to_value(&output).unwrap_or_default();
                self.finish(feature, ticket, Ok(value)).await;
                Ok(output)
            }
            Err(error) => {
                let error = Arc::new(error);
                self.finish(feature, ticket, Err(error.clone())).await;
                Err(error)
            }
        }
    }

    async fn send(&self, feature: Feature, command: StudioCommand) -> Result<(), GenerationError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| studio_stopped(feature))
    }
}

fn studio_stopped(feature: Feature) -> GenerationError {
    GenerationError::Service {
        feature,
        source: anyhow!("studio is not running"),
    }
}
