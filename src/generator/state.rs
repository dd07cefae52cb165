//! 单个特性的生成状态机
//!
//! 状态只通过 [`reduce`] 迁移，迁移函数不产生副作用。每次开始生成都会分配一个
//! ticket，完成或失败事件必须携带同一个 ticket 才会被接受，从而丢弃重置之后才
//! 返回的旧结果。

use std::sync::Arc;

use crate::generator::error::GenerationError;

/// 一次生成请求的编号
pub type Ticket = u64;

/// 特性的生成状态
#[derive(Debug, Clone)]
pub enum GenerationState<T> {
    Idle,
    InFlight {
        ticket: Ticket,
        /// 上一次成功的结果，生成期间仍可展示
        previous: Option<T>,
    },
    Succeeded(T),
    Failed {
        error: Arc<GenerationError>,
        previous: Option<T>,
    },
}

impl<T> Default for GenerationState<T> {
    fn default() -> Self {
        GenerationState::Idle
    }
}

/// 驱动状态迁移的事件
#[derive(Debug)]
pub enum GenerationEvent<T> {
    Started(Ticket),
    Completed(Ticket, T),
    Failed(Ticket, Arc<GenerationError>),
    Reset,
}

/// 事件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// 已有请求在进行中，重复的开始事件被拒绝
    Rejected,
    /// ticket 不匹配或当前没有进行中的请求
    Stale,
}

impl<T> GenerationState<T> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, GenerationState::InFlight { .. })
    }

    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            GenerationState::InFlight { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// 最近一次成功的结果
    pub fn latest(&self) -> Option<&T> {
        match self {
            GenerationState::Succeeded(value) => Some(value),
            GenerationState::InFlight { previous, .. } | GenerationState::Failed { previous, .. } => {
                previous.as_ref()
            }
            GenerationState::Idle => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            GenerationState::Failed { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }

    fn into_latest(self) -> Option<T> {
        match self {
            GenerationState::Succeeded(value) => Some(value),
            GenerationState::InFlight { previous, .. } | GenerationState::Failed { previous, .. } => {
                previous
            }
            GenerationState::Idle => None,
        }
    }
}

/// 状态迁移
pub fn reduce<T>(
    state: GenerationState<T>,
    event: GenerationEvent<T>,
) -> (GenerationState<T>, Transition) {
    match (state, event) {
        (state @ GenerationState::InFlight { .. }, GenerationEvent::Started(_)) => {
            (state, Transition::Rejected)
        }
        (state, GenerationEvent::Started(ticket)) => (
            GenerationState::InFlight {
                ticket,
                previous: state.into_latest(),
            },
            Transition::Applied,
        ),
        (GenerationState::InFlight { ticket, .. }, GenerationEvent::Completed(done, value))
            if ticket == done =>
        {
            (GenerationState::Succeeded(value), Transition::Applied)
        }
        (GenerationState::InFlight { ticket, previous }, GenerationEvent::Failed(done, error))
            if ticket == done =>
        {
            (GenerationState::Failed { error, previous }, Transition::Applied)
        }
        (state, GenerationEvent::Completed(..) | GenerationEvent::Failed(..)) => {
            (state, Transition::Stale)
        }
        (_, GenerationEvent::Reset) => (GenerationState::Idle, Transition::Applied),
    }
}
