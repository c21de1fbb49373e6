//! 핸들러 호출 시그니처와 조회 서비스가 돌려주는 값.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::application::completion::{CompletionInput, CompletionSuggestions};
use crate::application::ports::{Input, Output};
use crate::domain::handler::HandlerRef;

/// 명령 실행 함수. 종료 코드를 반환한다.
pub type CommandFn = Arc<dyn Fn(&mut dyn Input, &mut dyn Output) -> Result<i32> + Send + Sync>;

/// 기본 자동완성 동작 콜백.
pub type DefaultCompletion<'a> = &'a dyn Fn(&mut CompletionSuggestions);

/// 자동완성 훅. 세 번째 인자로 기본 동작을 위임받을 수 있다.
pub type CompletionFn = Arc<
    dyn Fn(&CompletionInput, &mut CompletionSuggestions, DefaultCompletion<'_>) -> Result<()>
        + Send
        + Sync,
>;

/// 클로저를 명령 함수로 감싼다.
pub fn command_fn<F>(f: F) -> CommandFn
where
    F: Fn(&mut dyn Input, &mut dyn Output) -> Result<i32> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 클로저를 자동완성 훅으로 감싼다.
pub fn completion_fn<F>(f: F) -> CompletionFn
where
    F: Fn(&CompletionInput, &mut CompletionSuggestions, DefaultCompletion<'_>) -> Result<()>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

impl HandlerRef<CommandFn> {
    pub fn command<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Input, &mut dyn Output) -> Result<i32> + Send + Sync + 'static,
    {
        HandlerRef::Invocable(command_fn(f))
    }
}

impl HandlerRef<CompletionFn> {
    pub fn completion<F>(f: F) -> Self
    where
        F: Fn(&CompletionInput, &mut CompletionSuggestions, DefaultCompletion<'_>) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        HandlerRef::Invocable(completion_fn(f))
    }
}


impl From<CommandFn> for HandlerRef<CommandFn> {
    fn from(f: CommandFn) -> Self {
        HandlerRef::Invocable(f)
    }
}

impl From<CompletionFn> for HandlerRef<CompletionFn> {
    fn from(f: CompletionFn) -> Self {
        HandlerRef::Invocable(f)
    }
}

/// 조회 서비스가 키에 대해 돌려주는 값.
#[derive(Clone)]
pub enum ServiceEntry {
    Command(CommandFn),
    Completion(CompletionFn),
    /// 호출할 수 없는 일반 서비스 값.
    Value(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceEntry::Command(_) => f.write_str("Command(..)"),
            ServiceEntry::Completion(_) => f.write_str("Completion(..)"),
            ServiceEntry::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// 조회 결과에서 기대하는 호출 형태를 꺼낸다.
pub trait Resolvable: Clone {
    fn from_entry(entry: ServiceEntry) -> Option<Self>;
}

impl Resolvable for CommandFn {
    fn from_entry(entry: ServiceEntry) -> Option<Self> {
        match entry {
            ServiceEntry::Command(f) => Some(f),
            _ => None,
        }
    }
}

impl Resolvable for CompletionFn {
    fn from_entry(entry: ServiceEntry) -> Option<Self> {
        match entry {
            ServiceEntry::Completion(f) => Some(f),
            _ => None,
        }
    }
}
