//! 선언형 명령 정의(이름/설명/별칭/사용 예/스키마/핸들러/자동완성 훅).

use std::any;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::application::handler::{CommandFn, CompletionFn};
use crate::application::ports::{Input, Output};
use crate::domain::error::DefinitionError;
use crate::domain::handler::HandlerRef;
use crate::domain::naming::validate_name;
use crate::domain::schema::{ArgumentMode, ArgumentSpec, OptionMode, OptionSpec, Schema};

/// 사용자가 구현하는 명령 정의.
/// `configure`는 `Definition::build`에서 정확히 한 번 호출된다.
pub trait CommandDefinition: Send + Sync + 'static {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError>;

    /// 핸들러에 넘길 입력을 바꾼다. `None`이면 원본 입력을 그대로 쓴다.
    fn transform_input(&self, _input: &dyn Input, _output: &dyn Output) -> Option<Box<dyn Input>> {
        None
    }

    fn transform_output(&self, output: Box<dyn Output>, _input: &dyn Input) -> Box<dyn Output> {
        output
    }
}

/// 자동완성 훅이 등록되는 위치.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompletionTarget {
    /// 전용 훅이 없을 때 쓰는 명령 단위 훅
    Root,
    /// 특정 인자/옵션 이름
    Named(String),
}

impl From<&str> for CompletionTarget {
    fn from(name: &str) -> Self {
        CompletionTarget::Named(name.to_string())
    }
}

/// 하나의 명령을 설명하는 정의.
pub struct Definition {
    type_name: &'static str,
    name: Option<String>,
    description: Option<String>,
    aliases: Vec<String>,
    usages: Vec<String>,
    schema: Schema,
    command: Option<HandlerRef<CommandFn>>,
    completions: HashMap<CompletionTarget, HandlerRef<CompletionFn>>,
    behaviour: Option<Box<dyn CommandDefinition>>,
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("type_name", &self.type_name)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("aliases", &self.aliases)
            .field("usages", &self.usages)
            .field("schema", &self.schema)
            .field("command", &self.command)
            .field("completions", &self.completions)
            .finish_non_exhaustive()
    }
}

impl Definition {
    /// 정의 타입의 `configure`를 실행해 정의를 만든다.
    pub fn build<D: CommandDefinition>(behaviour: D) -> Result<Self, DefinitionError> {
        let mut definition = Self::empty(any::type_name::<D>());
        behaviour.configure(&mut definition)?;
        definition.behaviour = Some(Box::new(behaviour));
        Ok(definition)
    }

    fn empty(type_name: &'static str) -> Self {
        Self {
            type_name,
            name: None,
            description: None,
            aliases: Vec::new(),
            usages: Vec::new(),
            schema: Schema::new(),
            command: None,
            completions: HashMap::new(),
            behaviour: None,
        }
    }

    /// `foo:bar`처럼 콜론으로 네임스페이스를 구분할 수 있다.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, DefinitionError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = Some(name);
        Ok(self)
    }

    /// 모든 별칭을 검증한 뒤에 교체한다. 하나라도 틀리면 기존 별칭이 유지된다.
    pub fn set_aliases<I, S>(&mut self, aliases: I) -> Result<&mut Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        for alias in &aliases {
            validate_name(alias)?;
        }
        self.aliases = aliases;
        Ok(self)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// 사용 예를 추가한다. 이름이 설정돼 있으면 이름을 접두어로 붙인다.
    pub fn add_usage(&mut self, usage: impl Into<String>) -> &mut Self {
        let usage = usage.into();
        let usage = match &self.name {
            Some(name) if !usage.starts_with(name.as_str()) => format!("{name} {usage}"),
            _ => usage,
        };
        self.usages.push(usage);
        self
    }

    pub fn add_argument(
        &mut self,
        name: impl Into<String>,
        mode: ArgumentMode,
        description: impl Into<String>,
        default: Option<Value>,
        suggested_values: &[&str],
    ) -> Result<&mut Self, DefinitionError> {
        self.schema.add_argument(ArgumentSpec {
            name: name.into(),
            mode,
            description: description.into(),
            default,
            suggested_values: suggested_values.iter().map(ToString::to_string).collect(),
        })?;
        Ok(self)
    }

    pub fn add_option(
        &mut self,
        name: impl Into<String>,
        shortcut: Option<char>,
        mode: OptionMode,
        description: impl Into<String>,
        default: Option<Value>,
        suggested_values: &[&str],
    ) -> Result<&mut Self, DefinitionError> {
        self.schema.add_option(OptionSpec {
            name: name.into(),
            shortcut,
            mode,
            description: description.into(),
            default,
            suggested_values: suggested_values.iter().map(ToString::to_string).collect(),
        })?;
        Ok(self)
    }

    /// 실행할 핸들러(클로저 또는 조회 키)를 지정한다.
    pub fn set_command(
        &mut self,
        command: impl Into<HandlerRef<CommandFn>>,
    ) -> Result<&mut Self, DefinitionError> {
        let command = command.into();
        if let Some(key) = command.key()
            && key.trim().is_empty()
        {
            return Err(DefinitionError::InvalidCommandType("empty string".to_string()));
        }
        self.command = Some(command);
        Ok(self)
    }

    /// 명령 단위(root) 자동완성 훅을 지정한다.
    pub fn set_completion(&mut self, completion: impl Into<HandlerRef<CompletionFn>>) -> &mut Self {
        self.add_completion(CompletionTarget::Root, completion)
    }

    /// 같은 대상에 다시 등록하면 마지막 훅이 남는다.
    pub fn add_completion(
        &mut self,
        target: impl Into<CompletionTarget>,
        completion: impl Into<HandlerRef<CompletionFn>>,
    ) -> &mut Self {
        self.completions.insert(target.into(), completion.into());
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn command(&self) -> Option<&HandlerRef<CommandFn>> {
        self.command.as_ref()
    }

    pub fn completions(&self) -> &HashMap<CompletionTarget, HandlerRef<CompletionFn>> {
        &self.completions
    }

    pub fn transform_input(&self, input: &dyn Input, output: &dyn Output) -> Option<Box<dyn Input>> {
        self.behaviour
            .as_ref()
            .and_then(|b| b.transform_input(input, output))
    }

    pub fn transform_output(&self, output: Box<dyn Output>, input: &dyn Input) -> Box<dyn Output> {
        match &self.behaviour {
            Some(behaviour) => behaviour.transform_output(output, input),
            None => output,
        }
    }
}
