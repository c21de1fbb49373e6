//! 명령 정의를 clap 명령으로 연결하고 실행/자동완성을 위임하는 어댑터.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::completion::{CompletionInput, CompletionSuggestions, CompletionType};
use crate::application::definition::{CompletionTarget, Definition};
use crate::application::ports::{CommandResolver, Input, Output};
use crate::domain::error::DefinitionError;
use crate::domain::naming::{derive_name, validate_name};

/// 하나의 정의를 실행 가능한 명령으로 감싼다.
pub struct CommandAdapter {
    name: String,
    definition: Definition,
    resolver: Arc<dyn CommandResolver>,
}

impl CommandAdapter {
    /// 핸들러가 없는 정의는 거부한다.
    /// 이름이 없으면 정의 타입 이름에서 유도한다.
    pub fn new(
        definition: Definition,
        resolver: Arc<dyn CommandResolver>,
    ) -> Result<Self, DefinitionError> {
        if definition.command().is_none() {
            return Err(DefinitionError::MissingHandler(
                definition.type_name().to_string(),
            ));
        }

        let name = match definition.name() {
            Some(name) => name.to_string(),
            None => {
                let derived = derive_name(definition.type_name());
                validate_name(&derived)?;
                debug!(
                    type_name = definition.type_name(),
                    name = %derived,
                    "derived command name"
                );
                derived
            }
        };

        Ok(Self {
            name,
            definition,
            resolver,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        self.definition.aliases()
    }

    pub fn description(&self) -> &str {
        self.definition.description().unwrap_or("")
    }

    pub fn usages(&self) -> &[String] {
        self.definition.usages()
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// 이름 또는 별칭이 일치하는지.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases().iter().any(|alias| alias == name)
    }

    /// clap 하위 명령으로 변환한다.
    pub fn clap_command(&self) -> clap::Command {
        let mut command = clap::Command::new(self.name.clone())
            .about(self.description().to_string())
            .visible_aliases(self.aliases().to_vec())
            .args(self.definition.schema().clap_args());

        if !self.usages().is_empty() {
            let examples: Vec<String> = self.usages().iter().map(|u| format!("  {u}")).collect();
            command = command.after_help(format!("Examples:\n{}", examples.join("\n")));
        }
        command
    }

    /// 스키마 바인딩과 검증을 거친 뒤 실행한다.
    pub fn run(&self, mut input: Box<dyn Input>, output: Box<dyn Output>) -> Result<i32> {
        input.bind(self.definition.schema())?;
        input.validate()?;
        self.invoke(input, output)
    }

    /// 입력/출력 변환 → 핸들러 해석 → 호출 순서로 실행하고 종료 코드를 그대로 반환한다.
    pub fn invoke(&self, input: Box<dyn Input>, output: Box<dyn Output>) -> Result<i32> {
        let mut input = match self.definition.transform_input(input.as_ref(), output.as_ref()) {
            Some(mut transformed) => {
                if let Some(slot) = transformed.attachable() {
                    slot.attach(input);
                }
                transformed
            }
            None => input,
        };
        let mut output = self.definition.transform_output(output, input.as_ref());

        let command = self.resolver.resolve_command(self.definition.command())?;
        debug!(command = %self.name, "invoking command handler");
        let code = command(input.as_mut(), output.as_mut())?;
        debug!(command = %self.name, code, "command handler finished");
        Ok(code)
    }

    /// 인자/옵션 전용 훅 → root 훅 → 기본 동작 순으로 자동완성을 위임한다.
    /// `completion`은 이 명령의 스키마에 바인딩돼 있어야 한다.
    pub fn complete(
        &self,
        completion: &CompletionInput,
        suggestions: &mut CompletionSuggestions,
    ) -> Result<()> {
        let completions = self.definition.completions();
        let hook = completion
            .completion_name()
            .and_then(|name| completions.get(&CompletionTarget::from(name)))
            .or_else(|| completions.get(&CompletionTarget::Root));

        let Some(reference) = hook else {
            self.default_completion(completion, suggestions);
            return Ok(());
        };

        let hook = self.resolver.resolve_completion(Some(reference))?;
        let fallback = |suggestions: &mut CompletionSuggestions| {
            self.default_completion(completion, suggestions)
        };
        hook(completion, suggestions, &fallback)
    }

    /// 선언된 제안 값과 옵션 이름으로 채운다.
    pub fn default_completion(
        &self,
        completion: &CompletionInput,
        suggestions: &mut CompletionSuggestions,
    ) {
        let schema = self.definition.schema();
        let name = completion.completion_name();
        match completion.completion_type() {
            CompletionType::OptionName => {
                for option in schema.options() {
                    suggestions.suggest_option(option.name.clone());
                }
            }
            CompletionType::OptionValue => {
                if let Some(option) = name.and_then(|n| schema.option(n)) {
                    suggestions.suggest_values(option.suggested_values.iter().cloned());
                }
            }
            CompletionType::ArgumentValue => {
                if let Some(argument) = name.and_then(|n| schema.argument(n)) {
                    suggestions.suggest_values(argument.suggested_values.iter().cloned());
                }
            }
            CompletionType::None => {}
        }
    }
}
