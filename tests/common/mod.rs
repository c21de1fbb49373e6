//! 통합 테스트 공용 정의.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cmdkit::{
    ArgumentMode, CommandDefinition, Definition, DefinitionError, HandlerRef, Input, OptionMode,
    Output, WrappedInput, command_fn,
};
use serde_json::Value;

/// 핸들러가 받은 `test` 인자와, 입력이 래퍼였다면 연결 여부를 기록한다.
pub type Seen = Arc<Mutex<Vec<(Value, Option<bool>)>>>;

/// `test:foo` 명령. `wrap`이 참이면 입력을 새 `WrappedInput`으로 바꾼다.
#[derive(Default)]
pub struct CommandDefinitionFixture {
    pub seen: Seen,
    pub wrap: bool,
}

impl CommandDefinitionFixture {
    pub fn wrapping() -> Self {
        Self {
            wrap: true,
            ..Self::default()
        }
    }
}

impl CommandDefinition for CommandDefinitionFixture {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition
            .set_name("test:foo")?
            .set_aliases(["foo"])?
            .set_description("test description")
            .add_usage("test");
        definition.add_argument("test", ArgumentMode::Required, "test argument", None, &[])?;
        definition.add_option("force", Some('f'), OptionMode::Flag, "force", None, &[])?;

        let seen = self.seen.clone();
        definition.set_command(command_fn(move |input, _| {
            let wrapped = input
                .as_any()
                .downcast_ref::<WrappedInput>()
                .map(WrappedInput::has_input);
            seen.lock().unwrap().push((input.argument("test")?, wrapped));
            Ok(0)
        }))?;
        Ok(())
    }

    fn transform_input(&self, _input: &dyn Input, _output: &dyn Output) -> Option<Box<dyn Input>> {
        self.wrap
            .then(|| Box::new(WrappedInput::new()) as Box<dyn Input>)
    }
}

/// 이름 없이 타입 이름으로 `command-without-name`이 유도된다.
pub struct CommandWithoutNameDefinition;

impl CommandDefinition for CommandWithoutNameDefinition {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition.set_command(command_fn(|_, _| Ok(7)))?;
        Ok(())
    }
}

/// `file` 인자에만 자동완성 훅이 있는 명령.
pub struct CompletionDefinitionFixture;

impl CommandDefinition for CompletionDefinitionFixture {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition.set_name("test")?;
        definition.add_argument("test", ArgumentMode::Optional, "", None, &["1", "2"])?;
        definition.add_argument("file", ArgumentMode::Optional, "", None, &[])?;
        definition.add_option("user", Some('u'), OptionMode::ValueRequired, "", None, &["alice", "bob"])?;
        definition.set_command(command_fn(|_, _| Ok(0)))?;
        definition.add_completion(
            "file",
            HandlerRef::completion(|_, suggestions, _| {
                suggestions.suggest_value("file.txt");
                Ok(())
            }),
        );
        Ok(())
    }
}

/// 핸들러를 지정하지 않은 정의.
pub struct InvalidDefinition;

impl CommandDefinition for InvalidDefinition {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition.set_name("invalid")?;
        Ok(())
    }
}

/// 컨테이너 키로 핸들러를 참조하는 명령.
pub struct KeyedDefinition {
    pub name: &'static str,
    pub key: &'static str,
}

impl CommandDefinition for KeyedDefinition {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition.set_name(self.name)?;
        definition.add_option("force", Some('f'), OptionMode::Flag, "", None, &[])?;
        definition.set_command(self.key)?;
        Ok(())
    }
}

/// 전용 훅 없이 root 훅만 있는 인자(`test`)와 전용 훅이 있는 인자(`file`)를 가진 명령.
pub struct RootCompletionDefinition;

impl CommandDefinition for RootCompletionDefinition {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition.set_name("rooted")?;
        definition.add_argument("test", ArgumentMode::Optional, "", None, &["1", "2"])?;
        definition.add_argument("file", ArgumentMode::Optional, "", None, &[])?;
        definition.set_command(command_fn(|_, _| Ok(0)))?;
        definition.set_completion(HandlerRef::completion(|input, suggestions, fallback| {
            suggestions.suggest_value(format!("root:{}", input.completion_name().unwrap_or("")));
            fallback(suggestions);
            Ok(())
        }));
        definition.add_completion(
            "file",
            HandlerRef::completion(|_, suggestions, _| {
                suggestions.suggest_value("file.txt");
                Ok(())
            }),
        );
        Ok(())
    }
}

/// 같은 이름(`force`)의 인자와 옵션을 가진 명령.
pub struct SharedNameDefinition;

impl CommandDefinition for SharedNameDefinition {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition.set_name("same")?;
        definition.add_argument("force", ArgumentMode::Optional, "", None, &[])?;
        definition.add_option("force", Some('f'), OptionMode::Flag, "", None, &[])?;
        definition.set_command(command_fn(|input, output| {
            output.writeln(&format!(
                "arg={} opt={}",
                input.argument("force")?,
                input.option("force")?
            ))?;
            Ok(0)
        }))?;
        Ok(())
    }
}
