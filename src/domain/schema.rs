//! 위치 인자/옵션 스키마.
//! 선언 순서를 보존하며, 실제 파싱은 clap `Arg`로 변환해 위임한다.

use clap::{Arg, ArgAction};
use serde_json::Value;

use crate::domain::error::DefinitionError;

/// 위치 인자 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentMode {
    Required,
    Optional,
    RequiredArray,
    OptionalArray,
}

impl ArgumentMode {
    pub fn is_required(self) -> bool {
        matches!(self, ArgumentMode::Required | ArgumentMode::RequiredArray)
    }

    pub fn is_array(self) -> bool {
        matches!(self, ArgumentMode::RequiredArray | ArgumentMode::OptionalArray)
    }
}

/// 옵션 값 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMode {
    /// 값 없는 플래그(`--force`)
    Flag,
    ValueRequired,
    ValueOptional,
    /// 반복 가능한 값(`--tag a --tag b`)
    ValueArray,
}

impl OptionMode {
    pub fn accepts_value(self) -> bool {
        !matches!(self, OptionMode::Flag)
    }

    pub fn is_array(self) -> bool {
        matches!(self, OptionMode::ValueArray)
    }
}

#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub name: String,
    pub mode: ArgumentMode,
    pub description: String,
    pub default: Option<Value>,
    pub suggested_values: Vec<String>,
}

impl ArgumentSpec {
    /// 입력에 값이 없을 때 사용할 값.
    /// 옵션과 이름이 겹쳐도 되도록 clap에는 접두어를 붙인 id로 등록한다.
    pub fn clap_id(&self) -> String {
        format!("arg:{}", self.name)
    }

    pub fn default_value(&self) -> Value {
        match &self.default {
            Some(value) => value.clone(),
            None if self.mode.is_array() => Value::Array(Vec::new()),
            None => Value::Null,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub name: String,
    pub shortcut: Option<char>,
    pub mode: OptionMode,
    pub description: String,
    pub default: Option<Value>,
    pub suggested_values: Vec<String>,
}

impl OptionSpec {
    pub fn clap_id(&self) -> String {
        format!("opt:{}", self.name)
    }

    pub fn default_value(&self) -> Value {
        match (&self.default, self.mode) {
            (Some(value), _) => value.clone(),
            (None, OptionMode::Flag) => Value::Bool(false),
            (None, OptionMode::ValueArray) => Value::Array(Vec::new()),
            (None, _) => Value::Null,
        }
    }
}

/// 하나의 명령이 받는 인자/옵션 목록.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    arguments: Vec<ArgumentSpec>,
    options: Vec<OptionSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 위치 인자를 추가한다. 위치 인자는 순서가 의미를 가진다.
    pub fn add_argument(&mut self, spec: ArgumentSpec) -> Result<(), DefinitionError> {
        if spec.name.is_empty() {
            return Err(invalid("an argument name cannot be empty"));
        }
        if self.argument(&spec.name).is_some() {
            return Err(invalid(format!(
                "an argument with name \"{}\" already exists",
                spec.name
            )));
        }
        if let Some(last) = self.arguments.last() {
            if last.mode.is_array() {
                return Err(invalid(format!(
                    "cannot add argument \"{}\" after an array argument",
                    spec.name
                )));
            }
            if spec.mode.is_required() && !last.mode.is_required() {
                return Err(invalid(format!(
                    "cannot add a required argument \"{}\" after an optional one \"{}\"",
                    spec.name, last.name
                )));
            }
        }
        if let Some(default) = &spec.default {
            if spec.mode.is_required() {
                return Err(invalid(format!(
                    "cannot set a default value for required argument \"{}\"",
                    spec.name
                )));
            }
            if spec.mode.is_array() && !default.is_array() {
                return Err(invalid(format!(
                    "a default value for array argument \"{}\" must be an array",
                    spec.name
                )));
            }
        }

        self.arguments.push(spec);
        Ok(())
    }

    pub fn add_option(&mut self, spec: OptionSpec) -> Result<(), DefinitionError> {
        if spec.name.is_empty() {
            return Err(invalid("an option name cannot be empty"));
        }
        // clap이 도움말용으로 예약한 이름
        if spec.name == "help" || spec.shortcut == Some('h') {
            return Err(invalid(format!(
                "option \"{}\" collides with the reserved help option",
                spec.name
            )));
        }
        if self.option(&spec.name).is_some() {
            return Err(invalid(format!(
                "an option named \"{}\" already exists",
                spec.name
            )));
        }
        if let Some(shortcut) = spec.shortcut
            && self.option_for_shortcut(shortcut).is_some()
        {
            return Err(invalid(format!(
                "an option with shortcut \"{shortcut}\" already exists"
            )));
        }
        if let Some(default) = &spec.default {
            if spec.mode == OptionMode::Flag {
                return Err(invalid(format!(
                    "cannot set a default value for flag option \"{}\"",
                    spec.name
                )));
            }
            if spec.mode.is_array() && !default.is_array() {
                return Err(invalid(format!(
                    "a default value for array option \"{}\" must be an array",
                    spec.name
                )));
            }
        }

        self.options.push(spec);
        Ok(())
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn option_for_shortcut(&self, shortcut: char) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.shortcut == Some(shortcut))
    }

    /// 입력 토큰(`--name`, `-s`)이 가리키는 옵션을 찾는다.
    pub fn option_for_token(&self, token: &str) -> Option<&OptionSpec> {
        if let Some(long) = token.strip_prefix("--") {
            let name = long.split('=').next().unwrap_or(long);
            return self.option(name);
        }
        let short = token.strip_prefix('-')?;
        let mut chars = short.chars();
        let first = chars.next()?;
        self.option_for_shortcut(first)
    }

    pub fn required_argument_count(&self) -> usize {
        self.arguments
            .iter()
            .filter(|a| a.mode.is_required())
            .count()
    }

    pub fn has_array_argument(&self) -> bool {
        self.arguments.last().is_some_and(|a| a.mode.is_array())
    }

    /// 스키마를 clap 인자 목록으로 변환한다.
    pub fn clap_args(&self) -> Vec<Arg> {
        let positional = self.arguments.iter().enumerate().map(|(idx, spec)| {
            let mut arg = Arg::new(spec.clap_id())
                .value_name(spec.name.clone())
                .index(idx + 1)
                .required(spec.mode.is_required())
                .help(help_text(&spec.description, spec.default.as_ref()));
            if spec.mode.is_array() {
                arg = arg.num_args(1..).action(ArgAction::Append);
            }
            arg
        });

        let options = self.options.iter().map(|spec| {
            let mut arg = Arg::new(spec.clap_id())
                .long(spec.name.clone())
                .help(help_text(&spec.description, spec.default.as_ref()));
            if let Some(shortcut) = spec.shortcut {
                arg = arg.short(shortcut);
            }
            if spec.mode.accepts_value() {
                arg = arg.value_name(spec.name.to_uppercase());
            }
            match spec.mode {
                OptionMode::Flag => arg.action(ArgAction::SetTrue),
                OptionMode::ValueRequired => arg.action(ArgAction::Set).num_args(1),
                OptionMode::ValueOptional => arg.action(ArgAction::Set).num_args(0..=1),
                OptionMode::ValueArray => arg.action(ArgAction::Append).num_args(1),
            }
        });

        positional.chain(options).collect()
    }
}

fn help_text(description: &str, default: Option<&Value>) -> String {
    match default {
        Some(Value::Null) | None => description.to_string(),
        Some(value) if description.is_empty() => format!("[default: {value}]"),
        Some(value) => format!("{description} [default: {value}]"),
    }
}

fn invalid(reason: impl Into<String>) -> DefinitionError {
    DefinitionError::InvalidSchema(reason.into())
}
