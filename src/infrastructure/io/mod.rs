//! 입력/출력 포트 구현체와 공용 값 처리 유틸리티.

mod argv;
mod array;
mod output;
mod wrapped;

use serde_json::{Map, Value};

use crate::domain::error::InputError;
use crate::domain::schema::Schema;

pub use argv::ArgvInput;
pub use array::ArrayInput;
pub use output::{BufferedOutput, ConsoleOutput, NullOutput};
pub use wrapped::WrappedInput;

/// 스키마에 바인딩된 인자/옵션 값.
#[derive(Debug, Clone, Default)]
pub(crate) struct BoundValues {
    pub arguments: Map<String, Value>,
    pub options: Map<String, Value>,
    required: Vec<String>,
}

impl BoundValues {
    /// 비어 있는 항목을 스키마 기본값으로 채운다.
    pub fn fill_defaults(&mut self, schema: &Schema) {
        for argument in schema.arguments() {
            self.arguments
                .entry(argument.name.clone())
                .or_insert_with(|| argument.default_value());
        }
        for option in schema.options() {
            self.options
                .entry(option.name.clone())
                .or_insert_with(|| option.default_value());
        }
        self.required = schema
            .arguments()
            .iter()
            .filter(|a| a.mode.is_required())
            .map(|a| a.name.clone())
            .collect();
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| {
                self.arguments
                    .get(name.as_str())
                    .is_none_or(|value| value.is_null())
            })
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(InputError::MissingArguments(missing))
        }
    }

    pub fn argument(&self, name: &str) -> Result<Value, InputError> {
        self.arguments
            .get(name)
            .cloned()
            .ok_or_else(|| InputError::ArgumentNotFound(name.to_string()))
    }

    pub fn set_argument(&mut self, name: &str, value: Value) -> Result<(), InputError> {
        match self.arguments.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(InputError::ArgumentNotFound(name.to_string())),
        }
    }

    pub fn option(&self, name: &str) -> Result<Value, InputError> {
        self.options
            .get(name)
            .cloned()
            .ok_or_else(|| InputError::OptionNotFound(name.to_string()))
    }

    pub fn set_option(&mut self, name: &str, value: Value) -> Result<(), InputError> {
        match self.options.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(InputError::OptionNotFound(name.to_string())),
        }
    }
}

/// 문자열 값은 따옴표 없이, 나머지는 JSON 표기로 바꾼다.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 공백/따옴표가 있으면 셸 안전한 작은따옴표 표기로 감싼다.
pub(crate) fn escape_token(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=:./@,+".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', "'\\''"))
    }
}
