//! 원본 입력을 나중에 연결받는 래퍼 입력.

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::application::ports::{AttachInput, Input};
use crate::domain::error::InputError;
use crate::domain::schema::Schema;

/// `transform_input`에서 돌려주기 위한 입력 래퍼.
/// 연결 전에는 안전한 기본값을 돌려주고, 연결 후에는 모든 호출을 원본에 위임한다.
#[derive(Default)]
pub struct WrappedInput {
    input: Option<Box<dyn Input>>,
}

impl WrappedInput {
    /// 연결되지 않은 래퍼. 어댑터가 실행 직전에 원본을 연결한다.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(input: Box<dyn Input>) -> Self {
        Self { input: Some(input) }
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    pub fn inner(&self) -> Option<&dyn Input> {
        self.input.as_deref()
    }
}

impl fmt::Debug for WrappedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedInput")
            .field("attached", &self.has_input())
            .finish()
    }
}

impl fmt::Display for WrappedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.input {
            Some(input) => write!(f, "{input}"),
            None => Ok(()),
        }
    }
}

impl AttachInput for WrappedInput {
    fn attach(&mut self, input: Box<dyn Input>) {
        if self.input.is_none() {
            self.input = Some(input);
        }
    }
}

impl Input for WrappedInput {
    fn first_argument(&self) -> Option<String> {
        self.input.as_ref()?.first_argument()
    }

    fn has_parameter_option(&self, values: &[&str], only_params: bool) -> bool {
        self.input
            .as_ref()
            .is_some_and(|input| input.has_parameter_option(values, only_params))
    }

    fn parameter_option(&self, values: &[&str], default: Value, only_params: bool) -> Value {
        match &self.input {
            Some(input) => input.parameter_option(values, default, only_params),
            None => default,
        }
    }

    fn bind(&mut self, schema: &Schema) -> Result<(), InputError> {
        match &mut self.input {
            Some(input) => input.bind(schema),
            None => Ok(()),
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        match &self.input {
            Some(input) => input.validate(),
            None => Ok(()),
        }
    }

    fn arguments(&self) -> Map<String, Value> {
        self.input
            .as_ref()
            .map(|input| input.arguments())
            .unwrap_or_default()
    }

    fn argument(&self, name: &str) -> Result<Value, InputError> {
        match &self.input {
            Some(input) => input.argument(name),
            None => Err(InputError::ArgumentNotFound(name.to_string())),
        }
    }

    fn set_argument(&mut self, name: &str, value: Value) -> Result<(), InputError> {
        match &mut self.input {
            Some(input) => input.set_argument(name, value),
            None => Ok(()),
        }
    }

    fn has_argument(&self, name: &str) -> bool {
        self.input
            .as_ref()
            .is_some_and(|input| input.has_argument(name))
    }

    fn options(&self) -> Map<String, Value> {
        self.input
            .as_ref()
            .map(|input| input.options())
            .unwrap_or_default()
    }

    fn option(&self, name: &str) -> Result<Value, InputError> {
        match &self.input {
            Some(input) => input.option(name),
            None => Err(InputError::OptionNotFound(name.to_string())),
        }
    }

    fn set_option(&mut self, name: &str, value: Value) -> Result<(), InputError> {
        match &mut self.input {
            Some(input) => input.set_option(name, value),
            None => Ok(()),
        }
    }

    fn has_option(&self, name: &str) -> bool {
        self.input
            .as_ref()
            .is_some_and(|input| input.has_option(name))
    }

    fn is_interactive(&self) -> bool {
        self.input
            .as_ref()
            .is_some_and(|input| input.is_interactive())
    }

    fn set_interactive(&mut self, interactive: bool) {
        if let Some(input) = &mut self.input {
            input.set_interactive(interactive);
        }
    }

    fn attachable(&mut self) -> Option<&mut dyn AttachInput> {
        if self.input.is_some() {
            return None;
        }
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
