//! 이름/값 쌍으로 구성하는 메모리 입력(테스트/프로그램 호출용).

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::application::ports::Input;
use crate::domain::error::InputError;
use crate::domain::schema::{OptionMode, OptionSpec, Schema};
use crate::infrastructure::io::{BoundValues, escape_token, value_to_string};

/// `("test", "1")`은 인자, `("--force", true)`/`("-f", null)`은 옵션이다.
#[derive(Debug, Clone, Default)]
pub struct ArrayInput {
    parameters: Vec<(String, Value)>,
    values: BoundValues,
    interactive: bool,
}

impl ArrayInput {
    pub fn new<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            parameters: parameters
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            values: BoundValues::default(),
            interactive: true,
        }
    }

    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }
}

impl fmt::Display for ArrayInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (key, value) in &self.parameters {
            if key.starts_with('-') {
                match value {
                    Value::Null | Value::Bool(true) => parts.push(key.clone()),
                    Value::Array(items) => parts.extend(
                        items
                            .iter()
                            .map(|item| format!("{key}={}", escape_token(&value_to_string(item)))),
                    ),
                    other => parts.push(format!("{key}={}", escape_token(&value_to_string(other)))),
                }
            } else if let Value::Array(items) = value {
                parts.extend(items.iter().map(|item| escape_token(&value_to_string(item))));
            } else {
                parts.push(escape_token(&value_to_string(value)));
            }
        }
        f.write_str(&parts.join(" "))
    }
}

impl Input for ArrayInput {
    fn first_argument(&self) -> Option<String> {
        self.parameters
            .iter()
            .find(|(key, _)| !key.starts_with('-'))
            .map(|(_, value)| value_to_string(value))
    }

    fn has_parameter_option(&self, values: &[&str], only_params: bool) -> bool {
        for (key, _) in &self.parameters {
            if only_params && key == "--" {
                return false;
            }
            if values.contains(&key.as_str()) {
                return true;
            }
        }
        false
    }

    fn parameter_option(&self, values: &[&str], default: Value, only_params: bool) -> Value {
        for (key, value) in &self.parameters {
            if only_params && key == "--" {
                return default;
            }
            if values.contains(&key.as_str()) {
                return value.clone();
            }
        }
        default
    }

    fn bind(&mut self, schema: &Schema) -> Result<(), InputError> {
        let mut values = BoundValues::default();

        for (key, value) in &self.parameters {
            if key == "--" {
                continue;
            }
            if let Some(long) = key.strip_prefix("--") {
                let option = schema
                    .option(long)
                    .ok_or_else(|| InputError::OptionNotFound(long.to_string()))?;
                values
                    .options
                    .insert(option.name.clone(), option_value(option, value)?);
            } else if let Some(short) = key.strip_prefix('-') {
                let option = short_option(schema, short)
                    .ok_or_else(|| InputError::OptionNotFound(short.to_string()))?;
                values
                    .options
                    .insert(option.name.clone(), option_value(option, value)?);
            } else {
                let argument = schema
                    .argument(key)
                    .ok_or_else(|| InputError::ArgumentNotFound(key.clone()))?;
                values.arguments.insert(argument.name.clone(), value.clone());
            }
        }

        values.fill_defaults(schema);
        self.values = values;
        Ok(())
    }

    fn validate(&self) -> Result<(), InputError> {
        self.values.validate()
    }

    fn arguments(&self) -> Map<String, Value> {
        self.values.arguments.clone()
    }

    fn argument(&self, name: &str) -> Result<Value, InputError> {
        self.values.argument(name)
    }

    fn set_argument(&mut self, name: &str, value: Value) -> Result<(), InputError> {
        self.values.set_argument(name, value)
    }

    fn has_argument(&self, name: &str) -> bool {
        self.values.arguments.contains_key(name)
    }

    fn options(&self) -> Map<String, Value> {
        self.values.options.clone()
    }

    fn option(&self, name: &str) -> Result<Value, InputError> {
        self.values.option(name)
    }

    fn set_option(&mut self, name: &str, value: Value) -> Result<(), InputError> {
        self.values.set_option(name, value)
    }

    fn has_option(&self, name: &str) -> bool {
        self.values.options.contains_key(name)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn short_option<'a>(schema: &'a Schema, short: &str) -> Option<&'a OptionSpec> {
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(shortcut), None) => schema.option_for_shortcut(shortcut),
        _ => None,
    }
}

fn option_value(option: &OptionSpec, value: &Value) -> Result<Value, InputError> {
    let invalid = |reason: &str| InputError::InvalidValue {
        name: option.name.clone(),
        reason: reason.to_string(),
    };

    match (option.mode, value) {
        (OptionMode::Flag, Value::Null) => Ok(Value::Bool(true)),
        (OptionMode::Flag, Value::Bool(flag)) => Ok(Value::Bool(*flag)),
        (OptionMode::Flag, _) => Err(invalid("the option does not accept a value")),
        (OptionMode::ValueRequired, Value::Null) => Err(invalid("the option requires a value")),
        (OptionMode::ValueArray, Value::Array(_)) => Ok(value.clone()),
        (OptionMode::ValueArray, Value::Null) => Err(invalid("the option requires a value")),
        (OptionMode::ValueArray, scalar) => Ok(Value::Array(vec![scalar.clone()])),
        _ => Ok(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{ArgumentMode, ArgumentSpec};
    use serde_json::json;

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_argument(ArgumentSpec {
                name: "test".to_string(),
                mode: ArgumentMode::Required,
                description: String::new(),
                default: None,
                suggested_values: Vec::new(),
            })
            .unwrap();
        for (name, shortcut, mode) in [
            ("force", Some('f'), OptionMode::Flag),
            ("tag", Some('t'), OptionMode::ValueArray),
            ("user", None, OptionMode::ValueRequired),
        ] {
            schema
                .add_option(OptionSpec {
                    name: name.to_string(),
                    shortcut,
                    mode,
                    description: String::new(),
                    default: None,
                    suggested_values: Vec::new(),
                })
                .unwrap();
        }
        schema
    }

    #[test]
    fn binds_arguments_and_options() {
        let mut input = ArrayInput::new([
            ("test", json!("1")),
            ("-f", Value::Null),
            ("--tag", json!("a")),
        ]);
        input.bind(&schema()).unwrap();

        assert_eq!(input.argument("test").unwrap(), json!("1"));
        assert_eq!(input.option("force").unwrap(), json!(true));
        assert_eq!(input.option("tag").unwrap(), json!(["a"]));
        assert_eq!(input.option("user").unwrap(), Value::Null);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn unknown_names_fail_to_bind() {
        let mut input = ArrayInput::new([("nope", json!("1"))]);
        assert!(matches!(
            input.bind(&schema()),
            Err(InputError::ArgumentNotFound(name)) if name == "nope"
        ));

        let mut input = ArrayInput::new([("--nope", Value::Null)]);
        assert!(matches!(
            input.bind(&schema()),
            Err(InputError::OptionNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn required_value_option_needs_value() {
        let mut input = ArrayInput::new([("--user", Value::Null)]);
        assert!(matches!(
            input.bind(&schema()),
            Err(InputError::InvalidValue { name, .. }) if name == "user"
        ));
    }

    #[test]
    fn missing_required_argument_fails_validation() {
        let mut input = ArrayInput::new(Vec::<(String, Value)>::new());
        input.bind(&schema()).unwrap();
        assert!(matches!(
            input.validate(),
            Err(InputError::MissingArguments(names)) if names == ["test"]
        ));
    }

    #[test]
    fn inspects_parameters_by_key() {
        let input = ArrayInput::new([
            ("test", json!("1")),
            ("--user", json!("bob")),
            ("--", Value::Null),
            ("-f", Value::Null),
        ]);
        assert_eq!(input.first_argument().as_deref(), Some("1"));
        assert!(input.has_parameter_option(&["--user"], true));
        assert!(!input.has_parameter_option(&["-f"], true));
        assert!(input.has_parameter_option(&["-f"], false));
        assert_eq!(
            input.parameter_option(&["--user"], Value::Null, false),
            json!("bob")
        );
    }

    #[test]
    fn renders_like_command_line() {
        let input = ArrayInput::new([
            ("test", json!("two words")),
            ("--force", Value::Null),
            ("--tag", json!(["a", "b"])),
        ]);
        assert_eq!(input.to_string(), "'two words' --force --tag=a --tag=b");
    }
}
