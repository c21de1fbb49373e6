//! 명령줄 토큰 + clap 파싱 결과 기반 입력.

use std::any::Any;
use std::fmt;

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde_json::{Map, Value};

use crate::application::ports::Input;
use crate::domain::error::InputError;
use crate::domain::schema::{OptionMode, Schema};
use crate::infrastructure::io::{BoundValues, escape_token};

/// argv 입력. `tokens[0]`은 명령 이름이다.
#[derive(Debug, Clone)]
pub struct ArgvInput {
    tokens: Vec<String>,
    matches: Option<ArgMatches>,
    values: BoundValues,
    interactive: bool,
}

impl ArgvInput {
    pub fn new(tokens: Vec<String>, matches: ArgMatches) -> Self {
        Self {
            tokens,
            matches: Some(matches),
            values: BoundValues::default(),
            interactive: true,
        }
    }

    /// 파싱 결과 없이 원시 토큰만 가진 입력.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            matches: None,
            values: BoundValues::default(),
            interactive: true,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for ArgvInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.tokens.iter().map(|t| escape_token(t)).collect();
        f.write_str(&rendered.join(" "))
    }
}

impl Input for ArgvInput {
    fn first_argument(&self) -> Option<String> {
        self.tokens.iter().find(|t| !t.starts_with('-')).cloned()
    }

    fn has_parameter_option(&self, values: &[&str], only_params: bool) -> bool {
        for token in &self.tokens {
            if only_params && token == "--" {
                return false;
            }
            for value in values {
                // --name=value 형태도 같은 옵션으로 본다.
                let leading = leading_for(value);
                if token == value || (!leading.is_empty() && token.starts_with(&leading)) {
                    return true;
                }
            }
        }
        false
    }

    fn parameter_option(&self, values: &[&str], default: Value, only_params: bool) -> Value {
        let mut idx = 0;
        while idx < self.tokens.len() {
            let token = &self.tokens[idx];
            idx += 1;
            if only_params && token == "--" {
                return default;
            }
            for value in values {
                if token == value {
                    return self
                        .tokens
                        .get(idx)
                        .map(|next| Value::String(next.clone()))
                        .unwrap_or(Value::Null);
                }
                let leading = leading_for(value);
                if !leading.is_empty()
                    && let Some(rest) = token.strip_prefix(leading.as_str())
                {
                    return Value::String(rest.to_string());
                }
            }
        }
        default
    }

    fn bind(&mut self, schema: &Schema) -> Result<(), InputError> {
        let mut values = BoundValues::default();

        if let Some(matches) = &self.matches {
            for argument in schema.arguments() {
                let id = argument.clap_id();
                let value = if argument.mode.is_array() {
                    many(matches, &id)
                } else {
                    one(matches, &id)
                };
                if let Some(value) = value {
                    values.arguments.insert(argument.name.clone(), value);
                }
            }

            for option in schema.options() {
                let id = option.clap_id();
                let value = match option.mode {
                    OptionMode::Flag => matches
                        .try_get_one::<bool>(&id)
                        .ok()
                        .flatten()
                        .map(|flag| Value::Bool(*flag)),
                    OptionMode::ValueArray => many(matches, &id),
                    OptionMode::ValueRequired => one(matches, &id),
                    // 값 없이 주어진 `--opt`는 기본값 대신 null이다.
                    OptionMode::ValueOptional => one(matches, &id).or_else(|| {
                        (matches.value_source(&id) == Some(ValueSource::CommandLine))
                            .then_some(Value::Null)
                    }),
                };
                if let Some(value) = value {
                    values.options.insert(option.name.clone(), value);
                }
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

fn leading_for(value: &str) -> String {
    if value.starts_with("--") {
        format!("{value}=")
    } else {
        value.to_string()
    }
}

fn one(matches: &ArgMatches, id: &str) -> Option<Value> {
    matches
        .try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(|value| Value::String(value.clone()))
}

fn many(matches: &ArgMatches, id: &str) -> Option<Value> {
    matches
        .try_get_many::<String>(id)
        .ok()
        .flatten()
        .map(|values| Value::Array(values.cloned().map(Value::String).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{ArgumentMode, ArgumentSpec, OptionSpec};
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
        schema
            .add_option(OptionSpec {
                name: "force".to_string(),
                shortcut: Some('f'),
                mode: OptionMode::Flag,
                description: String::new(),
                default: None,
                suggested_values: Vec::new(),
            })
            .unwrap();
        schema
            .add_option(OptionSpec {
                name: "level".to_string(),
                shortcut: Some('l'),
                mode: OptionMode::ValueOptional,
                description: String::new(),
                default: Some(json!("info")),
                suggested_values: Vec::new(),
            })
            .unwrap();
        schema
            .add_option(OptionSpec {
                name: "user".to_string(),
                shortcut: Some('u'),
                mode: OptionMode::ValueRequired,
                description: String::new(),
                default: Some(json!("guest")),
                suggested_values: Vec::new(),
            })
            .unwrap();
        schema
    }

    fn parse(tokens: &[&str]) -> ArgvInput {
        let schema = schema();
        let command = clap::Command::new("test:foo")
            .no_binary_name(true)
            .args(schema.clap_args());
        let matches = command
            .try_get_matches_from(tokens.iter().skip(1).copied())
            .unwrap();
        let mut input = ArgvInput::new(tokens.iter().map(ToString::to_string).collect(), matches);
        input.bind(&schema).unwrap();
        input
    }

    #[test]
    fn binds_parsed_values_and_defaults() {
        let input = parse(&["test:foo", "1", "-f"]);
        assert_eq!(input.argument("test").unwrap(), json!("1"));
        assert_eq!(input.option("force").unwrap(), json!(true));
        assert_eq!(input.option("user").unwrap(), json!("guest"));
        assert!(input.validate().is_ok());
        assert!(matches!(
            input.argument("missing"),
            Err(InputError::ArgumentNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn bare_value_optional_option_binds_null() {
        assert_eq!(parse(&["test:foo", "1"]).option("level").unwrap(), json!("info"));
        assert_eq!(parse(&["test:foo", "1", "--level"]).option("level").unwrap(), Value::Null);
        assert_eq!(
            parse(&["test:foo", "1", "--level", "debug"]).option("level").unwrap(),
            json!("debug")
        );
    }

    #[test]
    fn inspects_raw_tokens() {
        let input = ArgvInput::from_tokens(
            ["test:foo", "1", "--user=bob", "--", "-f"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        assert_eq!(input.first_argument().as_deref(), Some("test:foo"));
        assert!(input.has_parameter_option(&["--user"], false));
        assert!(input.has_parameter_option(&["-f"], false));
        assert!(!input.has_parameter_option(&["-f"], true));
        assert_eq!(
            input.parameter_option(&["--user"], Value::Null, false),
            json!("bob")
        );
        assert_eq!(
            input.parameter_option(&["--missing"], json!("dflt"), false),
            json!("dflt")
        );
    }

    #[test]
    fn unbound_tokens_still_validate_required_arguments() {
        let mut input = ArgvInput::from_tokens(vec!["test:foo".to_string()]);
        input.bind(&schema()).unwrap();
        assert!(matches!(
            input.validate(),
            Err(InputError::MissingArguments(names)) if names == ["test"]
        ));
    }

    #[test]
    fn renders_tokens_shell_escaped() {
        let input = ArgvInput::from_tokens(vec!["greet".to_string(), "two words".to_string()]);
        assert_eq!(input.to_string(), "greet 'two words'");
    }
}
