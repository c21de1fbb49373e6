//! 셸 자동완성 문맥(현재 토큰 해석)과 제안 수집기.

use crate::domain::schema::Schema;

/// 현재 토큰이 무엇을 완성해야 하는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionType {
    OptionName,
    OptionValue,
    ArgumentValue,
    None,
}

/// 자동완성 요청 문맥.
/// `tokens[0]`은 명령 이름이고 `current`는 완성 중인 토큰 위치다.
#[derive(Debug, Clone)]
pub struct CompletionInput {
    tokens: Vec<String>,
    current: usize,
    completion_type: CompletionType,
    completion_name: Option<String>,
    completion_value: String,
}

impl CompletionInput {
    /// `current`가 토큰 수를 넘으면 마지막 토큰 뒤의 새 토큰으로 본다.
    pub fn new(tokens: Vec<String>, current: usize) -> Self {
        let current = current.min(tokens.len());
        let completion_value = tokens.get(current).cloned().unwrap_or_default();
        Self {
            tokens,
            current,
            completion_type: CompletionType::None,
            completion_name: None,
            completion_value,
        }
    }

    /// 스키마를 기준으로 완성 대상(옵션 이름/옵션 값/인자 값)을 판별한다.
    pub fn bind(&mut self, schema: &Schema) {
        self.completion_type = CompletionType::None;
        self.completion_name = None;
        self.completion_value = self.current_token().to_string();

        let token = self.current_token().to_string();

        if let Some(rest) = token.strip_prefix("--") {
            match rest.split_once('=') {
                Some((name, value)) => {
                    if schema.option(name).is_some_and(|o| o.mode.accepts_value()) {
                        self.set(CompletionType::OptionValue, Some(name), value);
                    }
                }
                None => self.set(CompletionType::OptionName, None, &token),
            }
            return;
        }

        if let Some(short) = token.strip_prefix('-')
            && !short.is_empty()
        {
            let mut chars = short.chars();
            let option = chars
                .next()
                .and_then(|c| schema.option_for_shortcut(c))
                .filter(|o| o.mode.accepts_value());
            match option {
                Some(option) if !chars.as_str().is_empty() => {
                    let name = option.name.clone();
                    self.set(CompletionType::OptionValue, Some(&name), chars.as_str());
                }
                _ => self.set(CompletionType::OptionName, None, &token),
            }
            return;
        }

        // 직전 토큰이 값을 받는 옵션이면 그 옵션의 값을 완성한다.
        if self.current >= 2
            && let Some(previous) = self.tokens.get(self.current - 1)
            && is_bare_option_token(previous)
            && let Some(option) = schema.option_for_token(previous)
            && option.mode.accepts_value()
        {
            let name = option.name.clone();
            self.set(CompletionType::OptionValue, Some(&name), &token);
            return;
        }

        let position = self.positional_index(schema);
        let arguments = schema.arguments();
        let target = arguments
            .get(position)
            .or_else(|| arguments.last().filter(|_| schema.has_array_argument()));
        if let Some(argument) = target {
            let name = argument.name.clone();
            self.set(CompletionType::ArgumentValue, Some(&name), &token);
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_token(&self) -> &str {
        self.tokens
            .get(self.current)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn completion_type(&self) -> CompletionType {
        self.completion_type
    }

    /// 완성 중인 인자/옵션 이름. 옵션 이름 완성이면 `None`.
    pub fn completion_name(&self) -> Option<&str> {
        self.completion_name.as_deref()
    }

    pub fn completion_value(&self) -> &str {
        &self.completion_value
    }

    pub fn must_suggest_option_values_for(&self, name: &str) -> bool {
        self.completion_type == CompletionType::OptionValue
            && self.completion_name.as_deref() == Some(name)
    }

    pub fn must_suggest_argument_values_for(&self, name: &str) -> bool {
        self.completion_type == CompletionType::ArgumentValue
            && self.completion_name.as_deref() == Some(name)
    }

    fn set(&mut self, kind: CompletionType, name: Option<&str>, value: &str) {
        self.completion_type = kind;
        self.completion_name = name.map(ToString::to_string);
        self.completion_value = value.to_string();
    }

    /// 현재 토큰 앞의 위치 인자 개수(옵션과 그 값은 건너뛴다).
    fn positional_index(&self, schema: &Schema) -> usize {
        let end = self.current.min(self.tokens.len());
        let mut position = 0;
        let mut only_positional = false;
        let mut skip_value = false;

        for token in self.tokens.iter().take(end).skip(1) {
            if skip_value {
                skip_value = false;
                continue;
            }
            if !only_positional && token == "--" {
                only_positional = true;
                continue;
            }
            if !only_positional && token.starts_with('-') && token.len() > 1 {
                skip_value = is_bare_option_token(token)
                    && schema
                        .option_for_token(token)
                        .is_some_and(|o| o.mode.accepts_value());
                continue;
            }
            position += 1;
        }
        position
    }
}

/// 값이 붙어 있지 않은 옵션 토큰(`--user`, `-u`)인지.
fn is_bare_option_token(token: &str) -> bool {
    match token.strip_prefix("--") {
        Some(long) => !long.is_empty() && !long.contains('='),
        None => token.len() == 2 && token.starts_with('-'),
    }
}

/// 자동완성 제안 수집기.
#[derive(Debug, Clone, Default)]
pub struct CompletionSuggestions {
    values: Vec<String>,
    options: Vec<String>,
}

impl CompletionSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggest_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    pub fn suggest_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// 옵션 이름(`--` 없이)을 제안한다.
    pub fn suggest_option(&mut self, name: impl Into<String>) -> &mut Self {
        self.options.push(name.into());
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn option_names(&self) -> &[String] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.options.is_empty()
    }

    /// 셸에 전달할 한 줄 단위 제안 목록.
    pub fn to_lines(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|name| format!("--{name}"))
            .chain(self.values.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{ArgumentMode, ArgumentSpec, OptionMode, OptionSpec};

    fn schema() -> Schema {
        let mut schema = Schema::new();
        for (name, mode) in [
            ("test", ArgumentMode::Required),
            ("file", ArgumentMode::Optional),
        ] {
            schema
                .add_argument(ArgumentSpec {
                    name: name.to_string(),
                    mode,
                    description: String::new(),
                    default: None,
                    suggested_values: Vec::new(),
                })
                .unwrap();
        }
        for (name, shortcut, mode) in [
            ("user", Some('u'), OptionMode::ValueRequired),
            ("force", Some('f'), OptionMode::Flag),
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

    fn bound(tokens: &[&str], current: usize) -> CompletionInput {
        let mut input = CompletionInput::new(
            tokens.iter().map(ToString::to_string).collect(),
            current,
        );
        input.bind(&schema());
        input
    }

    #[test]
    fn completes_first_argument() {
        let input = bound(&["cmd", ""], 1);
        assert_eq!(input.completion_type(), CompletionType::ArgumentValue);
        assert!(input.must_suggest_argument_values_for("test"));
    }

    #[test]
    fn skips_options_when_counting_positionals() {
        let input = bound(&["cmd", "1", "-f", "--user", "bob", "fi"], 5);
        assert!(input.must_suggest_argument_values_for("file"));
        assert_eq!(input.completion_value(), "fi");
    }

    #[test]
    fn completes_option_value_after_bare_option() {
        let input = bound(&["cmd", "--user", "us"], 2);
        assert!(input.must_suggest_option_values_for("user"));
        assert_eq!(input.completion_value(), "us");

        let short = bound(&["cmd", "-u", ""], 2);
        assert!(short.must_suggest_option_values_for("user"));
    }

    #[test]
    fn completes_inline_option_values() {
        let long = bound(&["cmd", "--user=ra"], 1);
        assert!(long.must_suggest_option_values_for("user"));
        assert_eq!(long.completion_value(), "ra");

        let short = bound(&["cmd", "-ura"], 1);
        assert!(short.must_suggest_option_values_for("user"));
        assert_eq!(short.completion_value(), "ra");
    }

    #[test]
    fn completes_option_names() {
        let input = bound(&["cmd", "--fo"], 1);
        assert_eq!(input.completion_type(), CompletionType::OptionName);
        assert_eq!(input.completion_name(), None);
    }

    #[test]
    fn index_past_the_end_completes_a_new_token() {
        let input = bound(&["cmd", "1"], 5);
        assert_eq!(input.current(), 2);
        assert_eq!(input.current_token(), "");
        assert!(input.must_suggest_argument_values_for("file"));

        let after_option = bound(&["cmd", "--user"], 9);
        assert!(after_option.must_suggest_option_values_for("user"));
    }

    #[test]
    fn nothing_to_complete_past_last_argument() {
        let input = bound(&["cmd", "1", "a.txt", ""], 3);
        assert_eq!(input.completion_type(), CompletionType::None);
    }

    #[test]
    fn renders_option_names_with_dashes() {
        let mut suggestions = CompletionSuggestions::new();
        suggestions.suggest_option("force").suggest_values(["a", "b"]);
        assert_eq!(suggestions.to_lines(), ["--force", "a", "b"]);
    }
}
