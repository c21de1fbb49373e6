//! 명령 등록부(애플리케이션). 해석기 하나와 어댑터 목록을 보유하고 argv를 디스패치한다.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction};
use tracing::{debug, warn};

use crate::application::adapter::CommandAdapter;
use crate::application::completion::{CompletionInput, CompletionSuggestions};
use crate::application::config::AppConfig;
use crate::application::definition::Definition;
use crate::application::ports::{CommandResolver, Input, Output};
use crate::domain::error::DefinitionError;
use crate::infrastructure::adapters::DirectResolver;
use crate::infrastructure::io::ArgvInput;
use crate::infrastructure::render::{CommandRow, render_command_list};

/// 등록된 명령 목록을 출력하는 내장 명령.
pub const LIST_COMMAND: &str = "list";
/// 셸 자동완성 요청을 처리하는 내장 명령.
pub const COMPLETE_COMMAND: &str = "_complete";

pub struct Registry {
    name: String,
    version: String,
    interactive: bool,
    resolver: Arc<dyn CommandResolver>,
    adapters: Vec<CommandAdapter>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Arc::new(DirectResolver))
    }
}

impl Registry {
    pub fn new(resolver: Arc<dyn CommandResolver>) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            interactive: true,
            resolver,
            adapters: Vec::new(),
        }
    }

    /// 도움말/목록에 표시할 애플리케이션 이름과 버전.
    pub fn with_application(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// 설정의 애플리케이션 이름/버전/대화형 여부를 반영한다.
    pub fn with_config(self, config: &AppConfig) -> Self {
        let interactive = config.interactive().unwrap_or(self.interactive);
        self.with_application(config.application_name(), config.application_version())
            .with_interactive(interactive)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn resolver(&self) -> &Arc<dyn CommandResolver> {
        &self.resolver
    }

    pub fn adapters(&self) -> &[CommandAdapter] {
        &self.adapters
    }

    /// 정의를 어댑터로 감싸 등록한다.
    /// 같은 이름의 명령은 교체되고, 다른 명령이 쓰는 별칭은 거부된다.
    pub fn add_definition(&mut self, definition: Definition) -> Result<&CommandAdapter, DefinitionError> {
        let adapter = CommandAdapter::new(definition, self.resolver.clone())?;

        let aliases = adapter.aliases();
        for (idx, alias) in aliases.iter().enumerate() {
            let taken = self
                .adapters
                .iter()
                .filter(|other| other.name() != adapter.name())
                .any(|other| other.matches(alias));
            let repeated = aliases[..idx].contains(alias);
            if taken || repeated || alias == adapter.name() {
                return Err(DefinitionError::AliasConflict(alias.clone()));
            }
        }
        if let Some(owner) = self
            .adapters
            .iter()
            .find(|other| other.name() != adapter.name() && other.matches(adapter.name()))
        {
            return Err(DefinitionError::AliasConflict(format!(
                "{} (alias of {})",
                adapter.name(),
                owner.name()
            )));
        }

        let idx = match self.adapters.iter().position(|a| a.name() == adapter.name()) {
            Some(idx) => {
                warn!(command = adapter.name(), "replacing previously registered command");
                self.adapters[idx] = adapter;
                idx
            }
            None => {
                self.adapters.push(adapter);
                self.adapters.len() - 1
            }
        };

        let adapter = &self.adapters[idx];
        debug!(
            command = adapter.name(),
            aliases = ?adapter.aliases(),
            "registered command"
        );
        Ok(adapter)
    }

    pub fn add_definitions<I>(&mut self, definitions: I) -> Result<(), DefinitionError>
    where
        I: IntoIterator<Item = Definition>,
    {
        for definition in definitions {
            self.add_definition(definition)?;
        }
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// 이름 또는 별칭으로 명령을 찾는다.
    pub fn find(&self, name: &str) -> Option<&CommandAdapter> {
        self.adapters
            .iter()
            .find(|a| a.name() == name)
            .or_else(|| self.adapters.iter().find(|a| a.matches(name)))
    }

    /// 등록된 명령 전체를 하위 명령으로 가진 clap 명령.
    pub fn clap_command(&self) -> clap::Command {
        let mut root = clap::Command::new(self.name.clone())
            .version(self.version.clone())
            .disable_help_subcommand(true);
        if !self.has(LIST_COMMAND) {
            root = root.subcommand(clap::Command::new(LIST_COMMAND).about("List commands"));
        }
        root.subcommands(self.adapters.iter().map(CommandAdapter::clap_command))
    }

    /// argv 전체(`args[0]`은 프로그램 이름)를 받아 명령을 실행하고 종료 코드를 돌려준다.
    pub fn run<I, S>(&self, args: I, mut output: Box<dyn Output>) -> Result<i32>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let tokens = args.get(1..).unwrap_or_default();

        match tokens.first().map(String::as_str) {
            Some(COMPLETE_COMMAND) => return self.run_completion(tokens, output.as_mut()),
            Some(LIST_COMMAND) if !self.has(LIST_COMMAND) => {
                output.write(&self.list())?;
                return Ok(0);
            }
            None => {
                output.write(&self.list())?;
                return Ok(0);
            }
            _ => {}
        }

        let matches = match self.clap_command().try_get_matches_from(&args) {
            Ok(matches) => matches,
            Err(err) => {
                output.write(&err.render().to_string())?;
                return Ok(err.exit_code());
            }
        };

        let Some((name, sub_matches)) = matches.subcommand() else {
            output.write(&self.list())?;
            return Ok(0);
        };
        let adapter = self
            .find(name)
            .ok_or_else(|| anyhow!("command \"{name}\" is not defined"))?;

        let mut input = ArgvInput::new(tokens.to_vec(), sub_matches.clone());
        input.set_interactive(self.interactive);
        debug!(command = adapter.name(), input = %input, "dispatching command");

        adapter.run(Box::new(input), output)
    }

    /// `tokens[0]`은 명령 이름이다. `current`가 0이면 명령 이름을 제안한다.
    pub fn complete(&self, tokens: &[String], current: usize) -> Result<Vec<String>> {
        if current == 0 || tokens.is_empty() {
            let mut names: Vec<String> = self
                .adapters
                .iter()
                .flat_map(|a| std::iter::once(a.name()).chain(a.aliases().iter().map(String::as_str)))
                .map(ToString::to_string)
                .collect();
            if !self.has(LIST_COMMAND) {
                names.push(LIST_COMMAND.to_string());
            }
            names.sort();
            return Ok(names);
        }

        let Some(adapter) = self.find(&tokens[0]) else {
            debug!(command = %tokens[0], "no completion for unknown command");
            return Ok(Vec::new());
        };

        let mut completion = CompletionInput::new(tokens.to_vec(), current);
        completion.bind(adapter.definition().schema());

        let mut suggestions = CompletionSuggestions::new();
        adapter.complete(&completion, &mut suggestions)?;
        Ok(suggestions.to_lines())
    }

    /// 애플리케이션 제목과 명령 목록 텍스트.
    pub fn list(&self) -> String {
        let mut rows: Vec<CommandRow<'_>> = self
            .adapters
            .iter()
            .map(|a| CommandRow {
                name: a.name(),
                aliases: a.aliases(),
                description: a.description(),
            })
            .collect();
        if !self.has(LIST_COMMAND) {
            rows.push(CommandRow {
                name: LIST_COMMAND,
                aliases: &[],
                description: "List commands",
            });
        }
        render_command_list(&format!("{} {}", self.name, self.version), &rows)
    }

    /// `_complete -c <index> -i <token>...` 형식의 요청을 처리한다.
    fn run_completion(&self, tokens: &[String], output: &mut dyn Output) -> Result<i32> {
        let request = clap::Command::new(COMPLETE_COMMAND)
            .arg(
                Arg::new("current")
                    .short('c')
                    .long("current")
                    .value_parser(clap::value_parser!(usize))
                    .required(true),
            )
            .arg(
                Arg::new("input")
                    .short('i')
                    .long("input")
                    .action(ArgAction::Append)
                    .allow_hyphen_values(true),
            )
            .arg(Arg::new("shell").short('s').long("shell"));

        let matches = match request.try_get_matches_from(tokens) {
            Ok(matches) => matches,
            Err(err) => {
                output.write(&err.render().to_string())?;
                return Ok(err.exit_code());
            }
        };

        let current = matches.get_one::<usize>("current").copied().unwrap_or(0);
        let inputs: Vec<String> = matches
            .get_many::<String>("input")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        for line in self.complete(&inputs, current)? {
            output.writeln(&line)?;
        }
        Ok(0)
    }
}
