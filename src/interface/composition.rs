//! 애플리케이션 조립(composition root) 모듈.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::application::config::AppConfig;
use crate::application::definition::Definition;
use crate::application::registry::Registry;
use crate::application::handler::{ServiceEntry, command_fn};
use crate::infrastructure::adapters::ContainerResolver;
use crate::infrastructure::config;
use crate::infrastructure::container::ServiceContainer;
use crate::interface::cli::{
    GREET_HANDLER_KEY, GREET_NAMES_KEY, GreetCommand, INSPECT_CONFIG_KEY, InspectConfigCommand,
};

/// 설정과 서비스 컨테이너를 한 곳에서 조립한다.
pub struct AppComposition {
    config: AppConfig,
    container: Arc<ServiceContainer>,
}

impl AppComposition {
    /// 병합된 사용자 설정으로 조립한다.
    pub fn load() -> Result<Self> {
        Ok(Self::from_config(config::load()?))
    }

    pub fn from_config(config: AppConfig) -> Self {
        let container = Arc::new(build_container(&config));
        Self { config, container }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn container(&self) -> Arc<ServiceContainer> {
        self.container.clone()
    }

    /// 컨테이너 키로 핸들러를 찾는 등록부를 만든다.
    pub fn registry(&self) -> Result<Registry> {
        let interactive = self
            .config
            .interactive()
            .unwrap_or_else(|| io::stdin().is_terminal());

        let mut registry = Registry::new(Arc::new(ContainerResolver::new(self.container())))
            .with_config(&self.config)
            .with_interactive(interactive);
        registry.add_definitions([
            Definition::build(InspectConfigCommand)?,
            Definition::build(GreetCommand)?,
        ])?;
        Ok(registry)
    }
}

fn build_container(settings: &AppConfig) -> ServiceContainer {
    let mut container = ServiceContainer::new();

    // 설정 파일을 다시 읽으므로 실제로 호출될 때만 만든다.
    container.factory(INSPECT_CONFIG_KEY, || {
        Ok(ServiceEntry::Command(command_fn(|_, output| {
            output.writeln(&config::inspect_pretty_json()?)?;
            Ok(0)
        })))
    });

    let greeting = settings.greeting();
    container.command(GREET_HANDLER_KEY, move |input, output| {
        let name = input.argument("name")?;
        let word = match input.option("greeting")? {
            Value::String(word) => word,
            _ => greeting.clone(),
        };
        let mut line = format!("{word}, {}!", name.as_str().unwrap_or("world"));
        if input.option("shout")?.as_bool().unwrap_or(false) {
            line = line.to_uppercase();
        }
        output.writeln(&line)?;
        Ok(0)
    });

    let names = settings.greet_names();
    container.completion(GREET_NAMES_KEY, move |completion, suggestions, fallback| {
        if names.is_empty() {
            fallback(suggestions);
            return Ok(());
        }
        let prefix = completion.completion_value();
        suggestions.suggest_values(names.iter().filter(|n| n.starts_with(prefix)).cloned());
        Ok(())
    });

    container
}
