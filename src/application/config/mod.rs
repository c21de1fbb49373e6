//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_APPLICATION_NAME: &str = "cmdkit";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_GREETING: &str = "Hello";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// 목록/도움말에 표시할 애플리케이션 정보
    #[serde(default)]
    pub application: ApplicationConfig,
    /// `RUST_LOG`가 없을 때 사용할 tracing 필터
    pub log_filter: Option<String>,
    /// 데모 `greet` 명령 설정
    #[serde(default)]
    pub greet: GreetConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ApplicationConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    /// 대화형 여부. 없으면 stdin이 터미널인지로 판단한다.
    pub interactive: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GreetConfig {
    /// 인사말(기본 "Hello")
    pub greeting: Option<String>,
    /// 자동완성으로 제안할 이름 목록
    pub names: Option<Vec<String>>,
}

impl AppConfig {
    pub fn application_name(&self) -> String {
        self.application
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_APPLICATION_NAME.to_string())
    }

    pub fn application_version(&self) -> String {
        self.application
            .version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }

    pub fn interactive(&self) -> Option<bool> {
        self.application.interactive
    }

    pub fn log_filter(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    pub fn greeting(&self) -> String {
        self.greet
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string())
    }

    pub fn greet_names(&self) -> Vec<String> {
        self.greet.names.clone().unwrap_or_default()
    }

    pub fn merge_from(&mut self, other: AppConfig) {
        self.application.merge_from(other.application);
        if other.log_filter.is_some() {
            self.log_filter = other.log_filter;
        }
        self.greet.merge_from(other.greet);
    }
}

impl ApplicationConfig {
    pub fn merge_from(&mut self, other: ApplicationConfig) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.version.is_some() {
            self.version = other.version;
        }
        if other.interactive.is_some() {
            self.interactive = other.interactive;
        }
    }
}

impl GreetConfig {
    pub fn merge_from(&mut self, other: GreetConfig) {
        if other.greeting.is_some() {
            self.greeting = other.greeting;
        }
        if other.names.is_some() {
            self.names = other.names;
        }
    }
}
