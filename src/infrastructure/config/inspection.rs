//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::application::config::AppConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub config: AppConfig,
    pub effective: EffectiveConfig,
}

/// 기본값까지 반영된 최종 값.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub application_name: String,
    pub application_version: String,
    pub interactive: Option<bool>,
    pub log_filter: String,
    pub greeting: String,
    pub greet_names: Vec<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = loaded.config;
        let effective = EffectiveConfig {
            application_name: config.application_name(),
            application_version: config.application_version(),
            interactive: config.interactive(),
            log_filter: config.log_filter(),
            greeting: config.greeting(),
            greet_names: config.greet_names(),
        };

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            config,
            effective,
        }
    }
}
