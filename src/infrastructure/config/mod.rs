//! 사용자 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고, 실행 진단용 정보를 함께 제공한다.

mod inspection;
mod loader;

use std::path::PathBuf;

use anyhow::Result;

pub use inspection::{ConfigInspection, EffectiveConfig};
pub use loader::{CONFIG_ENV, config_paths};

use crate::application::config::AppConfig;

/// 병합된 최종 설정을 로딩한다.
pub fn load() -> Result<AppConfig> {
    Ok(loader::load_merged_config()?.config)
}

/// 지정한 경로만으로 설정을 병합한다.
pub fn load_from(paths: Vec<PathBuf>) -> Result<AppConfig> {
    Ok(loader::load_merged_config_from(paths)?.config)
}

/// 디버깅/진단용 설정 정보를 구성한다.
pub fn inspect() -> Result<ConfigInspection> {
    let loaded = loader::load_merged_config()?;
    Ok(ConfigInspection::from_loaded(loaded))
}

/// 설정 진단 결과를 사람이 읽기 쉬운 JSON으로 반환한다.
pub fn inspect_pretty_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&inspect()?)?)
}
