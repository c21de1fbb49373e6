//! 정의/해석/입력 단계의 오류 분류.

use thiserror::Error;

/// 명령 정의 구성 및 어댑터 생성 단계 오류.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("command name \"{0}\" is invalid")]
    InvalidName(String),

    #[error("command type \"{0}\" is invalid")]
    InvalidCommandType(String),

    #[error("definition \"{0}\" doesn't contain any command to execute")]
    MissingHandler(String),

    #[error("invalid input schema: {0}")]
    InvalidSchema(String),

    #[error("alias \"{0}\" is already used by another command")]
    AliasConflict(String),
}

/// 핸들러 참조를 실행 가능한 값으로 바꾸지 못했을 때의 오류.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("command must be callable")]
    NotCallable,

    #[error("handler must be a non-empty string key")]
    NotAKey,

    #[error("key \"{0}\" not found in lookup service")]
    KeyNotFound(String),

    #[error("value resolved for key \"{0}\" is not callable")]
    NotCallableValue(String),

    #[error("lookup service failed to provide \"{key}\"")]
    Lookup {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// 입력 조회/바인딩 오류.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("the \"{0}\" argument does not exist")]
    ArgumentNotFound(String),

    #[error("the \"{0}\" option does not exist")]
    OptionNotFound(String),

    #[error("not enough arguments (missing: \"{}\")", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("too many arguments, expected at most {0}")]
    TooManyArguments(usize),

    #[error("invalid value for \"{name}\": {reason}")]
    InvalidValue { name: String, reason: String },
}
