//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::any::Any;
use std::fmt;
use std::io;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::application::handler::{CommandFn, CompletionFn, ServiceEntry};
use crate::domain::error::{InputError, ResolutionError};
use crate::domain::handler::HandlerRef;
use crate::domain::schema::Schema;

/// 핸들러 참조를 실행 가능한 함수로 변환하는 포트.
/// `None`은 비어 있는 참조를 뜻한다.
pub trait CommandResolver: Send + Sync {
    fn resolve_command(
        &self,
        reference: Option<&HandlerRef<CommandFn>>,
    ) -> Result<CommandFn, ResolutionError>;

    fn resolve_completion(
        &self,
        reference: Option<&HandlerRef<CompletionFn>>,
    ) -> Result<CompletionFn, ResolutionError>;
}

/// 문자열 키로 서비스를 조회하는 포트(DI 컨테이너 역할).
/// 지연 생성/캐시 정책은 구현체가 소유한다.
pub trait LookupService: Send + Sync {
    fn has(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Result<ServiceEntry>;
}

/// 파싱된 명령 입력 포트.
pub trait Input: fmt::Display + Send {
    /// 첫 번째 위치 토큰(보통 명령 이름).
    fn first_argument(&self) -> Option<String>;

    /// 원시 토큰 중 `values` 중 하나가 있는지 확인한다.
    /// `only_params`가 참이면 `--` 이후 토큰은 보지 않는다.
    fn has_parameter_option(&self, values: &[&str], only_params: bool) -> bool;

    /// 원시 토큰에서 옵션 값을 읽는다. 없으면 `default`.
    fn parameter_option(&self, values: &[&str], default: Value, only_params: bool) -> Value;

    /// 스키마에 맞춰 인자/옵션을 정리하고 기본값을 채운다.
    fn bind(&mut self, schema: &Schema) -> Result<(), InputError>;

    /// 필수 인자가 모두 있는지 검증한다.
    fn validate(&self) -> Result<(), InputError>;

    fn arguments(&self) -> Map<String, Value>;
    fn argument(&self, name: &str) -> Result<Value, InputError>;
    fn set_argument(&mut self, name: &str, value: Value) -> Result<(), InputError>;
    fn has_argument(&self, name: &str) -> bool;

    fn options(&self) -> Map<String, Value>;
    fn option(&self, name: &str) -> Result<Value, InputError>;
    fn set_option(&mut self, name: &str, value: Value) -> Result<(), InputError>;
    fn has_option(&self, name: &str) -> bool;

    fn is_interactive(&self) -> bool;
    fn set_interactive(&mut self, interactive: bool);

    /// 아직 원본 입력이 연결되지 않은 래퍼만 `Some`을 반환한다.
    fn attachable(&mut self) -> Option<&mut dyn AttachInput> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// 래퍼 입력에 원본 입력을 연결하는 능력.
pub trait AttachInput {
    /// 이미 연결돼 있으면 아무 것도 하지 않는다.
    fn attach(&mut self, input: Box<dyn Input>);
}

/// 명령 출력 대상 포트.
pub trait Output: Send {
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    fn as_any(&self) -> &dyn Any;
}
