//! CLI 인터페이스 모듈 묶음.
//! 바이너리가 기본으로 등록하는 명령 정의를 한 네임스페이스로 관리한다.

pub mod definitions;

pub use definitions::{
    GREET_HANDLER_KEY, GREET_NAMES_KEY, GreetCommand, INSPECT_CONFIG_KEY, InspectConfigCommand,
};
