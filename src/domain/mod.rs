//! Domain layer
//! 명령 이름 규칙, 핸들러 참조, 입력 스키마, 오류 분류를 외부 프레임워크와 분리해 표현한다.

pub mod error;
pub mod handler;
pub mod naming;
pub mod schema;
