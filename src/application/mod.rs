//! Application layer
//! 명령 정의/어댑터/등록부를 정의하고 포트(추상 인터페이스)를 통해 인프라를 사용한다.

pub mod adapter;
pub mod completion;
pub mod config;
pub mod definition;
pub mod handler;
pub mod ports;
pub mod registry;
