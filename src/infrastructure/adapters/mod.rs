//! 애플리케이션 포트를 실제 구현체로 연결하는 어댑터 계층.

mod container_resolver;
mod direct_resolver;

pub use container_resolver::ContainerResolver;
pub use direct_resolver::DirectResolver;
