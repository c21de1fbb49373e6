//! Infrastructure layer
//! 포트 구현체(해석기/컨테이너/입출력)와 파일시스템 설정 로딩을 모은다.

pub mod adapters;
pub mod config;
pub mod container;
pub mod io;
pub mod render;
