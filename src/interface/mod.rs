//! Interface layer
//! 바이너리용 명령 정의와 composition root.

pub mod cli;
pub mod composition;
