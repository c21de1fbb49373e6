//! 출력 포트 구현체(콘솔/버퍼/폐기).

use std::any::Any;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::application::ports::Output;

/// 표준 출력 또는 표준 오류로 쓰는 콘솔 출력.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    stderr: bool,
}

impl ConsoleOutput {
    pub fn stdout() -> Self {
        Self { stderr: false }
    }

    pub fn stderr() -> Self {
        Self { stderr: true }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Output for ConsoleOutput {
    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.stderr {
            let mut err = io::stderr().lock();
            err.write_all(text.as_bytes())?;
            err.flush()
        } else {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 메모리 버퍼 출력. 복제본끼리 같은 버퍼를 공유한다.
#[derive(Debug, Clone, Default)]
pub struct BufferedOutput {
    buffer: Arc<Mutex<String>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }

    /// 지금까지의 내용을 꺼내고 버퍼를 비운다.
    pub fn take(&self) -> String {
        self.buffer
            .lock()
            .map(|mut buffer| std::mem::take(&mut *buffer))
            .unwrap_or_default()
    }
}

impl Output for BufferedOutput {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("output buffer lock poisoned"))?;
        buffer.push_str(text);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 모든 출력을 버린다.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl Output for NullOutput {
    fn write(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
