//! 핸들러 참조(호출 가능 값 또는 문자열 키).

use std::fmt;

/// 실행 시점에 해석되는 핸들러 참조.
pub enum HandlerRef<F> {
    Invocable(F),
    Key(String),
}

impl<F: Clone> Clone for HandlerRef<F> {
    fn clone(&self) -> Self {
        match self {
            HandlerRef::Invocable(f) => HandlerRef::Invocable(f.clone()),
            HandlerRef::Key(key) => HandlerRef::Key(key.clone()),
        }
    }
}

impl<F> fmt::Debug for HandlerRef<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Invocable(_) => f.write_str("Invocable(..)"),
            HandlerRef::Key(key) => f.debug_tuple("Key").field(key).finish(),
        }
    }
}

impl<F> HandlerRef<F> {
    pub fn key(&self) -> Option<&str> {
        match self {
            HandlerRef::Key(key) => Some(key),
            HandlerRef::Invocable(_) => None,
        }
    }
}

impl<F> From<&str> for HandlerRef<F> {
    fn from(key: &str) -> Self {
        HandlerRef::Key(key.to_string())
    }
}

impl<F> From<String> for HandlerRef<F> {
    fn from(key: String) -> Self {
        HandlerRef::Key(key)
    }
}
