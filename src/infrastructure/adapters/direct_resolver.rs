//! 호출 가능한 참조만 받아들이는 기본 해석기.

use tracing::debug;

use crate::application::handler::{CommandFn, CompletionFn};
use crate::application::ports::CommandResolver;
use crate::domain::error::ResolutionError;
use crate::domain::handler::HandlerRef;

/// 클로저 참조는 그대로 돌려주고 문자열 키는 거부한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectResolver;

impl DirectResolver {
    fn resolve<F: Clone>(reference: Option<&HandlerRef<F>>) -> Result<F, ResolutionError> {
        match reference {
            Some(HandlerRef::Invocable(f)) => Ok(f.clone()),
            Some(HandlerRef::Key(key)) => {
                debug!(key = %key, "direct resolver cannot resolve string keys");
                Err(ResolutionError::NotCallable)
            }
            None => Err(ResolutionError::NotCallable),
        }
    }
}

impl CommandResolver for DirectResolver {
    fn resolve_command(
        &self,
        reference: Option<&HandlerRef<CommandFn>>,
    ) -> Result<CommandFn, ResolutionError> {
        Self::resolve(reference)
    }

    fn resolve_completion(
        &self,
        reference: Option<&HandlerRef<CompletionFn>>,
    ) -> Result<CompletionFn, ResolutionError> {
        Self::resolve(reference)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn returns_the_same_invocable() {
        let reference = HandlerRef::command(|_, _| Ok(3));
        let HandlerRef::Invocable(original) = &reference else {
            unreachable!()
        };

        let resolved = DirectResolver.resolve_command(Some(&reference)).unwrap();
        assert!(Arc::ptr_eq(original, &resolved));
    }

    #[test]
    fn rejects_keys_and_empty_references() {
        let key: HandlerRef<CommandFn> = HandlerRef::from("app.command");
        assert!(matches!(
            DirectResolver.resolve_command(Some(&key)),
            Err(ResolutionError::NotCallable)
        ));
        assert!(matches!(
            DirectResolver.resolve_completion(None),
            Err(ResolutionError::NotCallable)
        ));
    }
}
