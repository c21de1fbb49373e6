//! 문자열 키를 조회 서비스(컨테이너)에서 찾아 해석하는 어댑터.

use std::sync::Arc;

use tracing::debug;

use crate::application::handler::{CommandFn, CompletionFn, Resolvable};
use crate::application::ports::{CommandResolver, LookupService};
use crate::domain::error::ResolutionError;
use crate::domain::handler::HandlerRef;

/// 클로저는 그대로 통과시키고, 키는 매번 조회 서비스에 묻는다.
/// 결과 캐시는 조회 서비스의 책임이다.
#[derive(Clone)]
pub struct ContainerResolver {
    container: Arc<dyn LookupService>,
}

impl ContainerResolver {
    pub fn new(container: Arc<dyn LookupService>) -> Self {
        Self { container }
    }

    fn resolve<F: Resolvable>(&self, reference: Option<&HandlerRef<F>>) -> Result<F, ResolutionError> {
        let key = match reference {
            Some(HandlerRef::Invocable(f)) => return Ok(f.clone()),
            Some(HandlerRef::Key(key)) if !key.is_empty() => key,
            _ => return Err(ResolutionError::NotAKey),
        };

        if !self.container.has(key) {
            return Err(ResolutionError::KeyNotFound(key.clone()));
        }

        let entry = self
            .container
            .get(key)
            .map_err(|source| ResolutionError::Lookup {
                key: key.clone(),
                source,
            })?;
        debug!(key = %key, ?entry, "resolved handler from container");

        F::from_entry(entry).ok_or_else(|| ResolutionError::NotCallableValue(key.clone()))
    }
}

impl CommandResolver for ContainerResolver {
    fn resolve_command(
        &self,
        reference: Option<&HandlerRef<CommandFn>>,
    ) -> Result<CommandFn, ResolutionError> {
        self.resolve(reference)
    }

    fn resolve_completion(
        &self,
        reference: Option<&HandlerRef<CompletionFn>>,
    ) -> Result<CompletionFn, ResolutionError> {
        self.resolve(reference)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{Result, bail};

    use super::*;
    use crate::application::handler::{ServiceEntry, command_fn};

    /// 조회 호출 횟수를 기록하는 조회 서비스.
    #[derive(Default)]
    struct CountingLookup {
        entries: Mutex<Vec<(String, ServiceEntry)>>,
        gets: AtomicUsize,
    }

    impl CountingLookup {
        fn with(key: &str, entry: ServiceEntry) -> Self {
            let lookup = Self::default();
            lookup
                .entries
                .lock()
                .unwrap()
                .push((key.to_string(), entry));
            lookup
        }
    }

    impl LookupService for CountingLookup {
        fn has(&self, key: &str) -> bool {
            self.entries.lock().unwrap().iter().any(|(k, _)| k == key) || key == "broken"
        }

        fn get(&self, key: &str) -> Result<ServiceEntry> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if key == "broken" {
                bail!("factory exploded");
            }
            let entries = self.entries.lock().unwrap();
            match entries.iter().find(|(k, _)| k == key) {
                Some((_, entry)) => Ok(entry.clone()),
                None => bail!("no entry for {key}"),
            }
        }
    }

    fn command(code: i32) -> CommandFn {
        command_fn(move |_, _| Ok(code))
    }

    #[test]
    fn invocables_bypass_the_container() {
        let lookup = Arc::new(CountingLookup::default());
        let resolver = ContainerResolver::new(lookup.clone());

        let original = command(1);
        let resolved = resolver
            .resolve_command(Some(&HandlerRef::Invocable(original.clone())))
            .unwrap();

        assert!(Arc::ptr_eq(&original, &resolved));
        assert_eq!(lookup.gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn resolves_keys_on_every_call() {
        let lookup = Arc::new(CountingLookup::with("app.cmd", ServiceEntry::Command(command(7))));
        let resolver = ContainerResolver::new(lookup.clone());
        let reference = HandlerRef::from("app.cmd");

        for _ in 0..2 {
            resolver.resolve_command(Some(&reference)).unwrap();
        }
        assert_eq!(lookup.gets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reports_each_failure_reason() {
        let lookup = Arc::new(CountingLookup::with(
            "app.value",
            ServiceEntry::Value(Arc::new(42_u32)),
        ));
        let resolver = ContainerResolver::new(lookup);

        assert!(matches!(
            resolver.resolve_command(None),
            Err(ResolutionError::NotAKey)
        ));
        assert!(matches!(
            resolver.resolve_command(Some(&HandlerRef::from(""))),
            Err(ResolutionError::NotAKey)
        ));
        assert!(matches!(
            resolver.resolve_command(Some(&HandlerRef::from("missing"))),
            Err(ResolutionError::KeyNotFound(key)) if key == "missing"
        ));
        assert!(matches!(
            resolver.resolve_command(Some(&HandlerRef::from("app.value"))),
            Err(ResolutionError::NotCallableValue(key)) if key == "app.value"
        ));
        assert!(matches!(
            resolver.resolve_command(Some(&HandlerRef::from("broken"))),
            Err(ResolutionError::Lookup { key, .. }) if key == "broken"
        ));
    }

    #[test]
    fn completion_keys_need_completion_entries() {
        let lookup = Arc::new(CountingLookup::with("app.cmd", ServiceEntry::Command(command(0))));
        let resolver = ContainerResolver::new(lookup);

        assert!(matches!(
            resolver.resolve_completion(Some(&HandlerRef::from("app.cmd"))),
            Err(ResolutionError::NotCallableValue(_))
        ));
    }
}
