//! 메모리 기반 서비스 컨테이너(조회 서비스 포트 구현).

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::application::completion::{CompletionInput, CompletionSuggestions};
use crate::application::ports::{Input, LookupService, Output};
use crate::application::handler::{
    CompletionFn, DefaultCompletion, ServiceEntry, command_fn, completion_fn,
};

type Factory = Box<dyn Fn() -> Result<ServiceEntry> + Send + Sync>;

struct Service {
    factory: Factory,
    instance: Mutex<Option<ServiceEntry>>,
}

/// 키 → 서비스 팩토리 등록부.
/// 팩토리는 처음 조회될 때 한 번만 실행되고 결과는 공유된다.
#[derive(Default)]
pub struct ServiceContainer {
    services: HashMap<String, Service>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지연 생성 서비스를 등록한다. 같은 키는 덮어쓴다.
    pub fn factory<F>(&mut self, key: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<ServiceEntry> + Send + Sync + 'static,
    {
        self.services.insert(
            key.into(),
            Service {
                factory: Box::new(factory),
                instance: Mutex::new(None),
            },
        );
        self
    }

    /// 이미 만들어진 값을 등록한다.
    pub fn set(&mut self, key: impl Into<String>, entry: ServiceEntry) -> &mut Self {
        self.services.insert(
            key.into(),
            Service {
                factory: Box::new(|| Err(anyhow!("service instance was already provided"))),
                instance: Mutex::new(Some(entry)),
            },
        );
        self
    }

    pub fn command<F>(&mut self, key: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut dyn Input, &mut dyn Output) -> Result<i32> + Send + Sync + 'static,
    {
        self.set(key, ServiceEntry::Command(command_fn(handler)))
    }

    pub fn completion<F>(&mut self, key: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn(&CompletionInput, &mut CompletionSuggestions, DefaultCompletion<'_>) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        let hook: CompletionFn = completion_fn(hook);
        self.set(key, ServiceEntry::Completion(hook))
    }

    pub fn value<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        self.set(key, ServiceEntry::Value(Arc::new(value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}

impl LookupService for ServiceContainer {
    fn has(&self, key: &str) -> bool {
        self.services.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<ServiceEntry> {
        let service = self
            .services
            .get(key)
            .ok_or_else(|| anyhow!("service \"{key}\" is not registered"))?;

        let mut instance = service
            .instance
            .lock()
            .map_err(|_| anyhow!("service \"{key}\" lock poisoned"))?;
        if let Some(entry) = instance.as_ref() {
            return Ok(entry.clone());
        }

        debug!(key, "instantiating service");
        let entry = (service.factory)()?;
        *instance = Some(entry.clone());
        Ok(entry)
    }
}
