//! cmdkit library root.
//! 명령 정의를 clap 명령으로 연결하는 계층(domain/application/infrastructure/interface)을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

pub use application::adapter::CommandAdapter;
pub use application::completion::{CompletionInput, CompletionSuggestions, CompletionType};
pub use application::definition::{CommandDefinition, CompletionTarget, Definition};
pub use application::handler::{CommandFn, CompletionFn, ServiceEntry, command_fn, completion_fn};
pub use application::ports::{AttachInput, CommandResolver, Input, LookupService, Output};
pub use application::registry::Registry;
pub use domain::error::{DefinitionError, InputError, ResolutionError};
pub use domain::handler::HandlerRef;
pub use domain::schema::{ArgumentMode, OptionMode, Schema};
pub use infrastructure::adapters::{ContainerResolver, DirectResolver};
pub use infrastructure::container::ServiceContainer;
pub use infrastructure::io::{
    ArgvInput, ArrayInput, BufferedOutput, ConsoleOutput, NullOutput, WrappedInput,
};

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    infrastructure::config::inspect_pretty_json()
}
