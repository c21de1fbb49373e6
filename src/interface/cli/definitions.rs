//! 바이너리에 기본 등록되는 명령 정의.
//! 핸들러는 키로만 참조하고 실제 구현은 composition root의 컨테이너가 제공한다.

use serde_json::json;

use crate::application::definition::{CommandDefinition, Definition};
use crate::domain::error::DefinitionError;
use crate::domain::schema::{ArgumentMode, OptionMode};

pub const INSPECT_CONFIG_KEY: &str = "config.inspect";
pub const GREET_HANDLER_KEY: &str = "greet.handler";
pub const GREET_NAMES_KEY: &str = "greet.names";

/// `config:inspect`: 병합된 설정 진단 JSON을 출력한다.
pub struct InspectConfigCommand;

impl CommandDefinition for InspectConfigCommand {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition
            .set_name("config:inspect")?
            .set_description("Print searched/loaded config paths and effective values as JSON");
        definition.set_command(INSPECT_CONFIG_KEY)?;
        Ok(())
    }
}

/// 이름은 타입 이름에서 유도된다(`greet`).
pub struct GreetCommand;

impl CommandDefinition for GreetCommand {
    fn configure(&self, definition: &mut Definition) -> Result<(), DefinitionError> {
        definition
            .set_aliases(["hi"])?
            .set_description("Greets someone")
            .add_usage("greet bob --shout")
            .add_usage("greet --greeting Howdy");

        definition.add_argument(
            "name",
            ArgumentMode::Optional,
            "Who to greet",
            Some(json!("world")),
            &["world"],
        )?;
        definition.add_option(
            "greeting",
            Some('g'),
            OptionMode::ValueRequired,
            "Greeting word (defaults to the configured one)",
            None,
            &["Hello", "Hi", "Howdy"],
        )?;
        definition.add_option("shout", Some('s'), OptionMode::Flag, "Uppercase the output", None, &[])?;

        definition.set_command(GREET_HANDLER_KEY)?;
        definition.add_completion("name", GREET_NAMES_KEY);
        Ok(())
    }
}
