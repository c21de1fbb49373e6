//! 명령 이름 규칙(타입 이름 → kebab-case 유도, 이름 형식 검증).

use crate::domain::error::DefinitionError;

/// 우선순위 순서로 검사하는 타입 이름 접미사.
const ALLOWED_ENDINGS: [&str; 2] = ["Command", "Definition"];

/// 타입 이름에서 명령 이름을 유도한다.
///
/// - `App\SomeSuperCommand` → `some-super`
/// - `App\ECSCommand` → `ecs`
/// - `app::fixtures::CommandWithoutNameDefinition` → `command-without-name`
pub fn derive_name(type_name: &str) -> String {
    let short = short_type_name(type_name);

    let raw = ALLOWED_ENDINGS
        .iter()
        .find_map(|ending| short.strip_suffix(ending))
        .unwrap_or(short);

    let mut chars: Vec<char> = raw.chars().collect();

    // ECSCommand => ecs
    for i in 0..chars.len() {
        let followed_by_upper_or_nothing = chars
            .get(i + 1)
            .is_none_or(|next| next.is_ascii_uppercase());
        if chars[i].is_ascii_uppercase() && followed_by_upper_or_nothing {
            chars[i] = chars[i].to_ascii_lowercase();
        } else {
            break;
        }
    }

    if let Some(first) = chars.first_mut() {
        *first = first.to_ascii_lowercase();
    }

    let mut name = String::with_capacity(chars.len() + 4);
    for ch in chars {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// 이름이 `segment(:segment)*` 형식인지 검증한다.
/// segment는 비어 있지 않고 콜론을 포함하지 않는다.
pub fn validate_name(name: &str) -> Result<(), DefinitionError> {
    if name.split(':').any(str::is_empty) {
        return Err(DefinitionError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn short_type_name(type_name: &str) -> &str {
    // core::option::Option<foo::Bar> 같은 제네릭 인자는 무시한다.
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit(['\\', ':', '.'])
        .next()
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derives_kebab_case_from_namespaced_names() {
        assert_eq!(derive_name("App\\SomeSuperCommand"), "some-super");
        assert_eq!(derive_name("App\\ECSCommand"), "ecs");
        assert_eq!(
            derive_name("App\\CommandWithoutNameDefinition"),
            "command-without-name"
        );
    }

    #[test]
    fn collapses_leading_acronym() {
        assert_eq!(
            derive_name("App\\COMMANDWithoutNameDefinition"),
            "command-without-name"
        );
        assert_eq!(derive_name("SOMESuperCommand"), "some-super");
    }

    #[test]
    fn accepts_rust_paths_and_generics() {
        assert_eq!(derive_name("my_app::cli::CacheClearCommand"), "cache-clear");
        assert_eq!(
            derive_name("my_app::cli::Wrapped<other::InnerCommand>"),
            "wrapped"
        );
    }

    #[test]
    fn keeps_name_without_known_suffix() {
        assert_eq!(derive_name("App\\ServeHttp"), "serve-http");
        assert_eq!(derive_name("deploy"), "deploy");
    }

    #[test]
    fn strips_only_one_suffix() {
        assert_eq!(derive_name("App\\DefinitionCommand"), "definition");
        assert_eq!(derive_name("App\\CommandDefinition"), "command");
    }

    #[test]
    fn bare_suffix_yields_empty_name() {
        assert_eq!(derive_name("App\\Command"), "");
    }

    #[test]
    fn validates_colon_segments() {
        assert!(validate_name("foo").is_ok());
        assert!(validate_name("test:foo").is_ok());
        assert!(validate_name("a:b:c").is_ok());

        for bad in ["", ":", "foo:", ":foo", "foo::bar", "bad:name:"] {
            assert!(
                matches!(validate_name(bad), Err(DefinitionError::InvalidName(n)) if n == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    proptest! {
        #[test]
        fn strips_exactly_one_known_suffix(word in "[A-Z][a-z]{1,8}", ending in "(Command|Definition)") {
            prop_assume!(word != "Command");
            let with_suffix = derive_name(&format!("App\\{word}{ending}"));
            let without_suffix = derive_name(&format!("App\\{word}"));
            prop_assert_eq!(with_suffix, without_suffix);
        }

        #[test]
        fn derived_names_have_no_uppercase(short in "[A-Za-z]{1,16}") {
            let name = derive_name(&short);
            prop_assert!(!name.chars().any(|c| c.is_ascii_uppercase()));
        }
    }
}
