//! 명령 목록(list) 텍스트 렌더링 모듈.

use unicode_width::UnicodeWidthStr;

/// 목록 한 줄에 표시할 명령 정보.
pub struct CommandRow<'a> {
    pub name: &'a str,
    pub aliases: &'a [String],
    pub description: &'a str,
}

/// 네임스페이스(`foo:` 접두어)별로 묶은 명령 목록을 만든다.
pub fn render_command_list(title: &str, rows: &[CommandRow<'_>]) -> String {
    let mut sorted: Vec<&CommandRow<'_>> = rows.iter().collect();
    // 네임스페이스가 없는 명령을 먼저 보여준다.
    sorted.sort_by(|a, b| {
        (namespace(a.name).is_some(), a.name).cmp(&(namespace(b.name).is_some(), b.name))
    });

    let width = sorted
        .iter()
        .map(|row| row.name.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    if !title.is_empty() {
        out.push_str(title);
        out.push_str("\n\n");
    }
    out.push_str("Available commands:\n");

    let mut current_namespace: Option<&str> = None;
    for row in sorted {
        let ns = namespace(row.name);
        if ns.is_some() && ns != current_namespace {
            out.push_str(&format!(" {}\n", ns.unwrap_or_default()));
            current_namespace = ns;
        }

        let mut description = row.description.to_string();
        if !row.aliases.is_empty() {
            let aliases = format!("[{}]", row.aliases.join("|"));
            description = if description.is_empty() {
                aliases
            } else {
                format!("{aliases} {description}")
            };
        }

        let line = format!("  {}  {}", pad(row.name, width), description);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn namespace(name: &str) -> Option<&str> {
    name.split_once(':').map(|(ns, _)| ns)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}
