//! Usage line and help text rendering.

use std::path::Path;

use crate::flag::FlagSpec;
use crate::registry::FlagRegistry;

/// Strip directories from the program path given as token 0.
pub fn program_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// `USAGE: <program>` followed by every required flag and, when optional
/// flags exist, `[OPTIONAL-FLAGS]`.
pub fn usage(registry: &FlagRegistry, program: &str) -> String {
    let mut out = format!("USAGE: {}", program_name(program));
    for flag in registry.iter().filter(|f| f.is_required()) {
        out.push(' ');
        out.push_str(flag.name());
        if let Some(placeholder) = flag.kind().placeholder() {
            out.push(' ');
            out.push_str(placeholder);
        }
    }
    if registry.has_optional() {
        out.push_str(" [OPTIONAL-FLAGS]");
    }
    out
}

/// Full help: description, usage, then one line per flag in registry order.
pub fn help(registry: &FlagRegistry, program: &str) -> String {
    let mut out = String::new();
    if !registry.description().trim().is_empty() {
        out.push_str(registry.description().trim_end());
        out.push('\n');
    }
    out.push_str(&usage(registry, program));
    out.push('\n');

    let rows: Vec<(String, String)> = registry
        .iter()
        .map(|f| (format_flag_left(f), format_flag_help(f)))
        .collect();
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        out.push_str(&format_row(&left, &help, width));
        out.push('\n');
    }
    out
}

/// One help line for `flag`, without column padding.
pub fn describe_flag(flag: &FlagSpec) -> String {
    let left = format_flag_left(flag);
    format_row(&left, &format_flag_help(flag), left.len())
}

fn format_row(left: &str, help: &str, width: usize) -> String {
    if help.is_empty() {
        format!("  * {left}")
    } else {
        format!("  * {left:width$} : {help}")
    }
}

fn format_flag_left(flag: &FlagSpec) -> String {
    let mut out = flag.name().to_string();
    if let Some(placeholder) = flag.kind().placeholder() {
        out.push(' ');
        out.push_str(placeholder);
    }
    if flag.is_optional() {
        format!("[{out}]")
    } else {
        out
    }
}

fn format_flag_help(flag: &FlagSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    let description = flag.description().trim();
    if !description.is_empty() {
        parts.push(description.to_string());
    }
    if !flag.aliases_list().is_empty() {
        parts.push(format!("(aliases: {})", flag.aliases_list().join(", ")));
    }
    if let Some(default) = flag.default_value() {
        parts.push(format!("[default: {default}]"));
    }
    parts.join(" ")
}
