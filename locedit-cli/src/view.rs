use locedit::{Filter, LocalizationIndex, Provider};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::groups::{discover_groups, select_group};

/// Display columns a value may take before it is cut.
const VALUE_WIDTH: usize = 50;

/// Cuts `value` to at most `width` display columns, ending in `...` when cut.
pub fn truncate(value: &str, width: usize) -> String {
    if value.width() <= width {
        return value.to_string();
    }
    let budget = width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// One line per cell; newlines are shown escaped so each value stays on its line.
fn display_value(value: &str, full: bool) -> String {
    let single_line = value.replace('\n', "\\n");
    if full {
        single_line
    } else {
        truncate(&single_line, VALUE_WIDTH)
    }
}

/// Print the keys of one group with their values in every language.
pub fn run_view_command(
    provider: &Provider,
    dir: &Path,
    group: Option<&str>,
    filter: Filter,
    search: Option<&str>,
    full: bool,
) -> Result<(), String> {
    let groups = discover_groups(provider, dir)?;
    let group = select_group(&groups, group)?;
    let index = LocalizationIndex::new(group);
    let keys = index.filtered_keys(filter, search);

    // Values are only cut for a terminal; piped output stays complete.
    let full = full || !atty::is(atty::Stream::Stdout);

    println!("=== {} ===", group.name());
    println!("Languages: {}", index.languages().join(", "));
    println!(
        "Showing {} of {} key(s) (filter: {})",
        keys.len(),
        index.len(),
        filter
    );

    for key in keys {
        println!("\n{}", key);
        if let Some(message) = index.message(key) {
            println!("  # {}", message);
        }
        for language in index.languages() {
            match index.get(key, language) {
                Some(entry) if !entry.is_missing() => {
                    println!("  {}: {}", language, display_value(entry.value(), full));
                }
                Some(_) => println!("  {}: (empty)", language),
                None => println!("  {}: (missing)", language),
            }
        }
    }
    Ok(())
}
