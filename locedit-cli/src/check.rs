use locedit::{
    Provider,
    formats::{plist, strings},
};
use std::{fs, path::Path};

use crate::groups::discover_groups;

/// How a single file reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Read by the commented grammar, messages included.
    Commented(usize),
    /// Only readable as a property list; messages would be lost on save.
    PropertyList(usize),
    /// Neither reader found any entry.
    Unreadable(String),
}

pub fn check_file(path: &Path) -> FileStatus {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileStatus::Unreadable(e.to_string()),
    };
    if plist::is_binary(&bytes) {
        return match plist::parse_binary_table(&bytes) {
            Ok(pairs) => FileStatus::PropertyList(pairs.len()),
            Err(e) => FileStatus::Unreadable(e.to_string()),
        };
    }

    let text = match strings::decode(bytes.as_slice()) {
        Ok(text) => text,
        Err(e) => return FileStatus::Unreadable(e.to_string()),
    };

    if text.trim().is_empty() {
        return FileStatus::Commented(0);
    }

    match strings::parse_strict(&text) {
        Ok(entries) => FileStatus::Commented(entries.len()),
        Err(parse_error) => match plist::parse_string_table(&text) {
            Ok(pairs) if !pairs.is_empty() => FileStatus::PropertyList(pairs.len()),
            Ok(_) => FileStatus::Unreadable(parse_error.to_string()),
            Err(e) => FileStatus::Unreadable(format!("{}; {}", parse_error, e)),
        },
    }
}

/// Reports, per file, which reader understands it. Fails when any file would
/// lose its comments on save or cannot be read at all.
pub fn run_check_command(provider: &Provider, dir: &Path) -> Result<(), String> {
    let groups = discover_groups(provider, dir)?;
    let mut problems = 0usize;

    for localization in groups.iter().flat_map(|g| g.localizations()) {
        let path = localization.path();
        match check_file(path) {
            FileStatus::Commented(count) => {
                println!("✅ {}: {} entries", path.display(), count);
            }
            FileStatus::PropertyList(count) => {
                problems += 1;
                println!(
                    "⚠️  {}: {} entries, read as property list (comments are dropped on save)",
                    path.display(),
                    count
                );
            }
            FileStatus::Unreadable(reason) => {
                problems += 1;
                println!("❌ {}: {}", path.display(), reason);
            }
        }
    }

    if problems > 0 {
        return Err(format!("{} file(s) need attention", problems));
    }
    Ok(())
}
