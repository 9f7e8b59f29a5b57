use locedit::{LocalizationGroup, Provider};
use std::path::Path;

/// Discovers groups under `dir`, failing when there are none.
pub fn discover_groups(provider: &Provider, dir: &Path) -> Result<Vec<LocalizationGroup>, String> {
    if !dir.is_dir() {
        return Err(format!("{} is not a directory", dir.display()));
    }
    let groups = provider.discover(dir);
    tracing::debug!("discovered {} group(s) in {}", groups.len(), dir.display());
    if groups.is_empty() {
        return Err(format!("No localization files found in {}", dir.display()));
    }
    Ok(groups)
}

/// Picks the group named `name`, or `Localizable.strings` when present, or the
/// first group.
pub fn select_group<'a>(
    groups: &'a [LocalizationGroup],
    name: Option<&str>,
) -> Result<&'a LocalizationGroup, String> {
    match name {
        Some(name) => locedit::types::find_group(groups, name).map_err(|e| e.to_string()),
        None => groups
            .iter()
            .find(|g| g.name() == "Localizable.strings")
            .or_else(|| groups.first())
            .ok_or_else(|| "No localization groups found".to_string()),
    }
}

pub fn run_groups_command(provider: &Provider, dir: &Path) -> Result<(), String> {
    let groups = discover_groups(provider, dir)?;
    println!("Found {} group(s)", groups.len());

    for group in &groups {
        println!("\n=== {} ===", group.name());
        println!("Path: {}", group.path().display());
        for localization in group.localizations() {
            println!("  {}", localization.summary());
        }
    }
    Ok(())
}

/// Prints every group as pretty JSON.
pub fn run_dump_command(provider: &Provider, dir: &Path) -> Result<(), String> {
    let groups = discover_groups(provider, dir)?;
    let json = serde_json::to_string_pretty(&groups)
        .map_err(|e| format!("Error serializing groups: {}", e))?;
    println!("{}", json);
    Ok(())
}
