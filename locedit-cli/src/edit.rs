use locedit::{LocalizationGroup, Provider, types::find_group_mut};
use std::path::Path;

use crate::groups::discover_groups;

fn group_mut<'a>(
    groups: &'a mut [LocalizationGroup],
    name: &str,
) -> Result<&'a mut LocalizationGroup, String> {
    find_group_mut(groups, name).map_err(|e| e.to_string())
}

/// Sets `key` in one language. Without `--message` the existing message is
/// kept.
pub fn run_set_command(
    provider: &Provider,
    dir: &Path,
    group: &str,
    lang: &str,
    key: &str,
    value: &str,
    message: Option<String>,
) -> Result<(), String> {
    let mut groups = discover_groups(provider, dir)?;
    let localization = group_mut(&mut groups, group)?
        .localization_mut(lang)
        .map_err(|e| e.to_string())?;

    let existing = localization.entry(key);
    let message = message.or_else(|| existing.and_then(|e| e.message()).map(str::to_string));
    if existing.is_some_and(|e| e.value() == value && e.message() == message.as_deref()) {
        println!("ℹ️  '{}' in {} already has this value; nothing to do", key, lang);
        return Ok(());
    }
    let verb = if existing.is_some() { "Updated" } else { "Added" };
    tracing::debug!("setting {} in {}", key, localization.path().display());

    localization.update(key, value, message);
    provider
        .save(localization)
        .map_err(|e| format!("Error writing {}: {}", localization.path().display(), e))?;
    println!("✅ {} '{}' in {}", verb, key, lang);
    println!("📄 Updated {} in place", localization.path().display());
    Ok(())
}

/// Adds `key` with an empty value to every language of the group.
pub fn run_add_command(
    provider: &Provider,
    dir: &Path,
    group: &str,
    key: &str,
    message: Option<String>,
) -> Result<(), String> {
    let mut groups = discover_groups(provider, dir)?;
    let group = group_mut(&mut groups, group)?;

    for localization in group.localizations_mut() {
        if localization.contains_key(key) {
            println!(
                "ℹ️  '{}' already exists in {}; its value is cleared",
                key,
                localization.language()
            );
        }
        tracing::debug!("adding {} to {}", key, localization.path().display());
        localization.add(key, message.clone());
        provider
            .save(localization)
            .map_err(|e| format!("Error writing {}: {}", localization.path().display(), e))?;
        println!("✅ Added '{}' to {}", key, localization.language());
    }
    Ok(())
}

/// Removes `key` from every language of the group.
pub fn run_delete_command(
    provider: &Provider,
    dir: &Path,
    group: &str,
    key: &str,
) -> Result<(), String> {
    let mut groups = discover_groups(provider, dir)?;
    let group = group_mut(&mut groups, group)?;

    let mut removed = 0usize;
    for localization in group.localizations_mut() {
        tracing::debug!("removing {} from {}", key, localization.path().display());
        if localization.remove(key).is_none() {
            println!(
                "ℹ️  Key '{}' not found in {}; nothing to remove",
                key,
                localization.language()
            );
            continue;
        }
        provider
            .save(localization)
            .map_err(|e| format!("Error writing {}: {}", localization.path().display(), e))?;
        removed += 1;
        println!("✅ Removed '{}' from {}", key, localization.language());
    }

    if removed == 0 {
        return Err(format!("Key '{}' not found in {}", key, group.name()));
    }
    Ok(())
}
