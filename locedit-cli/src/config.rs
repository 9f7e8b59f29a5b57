use locedit::ProviderConfig;
use std::{fs, path::Path};

/// Loads a [`ProviderConfig`] from a TOML file, or the defaults when no file
/// is given.
///
/// ```toml
/// ignored_directories = ["Pods", "Carthage", "build", ".framework", "DerivedData"]
/// recognized_extensions = ["strings"]
/// language_folder_suffix = ".lproj"
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ProviderConfig, String> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            parse_config(&text).map_err(|e| format!("Invalid config {}: {}", path.display(), e))?
        }
        None => ProviderConfig::default(),
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_config(text: &str) -> Result<ProviderConfig, toml::de::Error> {
    toml::from_str(text)
}
