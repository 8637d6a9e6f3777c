use crate::errors::Result;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Configuration for a migration run.
///
/// The built-in defaults target the yetuga Flutter app; a YAML file can
/// override any field for other projects. All paths are relative to the
/// project root.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct MigrateConfig {
    /// Files processed first, in listed order. Entries that do not exist on
    /// disk are silently skipped.
    pub priority_files: Vec<String>,
    /// The directory scanned recursively for remaining source files.
    pub source_root: String,
    /// The file extension (without dot) that marks a source file.
    pub extension: String,
    /// The logging module's own file, excluded from processing.
    pub logger_file: String,
    /// The import line inserted into files that do not already carry it.
    pub logger_import: String,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            priority_files: vec![
                "lib/screens/onboarding/onboarding_screen.dart".to_string(),
                "lib/screens/onboarding/steps/display_name_step.dart".to_string(),
                "lib/services/firebase_service.dart".to_string(),
                "lib/main.dart".to_string(),
                "lib/models/onboarding_data.dart".to_string(),
                "lib/providers/auth_provider.dart".to_string(),
                "lib/providers/onboarding_provider.dart".to_string(),
                "lib/screens/auth/auth_screen.dart".to_string(),
                "lib/screens/auth/email_signin_screen.dart".to_string(),
                "lib/services/storage_service.dart".to_string(),
            ],
            source_root: "lib".to_string(),
            extension: "dart".to_string(),
            logger_file: "lib/utils/logger.dart".to_string(),
            logger_import: "import 'package:yetuga/utils/logger.dart';".to_string(),
        }
    }
}

/// A utility for locating and loading migration configurations.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the configuration file by searching in a prioritized list of
    /// locations: the path as given (absolute or relative to the current
    /// directory), then relative to the project root.
    pub fn find_config(config_path: &Path, root: &Path) -> Result<PathBuf> {
        if config_path.is_absolute() && config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        let in_root = root.join(config_path);
        if in_root.exists() {
            return Ok(in_root);
        }

        let mut tried_locations = vec![
            config_path.display().to_string(),
            in_root.display().to_string(),
        ];
        if let Ok(cwd) = env::current_dir() {
            tried_locations[0] = cwd.join(config_path).display().to_string();
        }

        Err(format!(
            "Config file '{}' not found. Searched in:\n  - {}",
            config_path.display(),
            tried_locations.join("\n  - ")
        )
        .into())
    }

    /// Loads a `MigrateConfig` from a YAML file.
    pub fn load(path: &Path) -> Result<MigrateConfig> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_built_in_defaults() {
        let config = MigrateConfig::default();
        assert_eq!(config.priority_files.len(), 10);
        assert_eq!(config.priority_files[0], "lib/screens/onboarding/onboarding_screen.dart");
        assert_eq!(config.source_root, "lib");
        assert_eq!(config.extension, "dart");
        assert_eq!(config.logger_file, "lib/utils/logger.dart");
        assert_eq!(
            config.logger_import,
            "import 'package:yetuga/utils/logger.dart';"
        );
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("migrate.yaml");
        fs::write(
            &config_path,
            "source_root: src\nextension: dart\nlogger_import: \"import 'package:app/log.dart';\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&config_path).unwrap();
        assert_eq!(config.source_root, "src");
        assert_eq!(config.logger_import, "import 'package:app/log.dart';");
        // Unset fields keep their defaults.
        assert_eq!(config.priority_files.len(), 10);
    }

    #[test]
    fn test_find_config_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("migrate.yaml");
        fs::write(&config_path, "extension: dart\n").unwrap();

        let found =
            ConfigLoader::find_config(Path::new("migrate.yaml"), temp_dir.path()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_missing_reports_locations() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigLoader::find_config(Path::new("nope.yaml"), temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
