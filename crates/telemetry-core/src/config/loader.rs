//! Multi-file configuration loading.

use std::path::Path;

use tracing::debug;

use crate::config::{ConfigPath, StackInput, interpolate, is_yaml_file};
use crate::error::ConfigError;

/// Load and layer stack input from files and directories, in order.
///
/// Errors from every source are collected before failing so a broken
/// deployment config is reported in one go.
pub fn load_from_paths(paths: &[ConfigPath]) -> Result<StackInput, ConfigError> {
    let mut input = StackInput::default();
    let mut errors = Vec::new();

    for path in paths {
        let loaded = match path {
            ConfigPath::File(file_path) => load_file(file_path),
            ConfigPath::Dir(dir_path) => load_dir(dir_path),
        };
        match loaded {
            Ok(partial) => input.merge_from(partial),
            Err(e) => errors.push(format!("{}: {}", path.path().display(), e)),
        }
    }

    if !errors.is_empty() {
        return Err(ConfigError::MultipleErrors { errors });
    }
    Ok(input)
}

fn load_file(path: &Path) -> Result<StackInput, ConfigError> {
    if !is_yaml_file(path) {
        return Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let contents =
        std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile { source })?;

    let result = interpolate(&contents);
    if !result.is_ok() {
        return Err(ConfigError::EnvInterpolation {
            message: result.errors.join("\n"),
        });
    }

    debug!(path = %path.display(), "Loaded config file");
    StackInput::parse_yaml(&result.text)
}

fn load_dir(dir: &Path) -> Result<StackInput, ConfigError> {
    let mut input = StackInput::default();
    let mut errors = Vec::new();

    let mut files: Vec<_> = std::fs::read_dir(dir)
        .map_err(|source| ConfigError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_yaml_file(path))
        .collect();

    files.sort();

    for path in files {
        match load_file(&path) {
            Ok(partial) => input.merge_from(partial),
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if !errors.is_empty() {
        return Err(ConfigError::MultipleErrors { errors });
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_later_file_overrides_earlier() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.yaml");
        let prod = dir.path().join("prod.yaml");
        fs::write(&base, "project_name: acme\nenvironment: dev\n").unwrap();
        fs::write(&prod, "environment: prod\n").unwrap();

        let input = load_from_paths(&[ConfigPath::file(&base), ConfigPath::file(&prod)]).unwrap();
        assert_eq!(input.environment.as_deref(), Some("prod"));
        assert_eq!(input.project_name.as_deref(), Some("acme"));
    }

    #[test]
    fn test_dir_loads_yaml_in_path_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("10-base.yaml"), "project_name: acme\nregion: us-west-2\n")
            .unwrap();
        fs::write(dir.path().join("20-region.yml"), "region: eu-central-1\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "region: ignored").unwrap();

        let input = load_from_paths(&[ConfigPath::dir(dir.path())]).unwrap();
        assert_eq!(input.region.as_deref(), Some("eu-central-1"));
    }

    #[test]
    fn test_errors_are_collected() {
        let dir = TempDir::new().unwrap();
        let toml = dir.path().join("stack.toml");
        let broken = dir.path().join("broken.yaml");
        fs::write(&toml, "project_name = 'acme'").unwrap();
        fs::write(&broken, "project_name: [unterminated").unwrap();

        let err = load_from_paths(&[ConfigPath::file(&toml), ConfigPath::file(&broken)])
            .unwrap_err();
        match err {
            ConfigError::MultipleErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("only .yaml/.yml supported"));
                assert!(errors[1].contains("Failed to parse YAML"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_dir() {
        let err = load_from_paths(&[ConfigPath::dir("/nonexistent/telemetry-stack")]).unwrap_err();
        assert!(matches!(err, ConfigError::MultipleErrors { .. }));
    }
}
