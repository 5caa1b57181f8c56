//! Configuration sources and command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;

/// A configuration source - either a single file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigPath {
    /// A single configuration file.
    File(PathBuf),
    /// A directory whose YAML files are loaded in path order.
    Dir(PathBuf),
}

impl ConfigPath {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::Dir(path.into())
    }

    /// Files first, then directories, each group in the order given.
    pub fn from_cli_args(config_files: &[PathBuf], config_dirs: &[PathBuf]) -> Vec<Self> {
        config_files
            .iter()
            .map(ConfigPath::file)
            .chain(config_dirs.iter().map(ConfigPath::dir))
            .collect()
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Dir(path) => path,
        }
    }
}

/// Check if a path has a YAML extension.
pub fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

#[derive(Parser, Debug)]
#[command(version, about = "Render the telemetry pipeline as a Terraform JSON document")]
pub struct CliArgs {
    /// Path to stack configuration file (can be specified multiple times, later files win)
    #[arg(short, long)]
    pub config: Vec<PathBuf>,

    /// Path to configuration directory (can be specified multiple times)
    #[arg(short = 'C', long = "config-dir")]
    pub config_dirs: Vec<PathBuf>,

    /// Write the rendered document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only resolve and validate the stack; write nothing
    #[arg(long, conflicts_with = "graph")]
    pub check: bool,

    /// Print resource dependency edges instead of the document
    #[arg(long)]
    pub graph: bool,
}

impl CliArgs {
    /// Convert CLI arguments to configuration paths.
    pub fn config_paths(&self) -> Vec<ConfigPath> {
        ConfigPath::from_cli_args(&self.config, &self.config_dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yaml_file() {
        assert!(is_yaml_file(Path::new("stack.yaml")));
        assert!(is_yaml_file(Path::new("prod.yml")));
        assert!(!is_yaml_file(Path::new("stack.toml")));
        assert!(!is_yaml_file(Path::new("README")));
    }

    #[test]
    fn test_files_come_before_dirs() {
        let paths = ConfigPath::from_cli_args(
            &[PathBuf::from("base.yaml"), PathBuf::from("prod.yaml")],
            &[PathBuf::from("overrides")],
        );
        assert_eq!(
            paths,
            vec![
                ConfigPath::file("base.yaml"),
                ConfigPath::file("prod.yaml"),
                ConfigPath::dir("overrides"),
            ]
        );
    }

    #[test]
    fn test_cli_parsing() {
        let args = CliArgs::parse_from([
            "telemetry-stack",
            "-c",
            "stack.yaml",
            "-C",
            "conf.d",
            "--output",
            "main.tf.json",
        ]);
        assert_eq!(args.config_paths().len(), 2);
        assert_eq!(args.output, Some(PathBuf::from("main.tf.json")));
        assert!(!args.check);
        assert!(!args.graph);
    }

    #[test]
    fn test_check_conflicts_with_graph() {
        let result = CliArgs::try_parse_from(["telemetry-stack", "-c", "a.yaml", "--check", "--graph"]);
        assert!(result.is_err());
    }
}
