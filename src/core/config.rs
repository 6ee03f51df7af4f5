//! Run settings: built-in defaults, an optional `uxrgen.yaml`, then CLI flags.
//!
//! ```yaml
//! generator: microxrceddsgen
//! registry_command: [ros2, pkg, prefix, --share]
//! output: build/uxr_generated
//! include:
//!   - /opt/ros/jazzy/share
//! replace: true
//! ```

use super::error::{Result, UxrError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_GENERATOR: &str = "microxrceddsgen";
pub const DEFAULT_OUTPUT_DIR: &str = "uxr_generated";
pub const DEFAULT_CONFIG_FILE: &str = "uxrgen.yaml";

/// `ros2 pkg prefix --share <package>` prints the share directory.
pub fn default_registry_command() -> Vec<String> {
    ["ros2", "pkg", "prefix", "--share"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: Option<String>,

    /// Package name is appended as the last argument
    #[serde(default)]
    pub registry_command: Option<Vec<String>>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub include: Vec<PathBuf>,

    #[serde(default)]
    pub replace: Option<bool>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    /// Appended after the config file's include list
    pub include: Vec<PathBuf>,
    pub no_replace: bool,
    pub generator: Option<String>,
    pub dry_run: bool,
    pub summary: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub message_file: PathBuf,
    pub output_dir: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub replace: bool,
    pub generator: String,
    pub registry_command: Vec<String>,
    pub dry_run: bool,
    pub summary_path: Option<PathBuf>,
}

impl Settings {
    /// Defaults only, output under `cwd`.
    pub fn new(message_file: PathBuf, cwd: &Path) -> Self {
        Self {
            message_file,
            output_dir: cwd.join(DEFAULT_OUTPUT_DIR),
            include_dirs: Vec::new(),
            replace: true,
            generator: DEFAULT_GENERATOR.to_string(),
            registry_command: default_registry_command(),
            dry_run: false,
            summary_path: None,
        }
    }

    /// Layer the config file and then the CLI overrides on top of the defaults.
    pub fn merge(
        message_file: PathBuf,
        file: ConfigFile,
        overrides: Overrides,
        cwd: &Path,
    ) -> Self {
        let mut settings = Self::new(message_file, cwd);

        if let Some(generator) = file.generator {
            settings.generator = generator;
        }
        if let Some(registry_command) = file.registry_command {
            settings.registry_command = registry_command;
        }
        if let Some(output) = file.output {
            settings.output_dir = cwd.join(output);
        }
        settings.include_dirs = file.include;
        if let Some(replace) = file.replace {
            settings.replace = replace;
        }

        if let Some(output) = overrides.output {
            settings.output_dir = output;
        }
        settings.include_dirs.extend(overrides.include);
        if overrides.no_replace {
            settings.replace = false;
        }
        if let Some(generator) = overrides.generator {
            settings.generator = generator;
        }
        settings.dry_run = overrides.dry_run;
        settings.summary_path = overrides.summary;

        settings
    }
}

/// Parse config YAML.
pub fn parse_config(yaml: &str) -> std::result::Result<ConfigFile, String> {
    // An empty file deserializes to unit, not a map
    if yaml.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Structural checks. Returns every problem found (empty = valid).
pub fn validate_config(config: &ConfigFile) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(generator) = &config.generator {
        if generator.trim().is_empty() {
            errors.push("generator must not be empty".to_string());
        }
    }
    if let Some(cmd) = &config.registry_command {
        if cmd.is_empty() || cmd[0].trim().is_empty() {
            errors.push("registry_command must name a program".to_string());
        }
    }
    if config.include.iter().any(|p| p.as_os_str().is_empty()) {
        errors.push("include entries must not be empty".to_string());
    }

    errors
}

/// Load and validate a config file from disk.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let config_err = |message: String| UxrError::Config {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| config_err(format!("cannot read: {}", e)))?;
    let config = parse_config(&content).map_err(config_err)?;

    let errors = validate_config(&config);
    if !errors.is_empty() {
        return Err(config_err(errors.join("; ")));
    }
    Ok(config)
}

/// Load the explicitly named config, or `uxrgen.yaml` in `cwd` if present.
/// Returns the path that was used, if any.
pub fn discover_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(ConfigFile, Option<PathBuf>)> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(UxrError::Config {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }
        return Ok((load_config_file(path)?, Some(path.to_path_buf())));
    }

    let implicit = cwd.join(DEFAULT_CONFIG_FILE);
    if implicit.is_file() {
        return Ok((load_config_file(&implicit)?, Some(implicit)));
    }
    Ok((ConfigFile::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let s = Settings::new(PathBuf::from("msgs.txt"), Path::new("/work"));
        assert_eq!(s.output_dir, PathBuf::from("/work/uxr_generated"));
        assert_eq!(s.generator, "microxrceddsgen");
        assert_eq!(s.registry_command, vec!["ros2", "pkg", "prefix", "--share"]);
        assert!(s.replace);
        assert!(s.include_dirs.is_empty());
        assert!(!s.dry_run);
        assert!(s.summary_path.is_none());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
generator: /opt/uxr/bin/microxrceddsgen
registry_command: [ros2, pkg, prefix, --share]
output: build/gen
include:
  - /opt/ros/jazzy/share
  - idl
replace: false
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(
            config.generator.as_deref(),
            Some("/opt/uxr/bin/microxrceddsgen")
        );
        assert_eq!(config.output, Some(PathBuf::from("build/gen")));
        assert_eq!(config.include.len(), 2);
        assert_eq!(config.replace, Some(false));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_config_parse_empty() {
        assert_eq!(parse_config("").unwrap(), ConfigFile::default());
        assert_eq!(parse_config("\n  \n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = parse_config("generatr: foo\n").unwrap_err();
        assert!(err.contains("YAML parse error"));
    }

    #[test]
    fn test_config_validate_errors() {
        let config = ConfigFile {
            generator: Some("  ".to_string()),
            registry_command: Some(vec![]),
            output: None,
            include: vec![PathBuf::new()],
            replace: None,
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_config_merge_precedence() {
        let file = ConfigFile {
            generator: Some("gen-from-file".to_string()),
            registry_command: Some(vec!["fake-registry".to_string()]),
            output: Some(PathBuf::from("from-file")),
            include: vec![PathBuf::from("/file/inc")],
            replace: Some(true),
        };
        let overrides = Overrides {
            output: Some(PathBuf::from("/cli/out")),
            include: vec![PathBuf::from("/cli/inc")],
            no_replace: true,
            generator: Some("gen-from-cli".to_string()),
            dry_run: true,
            summary: Some(PathBuf::from("run.json")),
        };
        let s = Settings::merge(PathBuf::from("m.txt"), file, overrides, Path::new("/work"));
        assert_eq!(s.output_dir, PathBuf::from("/cli/out"));
        assert_eq!(
            s.include_dirs,
            vec![PathBuf::from("/file/inc"), PathBuf::from("/cli/inc")]
        );
        assert!(!s.replace);
        assert_eq!(s.generator, "gen-from-cli");
        assert_eq!(s.registry_command, vec!["fake-registry"]);
        assert!(s.dry_run);
        assert_eq!(s.summary_path, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_config_merge_file_only() {
        let file = ConfigFile {
            output: Some(PathBuf::from("gen")),
            replace: Some(false),
            ..Default::default()
        };
        let s = Settings::merge(
            PathBuf::from("m.txt"),
            file,
            Overrides::default(),
            Path::new("/work"),
        );
        assert_eq!(s.output_dir, PathBuf::from("/work/gen"));
        assert!(!s.replace);
        assert_eq!(s.generator, DEFAULT_GENERATOR);
    }

    #[test]
    fn test_config_discover_implicit() {
        let dir = tempfile::tempdir().unwrap();
        let (config, used) = discover_config(None, dir.path()).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!(used.is_none());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "replace: false\n").unwrap();
        let (config, used) = discover_config(None, dir.path()).unwrap();
        assert_eq!(config.replace, Some(false));
        assert_eq!(used, Some(dir.path().join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn test_config_discover_explicit_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_config(Some(&dir.path().join("nope.yaml")), dir.path()).unwrap_err();
        assert!(matches!(err, UxrError::Config { .. }));
    }

    #[test]
    fn test_config_load_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uxrgen.yaml");
        std::fs::write(&path, "generator: \"\"\n").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("generator must not be empty"));
    }
}
