use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub content_dir: PathBuf,
    pub template: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_path: String,
    pub log_level: String,
    pub markers: Markers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("public"),
            base_path: "/".to_string(),
            log_level: "info".to_string(),
            markers: Markers::default(),
        }
    }
}

/// Placeholders substituted in the page template.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Markers {
    pub title: String,
    pub content: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            title: "{{ Title }}".to_string(),
            content: "{{ Content }}".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled into the binary. `build.rs` checks the file
    /// parses, so falling back to [`Config::default`] never happens in practice.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::try_load(path)?.unwrap_or_else(Self::compiled_default))
    }

    /// Like [`Config::load`], but `None` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve relative paths against `root`, typically the config file's directory.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        for path in [
            &mut self.content_dir,
            &mut self.template,
            &mut self.static_dir,
            &mut self.output_dir,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_file_matches_defaults() {
        let bundled: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(bundled, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config =
            Config::from_toml("base_path = \"/blog/\"\n[markers]\ntitle = \"%TITLE%\"").unwrap();
        assert_eq!(config.base_path, "/blog/");
        assert_eq!(config.markers.title, "%TITLE%");
        assert_eq!(config.markers.content, "{{ Content }}");
        assert_eq!(config.output_dir, PathBuf::from("public"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("base_path = ").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = Path::new("definitely/not/here/site.toml");
        assert_eq!(Config::try_load(path).unwrap(), None);
        assert_eq!(Config::load(path).unwrap(), Config::default());
    }

    #[test]
    fn relative_paths_are_rooted() {
        let config = Config {
            template: PathBuf::from("/abs/template.html"),
            ..Config::default()
        }
        .rooted_at(Path::new("site"));
        assert_eq!(config.content_dir, PathBuf::from("site/content"));
        assert_eq!(config.template, PathBuf::from("/abs/template.html"));
    }
}
