#[cfg(feature = "std")]
use crate::modes::InputMethod;

/// Runtime switches read by the engine on every key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct Options {
    /// Tone and modifier keys may change letters behind the cursor.
    pub free_marking: bool,
    /// Word-final `oa`, `oe`, `uy` take the tone on the second letter
    /// (`hoá`, `tuý`) instead of the first (`hóa`, `túy`).
    pub modern_style: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            free_marking: true,
            modern_style: true,
        }
    }
}

/// Persistent engine configuration.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_method: InputMethod,
    #[serde(flatten)]
    pub options: Options,
}

#[cfg(feature = "std")]
impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn build_engine(&self) -> crate::ViEngine {
        crate::ViEngine::with_options(self.input_method, self.options)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = Config::from_toml_str("input_method = \"vni\"\n").unwrap();
        assert_eq!(config.input_method, InputMethod::Vni);
        assert_eq!(config.options, Options::default());

        let empty = Config::from_toml_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn flattened_options() {
        let config =
            Config::from_toml_str("input_method = \"viqr\"\nmodern_style = false\n").unwrap();
        assert!(!config.options.modern_style);
        assert!(config.options.free_marking);

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("input_method = \"viqr\""));
        assert!(text.contains("modern_style = false"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unknown_method() {
        let err = Config::from_toml_str("input_method = \"dvorak\"\n").unwrap_err();
        assert!(matches!(err, crate::Error::ConfigParse(_)));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("vitype-config-{}.toml", std::process::id()));
        let config = Config {
            input_method: InputMethod::Telex,
            options: Options {
                free_marking: false,
                modern_style: true,
            },
        };
        config.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);

        let engine = loaded.build_engine();
        assert!(!engine.options().free_marking);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load_toml("/nonexistent/vitype.toml").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
