use crate::error::{CropwiseError, Result};
use crate::models::{CropProfile, CropProfileTable, CropType};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    pub location: LocationConfig,
    #[serde(default)]
    pub openmeteo: OpenMeteoConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    /// Per-crop profile overrides, validated at load time
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub crops: BTreeMap<CropType, CropProfile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    /// Crop used when `advise` is run without `--crop`
    pub crop: CropType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "auto".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenMeteoConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".into()
}

fn default_enabled() -> bool {
    true
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Daily rows retained in the history table
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    /// Age after which cached weather is refetched
    #[serde(default = "default_cache_minutes")]
    pub cache_minutes: u32,
}

fn default_max_days() -> u32 {
    30
}

fn default_cache_minutes() -> u32 {
    30
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            cache_minutes: default_cache_minutes(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropwiseError::Config(format!(
                "Config file not found at {:?}. Run `cropwise init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropwiseError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml_str(&config_str)
    }

    /// Parse a config document, substituting `${VAR}` references and
    /// validating crop overrides.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(CropwiseError::Config(format!(
                "latitude {} out of range",
                self.location.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(CropwiseError::Config(format!(
                "longitude {} out of range",
                self.location.longitude
            )));
        }
        if self.history.max_days == 0 {
            return Err(CropwiseError::Config(
                "history.max_days must be at least 1".into(),
            ));
        }

        // Surfaces InvalidProfile for bad overrides
        self.profile_table()?;
        Ok(())
    }

    /// Built-in profiles with this config's overrides applied
    pub fn profile_table(&self) -> Result<CropProfileTable> {
        CropProfileTable::builtin().with_overrides(&self.crops)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/cropwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropwiseError::Config("Cannot determine config directory".into()))?
            .join("cropwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up Cropwise!");
        println!();

        println!("Farm");
        let farm_name: String = Input::new()
            .with_prompt("  Farm name")
            .default("My Farm".into())
            .interact_text()
            .map_err(input_error)?;

        let crop_names: Vec<&str> = CropType::ALL.iter().map(|c| c.display_name()).collect();
        let crop_idx = Select::new()
            .with_prompt("  Main crop")
            .items(&crop_names)
            .default(0)
            .interact()
            .map_err(input_error)?;
        let crop = CropType::ALL[crop_idx];

        println!();

        println!("Location");
        let latitude: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(28.61)
            .interact_text()
            .map_err(input_error)?;

        let longitude: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(77.21)
            .interact_text()
            .map_err(input_error)?;

        println!();

        let config = Config {
            farm: FarmConfig {
                name: farm_name,
                crop,
            },
            location: LocationConfig {
                latitude,
                longitude,
                timezone: default_timezone(),
            },
            openmeteo: OpenMeteoConfig::default(),
            history: HistoryConfig::default(),
            crops: BTreeMap::new(),
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CropwiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Cropwise Configuration\n# Generated by `cropwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CropwiseError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("CROPWISE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropwiseError::Config("Cannot determine data directory".into()))?
            .join("cropwise");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("cropwise.db"))
    }
}

fn input_error(e: dialoguer::Error) -> CropwiseError {
    CropwiseError::Config(format!("Input error: {}", e))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "My Farm".into(),
                crop: CropType::Wheat,
            },
            location: LocationConfig {
                latitude: 28.61,
                longitude: 77.21,
                timezone: default_timezone(),
            },
            openmeteo: OpenMeteoConfig::default(),
            history: HistoryConfig::default(),
            crops: BTreeMap::new(),
        }
    }
}
