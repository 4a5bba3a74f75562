use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
pub mod models;
pub use models::*;

/// Prefix for configuration environment variables (`PLAYON__API__BASE_URL`).
pub const ENV_PREFIX: &str = "PLAYON";

/// Separator between prefix and nested keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. `<config dir>/default.{toml,json,yaml}` (optional)
/// 2. `<config dir>/<RUN_ENV>.{toml,json,yaml}` (optional, `RUN_ENV` defaults to "debug")
/// 3. `PLAYON__*` environment variables
///
/// The config dir is `PLAYON_CONFIG_DIR` or `./config`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("PLAYON_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Loads configuration from an explicit directory. Environment overrides still apply.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    tracing::debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&path_str(&default_path)?).required(false))
        .add_source(File::with_name(&path_str(&env_path)?).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&app_config)?;
    Ok(app_config)
}

fn path_str(path: &Path) -> Result<String, ConfigError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::Message(format!("non UTF-8 config path: {}", path.display())))
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let schedule = &config.schedule;
    if schedule.default_open_hour >= schedule.default_close_hour || schedule.default_close_hour > 24 {
        return Err(ConfigError::Message(format!(
            "schedule.default_open_hour ({}) must be before schedule.default_close_hour ({}) and close must be at most 24",
            schedule.default_open_hour, schedule.default_close_hour
        )));
    }
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::Message("api.base_url must not be empty".to_string()));
    }
    Ok(())
}

/// Converts a dotted config path to its environment variable name.
///
/// `api.base_url` becomes `PLAYON__API__BASE_URL`.
pub fn config_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', ENV_SEPARATOR);
    format!("{}{}{}", ENV_PREFIX, ENV_SEPARATOR, path).to_uppercase()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, `.env` otherwise. Loading happens at
/// most once per process; a missing file is not an error. Returns the path
/// that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
