use crate::error::ConfigError;
use crate::settings::EnvSettings;
use config::Environment;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, Settings, DEFAULT_PORT};

/// Loads the application settings from the process environment.
///
/// `PORT` defaults to 8080. Every `POSTGRES_*` variable is required; a
/// missing or blank one is an error the caller should treat as fatal.
/// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_from(Environment::default())
}

/// Same as [`load_settings`], reading from the given variables instead of the
/// process environment. Keys use their environment spelling (`POSTGRES_HOST`).
pub fn load_settings_from<I, K, V>(vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map: config::Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    load_from(Environment::default().source(Some(map)))
}

fn load_from(environment: Environment) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("port", i64::from(DEFAULT_PORT))?
        .add_source(environment)
        .build()?;

    let env = builder.try_deserialize::<EnvSettings>()?;

    let blank = env.blank_fields();
    if !blank.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "required variables are empty: {}",
            blank.join(", ")
        )));
    }

    let settings = Settings::from(env);
    tracing::debug!(?settings, "Loaded settings.");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            ("POSTGRES_USER", "f1"),
            ("POSTGRES_PASSWORD", "s3cr@t/pw"),
            ("POSTGRES_HOST", "db.internal"),
            ("POSTGRES_PORT", "5433"),
            ("POSTGRES_DB", "formula1"),
        ]
    }

    #[test]
    fn port_defaults_to_8080() {
        let settings = load_settings_from(complete()).unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(
            settings.database,
            DatabaseSettings {
                user: "f1".to_string(),
                password: "s3cr@t/pw".to_string(),
                host: "db.internal".to_string(),
                port: 5433,
                name: "formula1".to_string(),
            }
        );
    }

    #[test]
    fn port_is_read_from_the_environment() {
        let mut vars = complete();
        vars.push(("PORT", "9090"));

        assert_eq!(load_settings_from(vars).unwrap().port, 9090);
    }

    #[test]
    fn missing_database_variable_is_an_error() {
        let vars: Vec<_> = complete()
            .into_iter()
            .filter(|(k, _)| *k != "POSTGRES_HOST")
            .collect();

        assert!(matches!(
            load_settings_from(vars),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn blank_database_variable_is_an_error() {
        let mut vars = complete();
        vars.retain(|(k, _)| *k != "POSTGRES_DB");
        vars.push(("POSTGRES_DB", "  "));

        let err = load_settings_from(vars).unwrap_err();
        assert!(matches!(&err, ConfigError::ValidationError(msg) if msg.contains("POSTGRES_DB")));
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        let mut vars = complete();
        vars.push(("PORT", "eighty"));

        assert!(load_settings_from(vars).is_err());
    }

    #[test]
    fn debug_output_hides_the_password() {
        let settings = load_settings_from(complete()).unwrap();
        let printed = format!("{settings:?}");

        assert!(!printed.contains("s3cr@t/pw"));
        assert!(printed.contains("<redacted>"));
    }
}
