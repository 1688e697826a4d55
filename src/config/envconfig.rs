use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Environment-backed configuration loader. Variables are read as
/// `KORSVAGEN_<SECTION>__<FIELD>`, e.g. `KORSVAGEN_AUTH__JWT_SECRET` or
/// `KORSVAGEN_SERVER__PORT`.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "KORSVAGEN";
    const SEPARATOR: &'static str = "__";

    /// Loads `.env` next to Cargo.toml, then from the working directory.
    /// A missing file is not an error; deployments set real env vars.
    fn load_dotenv() {
        let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        if dotenvy::from_filename(&manifest_env).is_err() {
            let _ = dotenvy::dotenv();
        }
    }

    /// Cross-field checks that serde cannot express. Runs after
    /// deserialization; the default accepts everything.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let source = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true);

        let cfg = config_rs::Config::builder()
            .add_source(source)
            .build()
            .context("reading KORSVAGEN_* environment variables")?
            .try_deserialize::<Self>()
            .context("environment is missing or has malformed config values")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
