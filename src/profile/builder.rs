use ::config::{Config, ConfigError, File};
use std::path::PathBuf;

use super::{config, Profile};
use crate::constants::{DEFAULT_HASH_TYPE, DEFAULT_PARAMETER_SIZES};
use crate::crypto::{Error, HashType, ParameterSizes};
use crate::data::PrivateKey;

/// Assembles a [`Profile`] from an optional TOML config file and explicit
/// settings. Explicit settings win over the file.
#[derive(Default)]
pub struct Builder {
    cfg_file: Option<String>,
    hash_type: Option<HashType>,
    parameter_sizes: Option<ParameterSizes>,
    private_key: Option<PrivateKey>,
    private_keyfile: Option<PathBuf>,
    public_keyfile: Option<PathBuf>,
}

impl Builder {
    /// Create a blank Builder.
    pub fn new() -> Self {
        Builder::default()
    }

    pub fn config_file(mut self, cfg_file: String) -> Self {
        self.cfg_file = Some(cfg_file);
        self
    }

    pub fn hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = Some(hash_type);
        self
    }

    pub fn parameter_sizes(mut self, parameter_sizes: ParameterSizes) -> Self {
        self.parameter_sizes = Some(parameter_sizes);
        self
    }

    /// Use this key instead of loading or generating one.
    pub fn private_key(mut self, private_key: PrivateKey) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn private_key_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.private_keyfile = Some(path.into());
        self
    }

    pub fn public_key_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.public_keyfile = Some(path.into());
        self
    }

    /// Build a Profile.
    ///
    /// If a private key file is configured it is loaded, or created with a
    /// new key of the configured strength class when it does not exist yet.
    /// Without a key file the profile gets an ephemeral key.
    pub fn build(self) -> Result<Profile, Error> {
        let settings = Config::builder()
            .set_default(config::HASH_TYPE, DEFAULT_HASH_TYPE)?
            .set_default(config::PARAMETER_SIZES, DEFAULT_PARAMETER_SIZES)?
            .add_source(
                self.cfg_file
                    .as_deref()
                    .map(File::with_name)
                    .into_iter()
                    .collect::<Vec<_>>(),
            )
            .build()?;

        let hash_type = match self.hash_type {
            Some(hash_type) => hash_type,
            None => settings.get_string(config::HASH_TYPE)?.parse()?,
        };
        let parameter_sizes = match self.parameter_sizes {
            Some(sizes) => sizes,
            None => settings.get_string(config::PARAMETER_SIZES)?.parse()?,
        };
        let private_keyfile =
            path_setting(self.private_keyfile, &settings, config::PRIVATE_KEYFILE)?;
        let public_keyfile = path_setting(self.public_keyfile, &settings, config::PUBLIC_KEYFILE)?;

        let private_key = match (self.private_key, private_keyfile) {
            (Some(private_key), _) => private_key,
            (None, Some(keyfile)) => {
                // Check if the keyfile exists
                if keyfile.exists() {
                    PrivateKey::load(&keyfile)?
                } else {
                    // We have a keyfile that doesn't exist, so create it
                    info!("Writing new {} private key to {}", parameter_sizes, keyfile.display());
                    let private_key = PrivateKey::generate(parameter_sizes)?;
                    private_key.store(&keyfile)?;
                    private_key
                }
            }
            (None, None) => {
                warn!(
                    "Config option {} not set, creating ephemeral {} key",
                    config::PRIVATE_KEYFILE,
                    parameter_sizes
                );
                PrivateKey::generate(parameter_sizes)?
            }
        };
        let public_key = private_key.public_key();

        if let Some(keyfile) = public_keyfile {
            if !keyfile.exists() {
                info!("Writing public key to {}", keyfile.display());
                public_key.store(&keyfile)?;
            }
        }

        Ok(Profile {
            hash_type,
            parameter_sizes,
            private_key,
            public_key,
        })
    }
}

/// An explicit path, else the config value, else nothing.
fn path_setting(
    explicit: Option<PathBuf>,
    settings: &Config,
    key: &str,
) -> Result<Option<PathBuf>, Error> {
    if explicit.is_some() {
        return Ok(explicit);
    }
    match settings.get_string(key) {
        Ok(path) => Ok(Some(PathBuf::from(path))),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
