use std::fs;
use std::path::PathBuf;

use lexis_config::Config;
use serde::{Deserialize, Serialize};

const MAIN_PROFILE: &str = "main";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn profile_path(base: &Config, name: &str) -> PathBuf {
    base.store.profiles_dir().join(format!("{name}.json"))
}

fn read_profile(path: &PathBuf) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

/// Create the profiles folder and the main profile if missing
pub fn init_user_config(base: &Config) -> anyhow::Result<()> {
    fs::create_dir_all(base.store.profiles_dir())?;

    let main_profile = profile_path(base, MAIN_PROFILE);
    if !main_profile.exists() {
        let mut value = base.clone();
        value.generation.api_key.clear();

        let profile = Profile {
            name: MAIN_PROFILE.into(),
            value,
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a user profile by name, falling back to main and then to `base`
pub fn load_user_profile(base: &Config, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(base, name);
    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    if name != MAIN_PROFILE {
        tracing::warn!("Profile {name} not found, falling back to main profile");
    }

    let main_file = profile_path(base, MAIN_PROFILE);
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(base.clone())
    }
}
