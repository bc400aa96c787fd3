use std::{fs, path::Path};

use itertools::Itertools;
use serde::Deserialize;

use crate::{core::settings::EntrySettings, prelude::*};

/// Configured entries, one refresher each.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntryConfig {
    pub id: String,

    #[serde(flatten)]
    pub settings: EntrySettings,
}

impl Config {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid configuration in `{}`", path.display()))?;
        info!(n_entries = config.entries.len(), "loaded");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if let Some(id) = config.entries.iter().map(|entry| &entry.id).duplicates().next() {
            bail!("entry `{id}` is configured more than once");
        }
        let plans = config.entries.iter().map(|entry| entry.settings.plan());
        if let Some(plan) = plans.duplicates().next() {
            bail!("plan `{}` is configured more than once", plan.id());
        }
        for entry in &config.entries {
            entry.settings.validate().with_context(|| format!("invalid entry `{}`", entry.id))?;
        }
        Ok(config)
    }
}
