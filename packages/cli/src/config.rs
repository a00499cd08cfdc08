//! CLI Configuration
//!
//! Deployment parameters read once from the environment at startup and
//! passed by reference to every command. Missing required values are fatal
//! before any remote call is made.

use anyhow::{bail, Result};

const PROJECT_ID: &str = "BREVITY_PROJECT_ID";
const LOCATION: &str = "BREVITY_LOCATION";
const STAGING_BUCKET: &str = "BREVITY_STAGING_BUCKET";
const AGENT_PACKAGE: &str = "BREVITY_AGENT_PACKAGE";
const DISPLAY_NAME: &str = "BREVITY_DISPLAY_NAME";
const DESCRIPTION: &str = "BREVITY_DESCRIPTION";
const REQUIREMENTS: &str = "BREVITY_REQUIREMENTS";
const API_URL: &str = "BREVITY_API_URL";

const DEFAULT_REQUIREMENTS: &str = "brevity-agent";

#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub location: String,
    pub staging_bucket: String,
    pub agent_package: String,
    pub display_name: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub api_url: String,
}

impl Config {
    /// Load config from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through a lookup function. All missing required values
    /// are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name).filter(|v| !v.trim().is_empty()).ok_or(name)
        };

        let mut missing = Vec::new();
        let mut take = |name: &'static str| match required(name) {
            Ok(value) => value,
            Err(name) => {
                missing.push(name);
                String::new()
            }
        };

        let project_id = take(PROJECT_ID);
        let location = take(LOCATION);
        let staging_bucket = take(STAGING_BUCKET);
        let agent_package = take(AGENT_PACKAGE);
        let display_name = take(DISPLAY_NAME);

        if !missing.is_empty() {
            bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let description = lookup(DESCRIPTION).unwrap_or_default();
        let requirements = parse_requirements(
            &lookup(REQUIREMENTS).unwrap_or_else(|| DEFAULT_REQUIREMENTS.to_string()),
        );
        let api_url = lookup(API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format!("https://{}.agentengine.dev", location));

        Ok(Self {
            project_id,
            location,
            staging_bucket,
            agent_package,
            display_name,
            description,
            requirements,
            api_url,
        })
    }
}

/// Parse the comma-separated requirements list, trimming each entry.
fn parse_requirements(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (PROJECT_ID, "demo-project"),
            (LOCATION, "eu-west4"),
            (STAGING_BUCKET, "gs://brevity-staging"),
            (AGENT_PACKAGE, "./brevity_agent"),
            (DISPLAY_NAME, "Brevity Bot"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_loads_full_config() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.project_id, "demo-project");
        assert_eq!(config.display_name, "Brevity Bot");
        assert_eq!(config.description, "");
        assert_eq!(config.requirements, vec!["brevity-agent"]);
        assert_eq!(config.api_url, "https://eu-west4.agentengine.dev");
    }

    #[test]
    fn test_reports_all_missing_variables_at_once() {
        let mut env = full_env();
        env.remove(PROJECT_ID);
        env.remove(DISPLAY_NAME);

        let err = load(&env).unwrap_err().to_string();
        assert!(err.contains(PROJECT_ID));
        assert!(err.contains(DISPLAY_NAME));
        assert!(!err.contains(LOCATION));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(STAGING_BUCKET, "   ");
        let err = load(&env).unwrap_err().to_string();
        assert!(err.contains(STAGING_BUCKET));
    }

    #[test]
    fn test_requirements_are_split_and_trimmed() {
        let mut env = full_env();
        env.insert(REQUIREMENTS, "brevity-agent , extra-lib,, another ");
        let config = load(&env).unwrap();
        assert_eq!(
            config.requirements,
            vec!["brevity-agent", "extra-lib", "another"]
        );
    }

    #[test]
    fn test_api_url_override() {
        let mut env = full_env();
        env.insert(API_URL, "http://localhost:9090");
        let config = load(&env).unwrap();
        assert_eq!(config.api_url, "http://localhost:9090");
    }
}
