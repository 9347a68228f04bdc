//! Optional per-player agent profiles.
//!
//! Profiles are YAML documents fetched after the leaderboard is on screen.
//! Which document belongs to which player is decided only by the
//! [`ResourceResolver`] map loaded from configuration. Prompt text is kept
//! verbatim; it is never turned into markup here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

static RESOURCE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*\.ya?ml$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentError {
    /// No resource is configured for the player.
    Unresolved(String),
    /// The configured resource is not a plain YAML file name.
    InvalidResource { player: String, resource: String },
    Fetch { player: String, reason: String },
    Malformed(String),
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentError::Unresolved(player) => {
                write!(f, "No profile configured for {}", player)
            }
            EnrichmentError::InvalidResource { player, resource } => {
                write!(f, "Rejected profile resource '{}' for {}", resource, player)
            }
            EnrichmentError::Fetch { player, reason } => {
                write!(f, "Could not fetch profile for {}: {}", player, reason)
            }
            EnrichmentError::Malformed(reason) => write!(f, "Malformed profile: {}", reason),
        }
    }
}

impl std::error::Error for EnrichmentError {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentProfile {
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentConfig {
    pub model: ModelConfig,
    #[serde(default)]
    pub prompts: Prompts,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    pub provider: String,
    pub name: String,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

/// Scalar model parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Prompts {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub step_wise_prompt: Option<String>,
}

pub fn parse_profile(text: &str) -> Result<AgentProfile, EnrichmentError> {
    serde_yaml::from_str(text).map_err(|e| EnrichmentError::Malformed(e.to_string()))
}

/// Player name to profile resource map, e.g.
/// `{ "base_path": "players", "players": { "alice": "alice_gpt.yaml" } }`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResourceResolver {
    #[serde(default)]
    base_path: String,
    #[serde(default)]
    players: HashMap<String, String>,
}

impl ResourceResolver {
    pub fn new(base_path: impl Into<String>, players: HashMap<String, String>) -> Self {
        Self {
            base_path: base_path.into(),
            players,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, EnrichmentError> {
        serde_json::from_str(text).map_err(|e| EnrichmentError::Malformed(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player names with a configured profile, sorted.
    pub fn players(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.players.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// URL of the player's profile document.
    pub fn resolve(&self, player: &str) -> Result<String, EnrichmentError> {
        let resource = self
            .players
            .get(player)
            .ok_or_else(|| EnrichmentError::Unresolved(player.to_string()))?;

        if resource.contains("..") || !RESOURCE_NAME.is_match(resource) {
            return Err(EnrichmentError::InvalidResource {
                player: player.to_string(),
                resource: resource.clone(),
            });
        }

        let base = self.base_path.trim_end_matches('/');
        if base.is_empty() {
            Ok(resource.clone())
        } else {
            Ok(format!("{}/{}", base, resource))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
agent:
  model:
    provider: openai
    name: gpt-4o
    params:
      temperature: 0.7
      max_tokens: 512
      stream: false
      stop: "<end>"
  prompts:
    system_prompt: "You are <b>careful</b>."
    step_wise_prompt: |
      Think step by step.
"#;

    #[test]
    fn parses_full_profile() {
        let profile = parse_profile(PROFILE).unwrap();
        let model = &profile.agent.model;
        assert_eq!(model.provider, "openai");
        assert_eq!(model.name, "gpt-4o");
        assert_eq!(model.params["temperature"], ParamValue::Float(0.7));
        assert_eq!(model.params["max_tokens"], ParamValue::Integer(512));
        assert_eq!(model.params["stream"], ParamValue::Bool(false));
        assert_eq!(model.params["stop"].to_string(), "<end>");
        assert_eq!(
            profile.agent.prompts.system_prompt.as_deref(),
            Some("You are <b>careful</b>.")
        );
        assert_eq!(
            profile.agent.prompts.step_wise_prompt.as_deref(),
            Some("Think step by step.\n")
        );
    }

    #[test]
    fn prompts_are_optional() {
        let profile = parse_profile("agent:\n  model:\n    provider: local\n    name: m\n").unwrap();
        assert!(profile.agent.model.params.is_empty());
        assert_eq!(profile.agent.prompts, Prompts::default());
    }

    #[test]
    fn missing_agent_is_malformed() {
        assert!(matches!(
            parse_profile("model: {}"),
            Err(EnrichmentError::Malformed(_))
        ));
    }

    #[test]
    fn resolver_joins_base_path() {
        let resolver = ResourceResolver::from_json(
            r#"{ "base_path": "players/", "players": { "alice": "alice.yaml" } }"#,
        )
        .unwrap();
        assert_eq!(resolver.resolve("alice").unwrap(), "players/alice.yaml");
        assert_eq!(
            resolver.resolve("bob"),
            Err(EnrichmentError::Unresolved("bob".to_string()))
        );
    }

    #[test]
    fn resolver_lists_players_in_order() {
        let resolver = ResourceResolver::from_json(
            r#"{ "players": { "zed": "zed.yaml", "alice": "alice.yml" } }"#,
        )
        .unwrap();
        assert_eq!(resolver.players(), vec!["alice", "zed"]);
        assert_eq!(resolver.resolve("zed").unwrap(), "zed.yaml");
    }

    #[test]
    fn resolver_rejects_paths_and_urls() {
        let mut players = HashMap::new();
        players.insert("a".to_string(), "../secret.yaml".to_string());
        players.insert("b".to_string(), "https://evil.example/x.yaml".to_string());
        players.insert("c".to_string(), "notes.txt".to_string());
        players.insert("d".to_string(), "d_agent.yml".to_string());
        let resolver = ResourceResolver::new("", players);
        for name in ["a", "b", "c"] {
            assert!(matches!(
                resolver.resolve(name),
                Err(EnrichmentError::InvalidResource { .. })
            ));
        }
        assert_eq!(resolver.resolve("d").unwrap(), "d_agent.yml");
    }
}
