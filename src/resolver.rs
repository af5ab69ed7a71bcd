use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const INPUT_PLACEHOLDER: &str = "{input}";

/// One entry of a [`ResponseTable`]: any of `keywords` found in the
/// lowercased input selects `response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    keywords: Vec<String>,
    response: String,
}

impl Rule {
    pub fn new<K, S>(keywords: K, response: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    fn matches(&self, normalized_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_input.contains(keyword.as_str()))
    }
}

/// Ordered rules plus a fallback. Rules are checked in declaration order and
/// the first hit wins, so earlier rules shadow overlapping keywords in later
/// ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    rules: Vec<Rule>,
    fallback: String,
}

impl ResponseTable {
    pub fn new(rules: Vec<Rule>, fallback: impl Into<String>) -> Result<Self> {
        let fallback = fallback.into();

        for (index, rule) in rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                anyhow::bail!("Rule #{} has no keywords", index + 1);
            }
            if rule.keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                anyhow::bail!("Rule #{} has a blank keyword", index + 1);
            }
        }

        if !fallback.contains(INPUT_PLACEHOLDER) {
            anyhow::bail!("Fallback response must contain the `{INPUT_PLACEHOLDER}` placeholder");
        }

        Ok(Self { rules, fallback })
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(source).context("Failed to parse response table TOML")?;

        Self::new(
            file.rules
                .into_iter()
                .map(|rule| Rule::new(rule.keywords, rule.response))
                .collect(),
            file.fallback,
        )
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read response table {}", path.display()))?;

        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid response table {}", path.display()))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first keyword of every rule, in table order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter_map(|rule| rule.keywords.first().map(String::as_str))
    }

    pub fn resolve(&self, input: &str) -> String {
        let normalized = input.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.response.clone())
            .unwrap_or_else(|| self.fallback.replacen(INPUT_PLACEHOLDER, input, 1))
    }
}

#[derive(Deserialize)]
struct TableFile {
    fallback: String,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleFile>,
}

#[derive(Deserialize)]
struct RuleFile {
    keywords: Vec<String>,
    response: String,
}
