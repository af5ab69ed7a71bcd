use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

use crate::profile::Profile;
use crate::resolver::ResponseTable;

pub const ENV_PREFIX: &str = "ASTRO_CHAT_";

/// Optional settings. Parsed once from the command line and once from
/// `ASTRO_CHAT_*` environment variables; command line values win.
#[derive(StructOpt, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    /// Chat personality (classic or guided)
    #[structopt(short, long)]
    pub profile: Option<Profile>,

    /// Simulated thinking time in milliseconds
    #[structopt(short, long)]
    pub delay_ms: Option<u64>,

    /// TOML file with a custom response table
    #[structopt(short, long, parse(from_os_str))]
    pub responses: Option<PathBuf>,
}

impl Overrides {
    pub fn from_env() -> Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env()
            .context("Failed to parse ASTRO_CHAT_* environment variables")
    }

    fn or(self, fallback: Overrides) -> Overrides {
        Overrides {
            profile: self.profile.or(fallback.profile),
            delay_ms: self.delay_ms.or(fallback.delay_ms),
            responses: self.responses.or(fallback.responses),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Profile,
    pub delay: Duration,
    pub responses: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: Overrides, env: Overrides) -> Self {
        let merged = cli.or(env);
        let profile = merged.profile.unwrap_or_default();

        Self {
            profile,
            delay: merged
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| profile.delay()),
            responses: merged.responses,
        }
    }

    pub async fn table(&self) -> Result<ResponseTable> {
        match &self.responses {
            Some(path) => ResponseTable::load(path).await,
            None => self.profile.table(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_profile() {
        let settings = Settings::resolve(Overrides::default(), Overrides::default());
        assert_eq!(settings.profile, Profile::Classic);
        assert_eq!(settings.delay, Duration::from_secs(2));
        assert_eq!(settings.responses, None);
    }

    #[test]
    fn profile_delay_applies_without_an_explicit_one() {
        let env = Overrides {
            profile: Some(Profile::Guided),
            ..Overrides::default()
        };
        let settings = Settings::resolve(Overrides::default(), env);
        assert_eq!(settings.delay, Duration::from_millis(1_500));
    }

    #[test]
    fn command_line_beats_environment() {
        let cli = Overrides {
            delay_ms: Some(10),
            ..Overrides::default()
        };
        let env = Overrides {
            profile: Some(Profile::Guided),
            delay_ms: Some(900),
            responses: Some(PathBuf::from("table.toml")),
        };

        let settings = Settings::resolve(cli, env);
        assert_eq!(settings.profile, Profile::Guided);
        assert_eq!(settings.delay, Duration::from_millis(10));
        assert_eq!(settings.responses, Some(PathBuf::from("table.toml")));
    }

    #[test]
    fn parses_command_line_flags() {
        let cli = Overrides::from_iter_safe(["astro-chat", "--profile", "guided", "-d", "250"]).unwrap();
        assert_eq!(cli.profile, Some(Profile::Guided));
        assert_eq!(cli.delay_ms, Some(250));

        assert!(Overrides::from_iter_safe(["astro-chat", "--profile", "loud"]).is_err());
    }

    #[test]
    fn parses_environment_pairs() {
        let env: Overrides = envy::prefixed(ENV_PREFIX)
            .from_iter([
                ("ASTRO_CHAT_PROFILE".to_owned(), "guided".to_owned()),
                ("ASTRO_CHAT_DELAY_MS".to_owned(), "0".to_owned()),
                ("UNRELATED".to_owned(), "x".to_owned()),
            ])
            .unwrap();

        assert_eq!(env.profile, Some(Profile::Guided));
        assert_eq!(env.delay_ms, Some(0));
        assert_eq!(env.responses, None);
    }

    #[tokio::test]
    async fn custom_table_replaces_the_profile_table() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "fallback = \"? {input}\"\n[[rule]]\nkeywords = [\"hello\"]\nresponse = \"custom hi\"\n",
        )
        .unwrap();

        let settings = Settings::resolve(
            Overrides {
                responses: Some(file.path().to_owned()),
                ..Overrides::default()
            },
            Overrides::default(),
        );

        let table = settings.table().await.unwrap();
        assert_eq!(table.resolve("hello"), "custom hi");
    }
}
