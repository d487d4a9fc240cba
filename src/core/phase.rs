//! Build phases the generator can be bound to.
//!
//! The phase decides which kind of source root the output directory is
//! registered as once a generation run succeeds. Config files and the CLI
//! both spell phases in kebab-case.

use std::fmt::{self, Display};

use serde::Deserialize;

/// Build phase driving source-root registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildPhase {
    /// Outputs are main sources
    #[default]
    GenerateSources,
    /// Outputs are test sources
    GenerateTestSources,
}

impl BuildPhase {
    pub fn name(self) -> &'static str {
        match self {
            BuildPhase::GenerateSources => "generate-sources",
            BuildPhase::GenerateTestSources => "generate-test-sources",
        }
    }
}

impl Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[derive(Deserialize)]
    struct Holder {
        phase: BuildPhase,
    }

    #[test]
    fn test_phase_name() {
        assert_eq!(BuildPhase::GenerateSources.name(), "generate-sources");
        assert_eq!(
            BuildPhase::GenerateTestSources.to_string(),
            "generate-test-sources"
        );
    }

    #[test]
    fn test_phase_default() {
        assert_eq!(BuildPhase::default(), BuildPhase::GenerateSources);
    }

    #[test]
    fn test_config_and_cli_spellings_match_name() {
        for phase in BuildPhase::value_variants() {
            let holder: Holder = toml::from_str(&format!("phase = \"{}\"", phase.name())).unwrap();
            assert_eq!(holder.phase, *phase);

            let cli = BuildPhase::from_str(phase.name(), false).unwrap();
            assert_eq!(cli, *phase);
        }
        assert!(toml::from_str::<Holder>("phase = \"compile\"").is_err());
    }
}
