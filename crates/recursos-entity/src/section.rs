//! The three independent resource trees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the portal's fixed sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Monitoring resources. Requires sign-in.
    Monitoreo,
    /// Supervision resources. Requires sign-in.
    Supervision,
    /// School-centre resources. Public.
    #[default]
    CentrosEscolares,
}

impl Section {
    /// All sections in sidebar order.
    pub const ALL: [Section; 3] = [Self::Monitoreo, Self::Supervision, Self::CentrosEscolares];

    /// Identifier used in URLs, config, and upload destinations.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Monitoreo => "monitoreo",
            Self::Supervision => "supervision",
            Self::CentrosEscolares => "centros-escolares",
        }
    }

    /// Key under which the section list is persisted.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Monitoreo => "monitoreo_resources",
            Self::Supervision => "supervision_resources",
            Self::CentrosEscolares => "centros_resources",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Monitoreo => "Monitoreo",
            Self::Supervision => "Supervisión",
            Self::CentrosEscolares => "Centros Escolares",
        }
    }

    /// Title shown while browsing the section root.
    pub fn root_title(&self) -> &'static str {
        match self {
            Self::Monitoreo => "Recursos de Monitoreo",
            Self::Supervision => "Recursos de Supervisión",
            Self::CentrosEscolares => "Recursos de Centros Escolares",
        }
    }

    /// Whether entering the section needs a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Monitoreo | Self::Supervision)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monitoreo" => Ok(Self::Monitoreo),
            "supervision" | "supervisión" => Ok(Self::Supervision),
            "centros-escolares" | "centros" => Ok(Self::CentrosEscolares),
            other => Err(format!("Unknown section: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.slug().parse::<Section>(), Ok(section));
        }
    }

    #[test]
    fn test_protection() {
        assert!(Section::Monitoreo.is_protected());
        assert!(Section::Supervision.is_protected());
        assert!(!Section::CentrosEscolares.is_protected());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Section::CentrosEscolares).unwrap();
        assert_eq!(json, "\"centros-escolares\"");
    }
}
