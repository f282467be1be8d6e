use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map($name)
            }
        }
    };
}

id_newtype!(GuestId);

/// Contact/address state of a guest as reported by the server.
///
/// Codes the review flow knows about get their own variant; anything else is
/// carried verbatim in `Other` so it still renders and round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GuestStatus {
    #[default]
    NeedsAddress,
    HasAddress,
    Requested,
    NotOnFb,
    Other(String),
}

impl GuestStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "needs_address" => Self::NeedsAddress,
            "has_address" => Self::HasAddress,
            "requested" => Self::Requested,
            "not_on_fb" => Self::NotOnFb,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::NeedsAddress => "needs_address",
            Self::HasAddress => "has_address",
            Self::Requested => "requested",
            Self::NotOnFb => "not_on_fb",
            Self::Other(code) => code,
        }
    }

    /// Badge text: `not_on_fb` becomes "Not On Fb".
    pub fn label(&self) -> String {
        humanize_code(self.code())
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::HasAddress => Palette::Success,
            Self::Requested => Palette::Info,
            Self::NotOnFb => Palette::Neutral,
            Self::NeedsAddress | Self::Other(_) => Palette::Pending,
        }
    }

    /// Whether the guest has already been contacted through one of the mark actions.
    pub fn is_marked(&self) -> bool {
        matches!(self, Self::Requested | Self::NotOnFb)
    }
}

impl From<String> for GuestStatus {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

impl From<GuestStatus> for String {
    fn from(value: GuestStatus) -> Self {
        match value {
            GuestStatus::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn humanize_code(code: &str) -> String {
    code.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mutually exclusive badge color sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Success,
    Info,
    Neutral,
    Pending,
}

/// Status-changing actions offered on a guest card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkAction {
    Requested,
    NotOnFb,
}

impl MarkAction {
    pub const ALL: [MarkAction; 2] = [MarkAction::Requested, MarkAction::NotOnFb];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::NotOnFb => "not_on_fb",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::NotOnFb => "Not on FB",
        }
    }
}

impl fmt::Display for MarkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}' (expected requested or not_on_fb)")]
pub struct UnknownAction(pub String);

impl FromStr for MarkAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "requested" => Ok(Self::Requested),
            "not_on_fb" => Ok(Self::NotOnFb),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
