//! Closed enumerations for the five tracked roles and the two
//! cooldown-reduction items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five fixed positions on the enemy team.
///
/// The set is closed: every room tracks exactly these five, no more, no
/// less, which lets every `match` over roles be checked for
/// exhaustiveness at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    /// All five roles, in display order.
    pub const ALL: [Role; 5] = [
        Role::Top,
        Role::Jungle,
        Role::Mid,
        Role::Adc,
        Role::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Mid => "MID",
            Role::Adc => "ADC",
            Role::Support => "SUPPORT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TOP" => Ok(Role::Top),
            "JUNGLE" | "JGL" | "JG" => Ok(Role::Jungle),
            "MID" => Ok(Role::Mid),
            "ADC" | "BOT" => Ok(Role::Adc),
            "SUPPORT" | "SUP" => Ok(Role::Support),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// The two independent cooldown-reduction toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Boots,
    Rune,
}

impl Item {
    pub fn as_str(&self) -> &'static str {
        match self {
            Item::Boots => "boots",
            Item::Rune => "rune",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
