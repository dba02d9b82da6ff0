//! User preferences consulted for advisory warnings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dietary restriction. Only used to phrase advisory oracle prompts;
/// never blocks a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    #[default]
    None,
    Vegan,
    Vegetarian,
    GlutenFree,
    Halal,
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diet::None => write!(f, "none"),
            Diet::Vegan => write!(f, "vegan"),
            Diet::Vegetarian => write!(f, "vegetarian"),
            Diet::GlutenFree => write!(f, "gluten-free"),
            Diet::Halal => write!(f, "halal"),
        }
    }
}

impl FromStr for Diet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Diet::None),
            "vegan" => Ok(Diet::Vegan),
            "vegetarian" => Ok(Diet::Vegetarian),
            "gluten-free" | "glutenfree" => Ok(Diet::GlutenFree),
            "halal" => Ok(Diet::Halal),
            other => Err(format!(
                "Unknown diet '{}'. Use one of: none, vegan, vegetarian, gluten-free, halal",
                other
            )),
        }
    }
}

/// Small preferences record stored inside the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub diet: Diet,
}
