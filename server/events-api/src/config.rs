use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Meetup,
    Hasgeek,
    Luma,
}

/// A community page to scrape. `slug` is the path segment on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub slug: String,
    pub name: String,
    pub platform: Platform,
}

impl Community {
    fn new(platform: Platform, slug: &str, name: &str) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            platform,
        }
    }
}

pub fn default_communities() -> Vec<Community> {
    vec![
        Community::new(Platform::Meetup, "rust-pune", "Rust Pune"),
        Community::new(Platform::Meetup, "rust-hyderabad", "Rust Hyderabad"),
        Community::new(Platform::Meetup, "rustdelhi", "Rust Delhi"),
        Community::new(Platform::Hasgeek, "rustlangin", "Rust Bangalore"),
        Community::new(Platform::Hasgeek, "keralars", "Rust Kerala"),
        Community::new(Platform::Hasgeek, "rustchandigarh", "Rust Chandigarh"),
        Community::new(Platform::Luma, "rust-mumbai-2", "Rust Mumbai"),
    ]
}

/// Reads a JSON array of communities, replacing the built-in table.
pub fn load_communities(path: &Path) -> Result<Vec<Community>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read communities from {}", path.display()))?;
    parse_communities(&raw).with_context(|| format!("parse communities in {}", path.display()))
}

fn parse_communities(raw: &str) -> Result<Vec<Community>> {
    Ok(serde_json::from_str(raw)?)
}

/// Origins of the scraped platforms.
#[derive(Debug, Clone)]
pub struct Sources {
    pub meetup: String,
    pub hasgeek: String,
    pub luma: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            meetup: "https://www.meetup.com".to_string(),
            hasgeek: "https://hasgeek.com".to_string(),
            luma: "https://lu.ma".to_string(),
        }
    }
}

impl Sources {
    /// Every platform served from one origin.
    #[cfg(test)]
    pub fn single(origin: &str) -> Self {
        Self {
            meetup: origin.to_string(),
            hasgeek: origin.to_string(),
            luma: origin.to_string(),
        }
    }
}
