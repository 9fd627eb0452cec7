//! Marketplace entities
//!
//! Wire types exchanged with the marketplace API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned identifier.
///
/// The API hands out either numeric or string ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EntityId(s),
            Raw::Int(n) => EntityId(n.to_string()),
            Raw::Float(n) => EntityId(n.to_string()),
        })
    }
}

/// A priced offering of a photographer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub price: f64,
    /// Free-text features / description
    #[serde(default, alias = "description")]
    pub features: String,
}

impl Package {
    pub fn new(name: impl Into<String>, price: f64, features: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            features: features.into(),
        }
    }

    /// Text handed to the caller when this package is assigned
    pub fn describe(&self) -> String {
        format!("{} - {}", self.name, format_price(self.price))
    }
}

/// Format a price with thousands separators, dropping a zero fraction
pub fn format_price(price: f64) -> String {
    let negative = price < 0.0;
    let total_cents = (price.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

/// A photographer as listed by the directory endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photographer {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Absolute URL or storage-relative key
    #[serde(default, alias = "profilePicture", alias = "profile_pic")]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// Public portfolio profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "profilePicture", alias = "profile_pic")]
    pub profile_picture: Option<String>,
    #[serde(default, alias = "portfolio_images", alias = "portfolioImages")]
    pub portfolio: Vec<String>,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or("Unnamed photographer")
    }

    pub fn display_location(&self) -> &str {
        non_empty(&self.location).unwrap_or("Location not specified")
    }

    pub fn display_bio(&self) -> &str {
        non_empty(&self.bio).unwrap_or("No bio provided")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Body of `POST /jobs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "clientId")]
    pub client_id: String,
}

/// Acknowledgment of a created job; everything in it is opaque
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobReceipt {
    #[serde(default, alias = "_id", alias = "jobId")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /upload-url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    pub upload_url: String,
    pub file_key: String,
}

/// Body of `POST /jobs/{id}/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFiles {
    pub files: Vec<String>,
}

/// Account role chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Client,
    Photographer,
    Editor,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Client, Role::Photographer, Role::Editor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Photographer => "PHOTOGRAPHER",
            Role::Editor => "EDITOR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Photographer => "Photographer",
            Role::Editor => "Editor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
    }
}

/// Body of `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Outcome of the assign flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub photographer_id: EntityId,
    pub package_description: String,
}
