use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An external platform shown in the links directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub redirect_url: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub redirect_url: Option<String>,
}

impl NewLink {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        require("name", &self.name, &mut errors);
        require("redirectUrl", &self.redirect_url, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn into_link(self, id: String, created_at: i64) -> Link {
        Link {
            id,
            name: self.name,
            description: self.description,
            icon_url: self.icon_url,
            redirect_url: self.redirect_url,
            created_at,
        }
    }
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon_url.is_none()
            && self.redirect_url.is_none()
    }

    /// Provided fields may change but not be blanked
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        if let Some(name) = &self.name {
            require("name", name, &mut errors);
        }
        if let Some(url) = &self.redirect_url {
            require("redirectUrl", url, &mut errors);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn apply(self, link: &mut Link) {
        if let Some(v) = self.name {
            link.name = v;
        }
        if let Some(v) = self.description {
            link.description = v;
        }
        if let Some(v) = self.icon_url {
            link.icon_url = v;
        }
        if let Some(v) = self.redirect_url {
            link.redirect_url = v;
        }
    }
}

pub(crate) fn require(field: &str, value: &str, errors: &mut HashMap<String, String>) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "This field is required".to_string());
    }
}
