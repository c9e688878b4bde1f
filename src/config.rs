//! Configuration documents. `ToolConfig` is the tool's own `vitrine.toml`;
//! `SiteConfig` is the page data document read from `data/site.json`.

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("site configuration is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

#[derive(serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ToolConfig {
    pub base_url: String,
    pub base_url_develop: String,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Viewport assumed for the initial floating-contact evaluation. The page is
/// hydrated before any scrolling happened, so only the width is configurable.
#[derive(serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ViewportConfig {
    pub width: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig { width: 1280 }
    }
}

/// The site data document. Everything is optional except `business.name` and
/// the `contact` group; `validate` reports every missing required field in
/// one aggregated error.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct SiteConfig {
    pub business: Option<Business>,
    pub hero: Option<Hero>,
    pub contact: Option<Contact>,
    pub cards: Option<Vec<Card>>,
    pub legal_info: Option<LegalInfo>,
    pub about: Option<About>,
    pub payments: Option<Payments>,
    pub certs: Option<Certs>,
    pub colors: Option<Colors>,
    pub footer: Option<Footer>,
    pub meta_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Business {
    pub name: Option<String>,
    pub address: Option<String>,
    pub hours: Option<Vec<String>>,
    pub maps_embed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Hero {
    pub image: Option<String>,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub badges: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Contact {
    pub whatsapp: Option<String>,
    pub wa_message: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Card {
    pub image: Option<String>,
    #[serde(default)]
    pub title: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct LegalInfo {
    pub lines: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct About {
    pub title: Option<String>,
    pub text: Option<String>,
    pub history_title: Option<String>,
    pub history: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Payments {
    pub methods: Option<Vec<String>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Certs {
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Colors {
    pub primary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Footer {
    pub text: Option<String>,
    pub agency: Option<String>,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();

        match self.business.as_ref().and_then(|b| b.name.as_deref()) {
            Some(name) if !name.is_empty() => {}
            _ => missing.push("business.name".to_owned()),
        }
        if self.contact.is_none() {
            missing.push("contact".to_owned());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingFields(missing))
        }
    }

    pub fn business_name(&self) -> &str {
        self.business
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .unwrap_or("")
    }
}
