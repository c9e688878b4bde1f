use anyhow::Context;
use std::path::Path;

use crate::config::SiteConfig;
use crate::utils;

/// Where the page data document lives, relative to the site directory. The
/// shell fetches the same path at run time.
pub const CONFIG_PATH: &str = "data/site.json";

/// One read of the site data document: fetch, parse, validate. No retries,
/// no timeout; any failure aborts the whole hydration.
pub fn load(site_dir: &Path, version: u64) -> anyhow::Result<SiteConfig> {
    log::debug!("fetching {}", utils::cache_bust(CONFIG_PATH, version));

    let raw = std::fs::read_to_string(site_dir.join(CONFIG_PATH))
        .with_context(|| format!("Reading {CONFIG_PATH}"))?;
    let cfg: SiteConfig =
        serde_json::from_str(&raw).with_context(|| format!("Parsing {CONFIG_PATH}"))?;
    cfg.validate()?;

    Ok(cfg)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    fn site_with(json: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        let mut f = std::fs::File::create(dir.path().join("data/site.json")).unwrap();
        f.write_all(json.as_bytes()).unwrap();
        dir
    }

    #[test]
    fn load_parses_and_validates() {
        let dir = site_with(r#"{ "business": { "name": "Barbearia Norte" }, "contact": {} }"#);
        let cfg = super::load(dir.path(), 1).unwrap();
        assert_eq!(cfg.business_name(), "Barbearia Norte");
    }

    #[test]
    fn malformed_document_aborts() {
        let dir = site_with("{ not json");
        assert!(super::load(dir.path(), 1).is_err());
    }

    #[test]
    fn missing_required_fields_abort_with_aggregate() {
        let dir = site_with("{}");
        let err = super::load(dir.path(), 1).unwrap_err();
        assert!(err
            .to_string()
            .contains("missing required fields: business.name, contact"));
    }
}
