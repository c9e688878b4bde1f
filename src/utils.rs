use anyhow::anyhow;
use std::path::Path;

/// Turn a path into a URL with a given prefix. If a scheme and host is given, the path becomes an
/// absolute URL.
pub fn path_to_url(scheme_and_host: Option<&str>, path: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = path.as_ref();

    let mut builder = String::new();
    if let Some(s) = scheme_and_host {
        builder.push_str(s);
    }

    for (idx, part) in path.into_iter().enumerate() {
        if idx > 0 || scheme_and_host.is_some() {
            builder.push('/');
        }
        builder.push_str(part.to_str().ok_or(anyhow!("expected UTF-8 path"))?);
    }

    Ok(builder)
}

/// Append a cache-defeating query parameter to a URL. The value only has to change between
/// fetches; the server never interprets it.
pub fn cache_bust(url: &str, version: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}v={version}")
}

#[cfg(test)]
mod test {
    #[test]
    fn path_to_url() {
        use super::path_to_url;
        use std::path::PathBuf;

        assert_eq!(path_to_url(None, "index.html").unwrap(), "index.html");
        assert_eq!(
            path_to_url(Some("https://example.com"), "index.html").unwrap(),
            "https://example.com/index.html"
        );
        assert_eq!(
            path_to_url(Some("https://example.com"), PathBuf::from("nested").join("page.html"))
                .unwrap(),
            "https://example.com/nested/page.html"
        );
    }

    #[test]
    fn cache_bust() {
        use super::cache_bust;

        assert_eq!(cache_bust("data/site.json", 17), "data/site.json?v=17");
        assert_eq!(cache_bust("img/hero.jpg?w=768", 17), "img/hero.jpg?w=768&v=17");
    }
}
