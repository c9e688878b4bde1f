//! Hero banner resolution. A configured image path is tried in up to three
//! rewritten forms against an image probe; the first form that loads becomes
//! the hero background, layered under a fixed darkening gradient.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::utils;

/// Whether a resource at `src` loads as an image. `src` may carry a query
/// string. Injectable so resolution can be exercised without touching disk.
pub trait ImageProbe {
    fn loads(&self, src: &str) -> bool;
}

/// Probes candidate paths against the site directory with a real image
/// decode. A file that exists but does not decode is a miss, the same as a
/// broken image URL in a browser.
pub struct FsImageProbe {
    site_dir: PathBuf,
}

impl FsImageProbe {
    pub fn new(site_dir: impl AsRef<Path>) -> Self {
        FsImageProbe {
            site_dir: site_dir.as_ref().to_owned(),
        }
    }
}

impl ImageProbe for FsImageProbe {
    fn loads(&self, src: &str) -> bool {
        let path = src.split('?').next().unwrap_or(src);
        // all three candidate forms resolve to the same site-relative file
        let path = path.strip_prefix("./").unwrap_or(path);
        let path = path.strip_prefix('/').unwrap_or(path);

        let format = match image::ImageFormat::from_path(path) {
            Ok(format) => format,
            Err(_) => return false,
        };
        let data = match std::fs::read(self.site_dir.join(path)) {
            Ok(data) => data,
            Err(_) => return false,
        };

        let mut reader = image::io::Reader::new(Cursor::new(&data));
        reader.set_format(format);
        reader.decode().is_ok()
    }
}

/// The ordered trial list for a configured path: as-is, forced `./`-relative,
/// forced rooted. Duplicates collapse, keeping first-seen order.
pub fn candidates(path: &str) -> Vec<String> {
    let forms = [
        path.to_owned(),
        if path.starts_with("./") {
            path.to_owned()
        } else {
            format!("./{path}")
        },
        if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        },
    ];

    let mut unique = Vec::with_capacity(forms.len());
    for form in forms {
        if !unique.contains(&form) {
            unique.push(form);
        }
    }
    unique
}

/// Try each candidate strictly in order, one probe at a time, and return the
/// first (cache-busted) source that loads. No retries, no timeout; an
/// exhausted list means the hero keeps no background at all.
pub fn resolve(path: &str, version: u64, probe: &dyn ImageProbe) -> Option<String> {
    for candidate in candidates(path) {
        let src = utils::cache_bust(&candidate, version);
        if probe.loads(&src) {
            return Some(src);
        }
        log::debug!("hero candidate did not load: {src}");
    }
    None
}

/// The full background declaration for a resolved source: darkening gradient
/// over the image, centered, covering, not repeated.
pub fn background_css(src: &str) -> String {
    format!(
        "linear-gradient(90deg, rgba(0,0,0,.55), rgba(0,0,0,.35)), url('{src}') center/cover no-repeat"
    )
}
