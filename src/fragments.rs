//! HTML fragments for the list sections. Each renderer maps configuration
//! array elements to a joined fragment that is assigned wholesale to its
//! container. Configuration content is operator-authored and trusted; values
//! are interpolated as-is.

use std::fmt::Write;

use crate::config;

/// At most this many cards render, regardless of how many are configured.
pub const MAX_CARDS: usize = 3;

const CHECKMARK_SVG: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24"><path fill="currentColor" d="M9 16.2l-3.5-3.5L4 14.2l5 5 11-11-1.5-1.5z"/></svg>"#;

pub fn cards(cards: &[config::Card]) -> String {
    let mut html = String::new();
    for card in cards.iter().take(MAX_CARDS) {
        html.push_str("<article class=\"card\">");
        match card.image.as_deref() {
            Some(image) if !image.is_empty() => {
                write!(html, r#"<img class="thumb" src="{image}" alt="{}">"#, card.title)
                    .expect("infallible");
            }
            _ => html.push_str(r#"<div class="thumb"></div>"#),
        }
        write!(html, "<h3>{}</h3>", card.title).expect("infallible");
        write!(html, "<p>{}</p>", card.text.as_deref().unwrap_or("")).expect("infallible");
        html.push_str("</article>");
    }
    html
}

pub fn legal_lines(lines: &[String]) -> String {
    let mut html = String::new();
    for line in lines {
        write!(html, r#"<span class="line">{line}</span>"#).expect("infallible");
    }
    html
}

/// Badge CSS class: the method name lowercased with internal whitespace
/// collapsed away. Display text keeps its original casing.
pub fn payment_badge_class(method: &str) -> String {
    method.to_lowercase().split_whitespace().collect()
}

pub fn payment_badges(methods: &[String]) -> String {
    let mut html = String::new();
    for method in methods {
        let class = payment_badge_class(method);
        write!(html, r#"<span class="badge {class}">{method}</span>"#).expect("infallible");
    }
    html
}

pub fn cert_items(items: &[String]) -> String {
    let mut html = String::new();
    for item in items {
        write!(html, "<li>{CHECKMARK_SVG}<span>{item}</span></li>").expect("infallible");
    }
    html
}

pub fn hours(hours: &[String]) -> String {
    let mut html = String::new();
    for line in hours {
        write!(html, "<div>{line}</div>").expect("infallible");
    }
    html
}
