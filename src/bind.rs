//! Text binding points and the handful of bindings with bespoke derivation
//! rules: the composed page title, the footer fallbacks, and the contact
//! links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// A logical name identifying an insertion point in the page shell. The
/// template adapter resolves each key to the `text.<key>` slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bind {
    Title,
    BusinessName,
    Year,
    FooterText,
    Agency,
    Headline,
    Subheadline,
    Badge1,
    Badge2,
    Badge3,
    Phone,
    Email,
    AboutTitle,
    AboutText,
    HistoryTitle,
    HistoryText,
    PaymentsNote,
    Address,
}

impl Bind {
    pub fn key(self) -> &'static str {
        match self {
            Bind::Title => "title",
            Bind::BusinessName => "business_name",
            Bind::Year => "year",
            Bind::FooterText => "footer_text",
            Bind::Agency => "agency",
            Bind::Headline => "headline",
            Bind::Subheadline => "subheadline",
            Bind::Badge1 => "badge1",
            Bind::Badge2 => "badge2",
            Bind::Badge3 => "badge3",
            Bind::Phone => "phone",
            Bind::Email => "email",
            Bind::AboutTitle => "about_title",
            Bind::AboutText => "about_text",
            Bind::HistoryTitle => "history_title",
            Bind::HistoryText => "history_text",
            Bind::PaymentsNote => "payments_note",
            Bind::Address => "address",
        }
    }
}

pub const FOOTER_TEXT_FALLBACK: &str = "Todos os direitos reservados.";
pub const AGENCY_FALLBACK: &str = "Sua Agência";

/// Absent values render as the empty string, never as a "null"-ish literal.
pub fn coalesce(value: Option<&str>) -> String {
    value.unwrap_or("").to_owned()
}

/// Like `coalesce`, but an empty configured string also falls through to the
/// given literal.
pub fn or_literal(value: Option<&str>, literal: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => literal.to_owned(),
    }
}

/// The document title composes the business name with the meta title, falling
/// back to a fixed literal when no meta title is configured.
pub fn page_title(business_name: &str, meta_title: Option<&str>) -> String {
    let meta = match meta_title {
        Some(m) if !m.is_empty() => m,
        _ => "Site",
    };
    format!("{business_name} — {meta}")
}

/// The characters `encodeURIComponent` leaves alone, on top of alphanumerics.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Messaging deep link: the configured number with every non-digit stripped,
/// plus the URL-encoded message body. Without any digits the link degrades to
/// a no-op anchor.
pub fn whatsapp_link(number: Option<&str>, message: Option<&str>) -> String {
    let digits: String = number
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return "#".to_owned();
    }

    let text = utf8_percent_encode(message.unwrap_or(""), MESSAGE_ENCODE_SET);
    format!("https://wa.me/{digits}?text={text}")
}

pub fn mail_link(email: Option<&str>) -> String {
    format!("mailto:{}", email.unwrap_or(""))
}
