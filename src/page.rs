//! The hydration core: a pure mapping from a site configuration to the list
//! of render instructions for one page load. Applying the instructions is the
//! adapter layer's job (`apply`), which keeps this mapping testable on its
//! own.

use crate::bind::{self, Bind};
use crate::config::SiteConfig;
use crate::float::{self, Viewport};
use crate::fragments;
use crate::hero::{self, ImageProbe};

/// Element targets for derived links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    WhatsappLink,
    WaDisplay,
    WaFloat,
    EmailLink,
}

impl LinkTarget {
    pub fn key(self) -> &'static str {
        match self {
            LinkTarget::WhatsappLink => "whatsapp_link",
            LinkTarget::WaDisplay => "wa_display",
            LinkTarget::WaFloat => "wa_float",
            LinkTarget::EmailLink => "email",
        }
    }
}

/// Containers whose markup is assigned wholesale from a rendered fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    Cards,
    LegalLines,
    PaymentBadges,
    CertList,
    Hours,
}

impl Container {
    pub fn key(self) -> &'static str {
        match self {
            Container::Cards => "cards",
            Container::LegalLines => "legal_lines",
            Container::PaymentBadges => "payment_badges",
            Container::CertList => "cert_list",
            Container::Hours => "hours",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    SetText { bind: Bind, value: String },
    SetLink { target: LinkTarget, href: String },
    SetHtml { container: Container, html: String },
    SetBackground { css: String },
    SetFrameSrc { src: String },
    SetCssVar { name: &'static str, value: String },
    ToggleClass { target: &'static str, class: &'static str, on: bool },
}

/// Ambient inputs of one hydration run: the cache-bust version, the wall
/// clock year, and the viewport the initial floating-contact state is
/// computed for.
#[derive(Clone, Copy, Debug)]
pub struct RenderEnv {
    pub version: u64,
    pub year: i32,
    pub viewport: Viewport,
}

fn truthy(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Map a configuration to render instructions, in the order the page
/// hydrates: title block, hero, hero text, contact, list sections, address
/// block, theme color, floating contact. Hero resolution runs to completion
/// before any later instruction is produced; nothing after it depends on the
/// outcome, but the ordering is part of the observed behavior.
pub fn render_page(cfg: &SiteConfig, env: &RenderEnv, probe: &dyn ImageProbe) -> Vec<Instruction> {
    let mut out = Vec::new();
    let text = |bind: Bind, value: String| Instruction::SetText { bind, value };

    // Title, brand, year, footer. These always render; validation guarantees
    // the business name.
    let footer = cfg.footer.clone().unwrap_or_default();
    out.push(text(
        Bind::Title,
        bind::page_title(cfg.business_name(), cfg.meta_title.as_deref()),
    ));
    out.push(text(Bind::BusinessName, cfg.business_name().to_owned()));
    out.push(text(Bind::Year, env.year.to_string()));
    out.push(text(
        Bind::FooterText,
        bind::or_literal(footer.text.as_deref(), bind::FOOTER_TEXT_FALLBACK),
    ));
    out.push(text(
        Bind::Agency,
        bind::or_literal(footer.agency.as_deref(), bind::AGENCY_FALLBACK),
    ));

    let hero_cfg = cfg.hero.clone().unwrap_or_default();

    // Hero banner. Probing is strictly sequential and blocks everything
    // below; an exhausted candidate list leaves the background untouched.
    if let Some(image) = truthy(hero_cfg.image.as_deref()) {
        if let Some(src) = hero::resolve(image, env.version, probe) {
            out.push(Instruction::SetBackground {
                css: hero::background_css(&src),
            });
        }
    }

    if let Some(headline) = truthy(hero_cfg.headline.as_deref()) {
        out.push(text(Bind::Headline, headline.to_owned()));
    }
    if let Some(subheadline) = truthy(hero_cfg.subheadline.as_deref()) {
        out.push(text(Bind::Subheadline, subheadline.to_owned()));
    }
    if let Some(badges) = &hero_cfg.badges {
        for (bind, idx) in [(Bind::Badge1, 0), (Bind::Badge2, 1), (Bind::Badge3, 2)] {
            out.push(text(bind, bind::coalesce(badges.get(idx).map(String::as_str))));
        }
    }

    // Contact links and text.
    let contact = cfg.contact.clone().unwrap_or_default();
    let wa_link = bind::whatsapp_link(contact.whatsapp.as_deref(), contact.wa_message.as_deref());
    for target in [LinkTarget::WhatsappLink, LinkTarget::WaDisplay, LinkTarget::WaFloat] {
        out.push(Instruction::SetLink {
            target,
            href: wa_link.clone(),
        });
    }
    out.push(text(Bind::Phone, bind::coalesce(contact.phone.as_deref())));
    out.push(text(Bind::Email, bind::coalesce(contact.email.as_deref())));
    out.push(Instruction::SetLink {
        target: LinkTarget::EmailLink,
        href: bind::mail_link(contact.email.as_deref()),
    });

    // List sections render only when the source field is an array.
    if let Some(cards) = &cfg.cards {
        out.push(Instruction::SetHtml {
            container: Container::Cards,
            html: fragments::cards(cards),
        });
    }
    if let Some(lines) = cfg.legal_info.as_ref().and_then(|l| l.lines.as_ref()) {
        if !lines.is_empty() {
            out.push(Instruction::SetHtml {
                container: Container::LegalLines,
                html: fragments::legal_lines(lines),
            });
        }
    }

    let about = cfg.about.clone().unwrap_or_default();
    if let Some(title) = truthy(about.title.as_deref()) {
        out.push(text(Bind::AboutTitle, title.to_owned()));
    }
    if let Some(about_text) = truthy(about.text.as_deref()) {
        out.push(text(Bind::AboutText, about_text.to_owned()));
    }
    if let Some(history_title) = truthy(about.history_title.as_deref()) {
        out.push(text(Bind::HistoryTitle, history_title.to_owned()));
    }
    if let Some(history) = truthy(about.history.as_deref()) {
        out.push(text(Bind::HistoryText, history.to_owned()));
    }

    let payments = cfg.payments.clone().unwrap_or_default();
    if let Some(methods) = &payments.methods {
        out.push(Instruction::SetHtml {
            container: Container::PaymentBadges,
            html: fragments::payment_badges(methods),
        });
    }
    out.push(text(Bind::PaymentsNote, bind::coalesce(payments.note.as_deref())));

    if let Some(items) = cfg.certs.as_ref().and_then(|c| c.items.as_ref()) {
        out.push(Instruction::SetHtml {
            container: Container::CertList,
            html: fragments::cert_items(items),
        });
    }

    // Address block.
    let business = cfg.business.clone().unwrap_or_default();
    out.push(text(Bind::Address, bind::coalesce(business.address.as_deref())));
    if let Some(hours) = &business.hours {
        out.push(Instruction::SetHtml {
            container: Container::Hours,
            html: fragments::hours(hours),
        });
    }
    if let Some(embed) = truthy(business.maps_embed.as_deref()) {
        out.push(Instruction::SetFrameSrc {
            src: embed.to_owned(),
        });
    }

    if let Some(primary) = cfg.colors.as_ref().and_then(|c| truthy(c.primary.as_deref())) {
        out.push(Instruction::SetCssVar {
            name: "--primary",
            value: primary.to_owned(),
        });
    }

    // Initial floating-contact evaluation; adapters re-run the rule on every
    // scroll/resize event afterwards.
    out.push(Instruction::ToggleClass {
        target: "wa_float",
        class: "show",
        on: float::visible(env.viewport),
    });

    out
}

#[cfg(test)]
mod test {
    use super::{render_page, Container, Instruction, LinkTarget, RenderEnv};
    use crate::bind::Bind;
    use crate::config::SiteConfig;
    use crate::float::Viewport;
    use crate::hero::ImageProbe;

    struct NeverLoads;
    impl ImageProbe for NeverLoads {
        fn loads(&self, _src: &str) -> bool {
            false
        }
    }

    struct AlwaysLoads;
    impl ImageProbe for AlwaysLoads {
        fn loads(&self, _src: &str) -> bool {
            true
        }
    }

    fn env() -> RenderEnv {
        RenderEnv {
            version: 99,
            year: 2026,
            viewport: Viewport { scroll_y: 0, width: 1200 },
        }
    }

    fn minimal() -> SiteConfig {
        serde_json::from_str(
            r#"{ "business": { "name": "Oficina Central" }, "contact": {} }"#,
        )
        .unwrap()
    }

    fn text_of(instructions: &[Instruction], bind: Bind) -> Option<&str> {
        instructions.iter().find_map(|i| match i {
            Instruction::SetText { bind: b, value } if *b == bind => Some(value.as_str()),
            _ => None,
        })
    }

    #[test]
    fn minimal_config_renders_title_block_and_fallbacks() {
        let instructions = render_page(&minimal(), &env(), &NeverLoads);

        assert_eq!(text_of(&instructions, Bind::Title), Some("Oficina Central — Site"));
        assert_eq!(text_of(&instructions, Bind::BusinessName), Some("Oficina Central"));
        assert_eq!(text_of(&instructions, Bind::Year), Some("2026"));
        assert_eq!(
            text_of(&instructions, Bind::FooterText),
            Some("Todos os direitos reservados.")
        );
        assert_eq!(text_of(&instructions, Bind::Agency), Some("Sua Agência"));

        // optional sections are simply not emitted
        assert!(!instructions
            .iter()
            .any(|i| matches!(i, Instruction::SetHtml { .. } | Instruction::SetBackground { .. })));
        // and no instruction ever carries a "null"-ish literal
        for i in &instructions {
            if let Instruction::SetText { value, .. } = i {
                assert_ne!(value, "undefined");
                assert_ne!(value, "null");
            }
        }
    }

    #[test]
    fn hero_failure_emits_no_background() {
        let mut cfg = minimal();
        cfg.hero = serde_json::from_str(r#"{ "image": "img/hero.jpg" }"#).ok();
        let instructions = render_page(&cfg, &env(), &NeverLoads);
        assert!(!instructions.iter().any(|i| matches!(i, Instruction::SetBackground { .. })));
    }

    #[test]
    fn hero_success_applies_cache_busted_background() {
        let mut cfg = minimal();
        cfg.hero = serde_json::from_str(r#"{ "image": "img/hero.jpg" }"#).ok();
        let instructions = render_page(&cfg, &env(), &AlwaysLoads);
        let css = instructions
            .iter()
            .find_map(|i| match i {
                Instruction::SetBackground { css } => Some(css.as_str()),
                _ => None,
            })
            .unwrap();
        assert!(css.contains("url('img/hero.jpg?v=99')"));
        assert!(css.starts_with("linear-gradient(90deg,"));
    }

    #[test]
    fn badges_bind_positionally_with_empty_fill() {
        let mut cfg = minimal();
        cfg.hero = serde_json::from_str(r#"{ "badges": ["10 anos", "Garantia"] }"#).ok();
        let instructions = render_page(&cfg, &env(), &NeverLoads);

        assert_eq!(text_of(&instructions, Bind::Badge1), Some("10 anos"));
        assert_eq!(text_of(&instructions, Bind::Badge2), Some("Garantia"));
        assert_eq!(text_of(&instructions, Bind::Badge3), Some(""));
    }

    #[test]
    fn no_badges_array_binds_nothing() {
        let instructions = render_page(&minimal(), &env(), &NeverLoads);
        assert_eq!(text_of(&instructions, Bind::Badge1), None);
    }

    #[test]
    fn whatsapp_link_targets_all_three_elements() {
        let mut cfg = minimal();
        cfg.contact = serde_json::from_str(
            r#"{ "whatsapp": "+55 (11) 91234-5678", "wa_message": "Olá" }"#,
        )
        .ok();
        let instructions = render_page(&cfg, &env(), &NeverLoads);

        let links: Vec<_> = instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::SetLink { target, href } => Some((*target, href.as_str())),
                _ => None,
            })
            .collect();
        let wa = "https://wa.me/5511912345678?text=Ol%C3%A1";
        assert!(links.contains(&(LinkTarget::WhatsappLink, wa)));
        assert!(links.contains(&(LinkTarget::WaDisplay, wa)));
        assert!(links.contains(&(LinkTarget::WaFloat, wa)));
        assert!(links.contains(&(LinkTarget::EmailLink, "mailto:")));
    }

    #[test]
    fn empty_legal_lines_render_no_container() {
        let mut cfg = minimal();
        cfg.legal_info = serde_json::from_str(r#"{ "lines": [] }"#).ok();
        let instructions = render_page(&cfg, &env(), &NeverLoads);
        assert!(!instructions
            .iter()
            .any(|i| matches!(i, Instruction::SetHtml { container: Container::LegalLines, .. })));
    }

    #[test]
    fn theme_color_only_when_configured() {
        let instructions = render_page(&minimal(), &env(), &NeverLoads);
        assert!(!instructions.iter().any(|i| matches!(i, Instruction::SetCssVar { .. })));

        let mut cfg = minimal();
        cfg.colors = serde_json::from_str(r##"{ "primary": "#0a7d4f" }"##).ok();
        let instructions = render_page(&cfg, &env(), &NeverLoads);
        assert!(instructions.contains(&Instruction::SetCssVar {
            name: "--primary",
            value: "#0a7d4f".to_owned(),
        }));
    }

    #[test]
    fn float_toggle_reflects_viewport() {
        let instructions = render_page(&minimal(), &env(), &NeverLoads);
        assert!(instructions.contains(&Instruction::ToggleClass {
            target: "wa_float",
            class: "show",
            on: false,
        }));

        let mobile = RenderEnv {
            viewport: Viewport { scroll_y: 0, width: 375 },
            ..env()
        };
        let instructions = render_page(&minimal(), &mobile, &NeverLoads);
        assert!(instructions.contains(&Instruction::ToggleClass {
            target: "wa_float",
            class: "show",
            on: true,
        }));
    }

    #[test]
    fn hero_resolution_precedes_every_later_binding() {
        let mut cfg = minimal();
        cfg.hero = serde_json::from_str(r#"{ "image": "img/hero.jpg", "headline": "Bem-vindo" }"#).ok();
        let instructions = render_page(&cfg, &env(), &AlwaysLoads);

        let background = instructions
            .iter()
            .position(|i| matches!(i, Instruction::SetBackground { .. }))
            .unwrap();
        let headline = instructions
            .iter()
            .position(|i| matches!(i, Instruction::SetText { bind: Bind::Headline, .. }))
            .unwrap();
        assert!(background < headline);
    }
}
