//! Thin application layer: folds render instructions into the template
//! context the page shells are rendered with. Text bindings land under
//! `text.*`, derived links under `link.*`, container markup under `html.*`
//! (to be emitted with `|safe`), and the one-off slots under `hero`, `map`,
//! `theme` and `float`. A later instruction for the same slot overwrites an
//! earlier one.

use std::collections::BTreeMap;

use crate::page::Instruction;

pub fn context(instructions: &[Instruction], base_url: &str) -> minijinja::Value {
    let mut text: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut link: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut html: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut theme: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut hero_background: Option<String> = None;
    let mut map_src: Option<String> = None;
    let mut float_show = false;

    for instruction in instructions {
        match instruction {
            Instruction::SetText { bind, value } => {
                text.insert(bind.key(), value.clone());
            }
            Instruction::SetLink { target, href } => {
                link.insert(target.key(), href.clone());
            }
            Instruction::SetHtml { container, html: fragment } => {
                html.insert(container.key(), fragment.clone());
            }
            Instruction::SetBackground { css } => {
                hero_background = Some(css.clone());
            }
            Instruction::SetFrameSrc { src } => {
                map_src = Some(src.clone());
            }
            Instruction::SetCssVar { name, value } => {
                theme.insert(name.trim_start_matches('-'), value.clone());
            }
            Instruction::ToggleClass { target: "wa_float", class: "show", on } => {
                float_show = *on;
            }
            Instruction::ToggleClass { .. } => {}
        }
    }

    minijinja::context! {
        base_url => base_url,
        text => text,
        link => link,
        html => html,
        theme => theme,
        hero => minijinja::context! { background => hero_background },
        map => minijinja::context! { src => map_src },
        float => minijinja::context! { show => float_show },
    }
}
