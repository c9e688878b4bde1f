use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, SystemTime};

use notify_debouncer_full::{new_debouncer, notify::*, DebounceEventResult};

mod apply;
mod bind;
mod cli;
mod config;
mod float;
mod fragments;
mod hero;
mod loader;
mod out;
mod page;
mod render;
mod utils;


use out::Out;

/// Cache-bust value for this build. Wall clock seconds; the only requirement
/// is that it changes between fetches.
fn bust_version() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn hydrate(
    path: &Path,
    out_path: &Path,
    renderer: &render::Renderer,
    viewport: float::Viewport,
) -> anyhow::Result<()> {
    let out = Out::at(out_path)?;

    let version = bust_version();
    let cfg = loader::load(path, version)?;

    let env = page::RenderEnv {
        version,
        year: chrono::Local::now().year(),
        viewport,
    };
    let probe = hero::FsImageProbe::new(path);
    let instructions = page::render_page(&cfg, &env, &probe);
    log::info!("Hydrating with {} render instruction(s)", instructions.len());

    let ctx = apply::context(&instructions, renderer.base_url());

    // Render every page shell where no part of the template file path starts
    // with an underscore.
    let templates = path.join("templates");
    let mut pages = 0usize;
    for template_path in walkdir::WalkDir::new(&templates).follow_links(true) {
        let template_path = template_path?;
        if !template_path.file_type().is_file() {
            continue;
        }
        let rel = template_path.path().strip_prefix(&templates)?.to_owned();
        if rel
            .iter()
            .any(|p| p.to_string_lossy().starts_with('_'))
        {
            continue;
        }

        let name = utils::path_to_url(None, &rel)
            .with_context(|| format!("Template path is not Unicode: {rel:?}"))?;
        let mut rendered = Vec::new();
        renderer.page(&mut rendered, &name, &ctx)?;
        out.update_file(&mut &*rendered, &rel)?;
        pages += 1;
    }
    log::info!("Rendered {pages} page(s)");

    {
        let asset_dir = path.join("assets");
        if asset_dir.exists() {
            out.copy_dir(&asset_dir, ".")?;
        }
    }

    Ok(())
}

enum FsChange {
    Template,
    Other,
    None,
}

fn main() -> anyhow::Result<()> {
    {
        use simplelog as s;
        s::TermLogger::init(
            s::LevelFilter::Debug,
            s::Config::default(),
            s::TerminalMode::Mixed,
            s::ColorChoice::Auto,
        )
        .unwrap();
    }

    let args = cli::Args::parse();

    #[allow(irrefutable_let_patterns)]
    let args = if let cli::Commands::Build(args) = args.command {
        args
    } else {
        unimplemented!();
    };
    let build_kind = if args.develop {
        cli::BuildKind::Develop
    } else {
        cli::BuildKind::Production
    };

    let tool_config_path = args.path.join("vitrine.toml");

    if args.watch {
        let cvar_pair = Arc::new((Mutex::new(FsChange::Template), Condvar::new()));
        let cvar_pair2 = cvar_pair.clone();
        let path_prefix = args.path.canonicalize()?;
        let mut debouncer = new_debouncer(
            Duration::from_millis(250),
            None,
            move |ev: DebounceEventResult| {
                let (lock, cvar) = &*cvar_pair2;
                let mut change_ = FsChange::Other;

                if let Ok(evs) = ev {
                    if evs
                        .into_iter()
                        .flat_map(|e| e.event.paths.into_iter())
                        .any(|path| {
                            path.strip_prefix(&path_prefix)
                                .map(|path| path.starts_with("templates"))
                                .unwrap_or(false)
                        })
                    {
                        change_ = FsChange::Template;
                    }
                }

                let mut change = lock.lock().unwrap();
                *change = change_;
                cvar.notify_one();
            },
        )
        .unwrap();

        debouncer
            .watcher()
            .watch(&args.path, RecursiveMode::Recursive)
            .unwrap();
        debouncer
            .cache()
            .add_root(&args.path, RecursiveMode::Recursive);

        let mut tool_config: Option<config::ToolConfig> = None;
        let mut renderer: Option<render::Renderer> = None;

        let mut build_watch = move |change: FsChange| -> anyhow::Result<()> {
            let config_changed = {
                let tool_config_: config::ToolConfig =
                    toml::from_str(&std::fs::read_to_string(&tool_config_path)?)
                        .with_context(|| "Parsing vitrine.toml")?;

                let config_changed = Some(&tool_config_) != tool_config.as_ref();
                if config_changed && tool_config.is_some() {
                    log::info!("Reloaded vitrine.toml.");
                }
                tool_config = Some(tool_config_);
                config_changed
            };
            let tool_config = tool_config.as_ref().unwrap();

            let base_url = if build_kind.is_production() {
                &tool_config.base_url
            } else {
                &tool_config.base_url_develop
            };

            if config_changed || matches!(change, FsChange::Template) {
                log::info!("Reloading templates…");
                renderer = Some(render::Renderer::build(
                    base_url.to_owned(),
                    args.path.join("templates"),
                )?);
            }

            log::info!("Hydrating…");
            let instant = std::time::Instant::now();
            let viewport = float::Viewport::top(tool_config.viewport.width);
            if let Err(err) = hydrate(&args.path, &args.out, renderer.as_ref().unwrap(), viewport) {
                log::error!("{:?}", err);
            }
            log::info!(
                "======== Hydrating took {}ms ========",
                std::time::Instant::now()
                    .duration_since(instant)
                    .as_millis()
            );

            Ok(())
        };

        loop {
            let (lock, cvar) = &*cvar_pair;
            let mut change = lock.lock().unwrap();
            while matches!(&*change, &FsChange::None) {
                log::info!("Waiting for file change…");
                change = cvar.wait(change).unwrap();
            }
            let change_ = std::mem::replace(&mut *change, FsChange::None);
            drop(change);

            if let Err(err) = build_watch(change_) {
                log::error!("{:?}", err);
            }
        }
    } else {
        let tool_config: config::ToolConfig =
            toml::from_str(&std::fs::read_to_string(&tool_config_path)?)
                .with_context(|| "Parsing vitrine.toml")?;
        let base_url = if build_kind.is_production() {
            &tool_config.base_url
        } else {
            &tool_config.base_url_develop
        };
        let renderer = render::Renderer::build(base_url.to_owned(), args.path.join("templates"))?;
        let viewport = float::Viewport::top(tool_config.viewport.width);
        hydrate(&args.path, &args.out, &renderer, viewport)?;
    }

    Ok(())
}
