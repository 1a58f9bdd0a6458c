mod menu;
mod script;

use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use contextual::{Renderer, Size, Window};

use menu::Page;
use script::Script;

/// Plays a scripted pointer session against the context menu page.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML script to play. The built-in session is used when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Directory to write a PNG of every frame into.
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = 800f32)]
    width: f32,
    #[arg(long, default_value_t = 600f32)]
    height: f32,
    #[arg(long, default_value_t = 1f32)]
    scale: f32
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let args = Args::parse();

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::builtin()?
    };

    if let Some(out) = &args.out {
        fs::create_dir_all(out)
            .with_context(|| format!("failed to create output directory {}", out.display()))?;
    }

    let mut renderer = Renderer::default();
    renderer.set_scale_factor(args.scale);

    let mut window = Window::new(Size::new(args.width, args.height));
    let mut page = Page::new();

    let list = window.frame(|ctx| page.layout(ctx));
    save(&renderer, &args, &window, &list, 0)?;

    for (index, step) in script.steps.iter().enumerate() {
        step.apply(&mut window, &mut page);
        let list = window.frame(|ctx| page.layout(ctx));

        tracing::info!(
            step = index + 1,
            action = ?step,
            menu_open = page.menu_open(),
            selected = ?page.selected(),
            fill = ?page.left_fill(),
            "frame"
        );

        save(&renderer, &args, &window, &list, index + 1)?;
    }

    Ok(())
}

fn save(
    renderer: &Renderer,
    args: &Args,
    window: &Window,
    list: &contextual::DisplayList,
    index: usize
) -> anyhow::Result<()> {
    let Some(out) = &args.out else {
        return Ok(());
    };

    let path = out.join(format!("frame-{index:03}.png"));
    renderer.save_png(list, window.size(), &path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), "frame saved");

    Ok(())
}
