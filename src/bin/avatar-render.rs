use std::path::PathBuf;

use anyhow::Context as _;
use avatar_renderer::{AvatarBuilder, AvatarRequest, DirectoryAssets};
use clap::Parser;

/// Render a layered avatar to a PNG file.
#[derive(Parser, Debug)]
#[command(name = "avatar-render", version)]
struct Cli {
    /// Directory containing shirt.png, skin.png, hair.png, shading.png and outline.png.
    #[arg(long, env = "AVATAR_ASSETS", default_value = ".")]
    assets: PathBuf,

    /// Hair transform: `hr(<degrees>)`, a hex color or `rgb(r,g,b)`.
    #[arg(long, default_value = "")]
    hair: String,

    /// Shirt transform, same syntax as `--hair`.
    #[arg(long, default_value = "")]
    shirt: String,

    /// Output width in pixels; height follows the aspect ratio.
    #[arg(long)]
    width: Option<u32>,

    /// Pad the output to a square.
    #[arg(long)]
    square: bool,

    /// Request JSON; replaces --hair, --shirt, --width and --square.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let request = match &cli.request {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read request '{}'", path.display()))?;
            AvatarRequest::from_json(&json).with_context(|| "parse request JSON")?
        }
        None => AvatarRequest {
            hair: cli.hair.clone(),
            shirt: cli.shirt.clone(),
            width: cli.width,
            square: cli.square,
        },
    };

    let builder = AvatarBuilder::new(DirectoryAssets::new(&cli.assets));
    tracing::info!(
        assets = %builder.assets().root().display(),
        key = %request.cache_key(),
        "rendering avatar"
    );

    let png = builder
        .render(&request)
        .with_context(|| format!("render avatar from '{}'", cli.assets.display()))?;

    if let Some(parent) = cli.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&cli.out, &png)
        .with_context(|| format!("write png '{}'", cli.out.display()))?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
