use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use nameforge::{ExportedImage, Forge, ForgeConfig, Seed, SequenceSeeds};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nameforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a name, plus optional shuffled variants, as PNG posters.
    Forge(ForgeArgs),
    /// Re-render one (name, seed) at several device scales through the resize path.
    Rescale(RescaleArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON config file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra font directory.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Skip system font discovery.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write a `<file>.json` manifest next to every image.
    #[arg(long, default_value_t = false)]
    manifest: bool,
}

#[derive(Parser, Debug)]
struct ForgeArgs {
    #[arg(long)]
    name: String,

    /// Seed of the first render; random when omitted.
    #[arg(long)]
    seed: Option<f64>,

    /// Number of renders: the first, then `variants - 1` shuffles.
    #[arg(long, default_value_t = 1)]
    variants: u32,

    /// Device pixel scale.
    #[arg(long)]
    scale: Option<f64>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct RescaleArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    seed: f64,

    /// Device scales to re-render at, in order.
    #[arg(long = "scale", required = true, num_args = 1..)]
    scales: Vec<f64>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Forge(args) => cmd_forge(args),
        Command::Rescale(args) => cmd_rescale(args),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("NAMEFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs, scale: Option<f64>) -> anyhow::Result<ForgeConfig> {
    let mut cfg = match &common.config {
        Some(path) => ForgeConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ForgeConfig::default(),
    };
    if let Some(scale) = scale {
        cfg.device_scale = scale;
    }
    if let Some(dir) = &common.fonts_dir {
        cfg.fonts_dir = Some(dir.clone());
    }
    if common.no_system_fonts {
        cfg.load_system_fonts = false;
    }
    Ok(cfg)
}

fn save(img: &ExportedImage, common: &CommonArgs) -> anyhow::Result<()> {
    let path = img
        .write_to_dir(&common.out_dir)
        .with_context(|| format!("export '{}'", img.file_name()))?;
    if common.manifest {
        img.write_manifest_to_dir(&common.out_dir)
            .with_context(|| format!("write manifest for '{}'", img.file_name()))?;
    }
    eprintln!("wrote {} (seed {})", path.display(), img.state().seed);
    Ok(())
}

fn cmd_forge(args: ForgeArgs) -> anyhow::Result<()> {
    if args.variants == 0 {
        anyhow::bail!("--variants must be at least 1");
    }
    let cfg = load_config(&args.common, args.scale)?;
    let mut forge = Forge::new(cfg)?;

    match args.seed {
        Some(seed) => forge.forge(&args.name, Seed::new(seed))?,
        None => forge.forge_new(&args.name)?,
    };
    save(&forge.export()?, &args.common)?;

    for n in 2..=args.variants {
        forge.shuffle()?;
        save(&forge.export()?.with_suffix(&format!("-{n}")), &args.common)?;
    }
    Ok(())
}

fn cmd_rescale(args: RescaleArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common, None)?;
    let mut forge = Forge::with_seed_source(cfg, SequenceSeeds::new(0))?;
    forge.forge(&args.name, Seed::new(args.seed))?;

    for scale in args.scales {
        let now = Instant::now();
        forge
            .request_resize(scale, now)
            .with_context(|| format!("resize to {scale}x"))?;
        let state = forge
            .poll_resize(now + forge.resize_debounce())?
            .context("resize did not fire after its debounce interval")?;
        tracing::debug!(scale, width_px = state.width_px, "rescaled");
        save(&forge.export()?.with_suffix(&format!("@{scale}x")), &args.common)?;
    }
    Ok(())
}
