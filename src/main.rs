use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use slapsticker::platform::{NoopVideoSink, TestPatternCamera};
use slapsticker::{
    CaptureController, ControllerConfig, Gallery, Result, StickerRef, SurfaceSize, TitleField,
    STICKER_CATALOG,
};

/// Capture test-pattern snapshots with an optional sticker overlay
#[derive(Parser)]
#[command(name = "slapsticker", version)]
struct Cli {
    /// Drawing surface width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Drawing surface height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Sticker to composite, by catalog name (see --list-stickers)
    #[arg(long)]
    sticker: Option<String>,

    /// Title for the captured pictures
    #[arg(long)]
    title: Option<String>,

    /// Number of pictures to capture
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Write slap-pic-<n>.png files into this directory instead of
    /// printing JSON to stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// List the sticker catalog as JSON and exit
    #[arg(long)]
    list_stickers: bool,
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_stickers {
        let json = serde_json::to_string_pretty(STICKER_CATALOG)
            .map_err(|e| slapsticker::Error::Other(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    let config = ControllerConfig {
        surface: SurfaceSize {
            width: cli.width,
            height: cli.height,
        },
        ..Default::default()
    };
    let camera = Arc::new(TestPatternCamera::new(cli.width, cli.height));
    let mut controller = CaptureController::new(config, camera);
    controller.attach_draw_surface(cli.width, cli.height)?;
    controller.attach_video_sink(Some(Box::new(NoopVideoSink::new())))?;

    if let Some(name) = &cli.sticker {
        let sticker = StickerRef::find(name).ok_or_else(|| {
            slapsticker::Error::Config(format!("unknown sticker {:?}, try --list-stickers", name))
        })?;
        controller.set_overlay(Some(sticker.load()?));
    }

    let mut title = TitleField::default();
    if let Some(text) = &cli.title {
        title.edit(text.clone());
    }

    let mut gallery = Gallery::new();
    for _ in 0..cli.count {
        gallery.push(controller.capture(title.text())?);
    }
    controller.attach_video_sink(None)?;

    match &cli.out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| slapsticker::Error::Other(format!("cannot create {:?}: {}", dir, e)))?;
            for index in 0..gallery.len() {
                let (filename, bytes) = gallery.export(index)?;
                let path = dir.join(&filename);
                std::fs::write(&path, bytes)
                    .map_err(|e| slapsticker::Error::Other(format!("cannot write {:?}: {}", path, e)))?;
                eprintln!("wrote {}", path.display());
            }
        }
        None => {
            let pictures: Vec<_> = gallery.iter().collect();
            let json = serde_json::to_string(&pictures)
                .map_err(|e| slapsticker::Error::Other(e.to_string()))?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("slapsticker: {}", e);
        std::process::exit(1);
    }
}
