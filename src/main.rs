use std::io::stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, ExecutableCommand};
use log::info;
use phongtracer::{PhongShadingModel, RenderModel};

mod cli;
mod logger;
mod progress;
mod scenes;

use cli::CliArguments;
use logger::init_logger;
use progress::TerminalProgress;

fn main() -> Result<()> {
    let args = CliArguments::parse();
    init_logger(args.log_level.into());

    // Rendering cannot be interrupted, so Ctrl-C simply ends the process.
    ctrlc::set_handler(|| {
        let _ = stdout().execute(cursor::Show);
        std::process::exit(130);
    })
    .context("failed to install Ctrl-C handler")?;

    let (scene, camera) = scenes::build(&args)?;
    info!("{scene}");

    let mut model = RenderModel::new(PhongShadingModel);
    model.set_scene(Arc::new(scene));
    model.set_camera(camera);
    model.set_reflection_depth(args.reflections);
    if args.shadows {
        model.enable_shadows();
    }

    let num_threads = args.threads.unwrap_or(
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    );

    info!("Starting render");
    info!("\tImage size:   {}x{}", args.width, args.height);
    info!("\tSupersamples: {}", args.supersamples);
    info!("\tThreads:      {}", num_threads);

    let progress = (!args.no_progress).then(|| Arc::new(TerminalProgress::start()));
    if let Some(progress) = &progress {
        model.set_observer(progress.clone());
    }

    // The calling thread renders too, so spawn one fewer.
    let result = match num_threads {
        0 | 1 => model.render(),
        n => model.render_threaded(n - 1),
    };
    if let Some(progress) = &progress {
        progress.finish();
    }
    let image = result.context("render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("couldn't save {}", args.output.display()))?;
    info!("Image saved to \"{}\"", args.output.display());
    Ok(())
}
