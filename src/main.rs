// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

#![allow(clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use videomix::settings::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live camera mixer with a monitor mosaic", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Print the assembled topology without starting any media engine
    #[arg(long)]
    dry_run: bool,
}

#[cfg(feature = "gstreamer")]
fn check_plugins() -> Result<()> {
    let registry = gst::Registry::get();

    let required = [
        "audioconvert",
        "audiotestsrc",
        "autodetect",
        "compositor",
        "coreelements",
        "debugutilsbad",
        "pango",
        "playback",
        "videobox",
        "videoconvertscale",
        "videorate",
        "videotestsrc",
    ];

    let missing: Vec<_> = required
        .into_iter()
        .filter(|plug| registry.find_plugin(plug).is_none())
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "The following plugins could not be loaded: {}",
            missing.join(", ")
        );
    }

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM.
#[cfg(feature = "gstreamer")]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::{
        ctrl_c,
        unix::{signal, SignalKind},
    };

    let mut sig_term = signal(SignalKind::terminate()).context("can not setup SIGTERM handler")?;
    tokio::select! {
        result = ctrl_c() => {
            result.context("can not listen for Ctrl-C")?;
            info!("received Ctrl-C");
        }
        _ = sig_term.recv() => { info!("received SIGTERM"); }
    }
    Ok(())
}

#[cfg(feature = "gstreamer")]
fn play(runtime: &tokio::runtime::Runtime, settings: &Settings) -> Result<()> {
    use gst::glib;

    gst::init()?;
    check_plugins()?;

    // Run a MainLoop on a separate thread so gstreamer bus watches work
    let main_loop = glib::MainLoop::new(None, false);
    std::thread::spawn({
        let main_loop = main_loop.clone();

        move || {
            main_loop.run();
        }
    });

    let result = runtime.block_on(videomix::run(settings, shutdown_signal()));
    main_loop.quit();

    result
}

#[cfg(not(feature = "gstreamer"))]
fn play(_runtime: &tokio::runtime::Runtime, _settings: &Settings) -> Result<()> {
    anyhow::bail!("built without the `gstreamer` feature, only --dry-run is available")
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::init();

    let settings = Settings::load(&args.config)
        .with_context(|| format!("Failed to read config '{}'", args.config))?;
    info!(
        "loaded {} sources for a {} mosaic from '{}'",
        settings.sources.len(),
        settings.canvas,
        args.config
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio async runtime")?;

    if args.dry_run {
        let topology = runtime.block_on(videomix::dry_run(&settings))?;
        println!("{topology}");
        return Ok(());
    }

    if let Err(e) = play(&runtime, &settings) {
        eprintln!("Exit on failure: {e:?}");
        std::process::exit(-1);
    }

    Ok(())
}
