use arcslider_app::config;
use arcslider_app::gui::app::{AppInit, AppModel};
use arcslider_app::sys::runtime;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial slider value, clamped to 0..=1
    #[arg(short, long)]
    value: Option<f64>,

    /// Jump straight to tapped values instead of easing
    #[arg(long)]
    immediate: bool,

    /// Write the bundled default config to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config_path = config::resolve_config_path(args.config.as_deref())?;

    if args.write_default_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    // GTK must not see our own flags
    let app = RelmApp::new("org.arcslider.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        initial_value: args.value,
        force_immediate: args.immediate,
        rx,
    });

    Ok(())
}
