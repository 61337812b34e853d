//! `shadelab` binary: opens the demo scene in a window.
//!
//! Options are read from `shadelab.toml` in the working directory when it
//! exists. Logging goes through `env_logger` (`RUST_LOG` overrides the
//! default `info` level).

use std::path::Path;

use shadelab::options::Options;
use shadelab::{KeyAction, Viewer};

const OPTIONS_FILE: &str = "shadelab.toml";

fn log_controls(options: &Options) {
    let bindings = &options.keybindings;
    let key = |action| bindings.key_for(action).unwrap_or("unbound");
    log::info!("Controls:");
    log::info!(
        "  move: {} {} {} {}, look: mouse, zoom: scroll",
        key(KeyAction::MoveForward),
        key(KeyAction::MoveLeft),
        key(KeyAction::MoveBackward),
        key(KeyAction::MoveRight)
    );
    for action in KeyAction::TOGGLES {
        log::info!("  {}: {action:?}", key(action));
    }
    log::info!("  {}: exit", key(KeyAction::Exit));
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let options = Options::load_or_default(Path::new(OPTIONS_FILE));
    log_controls(&options);

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
