mod app;
mod audio;
mod config;
mod library;
mod logging;
mod metadata;
mod mpris;
mod player;
mod runtime;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
