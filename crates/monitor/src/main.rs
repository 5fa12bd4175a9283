//! Plant Monitor - Main Entry Point

fn main() -> anyhow::Result<()> {
    monitor::start()
}
