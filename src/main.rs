mod app;
mod artwork;
mod config;
mod edit;
mod fetch;
mod library;
mod lookup;
mod metadata;
mod persist;
mod runtime;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
