use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tiny_lib::run(tiny_lib::Args::parse()).await
}
