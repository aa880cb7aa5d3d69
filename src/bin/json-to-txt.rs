use std::path::PathBuf;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use height_grid::io_json::read_json;
use height_grid::io_txt::write_txt;
use height_grid::Result;

#[derive(Parser, Debug)]
struct Args {
    /// heights document to read
    json_file: PathBuf,
    /// space-delimited text grid to write
    txt_file: PathBuf,
}

fn run(args:&Args) -> Result<()> {
    let grid = read_json(&args.json_file)?.into_grid();
    write_txt(&grid,&args.txt_file)?;
    info!(output = %args.txt_file.display(), rows = grid.n_rows(), "wrote text grid");
    Ok(())
}

fn main() {

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "height_grid=info,json_to_txt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("failed to convert {}: {}", args.json_file.display(), e);
        std::process::exit(1);
    }

}
