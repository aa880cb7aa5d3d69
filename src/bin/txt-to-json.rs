use std::path::PathBuf;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use height_grid::GridConverter;

#[derive(Parser, Debug)]
struct Args {
    /// space-delimited height grid to read, one row per line
    txt_file: PathBuf,
    /// output json file. Defaults to the input with its .txt extension replaced by .json
    json_file: Option<PathBuf>,

    /// indent the json output
    #[clap(short, long)]
    pretty: bool,

    /// log at debug level unless RUST_LOG says otherwise
    #[clap(short, long)]
    debug: bool,
}

fn main() {

    let args = Args::parse();

    let default_level = if args.debug { "height_grid=debug,txt_to_json=debug" } else { "height_grid=info,txt_to_json=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut converter = GridConverter::new(args.txt_file).with_pretty(args.pretty);
    if let Some(json_file) = args.json_file {
        converter = converter.with_output(json_file);
    }

    if let Err(e) = converter.run() {
        error!("failed to convert {}: {}", converter.input().display(), e);
        std::process::exit(1);
    }

}
