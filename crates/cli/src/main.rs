// ABOUTME: CLI for running the wikidom DOM post-processors over annotated HTML.
// ABOUTME: Reads a fragment from a file or stdin, normalizes it and prints the resulting HTML.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wikidom_postproc::{load_document, load_fragment, to_html, Env, Pipeline, TagWidths};

/// Normalize template marker placement in annotated wikitext HTML.
#[derive(Parser, Debug)]
#[command(name = "wikidom")]
#[command(about = "Run DOM post-processing passes over annotated HTML", long_about = None)]
struct Args {
    /// Input HTML file. Use "-" or omit to read from stdin.
    input: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Treat the input as a full document (<html>/<body>) instead of a body fragment
    #[arg(long)]
    document: bool,

    /// JSON file of tag width overrides, e.g. {"span": [0, 0]}
    #[arg(long = "tag-widths")]
    tag_widths: Option<PathBuf>,

    /// Log the DOM after every pass (needs -vv or RUST_LOG=trace)
    #[arg(long = "dump-dom")]
    dump_dom: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = Env::builder().dump_dom(args.dump_dom);
    if let Some(path) = &args.tag_widths {
        let overrides = TagWidths::from_json_file(path)
            .with_context(|| format!("loading tag widths from {}", path.display()))?;
        builder = builder.merge_tag_widths(&overrides);
    }
    let env = builder.build();

    let html = read_input(args.input.as_deref())?;
    let mut doc = if args.document {
        load_document(&html)
    } else {
        load_fragment(&html)
    }
    .context("loading input HTML")?;

    let pipeline = Pipeline::default_post_processors();
    log::info!("running passes: {}", pipeline.names().join(", "));
    pipeline.run(&env, &mut doc);

    let output = to_html(&doc);
    match &args.output {
        Some(path) => fs::write(path, output + "\n")
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", output),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn read_input(target: Option<&str>) -> Result<String> {
    match target {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf.trim_end().to_string())
        }
        Some(path) => {
            let html = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            Ok(html.trim_end().to_string())
        }
    }
}
