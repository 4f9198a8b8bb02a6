//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chatlens::analysis::{
    SeriesKind, analyze_breaks, build_series, sender_counts, top_words, user_averages,
};
use chatlens::cli::Args;
use chatlens::config::OutputConfig;
use chatlens::format::{OutputFormat, series_to_string, write_series};
use chatlens::library::Library;
use chatlens::store::ConversationStore;
use chatlens::{ChatlensError, Conversation, report};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.log_level());

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatlens={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let mut library = Library::open(args.library_config());

    if args.all {
        println!("Parsing all documents, this might take a while...");
        let batch = library.load_all()?;
        print!("{}", report::batch_summary(&batch));
    }

    match &args.file {
        Some(file) => {
            let conversation = library.conversation(file)?;
            analyze(args, &conversation)?;
        }
        None if !args.all => list(&library)?,
        None => {}
    }

    Ok(())
}

fn list<S: ConversationStore>(library: &Library<S>) -> Result<(), ChatlensError> {
    print!("{}", report::listing(&library.conversations()?));
    println!();
    println!("Select a file name to run the analysis on.");
    println!("Example use:");
    println!("    chatlens -f 760.html");
    Ok(())
}

fn analyze(args: &Args, conversation: &Conversation) -> Result<(), ChatlensError> {
    let messages = &conversation.messages;

    println!();
    print!("{}", report::conversation_header(conversation));
    println!();

    if args.users {
        print!("{}", report::user_stats(&sender_counts(messages)));
        println!();
    }

    if let Some(config) = args.word_config() {
        print!("{}", report::top_words(&top_words(messages, &config), config.top_n));
        println!();
    }

    if args.averages {
        print!("{}", report::user_averages(&user_averages(messages)));
        println!();
    }

    if !args.no_breaks {
        print!("{}", report::breaks(&analyze_breaks(messages)));
    }

    if let Some(series) = args.series {
        export_series(args, conversation, series.into())?;
    }

    Ok(())
}

fn export_series(
    args: &Args,
    conversation: &Conversation,
    kind: SeriesKind,
) -> Result<(), ChatlensError> {
    let points = build_series(&conversation.messages, kind);
    let config = OutputConfig::new();

    match &args.output {
        Some(path) => {
            let format = match args.format {
                Some(format) => format.into(),
                None => OutputFormat::from_path(path)?,
            };
            write_series(&points, path, format, &config)?;
            println!();
            println!("Wrote {} {} rows to {}", points.len(), kind, path.display());
        }
        None => {
            let format: OutputFormat = args.format.map(Into::into).unwrap_or_default();
            println!();
            println!("{}", series_to_string(&points, format, &config)?.trim_end());
        }
    }

    Ok(())
}
