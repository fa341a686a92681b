use std::{io, path::Path, process};

use colored::Colorize;
use env_logger::Env;
use mp4tags::{DispatchReport, Invocation, TagError, collector};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_warnings(path: &Path, report: &DispatchReport) {
    for warning in &report.warnings {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("{}: {warning}", path.display()).yellow()
        );
    }
}

fn run() -> Result<(), TagError> {
    match mp4tags::collect(std::env::args_os())? {
        Invocation::Completions(shell) => {
            let mut command = collector::command();
            clap_complete::generate(shell, &mut command, "mp4tags", &mut io::stdout());
        }
        Invocation::Tag {
            request,
            files,
            verbose,
        } => {
            init_logging(verbose);
            let committed = mp4tags::tag_files(&files, &request, print_warnings)?;
            log::info!("Updated {committed} file(s)");
        }
    }
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        match &error {
            TagError::Usage(usage) => eprint!("{}", usage.render()),
            _ => eprintln!("{} {error}", "error:".red().bold()),
        }
        if error.wants_usage() {
            eprintln!();
            eprint!("{}", collector::command().render_help());
        }
        process::exit(error.exit_code());
    }
}
