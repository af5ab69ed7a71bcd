use std::path::PathBuf;

use anyhow::Result;
use astro_chat::launcher::{self, ABOUT, Choice, LaunchError, MENU, SPLASH};
use colored::Colorize;
use rustyline::error::ReadlineError;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "astro-launch", about = "Splash screen that starts the Astro AI demo chat")]
struct Args {
    /// Chat executable to start instead of the one next to this launcher
    #[structopt(long, parse(from_os_str))]
    companion: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    astro_chat::init_logging();
    let args = Args::from_args();

    for line in SPLASH.lines() {
        println!("{}", line.bright_cyan().bold());
    }
    println!("{}", "Ready to launch".magenta());
    println!();

    if let Some(Choice::Launch) = menu()? {
        start_chat(args.companion).await;
    }

    Ok(())
}

/// Loops until the user launches or leaves. The editor is dropped before the
/// chat starts so the child gets the terminal to itself.
fn menu() -> Result<Option<Choice>> {
    let mut editor = rustyline::DefaultEditor::new()?;
    println!("{MENU}");

    loop {
        match editor.readline("astro> ") {
            Ok(line) => match line.trim().parse::<Choice>() {
                Ok(Choice::About) => println!("{}", launcher::dialog("About Astro AI", ABOUT)),
                Ok(choice) => return Ok(Some(choice)),
                Err(_) => println!("{}", MENU.bright_black()),
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

async fn start_chat(companion: Option<PathBuf>) {
    let result = match companion {
        Some(path) => launcher::launch(&path).await,
        None => match launcher::companion_path() {
            Ok(path) => launcher::launch(&path).await,
            Err(err) => Err(err),
        },
    };

    match result {
        Ok(finished) => eprint!("{}", finished.stderr),
        Err(err) => {
            tracing::warn!("{err}");
            let body = match &err {
                LaunchError::Failed { stderr, .. } if !stderr.trim().is_empty() => {
                    format!("Failed to launch demo: {err}\n\n{}", stderr.trim_end())
                }
                LaunchError::CompanionNotFound(_) => err.to_string(),
                _ => format!("Failed to launch demo: {err}"),
            };
            eprintln!("{}", launcher::dialog("Error", &body).red());
        }
    }
}
