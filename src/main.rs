use std::sync::Arc;

use anyhow::Context;
use astro_chat::config::{Overrides, Settings};
use astro_chat::turn::TurnController;
use astro_chat::ui;
use astro_chat::view::TerminalView;
use colored::Colorize;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "astro-chat",
    about = "Astro AI demo chat with simulated responses"
)]
struct Args {
    #[structopt(flatten)]
    overrides: Overrides,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    astro_chat::init_logging();
    let args = Args::from_args();

    let settings = Settings::resolve(args.overrides, Overrides::from_env()?);
    let table = settings
        .table()
        .await
        .context("Failed to prepare the response table")?;

    println!("{}", "🚀 Starting Astro AI Demo...".bright_cyan().bold());
    println!(
        "{}",
        format!("Profile: {} | type 'quit' to leave, '/help' for commands", settings.profile)
            .bright_black()
    );
    println!();

    let (mut controller, completions) = TurnController::new(Arc::new(table), settings.delay);
    controller.announce(settings.profile.welcome());

    let inputs = ui::spawn_reader("> ");
    let profile = settings.profile;
    let session = tokio::spawn(async move {
        let mut view = TerminalView::new(profile);
        ui::run(controller, completions, inputs, &mut view).await
    });

    if let Err(err) = session.await {
        tracing::error!("Chat session ended abnormally: {err}");
        eprintln!("{}", format!("Error: {err}").red());
    }

    println!("{}", "👋 Astro AI Demo closed".bright_green());

    Ok(())
}
