use itertools::Itertools;
use rustyline::error::ReadlineError;
use strum::EnumString;
use tokio::sync::mpsc;

use crate::turn::{Completion, TurnController};
use crate::view::View;

/// What the line reader hands to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Command {
    Help,
    Topics,
    Clear,
}

const HELP: &str = "Commands: /help, /topics, /clear. Type 'quit' or press Ctrl-D to leave.";

/// Reads lines on a dedicated thread so the event loop never blocks on the
/// terminal. The channel closes on `quit`, `exit`, Ctrl-D or a read error.
pub fn spawn_reader(prompt: &'static str) -> mpsc::UnboundedReceiver<Input> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match rustyline::DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                tracing::error!("Failed to open the terminal for reading: {err}");
                return;
            }
        };

        loop {
            let input = match editor.readline(prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == "quit" || trimmed == "exit" {
                        break;
                    }
                    if !trimmed.is_empty() {
                        let _ = editor.add_history_entry(trimmed);
                    }
                    Input::Line(line)
                }
                Err(ReadlineError::Interrupted) => Input::Interrupted,
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    tracing::error!("Failed to read input: {err}");
                    break;
                }
            };

            if tx.send(input).is_err() {
                break;
            }
        }
    });

    rx
}

/// The single task that owns the controller. Input lines and turn
/// completions are applied here and nowhere else, then rendered.
///
/// Returns once input closes. Turns still in flight are abandoned.
pub async fn run<V: View>(
    mut controller: TurnController,
    mut completions: mpsc::UnboundedReceiver<Completion>,
    mut inputs: mpsc::UnboundedReceiver<Input>,
    view: &mut V,
) -> TurnController {
    let mut rendered = render_new(&controller, view, 0);
    view.show_status(controller.status());

    loop {
        tokio::select! {
            input = inputs.recv() => match input {
                Some(Input::Line(line)) => match parse_command(&line) {
                    Some(command) => run_command(command, &controller, view),
                    None => {
                        if controller.submit(&line).is_some() {
                            rendered = render_new(&controller, view, rendered);
                            view.show_status(controller.status());
                        }
                    }
                },
                Some(Input::Interrupted) => view.show_notice("CTRL-C detected. Type 'quit' to exit."),
                None => break,
            },
            Some(completion) = completions.recv() => {
                controller.complete(completion);
                rendered = render_new(&controller, view, rendered);
                view.show_status(controller.status());
            }
        }
    }

    if controller.outstanding() > 0 {
        tracing::debug!(outstanding = controller.outstanding(), "closing with turns in flight");
    }

    controller
}

fn render_new<V: View>(controller: &TurnController, view: &mut V, rendered: usize) -> usize {
    for message in controller.transcript().since(rendered) {
        view.show_message(message);
    }
    controller.transcript().len()
}

fn parse_command(line: &str) -> Option<Result<Command, String>> {
    let name = line.trim().strip_prefix('/')?;
    Some(name.parse().map_err(|_| name.to_owned()))
}

fn run_command<V: View>(command: Result<Command, String>, controller: &TurnController, view: &mut V) {
    match command {
        Ok(Command::Help) => view.show_notice(HELP),
        Ok(Command::Topics) => view.show_notice(&format!(
            "Try asking about: {}",
            controller.table().topics().join(", ")
        )),
        Ok(Command::Clear) => view.clear(),
        Err(name) => view.show_notice(&format!("Unknown command /{name}. {HELP}")),
    }
}
