use colored::Colorize;

use crate::profile::Profile;
use crate::transcript::{Message, Sender};
use crate::turn::Status;

/// Where the event loop sends everything the user should see.
pub trait View {
    fn show_message(&mut self, message: &Message);
    fn show_status(&mut self, status: Status);
    fn show_notice(&mut self, text: &str);
    fn clear(&mut self);
}

pub struct TerminalView {
    profile: Profile,
}

impl TerminalView {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    fn label(&self, sender: Sender) -> &'static str {
        match sender {
            Sender::User => self.profile.user_label(),
            Sender::Assistant => self.profile.assistant_label(),
        }
    }

    fn header(&self, message: &Message) -> String {
        format!("[{}] {}:", message.timestamp, self.label(message.sender))
    }
}

impl View for TerminalView {
    fn show_message(&mut self, message: &Message) {
        let header = match message.sender {
            Sender::User => self.header(message).bright_cyan().bold(),
            Sender::Assistant => self.header(message).bright_magenta().bold(),
        };

        match self.profile.separator() {
            Some(rule) => {
                println!("\n{header}");
                println!("{}", message.text);
                println!("{}", rule.bright_black());
            }
            None => {
                println!("{header} {}", message.text);
                println!();
            }
        }
    }

    fn show_status(&mut self, status: Status) {
        let text = self.profile.status_text(status);
        match status {
            Status::Ready => println!("{}", text.bright_green()),
            Status::Processing => println!("{}", text.yellow()),
        }
    }

    fn show_notice(&mut self, text: &str) {
        println!("{}", text.bright_black());
    }

    fn clear(&mut self) {
        // ANSI: clear screen, cursor home.
        print!("\x1B[2J\x1B[H");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: Sender) -> Message {
        Message {
            sender,
            text: "hello".to_owned(),
            timestamp: "09:41:00".to_owned(),
        }
    }

    #[test]
    fn headers_use_profile_labels() {
        let classic = TerminalView::new(Profile::Classic);
        assert_eq!(classic.header(&message(Sender::User)), "[09:41:00] You:");
        assert_eq!(classic.header(&message(Sender::Assistant)), "[09:41:00] Astro AI:");

        let guided = TerminalView::new(Profile::Guided);
        assert_eq!(guided.header(&message(Sender::User)), "[09:41:00] YOU:");
        assert_eq!(guided.header(&message(Sender::Assistant)), "[09:41:00] ASTRO AI:");
    }
}
