use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use strum::Display;
use tokio::sync::mpsc;

use crate::resolver::ResponseTable;
use crate::transcript::{Message, Sender, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Ready,
    Processing,
}

/// A resolved response travelling back from a turn's worker task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub turn: TurnId,
    pub response: String,
}

/// Owns the transcript and status. Only the task holding the controller may
/// mutate them; workers report back through the completion channel.
pub struct TurnController {
    table: Arc<ResponseTable>,
    delay: Duration,
    transcript: Transcript,
    status: Status,
    next_turn: u64,
    outstanding: usize,
    completions: mpsc::UnboundedSender<Completion>,
}

impl TurnController {
    pub fn new(
        table: Arc<ResponseTable>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, completion_rx) = mpsc::unbounded_channel();

        let controller = Self {
            table,
            delay,
            transcript: Transcript::default(),
            status: Status::Ready,
            next_turn: 0,
            outstanding: 0,
            completions,
        };

        (controller, completion_rx)
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Appends an assistant message that is not the answer to any turn.
    pub fn announce(&mut self, text: impl Into<String>) {
        self.transcript.push(Message::now(Sender::Assistant, text));
    }

    /// Starts a turn for `input`. Blank input is ignored.
    ///
    /// The user message is recorded immediately; the response arrives later
    /// on the completion channel and must be fed to [`Self::complete`].
    /// Turns are never cancelled or serialized against each other.
    pub fn submit(&mut self, input: &str) -> Option<TurnId> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let turn = TurnId(self.next_turn);
        self.next_turn += 1;
        self.outstanding += 1;

        self.transcript.push(Message::now(Sender::User, input));
        self.status = Status::Processing;
        tracing::debug!(%turn, outstanding = self.outstanding, "turn submitted");

        let table = Arc::clone(&self.table);
        let delay = self.delay;
        let input = input.to_owned();
        let completions = self.completions.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let response = table.resolve(&input);

            if completions.send(Completion { turn, response }).is_err() {
                tracing::debug!(%turn, "session closed before the turn completed");
            }
        });

        Some(turn)
    }

    pub fn complete(&mut self, completion: Completion) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.transcript
            .push(Message::now(Sender::Assistant, completion.response));
        self.status = Status::Ready;
        tracing::debug!(turn = %completion.turn, outstanding = self.outstanding, "turn completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use tokio::time::Instant;

    fn controller(delay: Duration) -> (TurnController, mpsc::UnboundedReceiver<Completion>) {
        TurnController::new(Arc::new(Profile::Classic.table().unwrap()), delay)
    }

    #[tokio::test(start_paused = true)]
    async fn hello_turn_runs_end_to_end() {
        let (mut controller, mut completions) = controller(Duration::from_secs(2));
        let started = Instant::now();

        let turn = controller.submit("  hello  ").unwrap();
        assert_eq!(controller.status(), Status::Processing);
        assert_eq!(controller.transcript().len(), 1);
        let user = &controller.transcript().messages()[0];
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.text, "hello");

        let completion = completions.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(completion.turn, turn);

        controller.complete(completion);
        assert_eq!(controller.status(), Status::Ready);
        assert_eq!(controller.outstanding(), 0);

        let assistant = &controller.transcript().messages()[1];
        assert_eq!(assistant.sender, Sender::Assistant);
        assert_eq!(assistant.text, controller.table().resolve("hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_is_a_no_op() {
        let (mut controller, _completions) = controller(Duration::from_secs(2));

        assert_eq!(controller.submit(""), None);
        assert_eq!(controller.submit(" \t \n"), None);
        assert!(controller.transcript().is_empty());
        assert_eq!(controller.status(), Status::Ready);
        assert_eq!(controller.outstanding(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_arrives_before_the_delay() {
        let (mut controller, mut completions) = controller(Duration::from_millis(1_500));
        controller.submit("xyz123").unwrap();

        tokio::time::advance(Duration::from_millis(1_499)).await;
        assert!(completions.try_recv().is_err());

        let completion = completions.recv().await.unwrap();
        assert!(completion.response.contains("xyz123"));
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_turns_are_independent() {
        let (mut controller, mut completions) = controller(Duration::from_secs(2));

        let first = controller.submit("hello").unwrap();
        let second = controller.submit("What can you do").unwrap();
        assert!(first < second);
        assert_eq!(controller.outstanding(), 2);

        let users: Vec<_> = controller
            .transcript()
            .messages()
            .iter()
            .map(|message| message.text.as_str())
            .collect();
        assert_eq!(users, ["hello", "What can you do"]);

        let mut received = vec![completions.recv().await.unwrap()];
        controller.complete(received[0].clone());
        assert_eq!(controller.status(), Status::Ready);
        assert_eq!(controller.outstanding(), 1);

        received.push(completions.recv().await.unwrap());
        controller.complete(received[1].clone());
        assert_eq!(controller.outstanding(), 0);
        assert_eq!(controller.transcript().len(), 4);

        received.sort_by_key(|completion| completion.turn);
        assert_eq!(received[0].response, controller.table().resolve("hello"));
        assert!(received[1].response.starts_with("In the full Astro AI application, I can:"));
    }

    #[tokio::test(start_paused = true)]
    async fn late_completions_after_close_are_dropped() {
        let (mut controller, completions) = controller(Duration::from_secs(2));
        controller.submit("hello").unwrap();
        drop(completions);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(controller.transcript().len(), 1);
    }
}
