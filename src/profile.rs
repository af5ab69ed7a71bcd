use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};

use crate::resolver::{ResponseTable, Rule};
use crate::turn::Status;

/// The two built-in chat personalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(try_from = "String")]
pub enum Profile {
    /// Single-keyword table, two second pause, short welcome.
    #[default]
    Classic,
    /// Keyword groups, faster replies, banner welcome and ruled messages.
    Guided,
}

impl TryFrom<String> for Profile {
    type Error = strum::ParseError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl Profile {
    pub fn delay(self) -> Duration {
        match self {
            Profile::Classic => Duration::from_millis(2_000),
            Profile::Guided => Duration::from_millis(1_500),
        }
    }

    pub fn assistant_label(self) -> &'static str {
        match self {
            Profile::Classic => "Astro AI",
            Profile::Guided => "ASTRO AI",
        }
    }

    pub fn user_label(self) -> &'static str {
        match self {
            Profile::Classic => "You",
            Profile::Guided => "YOU",
        }
    }

    pub fn status_text(self, status: Status) -> &'static str {
        match (self, status) {
            (Profile::Classic, Status::Ready) => "Status: Ready | Demo Mode Active",
            (Profile::Classic, Status::Processing) => "Status: Processing... (Demo Mode)",
            (Profile::Guided, Status::Ready) => "STATUS: Ready to chat | DEMO MODE ACTIVE",
            (Profile::Guided, Status::Processing) => "STATUS: Processing your message...",
        }
    }

    /// Printed under every message, if any.
    pub fn separator(self) -> Option<String> {
        match self {
            Profile::Classic => None,
            Profile::Guided => Some("─".repeat(60)),
        }
    }

    pub fn welcome(self) -> &'static str {
        match self {
            Profile::Classic => CLASSIC_WELCOME,
            Profile::Guided => GUIDED_WELCOME,
        }
    }

    pub fn table(self) -> Result<ResponseTable> {
        let (rules, fallback) = match self {
            Profile::Classic => (classic_rules(), CLASSIC_FALLBACK),
            Profile::Guided => (guided_rules(), GUIDED_FALLBACK),
        };

        ResponseTable::new(rules, fallback).with_context(|| format!("Built-in {self} table is invalid"))
    }
}

const CLASSIC_WELCOME: &str = "🚀 Welcome to Astro AI! This is a demo interface showcasing the rebranded application.

In the full version, you would be able to:
• Chat with local LLM models
• Use LocalDocs for document retrieval
• Run completely offline and private
• Access advanced AI features

Type a message to see how the interface works!";

const CLASSIC_FALLBACK: &str = "I understand you said: '{input}'

This is a demo interface showing the Astro AI branding and design. In the full application, I would process your message using local LLM models and provide intelligent responses while keeping everything private on your device.

Try asking me about Astro AI features or just say 'hello'!";

fn classic_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            ["hello"],
            "Hello! I'm Astro AI, your private AI assistant. How can I help you today?",
        ),
        Rule::new(
            ["hi"],
            "Hi there! Welcome to Astro AI. I'm here to demonstrate the rebranded interface.",
        ),
        Rule::new(
            ["how are you"],
            "I'm doing great! I'm a demonstration of the Astro AI interface. In the full version, I'd be powered by local LLM models.",
        ),
        Rule::new(
            ["what can you do"],
            "In the full Astro AI application, I can:
• Answer questions using local AI models
• Help with writing and analysis
• Search through your documents with LocalDocs
• Provide coding assistance
• All while keeping your data completely private!",
        ),
        Rule::new(
            ["astro"],
            "Astro AI is designed to provide powerful AI capabilities while maintaining your privacy. Everything runs locally on your device!",
        ),
        Rule::new(
            ["demo"],
            "This is indeed a demo! The full Astro AI application would require installing Qt and compiling the C++ backend for optimal performance.",
        ),
        Rule::new(
            ["help"],
            "I can help demonstrate the Astro AI interface! Try asking me about:
• What Astro AI can do
• How it maintains privacy
• Features of the full application
• Or just have a conversation!",
        ),
    ]
}

const GUIDED_WELCOME: &str = "════════════════════════════════════════════════════════════════
                        🚀 WELCOME TO ASTRO AI 🚀
════════════════════════════════════════════════════════════════

This is a DEMO of your rebranded Astro AI application!

✨ WHAT ASTRO AI OFFERS:
• Private AI conversations with local models
• Document search with LocalDocs (RAG)
• Complete offline operation
• No data sent to external servers
• OpenAI-compatible API server mode

🎯 DEMO FEATURES:
• Interactive chat interface
• Astro AI branding and design
• Simulated AI responses
• Modern dark theme with your brand colors

💬 TRY THESE COMMANDS:
• Say \"hello\" or \"hi\"
• Ask \"what can you do?\"
• Type \"help\" for more options
• Ask about \"privacy\" or \"features\"

Type a message below and press ENTER to start chatting!
════════════════════════════════════════════════════════════════";

const GUIDED_FALLBACK: &str = "I heard you say: \"{input}\"

In the full Astro AI application, I would:
• Process your message with a local LLM
• Provide intelligent, contextual responses
• Search your documents if relevant
• Maintain conversation history
• All while keeping everything private!

This demo shows the interface design for your rebranded Astro AI. Try asking about features or saying 'help'!";

fn guided_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            ["hello", "hi", "hey"],
            "Hello! I'm Astro AI, your private AI assistant. I'm excited to show you what I can do in this demo interface!",
        ),
        Rule::new(
            ["help", "commands"],
            "Here are some things you can try:

🔹 Ask me about Astro AI features
🔹 Inquire about privacy and security
🔹 Ask \"what can you do?\"
🔹 Try \"tell me about LocalDocs\"
🔹 Ask about the full application
🔹 Just have a normal conversation!",
        ),
        Rule::new(
            ["what can you do", "features"],
            "Astro AI offers powerful features:

🤖 LOCAL AI MODELS: Run LLMs completely offline
📚 LOCALDOCS: Search your documents with AI
🔒 PRIVACY FIRST: No data leaves your device
⚡ FAST RESPONSES: Optimized for your hardware
🔧 API SERVER: OpenAI-compatible endpoints
🎨 MODERN UI: Beautiful, user-friendly interface
🌍 CROSS-PLATFORM: Windows, Mac, Linux support",
        ),
        Rule::new(
            ["privacy", "private", "security"],
            "Privacy is Astro AI's core strength:

🔐 100% LOCAL: Everything runs on your device
🚫 NO CLOUD: No data sent to external servers
🔒 YOUR DATA: Documents stay on your computer
🛡️ SECURE: No account required, no tracking
⚡ OFFLINE: Works without internet connection

Your conversations and documents never leave your machine!",
        ),
        Rule::new(
            ["localdocs", "documents", "rag"],
            "LocalDocs is Astro AI's document intelligence feature:

📁 SMART SEARCH: Find relevant info in your files
🧠 AI UNDERSTANDING: Semantic search, not just keywords
📋 MULTIPLE FORMATS: PDF, TXT, MD, DOC files supported
⚡ REAL-TIME: Index updates as you add files
🎯 CONTEXTUAL: AI uses your docs to answer questions
🔒 PRIVATE: All processing happens locally

It's like having a personal research assistant!",
        ),
        Rule::new(
            ["demo", "full"],
            "This is a demo of the Astro AI interface!

🎨 SHOWS: Rebranded UI, colors, and design
⚡ SIMULATES: How conversations would work
🔧 MISSING: Actual AI models (requires compilation)
📦 FULL VERSION: Needs Qt + C++ backend build

The real Astro AI would have actual LLMs running locally with all the features I mentioned!",
        ),
    ]
}
