//! Command types and definitions.

use std::fmt;

/// Available bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Show the welcome message and abandon any running questionnaire.
    Start,

    /// Begin the business profile questionnaire.
    Analyze,

    /// Ask a digital-marketing question. The text may be empty.
    Ask(String),

    /// Show keywords for an industry.
    Keywords(String),

    /// Show CPC/CTR figures for an industry.
    Trends(String),

    /// Scrape the benchmarks page for a CPC figure.
    Benchmarks,

    /// Show help information.
    Help,
}

/// How an inbound message should be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A recognized command.
    Command(BotCommand),

    /// A slash-command this bot does not know.
    Unknown(String),

    /// Plain text, possibly an answer to the questionnaire.
    Text(String),
}

impl Inbound {
    /// Classifies a message text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim_start().starts_with('/') {
            match BotCommand::parse(text) {
                Some(command) => Self::Command(command),
                None => Self::Unknown(command_name(text).to_owned()),
            }
        } else {
            Self::Text(text.to_owned())
        }
    }
}

/// Returns the command word without its leading slash or `@bot` suffix.
fn command_name(text: &str) -> &str {
    let word = text
        .trim_start()
        .trim_start_matches('/')
        .split(char::is_whitespace)
        .next()
        .unwrap_or_default();
    word.split_once('@').map_or(word, |(name, _)| name)
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Accepts an optional `@botname` suffix on the command word, e.g.
    /// `/ask@MarketingBot how do I ...`. Returns `None` if the message is not
    /// a known command.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let after_slash = text.strip_prefix('/')?;

        let (word, rest) = after_slash
            .split_once(char::is_whitespace)
            .unwrap_or((after_slash, ""));

        // Runs of whitespace in the arguments collapse to single spaces
        let args = rest.split_whitespace().collect::<Vec<_>>().join(" ");

        let cmd = word
            .split_once('@')
            .map_or(word, |(name, _)| name)
            .to_lowercase();

        match cmd.as_str() {
            "start" | "reset" => Some(Self::Start),
            "analyze" | "analyse" => Some(Self::Analyze),
            "ask" => Some(Self::Ask(args)),
            "keywords" | "kw" => Some(Self::Keywords(args)),
            "trends" | "trend" => Some(Self::Trends(args)),
            "benchmarks" | "benchmark" => Some(Self::Benchmarks),
            "help" | "h" => Some(Self::Help),
            _ => None,
        }
    }

    /// Returns the command name as it appears in help.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Analyze => "analyze",
            Self::Ask(_) => "ask",
            Self::Keywords(_) => "keywords",
            Self::Trends(_) => "trends",
            Self::Benchmarks => "benchmarks",
            Self::Help => "help",
        }
    }

    /// Returns all available commands with their descriptions.
    #[must_use]
    pub fn all_commands() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("start", "(reset)", "Show the welcome message and cancel the analysis"),
            ("analyze", "(analyse)", "Describe your business in seven questions"),
            ("ask <question>", "", "Ask a digital-marketing question"),
            ("keywords <industry>", "(kw)", "Suggested keywords for an industry"),
            ("trends <industry>", "(trend)", "CPC and CTR figures for an industry"),
            ("benchmarks", "(benchmark)", "Current CPC from the benchmarks page"),
            ("help", "(h)", "Show this help message"),
        ]
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask(question) => write!(f, "ask {question}"),
            Self::Keywords(industry) => write!(f, "keywords {industry}"),
            Self::Trends(industry) => write!(f, "trends {industry}"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Replies to send, in order.
    pub replies: Vec<String>,
}

impl CommandResult {
    /// A single reply.
    #[must_use]
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            replies: vec![message.into()],
        }
    }

    /// Several replies sent one after another.
    #[must_use]
    pub fn replies<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Nothing to send.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Checks if there is nothing to send.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.replies.is_empty()
    }
}
