//! Command handler implementation.

use tracing::{debug, info};

use super::types::{BotCommand, CommandResult, Inbound};
use crate::assistant::QuestionRelay;
use crate::config::IndustryCatalog;
use crate::insights::{BenchmarkFetcher, lookup_keywords, lookup_trends};
use crate::wizard::{ACKNOWLEDGEMENT, SessionStore, Submission};

/// Greeting for `/start`.
pub const WELCOME: &str =
    "Welcome! I can help you with business data analysis and digital marketing. Type /analyze to begin.";

/// Routes inbound messages to the questionnaire, lookups and question relay.
pub struct CommandHandler {
    /// Running questionnaires.
    sessions: SessionStore,

    /// Industry data for keyword and trend lookups.
    catalog: IndustryCatalog,

    /// Language-model question relay.
    relay: QuestionRelay,

    /// Benchmarks page scraper.
    benchmarks: BenchmarkFetcher,

    /// Whether summaries include every collected answer.
    summary_include_all_fields: bool,
}

impl CommandHandler {
    /// Creates a new command handler.
    #[must_use]
    pub fn new(catalog: IndustryCatalog, relay: QuestionRelay, benchmarks: BenchmarkFetcher) -> Self {
        Self {
            sessions: SessionStore::new(),
            catalog,
            relay,
            benchmarks,
            summary_include_all_fields: false,
        }
    }

    /// Makes summaries list website, social media, PPC and audience answers too.
    #[must_use]
    pub const fn with_summary_all_fields(mut self, include: bool) -> Self {
        self.summary_include_all_fields = include;
        self
    }

    /// Running questionnaires.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one message from `chat_id` and returns the replies to send.
    pub async fn handle(&self, chat_id: i64, text: &str) -> CommandResult {
        match Inbound::parse(text) {
            Inbound::Command(command) => {
                debug!(chat_id, "Handling command: {}", command.name());
                self.execute(chat_id, command).await
            }
            Inbound::Unknown(name) => {
                debug!(chat_id, command = %name, "Unknown command");
                CommandResult::reply(format!(
                    "Unknown command: /{name}. Type /help to see what I can do."
                ))
            }
            Inbound::Text(text) => self.handle_answer(chat_id, &text).await,
        }
    }

    /// Executes a parsed command.
    async fn execute(&self, chat_id: i64, command: BotCommand) -> CommandResult {
        match command {
            BotCommand::Start => self.handle_start(chat_id).await,
            BotCommand::Analyze => self.handle_analyze(chat_id).await,
            BotCommand::Ask(question) => self.handle_ask(&question).await,
            BotCommand::Keywords(industry) => self.handle_keywords(&industry),
            BotCommand::Trends(industry) => self.handle_trends(&industry),
            BotCommand::Benchmarks => self.handle_benchmarks().await,
            BotCommand::Help => Self::handle_help(),
        }
    }

    async fn handle_start(&self, chat_id: i64) -> CommandResult {
        if self.sessions.discard(chat_id).await {
            info!(chat_id, "Analysis abandoned via start");
        }
        CommandResult::reply(WELCOME)
    }

    async fn handle_analyze(&self, chat_id: i64) -> CommandResult {
        CommandResult::reply(self.sessions.begin(chat_id).await)
    }

    async fn handle_ask(&self, question: &str) -> CommandResult {
        CommandResult::reply(self.relay.answer(question).await)
    }

    fn handle_keywords(&self, industry: &str) -> CommandResult {
        if industry.is_empty() {
            return CommandResult::reply(self.missing_industry_reply("keywords"));
        }

        let report = lookup_keywords(&self.catalog, industry);
        CommandResult::reply(format!("Keyword insights for {industry}:\n{report}"))
    }

    fn handle_trends(&self, industry: &str) -> CommandResult {
        if industry.is_empty() {
            return CommandResult::reply(self.missing_industry_reply("trends"));
        }

        let report = lookup_trends(&self.catalog, industry);
        CommandResult::reply(format!("Trends for {industry}:\n{report}"))
    }

    fn missing_industry_reply(&self, command: &str) -> String {
        format!(
            "Please provide an industry after /{command}. Known industries: {}.",
            self.catalog.names().collect::<Vec<_>>().join(", ")
        )
    }

    async fn handle_benchmarks(&self) -> CommandResult {
        let cpc = self.benchmarks.fetch_cpc().await;
        CommandResult::reply(format!(
            "Based on current benchmarks, the CPC for your industry is: {cpc}"
        ))
    }

    fn handle_help() -> CommandResult {
        let mut lines = vec!["Available commands:".to_owned()];

        for (cmd, aliases, desc) in BotCommand::all_commands() {
            if aliases.is_empty() {
                lines.push(format!("/{cmd} - {desc}"));
            } else {
                lines.push(format!("/{cmd} {aliases} - {desc}"));
            }
        }

        CommandResult::reply(lines.join("\n"))
    }

    async fn handle_answer(&self, chat_id: i64, text: &str) -> CommandResult {
        match self.sessions.submit(chat_id, text).await {
            Submission::NoSession => {
                debug!(chat_id, "Ignoring text outside of a questionnaire");
                CommandResult::silent()
            }
            Submission::Prompt(prompt) => CommandResult::reply(prompt),
            Submission::Finished(done) => CommandResult::replies([
                ACKNOWLEDGEMENT.to_owned(),
                done.profile.summary(self.summary_include_all_fields),
            ]),
        }
    }
}
