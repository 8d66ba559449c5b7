//! Questionnaire session state and its transition function.
//!
//! A session walks through the seven [`Field`]s in a fixed order. Every
//! answer is stored verbatim and moves the session one step forward. The
//! seventh answer ends the session and yields a [`BusinessProfile`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// Reply sent right after the last answer, before the summary.
pub const ACKNOWLEDGEMENT: &str = "Thank you for providing the details. Analyzing your data...";

/// Placeholder for a field that was never answered.
const UNKNOWN: &str = "unknown";

/// Longest answer shown in a summary, in characters. Seven of these plus the
/// labels stay below Telegram's 4096-character message limit.
const MAX_SUMMARY_FIELD_CHARS: usize = 500;

/// One question of the questionnaire, in asking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Industry,
    Objective,
    Website,
    SocialMedia,
    PpcCampaign,
    TargetAudience,
    Location,
}

impl Field {
    /// All fields in the order they are asked.
    pub const ALL: [Self; 7] = [
        Self::Industry,
        Self::Objective,
        Self::Website,
        Self::SocialMedia,
        Self::PpcCampaign,
        Self::TargetAudience,
        Self::Location,
    ];

    /// Storage key of the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Industry => "industry",
            Self::Objective => "objective",
            Self::Website => "website",
            Self::SocialMedia => "social_media",
            Self::PpcCampaign => "ppc_campaign",
            Self::TargetAudience => "target_audience",
            Self::Location => "location",
        }
    }

    /// Question shown to the user when this field is next.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Industry => "What industry is your business in?",
            Self::Objective => "What is your business objective?",
            Self::Website => "Do you have a website? If yes, please share the URL.",
            Self::SocialMedia => {
                "Do you have any social media platforms? If yes, please share the URL."
            }
            Self::PpcCampaign => "Do you use PPC campaigns? If yes, please share relevant details.",
            Self::TargetAudience => {
                "Who are you trying to reach? (e.g., young adults, professionals, etc.)"
            }
            Self::Location => "What location would you like to target?",
        }
    }

    /// 1-based step number.
    #[must_use]
    pub const fn step(self) -> usize {
        self as usize + 1
    }

    /// The field asked after this one, `None` after the last.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Industry => Some(Self::Objective),
            Self::Objective => Some(Self::Website),
            Self::Website => Some(Self::SocialMedia),
            Self::SocialMedia => Some(Self::PpcCampaign),
            Self::PpcCampaign => Some(Self::TargetAudience),
            Self::TargetAudience => Some(Self::Location),
            Self::Location => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Waiting for the answer to this field.
    Awaiting(Field),
    /// All seven answers collected.
    Complete,
}

impl Step {
    /// Step number 1..=7, or `None` once complete.
    #[must_use]
    pub const fn number(self) -> Option<usize> {
        match self {
            Self::Awaiting(field) => Some(field.step()),
            Self::Complete => None,
        }
    }
}

/// A questionnaire in progress for one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    step: Step,
    answers: BTreeMap<Field, String>,
    started_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of feeding one answer to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The session moved one step forward; `prompt` asks the next question.
    Next {
        session: Session,
        prompt: &'static str,
    },
    /// The last answer was stored; the session is over.
    Complete(Completed),
}

/// Terminal output of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// All collected answers.
    pub profile: BusinessProfile,

    /// The finished session, kept for inspection.
    pub session: Session,
}

impl Session {
    /// Creates a session waiting for the first answer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::Awaiting(Field::Industry),
            answers: BTreeMap::new(),
            started_at: Utc::now(),
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Question the session is waiting on, if any.
    #[must_use]
    pub const fn current_prompt(&self) -> Option<&'static str> {
        match self.step {
            Step::Awaiting(field) => Some(field.prompt()),
            Step::Complete => None,
        }
    }

    /// Stored answer for a field.
    #[must_use]
    pub fn answer(&self, field: Field) -> Option<&str> {
        self.answers.get(&field).map(String::as_str)
    }

    /// Number of stored answers.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// When the session was created.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Stores `input` under the current field and moves forward one step.
    ///
    /// Input is taken as-is, including the empty string. Advancing a
    /// complete session leaves it unchanged.
    #[must_use]
    pub fn advance(mut self, input: &str) -> Transition {
        let Step::Awaiting(field) = self.step else {
            return Transition::Complete(Completed {
                profile: BusinessProfile::from_session(&self),
                session: self,
            });
        };

        self.answers.insert(field, input.to_owned());

        match field.next() {
            Some(next) => {
                self.step = Step::Awaiting(next);
                Transition::Next {
                    session: self,
                    prompt: next.prompt(),
                }
            }
            None => {
                self.step = Step::Complete;
                Transition::Complete(Completed {
                    profile: BusinessProfile::from_session(&self),
                    session: self,
                })
            }
        }
    }
}

/// The collected answers of a finished questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessProfile {
    pub industry: String,
    pub objective: String,
    pub website: String,
    pub social_media: String,
    pub ppc_campaign: String,
    pub target_audience: String,
    pub location: String,
}

impl BusinessProfile {
    fn from_session(session: &Session) -> Self {
        let get = |field| session.answer(field).unwrap_or(UNKNOWN).to_owned();
        Self {
            industry: get(Field::Industry),
            objective: get(Field::Objective),
            website: get(Field::Website),
            social_media: get(Field::SocialMedia),
            ppc_campaign: get(Field::PpcCampaign),
            target_audience: get(Field::TargetAudience),
            location: get(Field::Location),
        }
    }

    /// One-line summary of the profile.
    ///
    /// Only industry, objective and location are used unless
    /// `include_all_fields` is set, in which case the other four answers are
    /// appended on their own lines. Long answers are cut short so the
    /// summary fits in one Telegram message.
    #[must_use]
    pub fn summary(&self, include_all_fields: bool) -> String {
        let mut summary = format!(
            "Analysis complete for {} with objective: {}, targeting {}.",
            truncate(&self.industry, MAX_SUMMARY_FIELD_CHARS),
            truncate(&self.objective, MAX_SUMMARY_FIELD_CHARS),
            truncate(&self.location, MAX_SUMMARY_FIELD_CHARS)
        );

        if include_all_fields {
            summary.push_str(&format!(
                "\nWebsite: {}\nSocial media: {}\nPPC campaigns: {}\nTarget audience: {}",
                truncate(&self.website, MAX_SUMMARY_FIELD_CHARS),
                truncate(&self.social_media, MAX_SUMMARY_FIELD_CHARS),
                truncate(&self.ppc_campaign, MAX_SUMMARY_FIELD_CHARS),
                truncate(&self.target_audience, MAX_SUMMARY_FIELD_CHARS)
            ));
        }

        summary
    }
}

/// Truncates a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", chars[..max_len].iter().collect::<String>())
    }
}
