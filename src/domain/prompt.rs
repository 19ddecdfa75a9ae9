//! Wonder prompts and the daily prompt

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed list of prompts the daily prompt is drawn from
pub const PROMPTS: [&str; 30] = [
    "Find beauty in something you usually ignore",
    "Capture a small detail that brings you joy",
    "What unexpected pattern do you see today?",
    "Notice a color that stands out to you right now",
    "What texture nearby feels interesting?",
    "Capture a shadow that creates an interesting shape",
    "Find something old that still has beauty",
    "What is growing or changing around you?",
    "Capture something tiny but meaningful",
    "What brings a feeling of peace in your surroundings?",
    "Notice a moment of connection between people or things",
    "What ordinary object has extraordinary details?",
    "Capture a reflection you find interesting",
    "What reminds you of childhood wonder?",
    "Find beauty in something broken or imperfect",
    "Capture light falling in an interesting way",
    "What simple pleasure do you notice today?",
    "Find an unexpected contrast in your environment",
    "What geometric shape appears naturally around you?",
    "Capture something that represents hope to you",
    "What has a fascinating texture in your space?",
    "Find something with an interesting history",
    "Capture a moment of serendipity",
    "Notice how light changes something ordinary",
    "What natural element catches your attention?",
    "Find beauty in repetition or patterns",
    "Capture something that represents transformation",
    "What everyday object has an interesting design?",
    "Find something that tells a story without words",
    "Capture a fleeting moment of beauty",
];

/// Format used for the persisted prompt date, e.g. `Fri Oct 17 2026`
const PROMPT_DATE_FORMAT: &str = "%a %b %d %Y";

/// Pick a prompt uniformly at random
pub fn random_prompt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PROMPTS.choose(rng).copied().unwrap_or(PROMPTS[0])
}

/// The prompt chosen for a calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPrompt {
    pub text: String,
    pub date: NaiveDate,
}

impl DailyPrompt {
    pub fn new(text: impl Into<String>, date: NaiveDate) -> Self {
        DailyPrompt {
            text: text.into(),
            date,
        }
    }

    /// Roll a fresh prompt for `date`
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate) -> Self {
        DailyPrompt::new(random_prompt(rng), date)
    }

    /// Whether this prompt was chosen on `today` (calendar comparison, not elapsed time)
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// Render a date the way it is stored under `dailyPromptDate`
pub fn format_prompt_date(date: NaiveDate) -> String {
    date.format(PROMPT_DATE_FORMAT).to_string()
}

/// Parse a stored `dailyPromptDate` value
pub fn parse_prompt_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), PROMPT_DATE_FORMAT).ok()
}
