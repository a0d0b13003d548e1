use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One row of the weekly focus table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyFocus {
    /// Weekday name.
    pub day: &'static str,
    /// Theme of the day.
    pub focus: &'static str,
    /// Focus areas, each with task templates.
    pub areas: &'static [&'static str],
}

/// Focus table indexed by days from Sunday.
pub const DAILY_FOCUS: [DailyFocus; 7] = [
    DailyFocus {
        day: "Sunday",
        focus: "creativity",
        areas: &["arts", "music", "writing"],
    },
    DailyFocus {
        day: "Monday",
        focus: "math",
        areas: &["math", "logic", "puzzles"],
    },
    DailyFocus {
        day: "Tuesday",
        focus: "language",
        areas: &["reading", "writing", "language"],
    },
    DailyFocus {
        day: "Wednesday",
        focus: "science",
        areas: &["science", "nature", "technology"],
    },
    DailyFocus {
        day: "Thursday",
        focus: "social",
        areas: &["social", "communication"],
    },
    DailyFocus {
        day: "Friday",
        focus: "mixed",
        areas: &["games", "puzzles", "technology"],
    },
    DailyFocus {
        day: "Saturday",
        focus: "exploration",
        areas: &["nature", "history", "culture"],
    },
];

/// Three canned task phrases per focus area.
pub const TASK_TEMPLATES: [(&str, [&str; 3]); 17] = [
    ("math", ["Complete a math puzzle", "Practice addition/subtraction", "Solve a logic problem"]),
    ("logic", ["Complete a pattern recognition task", "Solve a puzzle game", "Practice sequencing"]),
    ("puzzles", ["Complete a jigsaw puzzle", "Solve a maze", "Play a matching game"]),
    ("reading", ["Read a short story", "Practice sight words", "Complete a reading comprehension task"]),
    ("writing", ["Write a short story", "Practice handwriting", "Create a journal entry"]),
    ("language", ["Learn new vocabulary words", "Practice spelling", "Complete a grammar exercise"]),
    ("science", ["Conduct a simple experiment", "Learn about animals", "Explore nature concepts"]),
    ("nature", ["Identify plants or animals", "Learn about ecosystems", "Explore weather patterns"]),
    ("technology", ["Practice basic coding", "Learn about digital tools", "Explore educational apps"]),
    ("social", ["Practice conversation skills", "Role-play social scenarios", "Learn about emotions"]),
    ("communication", ["Practice turn-taking", "Work on listening skills", "Express feelings appropriately"]),
    ("arts", ["Create a drawing or painting", "Make a craft project", "Explore colors and textures"]),
    ("music", ["Listen to different music genres", "Play a simple instrument", "Create rhythm patterns"]),
    ("creativity", ["Design something new", "Use imagination in play", "Create a story"]),
    ("games", ["Play an educational game", "Complete a strategy game", "Engage in cooperative play"]),
    ("history", ["Learn about historical figures", "Explore different time periods", "Discover cultural traditions"]),
    ("culture", ["Learn about different countries", "Explore cultural traditions", "Try international activities"]),
];

/// Focus for the weekday of `date`.
pub fn focus_for_date(date: NaiveDate) -> &'static DailyFocus {
    &DAILY_FOCUS[date.weekday().num_days_from_sunday() as usize]
}

/// Task phrases for a focus area.
pub fn task_templates(area: &str) -> Option<&'static [&'static str; 3]> {
    TASK_TEMPLATES
        .iter()
        .find(|(name, _)| *name == area)
        .map(|(_, phrases)| phrases)
}
