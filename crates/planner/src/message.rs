use crate::focus::DailyFocus;
use learnhub_core::{AttentionSpan, LearningStyle, Profile};

/// Build the day's message from the focus, learning style and attention span.
pub fn compose_message(profile: &Profile, focus: &DailyFocus) -> String {
    format!(
        "Today is {}, a great day to focus on {}! {} {} We recommend focusing on the following learning areas today: {}.",
        focus.day,
        focus.focus,
        style_tip(profile.learning_style),
        attention_tip(profile.attention_span),
        focus.areas.join(", ")
    )
}

fn style_tip(style: Option<LearningStyle>) -> &'static str {
    match style {
        Some(LearningStyle::Visual) => {
            "As a visual learner, try activities with diagrams, charts, and visual demonstrations."
        }
        Some(LearningStyle::Auditory) => {
            "As an auditory learner, consider activities with spoken instructions and musical elements."
        }
        Some(LearningStyle::Reading) => {
            "As a reading/writing learner, focus on activities involving text and written exercises."
        }
        Some(LearningStyle::Kinesthetic) => {
            "As a kinesthetic learner, engage with hands-on activities that involve movement."
        }
        Some(LearningStyle::Multimodal) => {
            "With your multimodal learning style, mix different types of activities throughout the day."
        }
        None => "Try a variety of learning activities today.",
    }
}

fn attention_tip(span: Option<AttentionSpan>) -> &'static str {
    match span {
        Some(AttentionSpan::Short) => "Plan for short, focused sessions with breaks in between.",
        Some(AttentionSpan::Medium) => "Aim for 15-20 minute learning sessions with short breaks.",
        Some(AttentionSpan::Long) => {
            "You can engage in longer, more in-depth learning activities today."
        }
        Some(AttentionSpan::Variable) => {
            "Mix shorter and longer activities based on your interest level."
        }
        None => "Balance your learning time with appropriate breaks.",
    }
}

/// Encouragement for a progress percentage.
pub fn progress_message(progress: f64) -> &'static str {
    if progress <= 0.0 {
        "Start your daily tasks to track progress!"
    } else if progress < 25.0 {
        "You're just getting started. Keep going!"
    } else if progress < 50.0 {
        "Making progress! You're on the right track."
    } else if progress < 75.0 {
        "Great work! You're well on your way."
    } else if progress < 100.0 {
        "Almost there! Just a few more tasks to go."
    } else {
        "Amazing! You've completed all your tasks for today!"
    }
}
