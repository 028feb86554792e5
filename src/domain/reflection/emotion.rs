//! Emotion labels and the keyword classifier.
//!
//! Classification is a fixed keyword scan followed by punctuation and length
//! heuristics. It never fails: every input, including the empty string, maps
//! to a label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Texts shorter than this many characters with no keyword hit are `Calm`.
pub const SHORT_TEXT_CHARS: usize = 10;

const EXCITED_MARKERS: [&str; 2] = ["!!", "！！"];
const HESITANT_MARKERS: [&str; 2] = ["...", "。。。"];

/// Closed set of emotion labels the dialogue can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anxiety,
    Sadness,
    Anger,
    Fatigue,
    Happiness,
    Calm,
    Excited,
    Hesitant,
    Neutral,
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Neutral
    }
}

impl Emotion {
    /// Returns all labels.
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Anxiety,
            Emotion::Sadness,
            Emotion::Anger,
            Emotion::Fatigue,
            Emotion::Happiness,
            Emotion::Calm,
            Emotion::Excited,
            Emotion::Hesitant,
            Emotion::Neutral,
        ]
    }

    /// Labels that have keyword tables, in classification priority order.
    pub fn keyword_driven() -> &'static [Emotion] {
        &[
            Emotion::Anxiety,
            Emotion::Sadness,
            Emotion::Anger,
            Emotion::Fatigue,
            Emotion::Happiness,
        ]
    }

    /// Returns the snake_case label used in logs and serialized sessions.
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Anxiety => "anxiety",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fatigue => "fatigue",
            Emotion::Happiness => "happiness",
            Emotion::Calm => "calm",
            Emotion::Excited => "excited",
            Emotion::Hesitant => "hesitant",
            Emotion::Neutral => "neutral",
        }
    }

    /// Returns the name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Emotion::Anxiety => "焦虑",
            Emotion::Sadness => "悲伤",
            Emotion::Anger => "愤怒",
            Emotion::Fatigue => "疲惫",
            Emotion::Happiness => "快乐",
            Emotion::Calm => "平静",
            Emotion::Excited => "激动",
            Emotion::Hesitant => "犹豫",
            Emotion::Neutral => "中性",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordered keyword table. Earlier entries win ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionKeywords {
    entries: Vec<(Emotion, Vec<String>)>,
}

impl Default for EmotionKeywords {
    fn default() -> Self {
        let table: [(Emotion, &[&str]); 5] = [
            (Emotion::Anxiety, &["担心", "紧张", "不安", "害怕", "压力", "恐惧"]),
            (Emotion::Sadness, &["难过", "伤心", "失落", "沮丧", "痛苦", "孤独"]),
            (Emotion::Anger, &["生气", "愤怒", "恼火", "烦躁", "不满", "气愤"]),
            (Emotion::Fatigue, &["累", "疲惫", "困倦", "无力", "倦怠", "耗竭"]),
            (Emotion::Happiness, &["开心", "快乐", "高兴", "喜悦", "兴奋", "满足"]),
        ];
        Self::new(
            table
                .iter()
                .map(|(emotion, words)| (*emotion, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
        )
    }
}

impl EmotionKeywords {
    /// Creates a table from ordered `(emotion, keywords)` pairs.
    ///
    /// Keywords are lowercased once here; blank keywords are dropped.
    pub fn new(entries: Vec<(Emotion, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(emotion, words)| {
                let words = words
                    .into_iter()
                    .map(|w| w.to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (emotion, words)
            })
            .collect();
        Self { entries }
    }

    /// Returns the ordered entries.
    pub fn entries(&self) -> &[(Emotion, Vec<String>)] {
        &self.entries
    }

    fn first_match(&self, lowered: &str) -> Option<Emotion> {
        self.entries
            .iter()
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w.as_str())))
            .map(|(emotion, _)| *emotion)
    }
}

/// Maps free text to an [`Emotion`].
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier {
    keywords: EmotionKeywords,
}

impl EmotionClassifier {
    /// Creates a classifier over a custom keyword table.
    pub fn new(keywords: EmotionKeywords) -> Self {
        Self { keywords }
    }

    /// Classifies `text`.
    ///
    /// Keyword hits take priority. Without one, the fallbacks apply in order:
    /// short text is calm, a double exclamation mark is excited, an ellipsis
    /// is hesitant, anything else is neutral.
    pub fn classify(&self, text: &str) -> Emotion {
        let lowered = text.to_lowercase();
        if let Some(emotion) = self.keywords.first_match(&lowered) {
            return emotion;
        }

        if text.chars().count() < SHORT_TEXT_CHARS {
            Emotion::Calm
        } else if EXCITED_MARKERS.iter().any(|m| text.contains(m)) {
            Emotion::Excited
        } else if HESITANT_MARKERS.iter().any(|m| text.contains(m)) {
            Emotion::Hesitant
        } else {
            Emotion::Neutral
        }
    }

    /// Returns the keyword table in use.
    pub fn keywords(&self) -> &EmotionKeywords {
        &self.keywords
    }
}
