//! Static registry of learning games.
//!
//! Games are loaded once and never mutated. Whether a game is unlocked is
//! not part of the game; it is membership in the caller's unlocked set.

use crate::error::{HubError, Result};
use crate::profile::{AgeGroup, AttentionSpan, Experience, LearningStyle, SpecialNeed};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Subject area of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Mathematics.
    Math,
    /// Language and reading.
    Language,
    /// Science.
    Science,
    /// Memory and attention.
    Cognitive,
    /// Art and music.
    Arts,
    /// Motor skills.
    Motor,
    /// Logic and problem solving.
    Logic,
    /// Social skills.
    Social,
}

impl Category {
    /// Stable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Language => "language",
            Category::Science => "science",
            Category::Cognitive => "cognitive",
            Category::Arts => "arts",
            Category::Motor => "motor",
            Category::Logic => "logic",
            Category::Social => "social",
        }
    }

    /// Parses a category or learning-goal tag. `art` is accepted for [`Category::Arts`].
    pub fn parse(raw: &str) -> Option<Category> {
        match raw.trim().to_lowercase().as_str() {
            "math" => Some(Category::Math),
            "language" => Some(Category::Language),
            "science" => Some(Category::Science),
            "cognitive" => Some(Category::Cognitive),
            "arts" | "art" => Some(Category::Arts),
            "motor" => Some(Category::Motor),
            "logic" => Some(Category::Logic),
            "social" => Some(Category::Social),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty label shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Moderate.
    #[default]
    Moderate,
    /// Hard.
    Hard,
    /// Adapts to the player.
    Adaptive,
}

/// Inclusive age range in years. Serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct AgeRange {
    /// Youngest supported age.
    pub min: u8,
    /// Oldest supported age.
    pub max: u8,
}

impl AgeRange {
    /// Create a range.
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// True when the two ranges share at least one year.
    pub fn overlaps(&self, other: &AgeRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &AgeRange) -> bool {
        self.min <= other.min && self.max >= other.max
    }
}

impl From<(u8, u8)> for AgeRange {
    fn from((min, max): (u8, u8)) -> Self {
        Self { min, max }
    }
}

impl From<AgeRange> for (u8, u8) {
    fn from(range: AgeRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Descriptive feature profile used by the learned scorer and the explainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameFeatures {
    /// Age buckets the game is designed for.
    #[serde(default)]
    pub age_groups: Vec<AgeGroup>,
    /// Learning styles the game supports.
    #[serde(default)]
    pub learning_styles: Vec<LearningStyle>,
    /// Special needs the game accommodates.
    #[serde(default)]
    pub special_needs: Vec<SpecialNeed>,
    /// Interest tags associated with the game.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Attention span the game expects.
    #[serde(default)]
    pub attention_span: Option<AttentionSpan>,
    /// Experience level the game expects.
    #[serde(default)]
    pub experience: Option<Experience>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Subject area.
    pub category: Category,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Supported ages, inclusive.
    pub age_range: AgeRange,
    /// Feature profile.
    #[serde(default)]
    pub features: GameFeatures,
}

impl Game {
    /// Create a game with an empty feature profile.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        age_range: AgeRange,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            difficulty: Difficulty::default(),
            age_range,
            features: GameFeatures::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the feature profile.
    pub fn with_features(mut self, features: GameFeatures) -> Self {
        self.features = features;
        self
    }
}

/// Ordered, validated set of games. Declaration order is the tie-break order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    games: Vec<Game>,
}

impl Catalog {
    /// Validate and wrap a list of games.
    ///
    /// Rejects blank or duplicate ids and inverted age ranges.
    pub fn new(games: Vec<Game>) -> Result<Self> {
        let mut seen = HashSet::new();
        for game in &games {
            if game.id.trim().is_empty() {
                return Err(HubError::Validation(format!(
                    "game `{}` has an empty id",
                    game.name
                )));
            }
            if !seen.insert(game.id.as_str()) {
                return Err(HubError::Validation(format!(
                    "duplicate game id `{}`",
                    game.id
                )));
            }
            if game.age_range.min > game.age_range.max {
                return Err(HubError::Validation(format!(
                    "game `{}` has inverted age range {}",
                    game.id, game.age_range
                )));
            }
        }
        Ok(Self { games })
    }

    /// Parse a catalog from a TOML document made of `[[games]]` tables.
    ///
    /// A document without games is rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            games: Vec<Game>,
        }
        let doc: Document = toml::from_str(text)
            .map_err(|e| HubError::Validation(format!("invalid catalog document: {e}")))?;
        if doc.games.is_empty() {
            return Err(HubError::Validation(
                "catalog document has no [[games]] entries".into(),
            ));
        }
        let catalog = Self::new(doc.games)?;
        tracing::debug!(games = catalog.len(), "parsed catalog document");
        Ok(catalog)
    }

    /// Games in declaration order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Iterate games in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    /// Look up a game by id.
    pub fn get(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Declaration index of a game.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.games.iter().position(|g| g.id == id)
    }

    /// True when a game with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True when there are no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

fn features(
    age_groups: &[AgeGroup],
    learning_styles: &[LearningStyle],
    special_needs: &[SpecialNeed],
    interests: &[&str],
    attention_span: AttentionSpan,
    experience: Experience,
) -> GameFeatures {
    GameFeatures {
        age_groups: age_groups.to_vec(),
        learning_styles: learning_styles.to_vec(),
        special_needs: special_needs.to_vec(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        attention_span: Some(attention_span),
        experience: Some(experience),
    }
}

/// The built-in catalog of twelve games.
pub fn default_catalog() -> Catalog {
    use AgeGroup::{EightToTwelve as G8, FourToSeven as G4, SeventeenPlus as G17};
    use AgeGroup::ThirteenToSixteen as G13;
    use AttentionSpan::{Long, Medium, Short, Variable};
    use Experience::{Advanced, Beginner, Intermediate};
    use LearningStyle::{Auditory, Kinesthetic, Multimodal, Reading, Visual};
    use SpecialNeed::{Adhd, Autism, Dyscalculia, Dyslexia};

    let games = vec![
        Game::new("math-puzzle", "Math Puzzle Adventure", Category::Math, AgeRange::new(7, 12))
            .with_description("Solve math puzzles and earn rewards")
            .with_difficulty(Difficulty::Adaptive)
            .with_features(features(
                &[G4, G8],
                &[Visual, Reading],
                &[Adhd, Dyslexia],
                &["science", "technology", "puzzles"],
                Medium,
                Beginner,
            )),
        Game::new("word-explorer", "Word Explorer", Category::Language, AgeRange::new(8, 14))
            .with_description("Build vocabulary through fun word games")
            .with_features(features(
                &[G8, G13],
                &[Reading, Visual],
                &[Dyslexia, Autism],
                &["reading", "writing", "language"],
                Medium,
                Beginner,
            )),
        Game::new("science-lab", "Science Laboratory", Category::Science, AgeRange::new(9, 14))
            .with_description("Virtual experiments for young scientists")
            .with_features(features(
                &[G8, G13, G17],
                &[Visual, Reading, Kinesthetic],
                &[Adhd, Autism],
                &["science", "nature", "technology", "space"],
                Medium,
                Intermediate,
            )),
        Game::new("memory-match", "Memory Match", Category::Cognitive, AgeRange::new(5, 10))
            .with_description("Boost memory skills with matching cards")
            .with_difficulty(Difficulty::Easy)
            .with_features(features(
                &[G4, G8, G13],
                &[Visual, Multimodal],
                &[Adhd, Autism],
                &["games", "puzzles"],
                Short,
                Beginner,
            )),
        Game::new("shape-sorter", "Shape Sorter", Category::Motor, AgeRange::new(5, 8))
            .with_description("Improve visual recognition and motor skills")
            .with_difficulty(Difficulty::Easy)
            .with_features(features(
                &[G4],
                &[Visual, Kinesthetic],
                &[Adhd, Autism, Dyslexia],
                &["puzzles", "vehicles", "sports"],
                Short,
                Beginner,
            )),
        Game::new("rhythm-beats", "Rhythm Beats", Category::Arts, AgeRange::new(6, 12))
            .with_description("Learn patterns and sequence through music")
            .with_features(features(
                &[G4, G8, G13, G17],
                &[Auditory, Kinesthetic, Multimodal],
                &[Adhd, Autism, Dyslexia],
                &["music", "arts", "creativity"],
                Medium,
                Beginner,
            )),
        Game::new("story-creator", "Story Creator", Category::Language, AgeRange::new(8, 14))
            .with_description("Create your own stories with animated characters")
            .with_features(features(
                &[G8, G13, G17],
                &[Reading, Auditory, Multimodal],
                &[Dyslexia, Autism],
                &["writing", "reading", "arts", "fantasy"],
                Long,
                Intermediate,
            )),
        Game::new("logic-puzzles", "Logic Puzzles", Category::Logic, AgeRange::new(10, 16))
            .with_description("Brain teasers to develop logical thinking")
            .with_difficulty(Difficulty::Hard)
            .with_features(features(
                &[G8, G13, G17],
                &[Visual, Kinesthetic, Multimodal],
                &[Adhd, Dyscalculia],
                &["science", "technology", "puzzles"],
                Medium,
                Advanced,
            )),
        Game::new("pattern-blocks", "Pattern Blocks", Category::Math, AgeRange::new(6, 10))
            .with_description("Create and recognize geometric patterns")
            .with_difficulty(Difficulty::Easy)
            .with_features(features(
                &[G4, G8],
                &[Visual, Kinesthetic],
                &[Adhd, Autism, Dyslexia],
                &["puzzles", "arts", "technology"],
                Medium,
                Beginner,
            )),
        Game::new("animal-facts", "Animal Facts", Category::Science, AgeRange::new(7, 12))
            .with_description("Learn about animals through interactive quizzes")
            .with_difficulty(Difficulty::Easy)
            .with_features(features(
                &[G4, G8, G13],
                &[Visual, Reading, Auditory],
                &[Adhd, Autism],
                &["nature", "science", "animals"],
                Short,
                Beginner,
            )),
        Game::new("coding-blocks", "Coding Blocks", Category::Logic, AgeRange::new(8, 14))
            .with_description("Introduction to coding concepts through block programming")
            .with_features(features(
                &[G8, G13, G17],
                &[Visual, Kinesthetic, Reading],
                &[Adhd, Autism],
                &["technology", "puzzles", "science", "robots"],
                Long,
                Intermediate,
            )),
        Game::new("paint-studio", "Paint Studio", Category::Arts, AgeRange::new(5, 12))
            .with_description("Digital art creation with various tools")
            .with_difficulty(Difficulty::Easy)
            .with_features(features(
                &[G4, G8, G13],
                &[Visual, Kinesthetic],
                &[Adhd, Autism, Dyslexia],
                &["arts", "creativity", "drawing"],
                Variable,
                Beginner,
            )),
    ];

    Catalog { games }
}
