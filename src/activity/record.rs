//! Activity records and their frontmatter metadata.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::JsonMap;

/// `tags: null` and a missing key both land as the empty list.
fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Activity category (lowercase on disk and in JSON output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Game,
    Craft,
    Story,
    Song,
    Festival,
    Food,
    Other,
}

impl Category {
    /// All categories in declaration order (index count order).
    pub const ALL: [Category; 7] = [
        Category::Game,
        Category::Craft,
        Category::Story,
        Category::Song,
        Category::Festival,
        Category::Food,
        Category::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Game => "game",
            Category::Craft => "craft",
            Category::Story => "story",
            Category::Song => "song",
            Category::Festival => "festival",
            Category::Food => "food",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level (lowercase on disk and in JSON output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill an activity practices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Listening,
    Speaking,
    Reading,
    Writing,
    Cultural,
}

impl Skill {
    pub const fn as_str(self) -> &'static str {
        match self {
            Skill::Listening => "listening",
            Skill::Speaking => "speaking",
            Skill::Reading => "reading",
            Skill::Writing => "writing",
            Skill::Cultural => "cultural",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vocabulary word or phrase with its pinyin and English gloss.
///
/// `traditional` is optional; simplified-only collections omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub simplified: String,
    #[serde(default)]
    pub traditional: Option<String>,
    pub pinyin: String,
    pub english: String,
}

/// A downloadable printable attached to an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printable {
    pub title: String,
    /// Site-root-relative path (`/printables/...`) or absolute URL.
    pub url: String,
}

/// Activity metadata from YAML (`---`) or TOML (`+++`) frontmatter.
///
/// All keys are camelCase on disk and in JSON output.
///
/// # Required Fields
///
/// | Field             | Type          | Description                    |
/// |-------------------|---------------|--------------------------------|
/// | `title`           | `String`      | Display title                  |
/// | `description`     | `String`      | One-sentence summary           |
/// | `ageRange`        | `String`      | e.g. `"3-6"`                   |
/// | `duration`        | `String`      | e.g. `"20 minutes"`            |
/// | `category`        | `Category`    | game/craft/story/song/...      |
/// | `difficultyLevel` | `Difficulty`  | beginner/intermediate/advanced |
/// | `skills`          | `Vec<Skill>`  | Skills practiced               |
///
/// # Optional Fields
///
/// `vocabulary`, `phrases`, `supplies`, `printable`, `relatedActivities`,
/// `tags`. A `tags` value of `null` deserializes to the empty vec so
/// festival matching never sees a missing list.
///
/// # Unrecognized keys
///
/// Any additional keys are captured in `extra` and carried through to the
/// index verbatim; `check` warns about them as probable typos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMeta {
    pub title: String,
    pub description: String,
    pub age_range: String,
    pub duration: String,
    pub category: Category,
    pub difficulty_level: Difficulty,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub vocabulary: Vec<Term>,
    #[serde(default)]
    pub phrases: Vec<Term>,
    #[serde(default)]
    pub supplies: Vec<String>,
    #[serde(default)]
    pub printable: Option<Printable>,
    #[serde(default)]
    pub related_activities: Vec<String>,
    /// Tags for festival-style OR matching.
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    /// Additional user-defined fields (carried through verbatim).
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Default for ActivityMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            age_range: String::new(),
            duration: String::new(),
            category: Category::Other,
            difficulty_level: Difficulty::Beginner,
            skills: Vec::new(),
            vocabulary: Vec::new(),
            phrases: Vec::new(),
            supplies: Vec::new(),
            printable: None,
            related_activities: Vec::new(),
            tags: Vec::new(),
            extra: JsonMap::new(),
        }
    }
}

/// One loaded activity: identity, markdown body, and frontmatter.
///
/// Serializes with `slug` as a top-level field and the metadata flattened;
/// the source path and raw body never appear in JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    /// File stem, unique across the collection.
    pub slug: String,
    /// Source file path (for check reports).
    #[serde(skip)]
    pub source: PathBuf,
    /// Markdown body following the frontmatter fence.
    #[serde(skip)]
    pub body: String,
    #[serde(flatten)]
    pub meta: ActivityMeta,
}

impl Activity {
    pub fn new(slug: String, source: PathBuf, body: String, meta: ActivityMeta) -> Self {
        Self {
            slug,
            source,
            body,
            meta,
        }
    }

    /// Whether a printable is attached (presence of `printable`).
    #[inline]
    pub fn has_printable(&self) -> bool {
        self.meta.printable.is_some()
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_deserialize_camel_case() {
        let json = r#"{
            "title": "Lantern Craft",
            "description": "Make a paper lantern",
            "ageRange": "4-8",
            "duration": "30 minutes",
            "category": "craft",
            "difficultyLevel": "intermediate",
            "skills": ["speaking", "cultural"],
            "relatedActivities": ["mid-autumn-story"],
            "tags": ["mid-autumn", "lantern"]
        }"#;
        let meta: ActivityMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title, "Lantern Craft");
        assert_eq!(meta.age_range, "4-8");
        assert_eq!(meta.category, Category::Craft);
        assert_eq!(meta.difficulty_level, Difficulty::Intermediate);
        assert_eq!(meta.skills, vec![Skill::Speaking, Skill::Cultural]);
        assert_eq!(meta.related_activities, vec!["mid-autumn-story"]);
        assert_eq!(meta.tags, vec!["mid-autumn", "lantern"]);
        assert!(meta.printable.is_none());
    }

    #[test]
    fn test_meta_null_tags() {
        let json = r#"{
            "title": "T", "description": "D", "ageRange": "3+",
            "duration": "10 minutes", "category": "game",
            "difficultyLevel": "beginner", "skills": [], "tags": null
        }"#;
        let meta: ActivityMeta = serde_json::from_str(json).unwrap();
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_meta_missing_required_field() {
        // No title
        let json = r#"{
            "description": "D", "ageRange": "3+", "duration": "10 minutes",
            "category": "game", "difficultyLevel": "beginner", "skills": []
        }"#;
        let err = serde_json::from_str::<ActivityMeta>(json).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_meta_unknown_keys_in_extra() {
        let json = r#"{
            "title": "T", "description": "D", "ageRange": "3+",
            "duration": "10 minutes", "category": "song",
            "difficultyLevel": "beginner", "skills": [],
            "vocabularly": [{"simplified": "好", "pinyin": "hǎo", "english": "good"}]
        }"#;
        let meta: ActivityMeta = serde_json::from_str(json).unwrap();
        assert!(meta.extra.contains_key("vocabularly"));
        assert!(meta.vocabulary.is_empty());
    }

    #[test]
    fn test_meta_serialize_camel_case() {
        let meta = ActivityMeta {
            title: "T".into(),
            age_range: "3-6".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["ageRange"], "3-6");
        assert_eq!(value["difficultyLevel"], "beginner");
        assert!(value.get("age_range").is_none());
    }

    #[test]
    fn test_enum_wire_forms() {
        assert_eq!(serde_json::to_string(&Category::Festival).unwrap(), "\"festival\"");
        assert_eq!(serde_json::to_string(&Difficulty::Advanced).unwrap(), "\"advanced\"");
        assert_eq!(serde_json::to_string(&Skill::Cultural).unwrap(), "\"cultural\"");
        assert_eq!(Category::Game.as_str(), "game");
        assert_eq!(Category::ALL.len(), 7);
    }

    #[test]
    fn test_activity_serializes_slug_and_flattened_meta() {
        let activity = Activity::new(
            "counting-game".into(),
            PathBuf::from("/lib/content/activities/counting-game.md"),
            "# Body".into(),
            ActivityMeta {
                title: "Counting Game".into(),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["slug"], "counting-game");
        assert_eq!(value["title"], "Counting Game");
        // Source path and body never reach JSON output
        assert!(value.get("source").is_none());
        assert!(value.get("body").is_none());
    }

    #[test]
    fn test_has_printable() {
        let mut activity = Activity::new(
            "a".into(),
            PathBuf::new(),
            String::new(),
            ActivityMeta::default(),
        );
        assert!(!activity.has_printable());

        activity.meta.printable = Some(Printable {
            title: "Worksheet".into(),
            url: "/printables/a.pdf".into(),
        });
        assert!(activity.has_printable());
    }
}
