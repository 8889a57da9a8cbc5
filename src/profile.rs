// src/profile.rs
use crate::error::ProfileError;
use crate::template::build_environment;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_TEXT_FORMAT: &str = "{{ text }} (Topic: {{ topic }})";

/// Longest timestamp window a profile may ask for, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

const DEFAULT_TOPICS: [&str; 6] = [
    "politics",
    "health",
    "technology",
    "education",
    "sports",
    "entertainment",
];

const DEFAULT_TEMPLATES: [&str; 22] = [
    "Today was an interesting day at the university!",
    "We need to talk more about this.",
    "Does anyone have information on the subject?",
    "Sharing my opinion on this.",
    "Saw an interesting piece of news today.",
    "What do you all think about this question?",
    "Important event happening on campus.",
    "I'd like to hear other perspectives.",
    "Found something new and wanted to share.",
    "Thought of the day on this topic.",
    "Important updates for everyone.",
    "Interesting debate in class.",
    "New project in progress.",
    "The survey results were surprising.",
    "Productive discussion with colleagues.",
    "Innovations coming to the university.",
    "Important changes on campus.",
    "An enriching experience today.",
    "Valuable lessons shared.",
    "Diverse perspectives on the subject.",
    "Critical analysis needed here.",
    "Continuous growth of the community.",
];

/// Parameters for synthetic message generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedProfile {
    pub users: usize,
    pub min_age: i32,
    pub max_age: i32,
    pub topics: Vec<String>,
    pub templates: Vec<String>,
    pub window_days: i64,
    pub text_format: String,
}

impl Default for SeedProfile {
    fn default() -> Self {
        SeedProfile {
            users: 10,
            min_age: 18,
            max_age: 65,
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
            window_days: 30,
            text_format: DEFAULT_TEXT_FORMAT.to_string(),
        }
    }
}

impl SeedProfile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ProfileError> {
        let profile: SeedProfile = serde_yaml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.users == 0 {
            return Err(ProfileError::Invalid("at least one user is required".into()));
        }
        if self.topics.is_empty() {
            return Err(ProfileError::Invalid("at least one topic is required".into()));
        }
        if self.templates.is_empty() {
            return Err(ProfileError::Invalid("at least one message template is required".into()));
        }
        if self.min_age > self.max_age {
            return Err(ProfileError::Invalid(format!(
                "min_age {} is greater than max_age {}",
                self.min_age, self.max_age
            )));
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(ProfileError::Invalid(format!(
                "window_days must be between 0 and {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        build_environment(&self.text_format)?;
        Ok(())
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        let profile = SeedProfile::default();
        profile.validate().unwrap();
        assert_eq!(profile.users, 10);
        assert_eq!(profile.topics.len(), 6);
        assert!(profile.has_topic("technology"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let profile = SeedProfile::from_yaml("users: 3\ntopics: [rust, go]\n").unwrap();
        assert_eq!(profile.users, 3);
        assert_eq!(profile.topics, vec!["rust", "go"]);
        assert_eq!(profile.min_age, 18);
        assert_eq!(profile.templates.len(), 22);
    }

    #[test]
    fn rejects_inverted_age_range() {
        let err = SeedProfile::from_yaml("min_age: 70\nmax_age: 20\n").unwrap_err();
        assert!(matches!(err, ProfileError::Invalid(_)));
    }

    #[test]
    fn rejects_out_of_range_window() {
        let err = SeedProfile::from_yaml("window_days: 100000000\n").unwrap_err();
        assert!(matches!(err, ProfileError::Invalid(_)));

        let err = SeedProfile::from_yaml("window_days: -1\n").unwrap_err();
        assert!(matches!(err, ProfileError::Invalid(_)));

        SeedProfile::from_yaml(&format!("window_days: {}\n", MAX_WINDOW_DAYS)).unwrap();
    }

    #[test]
    fn rejects_empty_topics() {
        let err = SeedProfile::from_yaml("topics: []\n").unwrap_err();
        assert!(matches!(err, ProfileError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SeedProfile::from_yaml("userz: 3\n").unwrap_err();
        assert!(matches!(err, ProfileError::Yaml(_)));
    }

    #[test]
    fn rejects_broken_text_format() {
        let err = SeedProfile::from_yaml("text_format: \"{{ text \"\n").unwrap_err();
        assert!(matches!(err, ProfileError::Template(_)));
    }
}
