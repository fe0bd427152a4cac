use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Dot-separated path into a record, e.g. `job_seeker.user.full_name`.
///
/// Paths are supplied by developers at each listing call site, so a malformed
/// path is a programming error and panics instead of surfacing as a user error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        assert!(
            segments.iter().all(|segment| !segment.is_empty()),
            "field path `{path}` contains an empty segment"
        );
        Self { segments }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Case-insensitive substring match on the addressed field.
    pub fn contains(&self, needle: impl Into<String>) -> Predicate {
        self.nest(Condition::ContainsInsensitive(needle.into()))
    }

    pub fn equals(&self, value: impl Into<FieldValue>) -> Predicate {
        self.nest(Condition::Equals(value.into()))
    }

    fn nest(&self, condition: Condition) -> Predicate {
        let (leaf, relations) = self
            .segments
            .split_last()
            .expect("parsed paths hold at least one segment");

        relations.iter().rev().fold(
            Predicate::Field {
                name: leaf.clone(),
                condition,
            },
            |inner, relation| Predicate::Related {
                relation: relation.clone(),
                predicate: Box::new(inner),
            },
        )
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Shorthand for [`FieldPath::parse`].
pub fn field(path: &str) -> FieldPath {
    FieldPath::parse(path)
}

/// Scalar values a predicate can compare against.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals(FieldValue),
    ContainsInsensitive(String),
}

impl Condition {
    fn holds(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Condition::Equals(expected), actual) => expected == actual,
            (Condition::ContainsInsensitive(needle), FieldValue::Text(text)) => {
                text.to_lowercase().contains(&needle.to_lowercase())
            }
            (Condition::ContainsInsensitive(_), _) => false,
        }
    }
}

/// Backend-neutral filter tree handed to persistence executors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    All,
    Field {
        name: String,
        condition: Condition,
    },
    Related {
        relation: String,
        predicate: Box<Predicate>,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::And(predicates.into_iter().collect())
}

pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Or(predicates.into_iter().collect())
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        and([self, other])
    }

    pub fn matches(&self, record: &dyn Queryable) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Field { name, condition } => record
                .field(name)
                .is_some_and(|value| condition.holds(&value)),
            Predicate::Related {
                relation,
                predicate,
            } => record
                .related(relation)
                .is_some_and(|related| predicate.matches(related)),
            Predicate::And(predicates) => predicates.iter().all(|p| p.matches(record)),
            Predicate::Or(predicates) => predicates.iter().any(|p| p.matches(record)),
        }
    }
}

/// Records that can be filtered and sorted by the in-memory executor.
pub trait Queryable {
    fn field(&self, name: &str) -> Option<FieldValue>;

    fn related(&self, _relation: &str) -> Option<&dyn Queryable> {
        None
    }

    fn resolve(&self, path: &FieldPath) -> Option<FieldValue>
    where
        Self: Sized,
    {
        resolve_path(self, path)
    }
}

fn resolve_path(record: &dyn Queryable, path: &FieldPath) -> Option<FieldValue> {
    let mut segments: Vec<&str> = path.segments().collect();
    let leaf = segments.pop()?;
    let mut current = record;
    for relation in segments {
        current = current.related(relation)?;
    }
    current.field(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User {
        full_name: &'static str,
    }

    impl Queryable for User {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "full_name" => Some(self.full_name.into()),
                _ => None,
            }
        }
    }

    struct Seeker {
        user: User,
    }

    impl Queryable for Seeker {
        fn field(&self, _name: &str) -> Option<FieldValue> {
            None
        }

        fn related(&self, relation: &str) -> Option<&dyn Queryable> {
            match relation {
                "user" => Some(&self.user),
                _ => None,
            }
        }
    }

    struct Application {
        active: bool,
        job_seeker: Seeker,
    }

    impl Queryable for Application {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "active" => Some(self.active.into()),
                _ => None,
            }
        }

        fn related(&self, relation: &str) -> Option<&dyn Queryable> {
            match relation {
                "job_seeker" => Some(&self.job_seeker),
                _ => None,
            }
        }
    }

    fn application(name: &'static str, active: bool) -> Application {
        Application {
            active,
            job_seeker: Seeker {
                user: User { full_name: name },
            },
        }
    }

    #[test]
    fn contains_nests_to_path_depth() {
        let predicate = field("job_seeker.user.full_name").contains("ada");
        assert_eq!(
            predicate,
            Predicate::Related {
                relation: "job_seeker".to_string(),
                predicate: Box::new(Predicate::Related {
                    relation: "user".to_string(),
                    predicate: Box::new(Predicate::Field {
                        name: "full_name".to_string(),
                        condition: Condition::ContainsInsensitive("ada".to_string()),
                    }),
                }),
            }
        );
    }

    #[test]
    fn single_segment_path_is_a_plain_field() {
        let predicate = field("title").equals("Rust");
        assert_eq!(
            predicate,
            Predicate::Field {
                name: "title".to_string(),
                condition: Condition::Equals(FieldValue::Text("Rust".to_string())),
            }
        );
    }

    #[test]
    #[should_panic(expected = "empty segment")]
    fn empty_segment_panics() {
        field("job..title");
    }

    #[test]
    #[should_panic(expected = "empty segment")]
    fn empty_path_panics() {
        field("");
    }

    #[test]
    fn contains_is_case_insensitive_through_relations() {
        let record = application("Ada Lovelace", true);
        assert!(field("job_seeker.user.full_name")
            .contains("LOVE")
            .matches(&record));
        assert!(!field("job_seeker.user.full_name")
            .contains("grace")
            .matches(&record));
    }

    #[test]
    fn missing_fields_and_relations_never_match() {
        let record = application("Ada", true);
        assert!(!field("job.title").contains("a").matches(&record));
        assert!(!field("job_seeker.email").contains("a").matches(&record));
    }

    #[test]
    fn combinators_follow_boolean_semantics() {
        let record = application("Ada", false);
        let inactive = field("active").equals(false);
        let named_grace = field("job_seeker.user.full_name").contains("grace");

        assert!(or([inactive.clone(), named_grace.clone()]).matches(&record));
        assert!(!inactive.and(named_grace).matches(&record));
        assert!(Predicate::All.matches(&record));
        assert!(Predicate::And(Vec::new()).matches(&record));
        assert!(!Predicate::Or(Vec::new()).matches(&record));
    }

    #[test]
    fn resolve_walks_nested_paths() {
        let record = application("Grace Hopper", true);
        assert_eq!(
            record.resolve(&field("job_seeker.user.full_name")),
            Some(FieldValue::Text("Grace Hopper".to_string()))
        );
        assert_eq!(record.resolve(&field("job_seeker.user.email")), None);
    }
}
