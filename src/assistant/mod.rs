pub(crate) mod rules;
pub(crate) mod session;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A boolean test over normalized (trimmed, lower-cased) input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Any of the phrases appears anywhere in the input.
    Contains { any: Vec<String> },
    /// The input starts with one of the phrases.
    StartsWith { any: Vec<String> },
    All { of: Vec<Predicate> },
    Any { of: Vec<Predicate> },
}

impl Predicate {
    pub fn contains(phrases: &[&str]) -> Self {
        Self::Contains {
            any: fold_phrases(phrases),
        }
    }

    pub fn starts_with(phrases: &[&str]) -> Self {
        Self::StartsWith {
            any: fold_phrases(phrases),
        }
    }

    pub fn all(of: impl IntoIterator<Item = Predicate>) -> Self {
        Self::All {
            of: of.into_iter().collect(),
        }
    }

    pub fn any(of: impl IntoIterator<Item = Predicate>) -> Self {
        Self::Any {
            of: of.into_iter().collect(),
        }
    }

    pub fn is_satisfied_by(&self, normalized: &str) -> bool {
        match self {
            Self::Contains { any } => any.iter().any(|phrase| normalized.contains(phrase.as_str())),
            Self::StartsWith { any } => any
                .iter()
                .any(|phrase| normalized.starts_with(phrase.as_str())),
            Self::All { of } => of.iter().all(|predicate| predicate.is_satisfied_by(normalized)),
            Self::Any { of } => of.iter().any(|predicate| predicate.is_satisfied_by(normalized)),
        }
    }

    /// Case-folds every phrase and rejects predicates that could never fire
    /// or would fire on everything.
    fn normalized(self, rule: &str) -> Result<Self> {
        Ok(match self {
            Self::Contains { any } => Self::Contains {
                any: checked_phrases(any, rule)?,
            },
            Self::StartsWith { any } => Self::StartsWith {
                any: checked_phrases(any, rule)?,
            },
            Self::All { of } => Self::All {
                of: checked_predicates(of, rule)?,
            },
            Self::Any { of } => Self::Any {
                of: checked_predicates(of, rule)?,
            },
        })
    }
}

fn fold_phrases(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|phrase| phrase.to_lowercase()).collect()
}

fn checked_phrases(phrases: Vec<String>, rule: &str) -> Result<Vec<String>> {
    ensure!(!phrases.is_empty(), "Rule `{rule}` has a predicate with no phrases");
    phrases
        .into_iter()
        .map(|phrase| {
            let phrase = phrase.to_lowercase();
            ensure!(!phrase.trim().is_empty(), "Rule `{rule}` has a blank phrase");
            Ok(phrase)
        })
        .collect()
}

fn checked_predicates(predicates: Vec<Predicate>, rule: &str) -> Result<Vec<Predicate>> {
    ensure!(
        !predicates.is_empty(),
        "Rule `{rule}` has a compound predicate with no members"
    );
    predicates
        .into_iter()
        .map(|predicate| predicate.normalized(rule))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub predicate: Predicate,
    pub response: String,
}

impl Rule {
    pub fn new(name: &str, predicate: Predicate, response: &str) -> Self {
        Self {
            name: name.to_owned(),
            predicate,
            response: response.to_owned(),
        }
    }
}

/// Rule table as written in a rules TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub default_response: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleTable {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse rules TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize rules to TOML")
    }

    pub fn into_matcher(self) -> Result<IntentMatcher> {
        IntentMatcher::new(self.rules, self.default_response)
    }
}

/// Picks a canned response for free-text input from an ordered rule table.
///
/// The first rule whose predicate holds wins; later rules are never
/// evaluated for that input. Input matching no rule gets the default response.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rules: Vec<Rule>,
    default_response: String,
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self {
            rules: rules::cooking_rules(),
            default_response: rules::DEFAULT_RESPONSE.to_owned(),
        }
    }
}

impl IntentMatcher {
    /// Case-folds every phrase and validates the table, naming the first
    /// offending rule.
    pub fn new(rules: Vec<Rule>, default_response: impl Into<String>) -> Result<Self> {
        let default_response = default_response.into();
        ensure!(
            !default_response.trim().is_empty(),
            "The default response must not be blank"
        );
        let rules = rules
            .into_iter()
            .map(|rule| {
                if rule.response.trim().is_empty() {
                    bail!("Rule `{}` has a blank response", rule.name);
                }
                Ok(Rule {
                    predicate: rule.predicate.normalized(&rule.name)?,
                    ..rule
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            default_response,
        })
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;

        RuleTable::from_toml(&text)?
            .into_matcher()
            .with_context(|| format!("Invalid rules file {}", path.display()))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }

    pub fn to_table(&self) -> RuleTable {
        RuleTable {
            default_response: self.default_response.clone(),
            rules: self.rules.clone(),
        }
    }

    /// Returns the rule that fires for `input`, if any.
    pub fn explain(&self, input: &str) -> Option<&Rule> {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let rule = self
            .rules
            .iter()
            .find(|rule| rule.predicate.is_satisfied_by(&normalized));
        match rule {
            Some(rule) => tracing::debug!(rule = %rule.name, "Matched rule"),
            None => tracing::debug!("No rule matched, using default response"),
        }
        rule
    }

    pub fn respond(&self, input: &str) -> &str {
        self.explain(input)
            .map_or(self.default_response.as_str(), |rule| rule.response.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_of(matcher: &IntentMatcher, name: &str) -> String {
        matcher
            .rules()
            .iter()
            .find(|rule| rule.name == name)
            .map(|rule| rule.response.clone())
            .unwrap()
    }

    #[test]
    fn chicken_anywhere_in_any_case() {
        let matcher = IntentMatcher::default();
        let chicken = response_of(&matcher, "chicken");

        for input in [
            "chicken",
            "CHICKEN",
            "Chicken",
            "I bought some ChIcKeN thighs",
            "   roast chicken   ",
        ] {
            assert_eq!(matcher.respond(input), chicken, "input: {input}");
        }
    }

    #[test]
    fn greeting_wins_over_later_keywords() {
        let matcher = IntentMatcher::default();
        assert_eq!(
            matcher.respond("hello, any chicken recipes?"),
            response_of(&matcher, "greeting")
        );
        assert_eq!(
            matcher.respond("Good evening! dessert please"),
            response_of(&matcher, "greeting")
        );
    }

    #[test]
    fn greeting_is_anchored() {
        let matcher = IntentMatcher::default();
        assert_eq!(
            matcher.explain("oh hi, chicken?").map(|rule| rule.name.as_str()),
            Some("chicken")
        );
    }

    #[test]
    fn earlier_rule_wins_when_two_match() {
        let matcher = IntentMatcher::default();
        assert_eq!(
            matcher.explain("beef or chicken?").map(|rule| rule.name.as_str()),
            Some("chicken")
        );
        assert_eq!(
            matcher.explain("quick vegan dinner").map(|rule| rule.name.as_str()),
            Some("vegetarian")
        );
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let matcher = IntentMatcher::default();
        let first = matcher.respond("any easy pasta ideas?").to_owned();
        for _ in 0..10 {
            assert_eq!(matcher.respond("any easy pasta ideas?"), first);
        }
    }

    #[test]
    fn unmatched_input_gets_default() {
        let matcher = IntentMatcher::default();
        assert_eq!(
            matcher.respond("xyzzy unrelated gibberish"),
            rules::DEFAULT_RESPONSE
        );
        assert!(matcher.explain("xyzzy unrelated gibberish").is_none());
    }

    #[test]
    fn blank_input_does_not_panic() {
        let matcher = IntentMatcher::default();
        assert_eq!(matcher.respond(""), rules::DEFAULT_RESPONSE);
        assert_eq!(matcher.respond(" \t\n "), rules::DEFAULT_RESPONSE);
    }

    #[test]
    fn end_to_end_scenario() {
        let matcher = IntentMatcher::default();
        assert_eq!(
            matcher.respond("What can I make with chicken?"),
            response_of(&matcher, "chicken")
        );
        assert_eq!(matcher.respond("bye"), response_of(&matcher, "farewell"));
        assert_eq!(
            matcher.respond("xyzzy unrelated gibberish"),
            rules::DEFAULT_RESPONSE
        );
    }

    #[test]
    fn pantry_rule_reads_as_phrase_or_having_food() {
        let matcher = IntentMatcher::default();
        let fired = |input: &str| matcher.explain(input).map(|rule| rule.name.clone());

        // `what can i make` alone is enough.
        assert_eq!(fired("what can i make tonight").as_deref(), Some("pantry"));
        // `have` needs `food` (or `ingredient`, which an earlier rule claims).
        assert_eq!(fired("i have some food left").as_deref(), Some("pantry"));
        assert_eq!(
            fired("i have ingredients").as_deref(),
            Some("ingredients")
        );
        // `have` on its own does not reach the pantry rule.
        assert_eq!(fired("i have no idea").as_deref(), None);
    }

    #[test]
    fn custom_table_from_toml() {
        let table = RuleTable::from_toml(
            r#"
default_response = "Try asking about soup."

[[rules]]
name = "greeting"
response = "Hey there."
predicate = { kind = "starts_with", any = ["Hi", "hello"] }

[[rules]]
name = "soup"
response = "Soup time."

[rules.predicate]
kind = "any"

[[rules.predicate.of]]
kind = "contains"
any = ["SOUP"]

[[rules.predicate.of]]
kind = "all"
of = [{ kind = "contains", any = ["broth"] }, { kind = "contains", any = ["warm", "hot"] }]
"#,
        )
        .unwrap();
        let matcher = table.into_matcher().unwrap();

        assert_eq!(matcher.respond("HI soup"), "Hey there.");
        assert_eq!(matcher.respond("tomato soup"), "Soup time.");
        assert_eq!(matcher.respond("hot broth"), "Soup time.");
        assert_eq!(matcher.respond("cold broth"), "Try asking about soup.");
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let empty_phrases = RuleTable {
            default_response: "fallback".to_owned(),
            rules: vec![Rule::new(
                "broken",
                Predicate::Contains { any: vec![] },
                "never",
            )],
        };
        let error = empty_phrases.into_matcher().unwrap_err();
        assert!(error.to_string().contains("broken"));

        let blank_phrase = RuleTable {
            default_response: "fallback".to_owned(),
            rules: vec![Rule::new(
                "blank",
                Predicate::any([Predicate::contains(&["  "])]),
                "always",
            )],
        };
        assert!(blank_phrase.into_matcher().is_err());

        let empty_compound = RuleTable {
            default_response: "fallback".to_owned(),
            rules: vec![Rule::new(
                "hollow",
                Predicate::All { of: vec![] },
                "vacuous",
            )],
        };
        assert!(empty_compound.into_matcher().is_err());

        let blank_default = RuleTable {
            default_response: " ".to_owned(),
            rules: vec![],
        };
        assert!(blank_default.into_matcher().is_err());
    }

    #[test]
    fn constructed_rules_are_case_folded() {
        let soup = Rule {
            name: "soup".to_owned(),
            predicate: Predicate::Contains {
                any: vec!["Soup".to_owned()],
            },
            response: "Soup it is!".to_owned(),
        };
        let matcher = IntentMatcher::new(vec![soup], "No idea.").unwrap();

        assert_eq!(matcher.respond("soup"), "Soup it is!");
        assert_eq!(matcher.respond("Tomato SOUP please"), "Soup it is!");
        assert_eq!(matcher.respond("salad"), "No idea.");
    }

    #[test]
    fn constructor_rejects_catch_all_phrases() {
        let blank = Rule {
            name: "anything".to_owned(),
            predicate: Predicate::Contains {
                any: vec![String::new()],
            },
            response: "Always me.".to_owned(),
        };
        let error = IntentMatcher::new(vec![blank], "No idea.").unwrap_err();
        assert!(error.to_string().contains("anything"));
    }

    #[test]
    fn builtin_table_exports_and_reloads() {
        let matcher = IntentMatcher::default();
        let text = matcher.to_table().to_toml().unwrap();
        let reloaded = RuleTable::from_toml(&text).unwrap().into_matcher().unwrap();

        assert_eq!(reloaded.rules(), matcher.rules());
        assert_eq!(reloaded.default_response(), matcher.default_response());
    }
}
