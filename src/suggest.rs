//! Keyword-based feature suggestions from project goals.

use crate::models::{Feature, Priority, Project};

struct Rule {
    keywords: &'static [&'static str],
    name: &'static str,
    description: &'static str,
    priority: Priority,
}

/// Evaluated in order. Rules are independent: every matching rule
/// contributes its feature.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["ai", "analysis"],
        name: "AI Document Analyzer",
        description: "Analyze legal documents using AI",
        priority: Priority::High,
    },
    Rule {
        keywords: &["dispute", "resolution"],
        name: "Dispute Resolution Engine",
        description: "Automated dispute resolution system",
        priority: Priority::High,
    },
    Rule {
        keywords: &["accuracy"],
        name: "Accuracy Verification System",
        description: "Verify the accuracy of AI-generated results",
        priority: Priority::Medium,
    },
];

impl Rule {
    /// Case-insensitive substring match against any goal.
    fn matches(&self, goals: &[String]) -> bool {
        goals.iter().any(|goal| {
            let goal = goal.to_lowercase();
            self.keywords.iter().any(|kw| goal.contains(kw))
        })
    }
}

/// Suggest features for `project` from its goal text.
///
/// Returns a fresh list on every call, with new ids and
/// `suggested_by_system` set. Manual features are never included; callers
/// that want to keep them must merge explicitly.
pub fn suggest_features(project: Option<&Project>) -> Vec<Feature> {
    let Some(project) = project else {
        return Vec::new();
    };

    let features: Vec<Feature> = RULES
        .iter()
        .filter(|rule| rule.matches(&project.goals))
        .map(|rule| Feature::suggested(rule.name, rule.description, rule.priority))
        .collect();

    tracing::debug!(
        project = %project.id,
        count = features.len(),
        "Suggested features from goals"
    );
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(goals: &[&str]) -> Project {
        Project {
            id: "p".to_string(),
            name: "P".to_string(),
            goals: goals.iter().map(|g| g.to_string()).collect(),
            references: vec![],
        }
    }

    fn names(features: &[Feature]) -> Vec<&str> {
        features.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn no_project_yields_nothing() {
        assert!(suggest_features(None).is_empty());
    }

    #[test]
    fn unmatched_goals_yield_nothing() {
        let p = project(&["Streamline document sharing"]);
        assert!(suggest_features(Some(&p)).is_empty());
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let p = project(&["Full ANALYSIS of contracts"]);
        assert_eq!(names(&suggest_features(Some(&p))), vec!["AI Document Analyzer"]);
    }

    #[test]
    fn all_rules_in_order() {
        let p = project(&["Achieve high accuracy", "Faster dispute handling", "Use AI"]);
        assert_eq!(
            names(&suggest_features(Some(&p))),
            vec![
                "AI Document Analyzer",
                "Dispute Resolution Engine",
                "Accuracy Verification System"
            ]
        );
    }

    #[test]
    fn each_rule_contributes_once() {
        let p = project(&["AI one", "AI two", "analysis three"]);
        assert_eq!(suggest_features(Some(&p)).len(), 1);
    }

    #[test]
    fn ids_are_fresh_per_call() {
        let p = project(&["Use AI"]);
        let first = suggest_features(Some(&p));
        let second = suggest_features(Some(&p));
        assert_ne!(first[0].id, second[0].id);
    }
}
