//! Rule matching module
//!
//! Normalizes profile values and selects the winning rule for a profile.

use super::rules::CompiledRule;

/// Normalized lookup key built from one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileKey {
    pub industry: String,
    pub company_size: String,
    pub goal: String,
}

impl ProfileKey {
    pub fn new(industry: &str, company_size: &str, goal: &str) -> Self {
        Self {
            industry: normalize(industry),
            company_size: normalize(company_size),
            goal: normalize(goal),
        }
    }
}

/// Normalize a value for comparison.
///
/// Lowercases and treats runs of whitespace, `_` and `-` as one space, so
/// `"Lead_Generation"` and `" lead  generation "` compare equal.
pub fn normalize(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the most specific matching rule.
///
/// Rules declaring more criteria win over rules declaring fewer. Among rules
/// of equal specificity the one declared first wins.
pub fn best_match<'a>(key: &ProfileKey, rules: &'a [CompiledRule]) -> Option<&'a CompiledRule> {
    let mut best: Option<&CompiledRule> = None;

    for rule in rules.iter().filter(|rule| matches_rule(rule, key)) {
        match best {
            Some(current) if current.specificity() >= rule.specificity() => {}
            _ => best = Some(rule),
        }
    }

    best
}

/// Check if a profile satisfies every criterion a rule declares
fn matches_rule(rule: &CompiledRule, key: &ProfileKey) -> bool {
    match_criterion(rule.industry.as_deref(), &key.industry)
        && match_criterion(rule.company_size.as_deref(), &key.company_size)
        && match_criterion(rule.goal.as_deref(), &key.goal)
}

/// Undeclared criteria match anything
fn match_criterion(accepted: Option<&[String]>, value: &str) -> bool {
    match accepted {
        Some(values) => values.iter().any(|v| v == value),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rule(
        name: &str,
        industry: Option<&str>,
        company_size: Option<&str>,
        goal: Option<&str>,
    ) -> CompiledRule {
        CompiledRule {
            name: name.to_string(),
            industry: industry.map(|v| vec![normalize(v)]),
            company_size: company_size.map(|v| vec![normalize(v)]),
            goal: goal.map(|v| vec![normalize(v)]),
            services: vec![name.to_string()],
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Lead_Generation"), "lead generation");
        assert_eq!(normalize("  lead   generation "), "lead generation");
        assert_eq!(normalize("grow-online_sales"), "grow online sales");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_match_criterion_wildcard() {
        assert!(match_criterion(None, "anything"));
        assert!(match_criterion(None, ""));
    }

    #[test]
    fn test_match_criterion_any_of() {
        let accepted = vec!["retail".to_string(), "e commerce".to_string()];
        assert!(match_criterion(Some(&accepted), "retail"));
        assert!(match_criterion(Some(&accepted), "e commerce"));
        assert!(!match_criterion(Some(&accepted), "finance"));
    }

    #[test]
    fn test_exact_triple_beats_partial() {
        let rules = vec![
            make_rule("industry-only", Some("retail"), None, None),
            make_rule("exact", Some("retail"), Some("small"), Some("scale")),
            make_rule("goal-only", None, None, Some("scale")),
        ];

        let key = ProfileKey::new("Retail", "small", "scale");
        assert_eq!(best_match(&key, &rules).map(|r| r.name.as_str()), Some("exact"));

        let key = ProfileKey::new("retail", "large", "scale");
        assert_eq!(
            best_match(&key, &rules).map(|r| r.name.as_str()),
            Some("industry-only")
        );
    }

    #[test]
    fn test_equal_specificity_uses_declaration_order() {
        let rules = vec![
            make_rule("first", Some("publishing"), None, None),
            make_rule("second", None, None, Some("lead generation")),
        ];

        let key = ProfileKey::new("publishing", "small", "lead_generation");
        assert_eq!(best_match(&key, &rules).map(|r| r.name.as_str()), Some("first"));
    }

    #[test]
    fn test_no_match() {
        let rules = vec![make_rule("retail", Some("retail"), None, None)];
        let key = ProfileKey::new("unknown", "medium", "scale");
        assert!(best_match(&key, &rules).is_none());
    }

    #[test]
    fn test_catch_all_is_least_specific() {
        let rules = vec![
            make_rule("catch-all", None, None, None),
            make_rule("retail", Some("retail"), None, None),
        ];

        let key = ProfileKey::new("retail", "small", "scale");
        assert_eq!(best_match(&key, &rules).map(|r| r.name.as_str()), Some("retail"));

        let key = ProfileKey::new("finance", "small", "scale");
        assert_eq!(
            best_match(&key, &rules).map(|r| r.name.as_str()),
            Some("catch-all")
        );
    }
}
