//! Rule table types and loading
//!
//! Rules are declared in TOML, validated once, and compiled into a
//! normalized form that request handling only ever reads.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::error::RuleTableError;
use super::matcher::normalize;

const DEFAULT_RULES: &str = include_str!("default_rules.toml");

/// A rule criterion: one accepted value or a list of accepted values
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Criterion {
    One(String),
    AnyOf(Vec<String>),
}

impl Criterion {
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::AnyOf(values) => values,
        }
    }
}

/// A rule as declared in a rule file
///
/// Unknown keys are rejected: a misspelled criterion would otherwise turn
/// the rule into a catch-all.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Optional rule name, used in logs and validation errors
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<Criterion>,
    #[serde(default)]
    pub company_size: Option<Criterion>,
    #[serde(default)]
    pub goal: Option<Criterion>,
    /// Services returned when this rule wins, in order
    pub services: Vec<String>,
}

/// Rule file layout
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Services returned when no rule matches
    #[serde(default)]
    pub fallback: Vec<String>,
}

/// Validated rule with normalized criteria
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub industry: Option<Vec<String>>,
    pub company_size: Option<Vec<String>>,
    pub goal: Option<Vec<String>>,
    pub services: Vec<String>,
}

impl CompiledRule {
    /// Number of declared criteria (3 for an exact triple, 0 for a catch-all)
    pub fn specificity(&self) -> usize {
        [&self.industry, &self.company_size, &self.goal]
            .iter()
            .filter(|criterion| criterion.is_some())
            .count()
    }
}

/// Immutable rule table shared by all requests
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub(super) rules: Vec<CompiledRule>,
    pub(super) fallback: Vec<String>,
}

impl RuleTable {
    /// Rule table compiled into the binary
    pub fn builtin() -> Result<Self, RuleTableError> {
        Self::from_toml_str(DEFAULT_RULES)
    }

    /// Load a rule table from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RuleTableError> {
        let file: RuleFile = toml::from_str(content)?;
        Self::from_rule_file(file)
    }

    /// Validate and compile declared rules
    pub fn from_rule_file(file: RuleFile) -> Result<Self, RuleTableError> {
        let rules = file
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| compile_rule(index, rule))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(blank) = file.fallback.iter().find(|s| s.trim().is_empty()) {
            return Err(RuleTableError::Invalid {
                rule: "fallback".to_string(),
                reason: format!("blank service name {blank:?}"),
            });
        }

        Ok(Self {
            rules,
            fallback: file.fallback,
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }
}

fn compile_rule(index: usize, rule: Rule) -> Result<CompiledRule, RuleTableError> {
    let name = rule.name.unwrap_or_else(|| format!("#{index}"));
    let invalid = |reason: String| RuleTableError::Invalid {
        rule: name.clone(),
        reason,
    };

    if rule.services.is_empty() {
        return Err(invalid("no services listed".to_string()));
    }

    let mut seen = HashSet::new();
    for service in &rule.services {
        if service.trim().is_empty() {
            return Err(invalid(format!("blank service name {service:?}")));
        }
        if !seen.insert(service.trim()) {
            return Err(invalid(format!("service {service:?} listed twice")));
        }
    }

    let industry = compile_criterion("industry", rule.industry.as_ref()).map_err(&invalid)?;
    let company_size =
        compile_criterion("company_size", rule.company_size.as_ref()).map_err(&invalid)?;
    let goal = compile_criterion("goal", rule.goal.as_ref()).map_err(&invalid)?;

    Ok(CompiledRule {
        name,
        industry,
        company_size,
        goal,
        services: rule.services,
    })
}

fn compile_criterion(
    field: &str,
    criterion: Option<&Criterion>,
) -> Result<Option<Vec<String>>, String> {
    let Some(criterion) = criterion else {
        return Ok(None);
    };

    let values = criterion.values();
    if values.is_empty() {
        return Err(format!("`{field}` lists no values"));
    }

    values
        .iter()
        .map(|value| {
            let normalized = normalize(value);
            if normalized.is_empty() {
                Err(format!("`{field}` contains a blank value"))
            } else {
                Ok(normalized)
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table_loads() {
        let table = RuleTable::builtin().unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.fallback().is_empty());
    }

    #[test]
    fn test_parse_single_and_any_of() {
        let table = RuleTable::from_toml_str(
            r#"
            fallback = ["Content strategy"]

            [[rules]]
            industry = ["Retail", "e-commerce"]
            company_size = "small"
            services = ["digital-marketing"]
            "#,
        )
        .unwrap();

        let rule = &table.rules[0];
        assert_eq!(rule.name, "#0");
        assert_eq!(
            rule.industry,
            Some(vec!["retail".to_string(), "e commerce".to_string()])
        );
        assert_eq!(rule.company_size, Some(vec!["small".to_string()]));
        assert_eq!(rule.goal, None);
        assert_eq!(rule.specificity(), 2);
        assert_eq!(table.fallback(), ["Content strategy".to_string()]);
    }

    #[test]
    fn test_reject_empty_services() {
        let err = RuleTable::from_toml_str(
            r#"
            [[rules]]
            name = "empty"
            industry = "retail"
            services = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleTableError::Invalid { ref rule, .. } if rule == "empty"));
    }

    #[test]
    fn test_reject_blank_values() {
        let blank_service = RuleTable::from_toml_str(
            r#"
            [[rules]]
            services = ["  "]
            "#,
        );
        assert!(matches!(blank_service, Err(RuleTableError::Invalid { .. })));

        let blank_criterion = RuleTable::from_toml_str(
            r#"
            [[rules]]
            goal = "__"
            services = ["x"]
            "#,
        );
        assert!(matches!(blank_criterion, Err(RuleTableError::Invalid { .. })));

        let empty_any_of = RuleTable::from_toml_str(
            r#"
            [[rules]]
            industry = []
            services = ["x"]
            "#,
        );
        assert!(matches!(empty_any_of, Err(RuleTableError::Invalid { .. })));

        let blank_fallback = RuleTable::from_toml_str(r#"fallback = [""]"#);
        assert!(matches!(blank_fallback, Err(RuleTableError::Invalid { .. })));
    }

    #[test]
    fn test_reject_duplicate_service() {
        let err = RuleTable::from_toml_str(
            r#"
            [[rules]]
            services = ["SEO optimization", "SEO optimization"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_reject_misspelled_criterion() {
        let err = RuleTable::from_toml_str(
            r#"
            [[rules]]
            industy = "publishing"
            services = ["Copy editing"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleTableError::Parse(_)));
        assert!(err.to_string().contains("industy"));
    }

    #[test]
    fn test_reject_unknown_top_level_key() {
        let err = RuleTable::from_toml_str(
            r#"
            fallbacks = ["Content strategy"]

            [[rules]]
            goal = "reduce costs"
            services = ["process-automation"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleTableError::Parse(_)));
    }

    #[test]
    fn test_reject_malformed_toml() {
        let err = RuleTable::from_toml_str("[[rules]\nservices = ").unwrap_err();
        assert!(matches!(err, RuleTableError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[rules]]
            name = "ops"
            goal = "reduce costs"
            services = ["process-automation"]
            "#
        )
        .unwrap();

        let table = RuleTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleTable::load("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, RuleTableError::Io { .. }));
    }

    #[test]
    fn test_sample_rule_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/rules.toml");
        let table = RuleTable::load(path).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.fallback(),
            ["Content strategy".to_string(), "Website content audit".to_string()]
        );
    }
}
