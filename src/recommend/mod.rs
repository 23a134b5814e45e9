//! Recommendation module
//!
//! Maps a company profile (industry, company size, goal) to an ordered list
//! of recommended services using a read-only rule table:
//! - Inputs are normalized (case, whitespace, `_` and `-`)
//! - The most specific matching rule wins, earliest declaration breaks ties
//! - No match yields the table's fallback list, empty unless configured

mod error;
mod matcher;
mod rules;

pub use error::{RecommendError, RuleTableError};
pub use rules::RuleTable;

use matcher::{best_match, ProfileKey};

impl RuleTable {
    /// Recommend services for a company profile.
    ///
    /// Pure and deterministic: the same inputs always produce the same
    /// services in the same order. Fails only when an input is blank.
    pub fn recommend(
        &self,
        industry: &str,
        company_size: &str,
        goal: &str,
    ) -> Result<Vec<String>, RecommendError> {
        require("industry", industry)?;
        require("company_size", company_size)?;
        require("goal", goal)?;

        let key = ProfileKey::new(industry, company_size, goal);
        let services = match best_match(&key, &self.rules) {
            Some(rule) => {
                tracing::debug!(rule = %rule.name, "recommendation rule matched");
                rule.services.clone()
            }
            None => {
                tracing::debug!(
                    industry = %key.industry,
                    company_size = %key.company_size,
                    goal = %key.goal,
                    "no recommendation rule matched"
                );
                self.fallback.clone()
            }
        };

        Ok(services)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), RecommendError> {
    if value.trim().is_empty() {
        return Err(RecommendError::InvalidInput { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> RuleTable {
        RuleTable::builtin().unwrap()
    }

    #[test]
    fn test_exact_triples() {
        let table = builtin();
        assert_eq!(
            table.recommend("retail", "small", "grow_online_sales").unwrap(),
            vec!["e-commerce-platform", "digital-marketing"]
        );
        assert_eq!(
            table.recommend("finance", "large", "reduce_costs").unwrap(),
            vec!["process-automation", "cloud-migration"]
        );
    }

    #[test]
    fn test_partial_matches() {
        let table = builtin();
        assert_eq!(
            table.recommend("Publishing", "medium", "anything").unwrap(),
            vec!["Copy editing", "Proofreading", "Content distribution"]
        );
        assert_eq!(
            table.recommend("healthcare", "small", "Lead Generation").unwrap(),
            vec!["Website copywriting", "Landing page creation", "SEO optimization"]
        );
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let table = builtin();
        assert_eq!(
            table.recommend("unknown", "medium", "scale").unwrap(),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_fallback_used_when_configured() {
        let table = RuleTable::from_toml_str(
            r#"
            fallback = ["Content strategy", "Website content audit"]

            [[rules]]
            industry = "publishing"
            services = ["Copy editing"]
            "#,
        )
        .unwrap();

        assert_eq!(
            table.recommend("unknown", "medium", "scale").unwrap(),
            vec!["Content strategy", "Website content audit"]
        );
        assert_eq!(
            table.recommend("publishing", "medium", "scale").unwrap(),
            vec!["Copy editing"]
        );
    }

    #[test]
    fn test_blank_inputs_rejected() {
        let table = builtin();
        assert_eq!(
            table.recommend("", "small", "scale"),
            Err(RecommendError::InvalidInput { field: "industry" })
        );
        assert_eq!(
            table.recommend("retail", "   ", "scale"),
            Err(RecommendError::InvalidInput {
                field: "company_size"
            })
        );
        assert_eq!(
            table.recommend("retail", "small", "\t"),
            Err(RecommendError::InvalidInput { field: "goal" })
        );
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let table = builtin();
        let first = table.recommend("retail", "small", "grow online sales").unwrap();
        for _ in 0..10 {
            assert_eq!(
                table.recommend("retail", "small", "grow online sales").unwrap(),
                first
            );
        }
        // Unrelated calls in between never change later results
        let _ = table.recommend("publishing", "large", "lead generation");
        assert_eq!(
            table.recommend("retail", "small", "grow online sales").unwrap(),
            first
        );
    }

    #[test]
    fn test_exact_triple_beats_industry_rule() {
        let table = RuleTable::from_toml_str(
            r#"
            [[rules]]
            industry = "retail"
            services = ["generic-retail"]

            [[rules]]
            industry = "retail"
            company_size = "small"
            goal = "scale"
            services = ["specific"]
            "#,
        )
        .unwrap();

        assert_eq!(table.recommend("retail", "small", "scale").unwrap(), vec!["specific"]);
        assert_eq!(
            table.recommend("retail", "large", "scale").unwrap(),
            vec!["generic-retail"]
        );
    }
}
