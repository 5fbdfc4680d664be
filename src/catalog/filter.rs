//! Solution filtering, as the comparator page applies it.
//!
//! Categories are any-of; complexity, cost, and privacy are exact matches.
//! Unset criteria match everything.

use crate::domain::{Solution, SolutionFilter};

pub const CATEGORIES: [&str; 4] = ["Size Recommendation", "VTO/AR", "Return Management", "Feedback Analysis"];
pub const COMPLEXITIES: [&str; 3] = [
    "Simple (Plug-and-Play)",
    "Moderate (Configuration Needed)",
    "Complex (Backend Development Required)",
];
pub const COSTS: [&str; 4] = ["$", "$$", "$$$", "$$$$"];
pub const PRIVACY_LEVELS: [&str; 3] = ["Low", "Medium", "High"];

impl SolutionFilter {
    pub fn matches(&self, solution: &Solution) -> bool {
        if !self.categories.is_empty() && !self.categories.iter().any(|c| *c == solution.category) {
            return false;
        }
        matches_exact(solution.integration_complexity.as_deref(), self.complexity.as_deref())
            && matches_exact(solution.indicative_cost.as_deref(), self.cost.as_deref())
            && matches_exact(solution.privacy_concern_level.as_deref(), self.privacy.as_deref())
    }
}

fn matches_exact(value: Option<&str>, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => value == Some(f),
    }
}

pub fn filter_solutions(solutions: &[Solution], filter: &SolutionFilter) -> Vec<Solution> {
    solutions.iter().filter(|s| filter.matches(s)).cloned().collect()
}

/// Reduction-rate range for display (values are percentages).
pub fn format_reduction_rate(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (Some(l), Some(h)) if l == h => format!("{l:.0}%"),
        (Some(l), Some(h)) => format!("{l:.0}% - {h:.0}%"),
        (Some(v), None) | (None, Some(v)) => format!("Up to {v:.0}%"),
        (None, None) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(name: &str, category: &str, complexity: &str, cost: &str, privacy: &str) -> Solution {
        Solution {
            name: name.to_string(),
            category: category.to_string(),
            description: None,
            reduction_rate_low_pct: None,
            reduction_rate_high_pct: None,
            reduction_rate_basis: None,
            other_benefits: Vec::new(),
            integration_complexity: Some(complexity.to_string()),
            indicative_cost: Some(cost.to_string()),
            privacy_concern_level: Some(privacy.to_string()),
            product_suitability_notes: None,
            example_vendors: Vec::new(),
        }
    }

    fn catalog() -> Vec<Solution> {
        vec![
            solution("EasySize", "Size Recommendation", COMPLEXITIES[0], "$$", "Low"),
            solution("True Fit", "Size Recommendation", COMPLEXITIES[1], "$$$", "Medium"),
            solution("3DLook", "VTO/AR", COMPLEXITIES[2], "$$$$", "High"),
            solution("Returnista", "Return Management", COMPLEXITIES[1], "$$", "Low"),
        ]
    }

    fn names(v: &[Solution]) -> Vec<&str> {
        v.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(filter_solutions(&catalog(), &SolutionFilter::default()).len(), 4);
    }

    #[test]
    fn categories_are_any_of() {
        let filter = SolutionFilter {
            categories: vec!["VTO/AR".to_string(), "Return Management".to_string()],
            ..SolutionFilter::default()
        };
        assert_eq!(names(&filter_solutions(&catalog(), &filter)), vec!["3DLook", "Returnista"]);
    }

    #[test]
    fn other_criteria_are_exact_and_combined() {
        let filter = SolutionFilter {
            complexity: Some(COMPLEXITIES[1].to_string()),
            cost: Some("$$".to_string()),
            ..SolutionFilter::default()
        };
        assert_eq!(names(&filter_solutions(&catalog(), &filter)), vec!["Returnista"]);

        let filter = SolutionFilter {
            cost: Some("$".to_string()),
            ..SolutionFilter::default()
        };
        assert!(filter_solutions(&catalog(), &filter).is_empty());
    }

    #[test]
    fn reduction_rate_formats() {
        assert_eq!(format_reduction_rate(Some(10.0), Some(20.0)), "10% - 20%");
        assert_eq!(format_reduction_rate(Some(15.0), Some(15.0)), "15%");
        assert_eq!(format_reduction_rate(None, Some(30.0)), "Up to 30%");
        assert_eq!(format_reduction_rate(None, None), "N/A");
    }
}
