//! Project-wide crypto health score: 100 minus the per-file average finding
//! penalty, with a letter grade and per-category breakdown.

use std::collections::HashMap;

use super::types::{CryptoCategory, CryptoFinding};

pub struct CategoryBreakdown {
    pub category: CryptoCategory,
    pub count: usize,
    pub penalty_sum: f64,
}

pub struct HealthReport {
    pub score: f64,
    pub grade: char,
    pub category_breakdown: Vec<CategoryBreakdown>,
}

pub fn compute(findings: &[CryptoFinding], file_count: usize) -> HealthReport {
    let total_penalty: f64 = findings.iter().map(|f| f.severity.penalty()).sum();
    let score = if file_count == 0 {
        100.0
    } else {
        (100.0 - (total_penalty / file_count as f64) * 100.0).clamp(0.0, 100.0)
    };

    let mut by_category: HashMap<CryptoCategory, CategoryBreakdown> = HashMap::new();
    for finding in findings {
        let entry = by_category.entry(finding.category).or_insert(CategoryBreakdown {
            category: finding.category,
            count: 0,
            penalty_sum: 0.0,
        });
        entry.count += 1;
        entry.penalty_sum += finding.severity.penalty();
    }
    let mut category_breakdown: Vec<_> = by_category.into_values().collect();
    category_breakdown.sort_by(|a, b| b.penalty_sum.partial_cmp(&a.penalty_sum).unwrap());

    HealthReport { score, grade: letter_grade(score), category_breakdown }
}

fn letter_grade(score: f64) -> char {
    match score as u32 {
        90..=100 => 'A',
        80..=89 => 'B',
        70..=79 => 'C',
        60..=69 => 'D',
        _ => 'F',
    }
}
