//! Dirichlet-Multinomial model for >=3-way convention contests.
//!
//! When a convention key has three or more alternative values, a single
//! Dirichlet-Multinomial model replaces the per-value Beta: one alpha per
//! value, posterior mean = alpha_i / sum(alpha_j). Presentation to
//! downstream consumers (mean, contested check) is identical to the Beta case.

/// A Dirichlet-Multinomial posterior over a fixed set of labeled alternatives.
#[derive(Debug, Clone)]
pub struct DirichletMultinomial {
    labels: Vec<String>,
    alphas: Vec<f64>,
}

impl DirichletMultinomial {
    /// Create a model over `labels` with a uniform Dirichlet(1,...,1) prior.
    pub fn new(labels: Vec<String>) -> Self {
        let alphas = vec![1.0; labels.len()];
        Self { labels, alphas }
    }

    /// Record `n` observations of the alternative at `index`.
    pub fn observe_n(&mut self, index: usize, n: u64) {
        if let Some(a) = self.alphas.get_mut(index) {
            *a += n as f64;
        }
    }

    /// Posterior mean for each label: alpha_i / sum(alpha_j).
    pub fn means(&self) -> Vec<(String, f64)> {
        let total: f64 = self.alphas.iter().sum();
        self.labels
            .iter()
            .zip(&self.alphas)
            .map(|(label, &a)| (label.clone(), if total > 0.0 { a / total } else { 0.0 }))
            .collect()
    }

    /// A contest is declared when the top two alternatives by posterior mean
    /// are within `threshold` of each other and neither has a clear majority.
    pub fn is_contested(&self, threshold: f64) -> bool {
        if self.alphas.len() < 2 {
            return false;
        }
        let mut means: Vec<f64> = self.means().into_iter().map(|(_, m)| m).collect();
        means.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let top = means[0];
        let second = means[1];
        (top - second) < threshold
    }
}
