/**
This modules gives a few tools to prettyprint or serialize the agreement metrics computed for a
pair of annotations.
*/
use crate::metrics::AgreementCounts;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Group alignment distance between the markables of two annotations, raw and divided by the
/// number of markables of the annotation having the most of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevenshteinReport {
    pub distance: usize,
    pub normalized: f64,
}

/// The reporter holds the metrics selected in the `AgreementConfig`. Metrics that were not
/// selected are `None`. It can be displayed (i.e. prettyprinted) or serialized.
///
/// # Example
///
/// ```rust
/// use rusiaa::{agreement_report, AgreementConfigBuilder, Metric};
///
/// let config = AgreementConfigBuilder::new()
///     .metric(Metric::Naive)
///     .metric(Metric::Levenshtein)
///     .build();
/// let report = agreement_report("[Er] geht zu [Lisa].", "[Er] geht zu Lisa.", &config).unwrap();
///
/// let expected_report = "Naive Accuracy: 0.75
/// Levenshtein Distance: 1
/// Normalized Levenshtein: 0.5\n";
///
/// assert_eq!(expected_report, report.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgreementReport {
    /// Number of tokens of each text.
    pub tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<AgreementCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naive_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_ngreement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levenshtein: Option<LevenshteinReport>,
}

impl Display for AgreementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(accuracy) = self.naive_accuracy {
            writeln!(f, "Naive Accuracy: {}", accuracy)?
        }
        if let Some(ngreement) = self.mean_ngreement {
            writeln!(f, "NGram Accuracy: {}", ngreement)?
        }
        if let Some(levenshtein) = self.levenshtein {
            writeln!(f, "Levenshtein Distance: {}", levenshtein.distance)?;
            writeln!(f, "Normalized Levenshtein: {}", levenshtein.normalized)?
        }
        Ok(())
    }
}
