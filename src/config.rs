/*
 * This modules contains the `AgreementConfig` struct, which implements the default trait. This
 * config can be passed to the `agreement_report` function or to `AgreementPair::report` to choose
 * the brackets, the ngreement exponent and the metrics to compute.
*/
use crate::annotation::Brackets;
use crate::metrics::DEFAULT_EXPONENT;
use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    error::Error,
    fmt::{self, Debug, Display},
    str::FromStr,
};

/// Metrics that can be reported for a pair of annotations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence, Serialize, Deserialize,
)]
pub enum Metric {
    /// Token-level agreement on being inside of a markable or not.
    Naive,
    /// Partial boundary agreement of the markables.
    NGreement,
    /// Number of changes needed until both annotations are equal.
    Levenshtein,
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive => write!(f, "naive"),
            Self::NGreement => write!(f, "ngreement"),
            Self::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

#[derive(Debug)]
pub struct ParsingMetricError<S: Debug + Display>(S);

impl<S: Debug + Display> Display for ParsingMetricError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse the {} into a `Metric`", self.0)
    }
}
impl<S: Debug + Display> Error for ParsingMetricError<S> {}

impl FromStr for Metric {
    type Err = ParsingMetricError<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "naive" | "naive_accuracy" => Ok(Metric::Naive),
            "ngreement" | "ngram" => Ok(Metric::NGreement),
            "levenshtein" | "distance" => Ok(Metric::Levenshtein),
            _ => Err(ParsingMetricError(String::from(s))),
        }
    }
}

/// Config struct used to simplify the inputs of `agreement_report`. It implements the default
/// trait: square brackets, an exponent of 2 and every metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgreementConfig {
    /// Brackets used by both annotators.
    brackets: Brackets,
    /// Exponent given to the length of the matching groups when computing the ngreement. The
    /// higher it is, the more longer correct spans are rewarded.
    exponent: f64,
    /// Metrics to report.
    metrics: BTreeSet<Metric>,
}

impl AgreementConfig {
    pub fn brackets(&self) -> &Brackets {
        &self.brackets
    }
    pub fn exponent(&self) -> f64 {
        self.exponent
    }
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.metrics.iter().copied()
    }
    pub fn reports(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            brackets: Brackets::default(),
            exponent: DEFAULT_EXPONENT,
            metrics: all::<Metric>().collect(),
        }
    }
}

impl Display for AgreementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metrics: Vec<String> = self.metrics().map(|m| m.to_string()).collect();
        write!(
            f,
            "Brackets: {}\n Ngreement exponent: {}\n Metrics: {}",
            self.brackets,
            self.exponent,
            metrics.join(", ")
        )
    }
}

/// This builder can be used to build and customize an `AgreementConfig` structure. When no
/// metric is selected, every metric is reported.
#[derive(Clone, Debug, Default)]
pub struct AgreementConfigBuilder {
    opening: Option<String>,
    closing: Option<String>,
    exponent: Option<f64>,
    metrics: BTreeSet<Metric>,
}

impl AgreementConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn opening<S: Into<String>>(mut self, opening: S) -> Self {
        self.opening = Some(opening.into());
        self
    }
    pub fn closing<S: Into<String>>(mut self, closing: S) -> Self {
        self.closing = Some(closing.into());
        self
    }
    pub fn exponent(mut self, exponent: f64) -> Self {
        self.exponent = Some(exponent);
        self
    }
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metrics.insert(metric);
        self
    }
    pub fn metrics<I: IntoIterator<Item = Metric>>(mut self, metrics: I) -> Self {
        self.metrics.extend(metrics);
        self
    }
    pub fn build(self) -> AgreementConfig {
        let default = Brackets::default();
        let brackets = Brackets::new(
            self.opening.unwrap_or_else(|| default.opening().to_string()),
            self.closing.unwrap_or_else(|| default.closing().to_string()),
        );
        let metrics = if self.metrics.is_empty() {
            all::<Metric>().collect()
        } else {
            self.metrics
        };
        AgreementConfig {
            brackets,
            exponent: self.exponent.unwrap_or(DEFAULT_EXPONENT),
            metrics,
        }
    }
}
