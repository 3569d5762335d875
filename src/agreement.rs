/**
This module pairs two annotations of the same text and computes their agreement.
*/
use crate::annotation::{Annotation, InputError};
use crate::config::{AgreementConfig, Metric};
use crate::metrics::{
    count_agreement, group_alignment_distance, mean_ngreement as mean_ngreement_of,
    normalized_group_alignment_distance, AgreementCounts,
};
use crate::reporter::{AgreementReport, LevenshteinReport};
use std::{error::Error, fmt, fmt::Display};
use tracing::debug;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
/// Error type returned when two annotations do not have the same number of tokens. The first
/// field is the number of tokens of the first annotation, the second field the number of tokens of
/// the second one.
pub struct IncompatibleAnnotationsError(pub usize, pub usize);

impl Display for IncompatibleAnnotationsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Two annotations are not compatible: the first one has {} tokens, the second one has {}. Check the annotation guidelines please",
            self.0, self.1
        )
    }
}
impl Error for IncompatibleAnnotationsError {}

/// Every error that can happen while comparing two annotated texts.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AgreementError {
    Input(InputError),
    IncompatibleAnnotations(IncompatibleAnnotationsError),
}

impl Display for AgreementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(input_err) => Display::fmt(input_err, f),
            Self::IncompatibleAnnotations(compat_err) => Display::fmt(compat_err, f),
        }
    }
}

impl Error for AgreementError {}

impl From<InputError> for AgreementError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<IncompatibleAnnotationsError> for AgreementError {
    fn from(value: IncompatibleAnnotationsError) -> Self {
        Self::IncompatibleAnnotations(value)
    }
}

/// Two annotations of texts with the same number of tokens. The pair borrows the annotations and
/// every metric is computed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgreementPair<'a> {
    first: &'a Annotation<'a>,
    second: &'a Annotation<'a>,
}

impl<'a> AgreementPair<'a> {
    /// Pairs two annotations. The texts do not have to be identical, but they must have the
    /// same number of tokens.
    pub fn try_new(
        first: &'a Annotation<'a>,
        second: &'a Annotation<'a>,
    ) -> Result<Self, IncompatibleAnnotationsError> {
        if first.len() != second.len() {
            return Err(IncompatibleAnnotationsError(first.len(), second.len()));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &'a Annotation<'a> {
        self.first
    }
    pub fn second(&self) -> &'a Annotation<'a> {
        self.second
    }
    /// Number of tokens of both texts.
    pub fn len(&self) -> usize {
        self.first.len()
    }
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn count_agreement(&self) -> AgreementCounts {
        count_agreement(
            self.first.annotated_indices(),
            self.second.annotated_indices(),
            self.len(),
        )
    }
    /// What is the agreement of having annotated a token or not?
    pub fn naive_accuracy(&self) -> f64 {
        self.count_agreement().naive_accuracy()
    }
    /// How well do the markable boundaries agree? See `ngreement`.
    pub fn mean_ngreement(&self, exponent: f64) -> f64 {
        mean_ngreement_of(self.first, self.second, exponent)
    }
    /// How many changes are needed until the markables of both annotations are equal?
    pub fn levenshtein_distance(&self) -> usize {
        group_alignment_distance(self.first.annotated_groups(), self.second.annotated_groups())
    }
    /// How many changes are needed per markable, on average?
    pub fn normalized_levenshtein_distance(&self) -> f64 {
        normalized_group_alignment_distance(
            self.first.annotated_groups(),
            self.second.annotated_groups(),
        )
    }
    /// Returns the Levenshtein distance and its normalized form.
    pub fn levenshtein_incl_normalized(&self) -> (usize, f64) {
        let longest = self
            .first
            .annotated_groups()
            .len()
            .max(self.second.annotated_groups().len());
        let distance = self.levenshtein_distance();
        let normalized = match longest {
            0 => 0.0,
            n => distance as f64 / n as f64,
        };
        (distance, normalized)
    }

    /// Computes the metrics selected in the `config`.
    pub fn report(&self, config: &AgreementConfig) -> AgreementReport {
        let mut report = AgreementReport {
            tokens: self.len(),
            ..Default::default()
        };
        for metric in config.metrics() {
            match metric {
                Metric::Naive => {
                    let counts = self.count_agreement();
                    report.naive_accuracy = Some(counts.naive_accuracy());
                    report.counts = Some(counts);
                }
                Metric::NGreement => {
                    report.mean_ngreement = Some(self.mean_ngreement(config.exponent()));
                }
                Metric::Levenshtein => {
                    let (distance, normalized) = self.levenshtein_incl_normalized();
                    report.levenshtein = Some(LevenshteinReport {
                        distance,
                        normalized,
                    });
                }
            }
        }
        debug!("Computed agreement report: {:?}", report);
        report
    }
}

/// Pairs two annotations, see `AgreementPair::try_new`.
pub fn make_agreement_pair<'a>(
    first: &'a Annotation<'a>,
    second: &'a Annotation<'a>,
) -> Result<AgreementPair<'a>, IncompatibleAnnotationsError> {
    AgreementPair::try_new(first, second)
}

pub fn naive_accuracy(pair: &AgreementPair) -> f64 {
    pair.naive_accuracy()
}

pub fn mean_ngreement(pair: &AgreementPair, exponent: f64) -> f64 {
    pair.mean_ngreement(exponent)
}

pub fn levenshtein_distance(pair: &AgreementPair) -> usize {
    pair.levenshtein_distance()
}

pub fn normalized_levenshtein_distance(pair: &AgreementPair) -> f64 {
    pair.normalized_levenshtein_distance()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::annotation::Brackets;
    use crate::config::AgreementConfigBuilder;
    use crate::metrics::DEFAULT_EXPONENT;

    const TEXT1: &str = "[Er] geht zu [Lisa]. Niemand hat damit gerechnet, dass [Laura] dabei sein würde. [Fatma] ist entsetzt. [Sie] verließ augenblicklich [den großen Raum], als [Peter] [seinen Mund] öffnete.";
    const TEXT2: &str = "[Er] geht zu Lisa. [Niemand] hat damit gerechnet, dass [Laura] dabei sein würde. [Fatma] ist entsetzt. [Sie] verließ augenblicklich den großen [Raum], als [Peter] seinen [Mund] öffnete.";

    fn annotation(text: &str) -> Annotation {
        Annotation::extract(text, Brackets::default()).unwrap()
    }

    #[test]
    fn test_incompatible_annotations() {
        let first = annotation("[Er] geht zu [Lisa].");
        let second = annotation("[Er] geht.");
        let err = AgreementPair::try_new(&first, &second).unwrap_err();
        assert_eq!(err, IncompatibleAnnotationsError(4, 2));
    }

    #[test]
    fn test_different_texts_same_length_are_compatible() {
        let first = annotation("[Er] geht zu [Lisa].");
        let second = annotation("[Sie] kommt von Peter.");
        assert!(make_agreement_pair(&first, &second).is_ok());
    }

    #[test]
    fn test_count_agreement() {
        let first = annotation(TEXT1);
        let second = annotation(TEXT2);
        let pair = AgreementPair::try_new(&first, &second).unwrap();
        // first: 0 3 9 13 16 19 20 21 23 24 25, second: 0 4 9 13 16 21 23 25
        let expected = AgreementCounts {
            agree_in: 7,
            agree_out: 15,
            disagree: 5,
        };
        assert_eq!(pair.count_agreement(), expected);
        assert!((naive_accuracy(&pair) - 22.0 / 27.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_annotations() {
        let first = annotation(TEXT1);
        let second = annotation(TEXT1);
        let pair = make_agreement_pair(&first, &second).unwrap();
        assert_eq!(naive_accuracy(&pair), 1.0);
        assert!((mean_ngreement(&pair, DEFAULT_EXPONENT) - 1.0).abs() < 1e-12);
        assert_eq!(levenshtein_distance(&pair), 0);
        assert_eq!(normalized_levenshtein_distance(&pair), 0.0);
    }

    #[test]
    fn test_levenshtein() {
        let first = annotation(TEXT1);
        let second = annotation(TEXT2);
        let pair = make_agreement_pair(&first, &second).unwrap();
        // [3] deleted, [4] inserted, [19, 20, 21] -> [21] moves two tokens, [24, 25] -> [25]
        assert_eq!(levenshtein_distance(&pair), 5);
        let (distance, normalized) = pair.levenshtein_incl_normalized();
        assert_eq!(distance, 5);
        assert!((normalized - 5.0 / 8.0).abs() < 1e-12);
        assert_eq!(normalized, normalized_levenshtein_distance(&pair));
    }

    #[test]
    fn test_dangling_markable_only_counts_for_naive_accuracy() {
        let first = annotation("[Er] geht zu [Lisa");
        let second = annotation("[Er] geht zu Lisa");
        let pair = make_agreement_pair(&first, &second).unwrap();
        assert_eq!(pair.naive_accuracy(), 0.75);
        assert_eq!(pair.levenshtein_distance(), 0);
    }

    #[test]
    fn test_report_follows_config() {
        let first = annotation("[Er] geht zu [Lisa].");
        let second = annotation("[Er] geht zu Lisa.");
        let pair = make_agreement_pair(&first, &second).unwrap();
        let config = AgreementConfigBuilder::new().metric(Metric::Levenshtein).build();
        let report = pair.report(&config);
        assert_eq!(report.tokens, 4);
        assert_eq!(report.naive_accuracy, None);
        assert_eq!(report.mean_ngreement, None);
        assert_eq!(
            report.levenshtein,
            Some(LevenshteinReport {
                distance: 1,
                normalized: 0.5
            })
        );
        let report = pair.report(&AgreementConfig::default());
        assert_eq!(report.naive_accuracy, Some(0.75));
        assert!(report.mean_ngreement.is_some());
        assert!(report.counts.is_some());
    }

    #[test]
    fn test_agreement_error_display() {
        let err = AgreementError::from(IncompatibleAnnotationsError(4, 2));
        assert!(err.to_string().contains("4 tokens"));
        let err = AgreementError::from(InputError);
        assert_eq!(err.to_string(), InputError.to_string());
    }

    #[test]
    fn test_agreement_error_is_not_chained() {
        let err = AgreementError::from(IncompatibleAnnotationsError(4, 2));
        assert!(err.source().is_none());
    }
}
