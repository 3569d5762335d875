/*!
This library measures the agreement between two human annotators who marked spans of a shared
text, called markables, with a pair of brackets. It is used to validate annotation guidelines:
the better the guidelines, the closer the annotations.

# Annotations
The annotated text is split on whitespaces. Every token between an opening bracket (`[` by
default) and a closing bracket (`]` by default) belongs to a markable:

`[Er] geht zu [Lisa].` gives the markables `[0]` and `[3]`.

The closing bracket can be followed by punctuation (`,.;:-?!'")`). Markables can not be nested.

# Metrics
* Naive accuracy: the share of tokens on which both annotators agree on being inside of a
    markable or not. The boundaries of the markables are ignored.
* Ngreement: partial credit for markables matching a contiguous part of the other annotator's
    markables, weighted by their length to the power `n` (2 by default).
* Levenshtein distance: the number of insertions, deletions and reshapes of markables needed to
    turn one annotation into the other one. It is symmetric. The normalized form divides it by the
    number of markables.

# Terminology
* A token is a whitespace-delimited unit of the text, identified by its index.
* A group is an ordered list of token indices, representing a markable or a single token left
    outside of the markables.
* A subgram is any contiguous part of a group.
*/

mod agreement;
mod annotation;
mod config;
mod metrics;
mod reporter;

// The public api starts here
pub use annotation::{extract, Annotation, Brackets, Group, InputError};

pub use agreement::{
    levenshtein_distance, make_agreement_pair, mean_ngreement, naive_accuracy,
    normalized_levenshtein_distance, AgreementError, AgreementPair, IncompatibleAnnotationsError,
};

pub use metrics::{
    count_agreement, group_alignment_distance, ngreement, normalized_group_alignment_distance,
    subgrams, AgreementCounts, DEFAULT_EXPONENT,
};

pub use config::{AgreementConfig, AgreementConfigBuilder, Metric, ParsingMetricError};

pub use reporter::{AgreementReport, LevenshteinReport};

/// Main entrypoint of the library. This function extracts the markables of both texts with the
/// brackets of the `config` and computes the metrics it selects. It fails if one of the texts is
/// empty or if the texts do not have the same number of tokens.
///
/// * `first`: Text annotated by the first annotator
/// * `second`: The same text, annotated by the second annotator
/// * `config`: Brackets, ngreement exponent and metrics to compute.
///
/// # Example
/// ```rust
/// use rusiaa::{agreement_report, AgreementConfig};
///
/// let first = "[Er] geht zu [Lisa].";
/// let second = "[Er] geht zu Lisa.";
/// let report = agreement_report(first, second, &AgreementConfig::default()).unwrap();
///
/// assert_eq!(report.naive_accuracy, Some(0.75));
/// assert_eq!(report.levenshtein.unwrap().distance, 1);
/// let ngreement = report.mean_ngreement.unwrap();
/// assert!((ngreement - 0.7916666).abs() < 1e-6);
/// ```
pub fn agreement_report(
    first: &str,
    second: &str,
    config: &AgreementConfig,
) -> Result<AgreementReport, AgreementError> {
    let first = Annotation::extract(first, config.brackets().clone())?;
    let second = Annotation::extract(second, config.brackets().clone())?;
    let pair = AgreementPair::try_new(&first, &second)?;
    Ok(pair.report(config))
}
