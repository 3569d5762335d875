use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Token-level agreement between two annotators: the number of tokens both annotators put inside
/// a markable, the number of tokens both left outside, and the number of tokens they disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AgreementCounts {
    pub agree_in: usize,
    pub agree_out: usize,
    pub disagree: usize,
}

impl AgreementCounts {
    pub fn total(&self) -> usize {
        self.agree_in + self.agree_out + self.disagree
    }

    /// Share of the tokens on which both annotators agree. Two empty texts agree perfectly.
    pub fn naive_accuracy(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            total => (self.agree_in + self.agree_out) as f64 / total as f64,
        }
    }
}

impl Display for AgreementCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "agree markable: {}, agree non-markable: {}, disagree: {}",
            self.agree_in, self.agree_out, self.disagree
        )
    }
}

/// Counts the agreement between two sets of annotated token indices taken from texts of
/// `total_tokens` tokens.
pub fn count_agreement(
    first: &AHashSet<usize>,
    second: &AHashSet<usize>,
    total_tokens: usize,
) -> AgreementCounts {
    let agree_in = first.intersection(second).count();
    let disagree = first.symmetric_difference(second).count();
    AgreementCounts {
        agree_in,
        agree_out: total_tokens.saturating_sub(agree_in + disagree),
        disagree,
    }
}
