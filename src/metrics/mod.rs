/**
The three agreement metrics. They are plain functions over the token indices and groups of two
`Annotation`s and never fail: degenerate inputs map to documented default values.
*/
mod alignment;
mod naive;
mod ngreement;

pub use alignment::{group_alignment_distance, normalized_group_alignment_distance};
pub use naive::{count_agreement, AgreementCounts};
pub use ngreement::{ngreement, subgrams, DEFAULT_EXPONENT};

pub(crate) use ngreement::mean_ngreement;
