/**
Ngreement rewards partial boundary agreement: a comparison group matching a contiguous part (a
subgram) of a reference group earns `len(group)^n` points, so longer correct spans are rewarded
superlinearly.
*/
use crate::annotation::Annotation;
use tracing::debug;

/// Exponent used when none is given.
pub const DEFAULT_EXPONENT: f64 = 2.0;

/// Returns every contiguous slice of `group`, the full group first. The slices are built by
/// shortening the group from the right, then from the left:
/// `[4, 5, 6]` gives `[4, 5, 6], [5, 6], [6], [4, 5], [5], [4]`.
pub fn subgrams(group: &[usize]) -> Vec<&[usize]> {
    (1..=group.len())
        .rev()
        .flat_map(|end| (0..end).map(move |start| &group[start..end]))
        .collect()
}

#[inline]
fn weight(length: usize, exponent: f64) -> f64 {
    (length as f64).powf(exponent)
}

/// Scores how well the `comparison` groups match the `reference` groups, between 0 and 1. Both
/// sequences must be sorted by their first index. Returns 0 when the reference has no groups.
pub fn ngreement<R, C>(reference: &[R], comparison: &[C], exponent: f64) -> f64
where
    R: AsRef<[usize]>,
    C: AsRef<[usize]>,
{
    let max_score: f64 = reference
        .iter()
        .map(|g| weight(g.as_ref().len(), exponent))
        .sum();
    if max_score == 0.0 {
        return 0.0;
    }
    let reference_subgrams: Vec<Vec<&[usize]>> =
        reference.iter().map(|g| subgrams(g.as_ref())).collect();
    let mut score = 0.0;
    for candidate in comparison.iter().map(|c| c.as_ref()) {
        let Some(first) = candidate.first() else {
            continue;
        };
        for grams in reference_subgrams.iter() {
            let Some(full_group) = grams.first() else {
                continue;
            };
            // Reference groups are sorted: none of the following ones can contain `first`.
            if full_group.first().is_some_and(|start| start > first) {
                break;
            }
            if !full_group.contains(first) {
                continue;
            }
            if grams.iter().any(|gram| *gram == candidate) {
                score += weight(candidate.len(), exponent);
                break;
            }
        }
    }
    score / max_score
}

/// Mean of the ngreement computed in both directions, over the markables and over the tokens
/// left outside of markables. Two annotations without any markable agree perfectly.
pub(crate) fn mean_ngreement(first: &Annotation, second: &Annotation, exponent: f64) -> f64 {
    if first.annotated_groups().is_empty() && second.annotated_groups().is_empty() {
        return 1.0;
    }
    let scores = [
        ngreement(first.annotated_groups(), second.annotated_groups(), exponent),
        ngreement(second.annotated_groups(), first.annotated_groups(), exponent),
        ngreement(first.singleton_groups(), second.singleton_groups(), exponent),
        ngreement(second.singleton_groups(), first.singleton_groups(), exponent),
    ];
    debug!("Directional ngreement scores: {:?}", scores);
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::annotation::Brackets;
    use rstest::rstest;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_subgrams() {
        let actual = subgrams(&[4, 5, 6, 7]);
        let expected: Vec<&[usize]> = vec![
            &[4, 5, 6, 7],
            &[5, 6, 7],
            &[6, 7],
            &[7],
            &[4, 5, 6],
            &[5, 6],
            &[6],
            &[4, 5],
            &[5],
            &[4],
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_subgrams_of_empty_group() {
        assert!(subgrams(&[]).is_empty());
    }

    #[rstest]
    #[case(vec![vec![0], vec![3]], vec![vec![0], vec![3]], 1.0)]
    #[case(vec![vec![0], vec![3]], vec![vec![0]], 0.5)]
    #[case(vec![vec![0]], vec![vec![0], vec![3]], 1.0)]
    // [5, 6] is a subgram of [4, 5, 6, 7]: 4 out of 16 points.
    #[case(vec![vec![4, 5, 6, 7]], vec![vec![5, 6]], 0.25)]
    // [3, 4] starts outside of every reference group.
    #[case(vec![vec![4, 5, 6, 7]], vec![vec![3, 4]], 0.0)]
    // [6, 7, 8] overflows the reference group.
    #[case(vec![vec![4, 5, 6, 7], vec![9]], vec![vec![6, 7, 8], vec![9]], 1.0 / 17.0)]
    #[case(vec![vec![1, 2], vec![5, 6]], vec![vec![1], vec![2], vec![5, 6]], 6.0 / 8.0)]
    fn test_ngreement(
        #[case] reference: Vec<Vec<usize>>,
        #[case] comparison: Vec<Vec<usize>>,
        #[case] expected: f64,
    ) {
        let actual = ngreement(&reference, &comparison, DEFAULT_EXPONENT);
        assert!(close(actual, expected), "{actual} != {expected}");
    }

    #[test]
    fn test_ngreement_empty_reference() {
        let empty: Vec<Vec<usize>> = vec![];
        assert_eq!(ngreement(&empty, &[vec![0]], DEFAULT_EXPONENT), 0.0);
        assert_eq!(ngreement(&empty, &empty, DEFAULT_EXPONENT), 0.0);
    }

    #[rstest]
    #[case(1.0, 2.0 / 4.0)]
    #[case(2.0, 4.0 / 16.0)]
    #[case(3.0, 8.0 / 64.0)]
    fn test_ngreement_exponent(#[case] exponent: f64, #[case] expected: f64) {
        let actual = ngreement(&[vec![4, 5, 6, 7]], &[vec![5, 6]], exponent);
        assert!(close(actual, expected));
    }

    #[test]
    fn test_mean_ngreement_identical_annotations() {
        let text = "[Er] geht zu [Lisa]. [Peter] [seinen Mund] öffnete.";
        let first = Annotation::extract(text, Brackets::default()).unwrap();
        let second = Annotation::extract(text, Brackets::default()).unwrap();
        assert!(close(mean_ngreement(&first, &second, DEFAULT_EXPONENT), 1.0));
    }

    #[test]
    fn test_mean_ngreement_fully_annotated_identical_texts() {
        let first = Annotation::extract("[Er geht]", Brackets::default()).unwrap();
        let second = Annotation::extract("[Er geht]", Brackets::default()).unwrap();
        // Both singleton directions have an empty reference and score 0.
        assert!(close(mean_ngreement(&first, &second, DEFAULT_EXPONENT), 0.5));
    }

    #[test]
    fn test_mean_ngreement_without_markables() {
        let first = Annotation::extract("Er geht zu Lisa.", Brackets::default()).unwrap();
        let second = Annotation::extract("Er geht zu Lisa.", Brackets::default()).unwrap();
        assert_eq!(mean_ngreement(&first, &second, DEFAULT_EXPONENT), 1.0);
    }

    #[test]
    fn test_mean_ngreement_partial() {
        let first = Annotation::extract("[Er] geht zu [Lisa].", Brackets::default()).unwrap();
        let second = Annotation::extract("[Er] geht zu Lisa.", Brackets::default()).unwrap();
        let expected = (0.5 + 1.0 + 1.0 + 2.0 / 3.0) / 4.0;
        let actual = mean_ngreement(&first, &second, DEFAULT_EXPONENT);
        assert!(close(actual, expected));
        assert!(close(mean_ngreement(&second, &first, DEFAULT_EXPONENT), expected));
    }

    #[test]
    fn test_mean_ngreement_one_side_without_markables() {
        let first = Annotation::extract("[Er] geht", Brackets::default()).unwrap();
        let second = Annotation::extract("Er geht", Brackets::default()).unwrap();
        // annotated: 0 and 0, singletons: [1] vs [0, 1] gives 1 and 1/2.
        let expected = (0.0 + 0.0 + 1.0 + 0.5) / 4.0;
        assert!(close(mean_ngreement(&first, &second, DEFAULT_EXPONENT), expected));
    }
}
