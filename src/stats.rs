use crate::records::PartialCount;
use crate::totals::CorpusTotals;

/// The three merged quantities for one pair: left marginal `l`, right
/// marginal `f`, joint count `lf`. All start at zero; a variant that never
/// arrives stays zero and fails the completeness guard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairCounts {
    pub left: f64,
    pub right: f64,
    pub joint: f64,
}

impl PairCounts {
    /// Folds one tagged count in. Each variant overwrites its slot — the
    /// upstream encoding carries at most one record per variant per pair,
    /// so nothing is summed or deduplicated.
    pub fn absorb(&mut self, count: PartialCount) {
        match count {
            PartialCount::Joint(value) => self.joint = value,
            PartialCount::LeftMarginal(value) => self.left = value,
            PartialCount::RightMarginal(value) => self.right = value,
        }
    }

    /// True once all three quantities are non-zero.
    pub fn is_complete(&self) -> bool {
        self.left != 0.0 && self.right != 0.0 && self.joint != 0.0
    }
}

/// Folds a group of tagged counts into the three accumulators. Order within
/// the group does not matter as long as each variant appears at most once.
pub fn fold_counts(counts: &[PartialCount]) -> PairCounts {
    let mut folded = PairCounts::default();
    for &count in counts {
        folded.absorb(count);
    }
    folded
}

/// The four association measures for one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssociationScores {
    /// Raw joint frequency of the pair.
    pub assoc_freq: f64,
    /// Conditional probability of the feature given the word.
    pub assoc_prob: f64,
    /// Pointwise mutual information scaled by the marginal-total ratio.
    pub assoc_pmi: f64,
    /// Significance of observed vs. expected co-occurrence under an
    /// independence null, normal approximation.
    pub assoc_t_test: f64,
}

/// Scores one pair, or `None` while any of l, f, lf is still zero.
///
/// The guard has to cover all three quantities, not just the joint count:
/// l and f both sit in denominators.
pub fn score_pair(counts: &PairCounts, totals: &CorpusTotals) -> Option<AssociationScores> {
    if !counts.is_complete() {
        return None;
    }
    let PairCounts {
        left: l,
        right: f,
        joint: lf,
    } = *counts;
    let expected = (l / totals.pairs) * (f / totals.features);
    Some(AssociationScores {
        assoc_freq: lf,
        assoc_prob: lf / l,
        assoc_pmi: (totals.features * lf) / (l * f),
        assoc_t_test: ((lf / totals.pairs) - expected) / expected.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: f64, features: f64) -> CorpusTotals {
        CorpusTotals { pairs, features }
    }

    #[test]
    fn scores_reference_group() {
        let counts = fold_counts(&[
            PartialCount::Joint(10.0),
            PartialCount::LeftMarginal(100.0),
            PartialCount::RightMarginal(50.0),
        ]);
        let scores = score_pair(&counts, &totals(1000.0, 500.0)).unwrap();
        assert_eq!(scores.assoc_freq, 10.0);
        assert_eq!(scores.assoc_prob, 0.1);
        assert_eq!(scores.assoc_pmi, 1.0);
        // Observed equals expected here, so the t score is zero up to the
        // rounding of 0.1 in binary.
        assert!(scores.assoc_t_test.abs() < 1e-12);
    }

    #[test]
    fn fold_order_does_not_matter() {
        let counts = [
            PartialCount::Joint(10.0),
            PartialCount::LeftMarginal(100.0),
            PartialCount::RightMarginal(50.0),
        ];
        let reference = fold_counts(&counts);
        let permutations: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for order in permutations {
            let permuted: Vec<PartialCount> = order.iter().map(|&i| counts[i]).collect();
            assert_eq!(fold_counts(&permuted), reference);
        }
    }

    #[test]
    fn duplicate_variant_overwrites() {
        let counts = fold_counts(&[
            PartialCount::Joint(10.0),
            PartialCount::Joint(7.0),
            PartialCount::LeftMarginal(100.0),
        ]);
        assert_eq!(counts.joint, 7.0);
        assert_eq!(counts.left, 100.0);
        assert_eq!(counts.right, 0.0);
    }

    #[test]
    fn incomplete_group_is_not_scored() {
        let missing_right = fold_counts(&[
            PartialCount::Joint(10.0),
            PartialCount::LeftMarginal(100.0),
        ]);
        assert_eq!(missing_right.left, 100.0);
        assert_eq!(missing_right.right, 0.0);
        assert_eq!(missing_right.joint, 10.0);
        assert!(score_pair(&missing_right, &totals(1000.0, 500.0)).is_none());

        let missing_joint = fold_counts(&[
            PartialCount::LeftMarginal(100.0),
            PartialCount::RightMarginal(50.0),
        ]);
        assert!(score_pair(&missing_joint, &totals(1000.0, 500.0)).is_none());

        assert!(score_pair(&PairCounts::default(), &totals(1000.0, 500.0)).is_none());
    }

    #[test]
    fn scores_end_to_end_example() {
        let counts = fold_counts(&[
            PartialCount::Joint(5.0),
            PartialCount::LeftMarginal(20.0),
            PartialCount::Joint(5.0),
            PartialCount::RightMarginal(30.0),
        ]);
        let scores = score_pair(&counts, &totals(100.0, 200.0)).unwrap();
        assert_eq!(scores.assoc_freq, 5.0);
        assert_eq!(scores.assoc_prob, 0.25);
        assert_eq!(scores.assoc_pmi, (200.0 * 5.0) / (20.0 * 30.0));
        let expected: f64 = (20.0 / 100.0) * (30.0 / 200.0);
        assert_eq!(scores.assoc_t_test, (5.0 / 100.0 - expected) / expected.sqrt());
    }
}
