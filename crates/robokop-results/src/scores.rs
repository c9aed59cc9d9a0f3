use std::cmp::Ordering;

use robokop_trapi::TrapiResult;

/// Mean of the analysis scores; analyses without a score count as zero.
///
/// `None` when there are no analyses.
pub fn average_score(result: &TrapiResult) -> Option<f64> {
    if result.analyses.is_empty() {
        return None;
    }
    let total: f64 = result
        .analyses
        .iter()
        .map(|analysis| analysis.score.unwrap_or(0.0))
        .sum();
    Some(total / result.analyses.len() as f64)
}

/// Store each result's averaged analysis score in `result.score`.
///
/// Results without analyses keep whatever score they already carry.
pub fn average_analyses_scores(results: &mut [TrapiResult]) {
    for result in results {
        if let Some(score) = average_score(result) {
            result.score = Some(score);
        }
    }
}

/// Highest score first. Unscored results go last; ties keep their order.
pub fn sort_by_score(results: &mut [TrapiResult]) {
    results.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn has_scores(results: &[TrapiResult]) -> bool {
    results.iter().any(|result| result.score.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use robokop_trapi::Analysis;

    fn result_with(scores: &[Option<f64>]) -> TrapiResult {
        TrapiResult {
            analyses: scores
                .iter()
                .map(|score| Analysis {
                    score: *score,
                    ..Analysis::default()
                })
                .collect(),
            ..TrapiResult::default()
        }
    }

    #[test]
    fn averages_analysis_scores() {
        let mut results = vec![
            result_with(&[Some(0.5), Some(1.0)]),
            result_with(&[Some(0.9), None]),
            result_with(&[]),
        ];
        average_analyses_scores(&mut results);
        assert_relative_eq!(results[0].score.unwrap(), 0.75);
        assert_relative_eq!(results[1].score.unwrap(), 0.45);
        assert_eq!(results[2].score, None);
    }

    #[test]
    fn sorts_descending_with_unscored_last() {
        let mut results: Vec<TrapiResult> = [Some(0.2), None, Some(0.9), Some(0.2)]
            .into_iter()
            .enumerate()
            .map(|(i, score)| {
                let mut r = TrapiResult {
                    score,
                    ..TrapiResult::default()
                };
                r.extra.insert("row".into(), i.into());
                r
            })
            .collect();
        sort_by_score(&mut results);
        let rows: Vec<_> = results.iter().map(|r| r.extra["row"].as_u64().unwrap()).collect();
        assert_eq!(rows, vec![2, 0, 3, 1]);
        assert!(has_scores(&results));
    }
}
