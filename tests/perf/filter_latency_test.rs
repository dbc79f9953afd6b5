use std::time::Instant;

use crate::fuzzy::filter_candidates;
use crate::model::HistoryItem;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn warm_history_filter_p95_under_50ms() {
    let mut items: Vec<HistoryItem> = (0..10_000)
        .map(|i| HistoryItem {
            id: i.to_string(),
            url: format!("https://docs.example.com/page/{i:05}"),
            title: format!("Document {i:05}"),
            last_visit_time: 0.0,
            visit_count: 1,
        })
        .collect();

    items.push(HistoryItem {
        id: "q4".to_string(),
        url: "https://reports.example.com/q4".to_string(),
        title: "Q4 报告 Report".to_string(),
        last_visit_time: 0.0,
        visit_count: 3,
    });

    for _ in 0..30 {
        let _ = filter_candidates("报 report", &items);
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(40);
        for _ in 0..40 {
            let start = Instant::now();
            let found = filter_candidates("报 report", &items);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
            assert_eq!(found.len(), 1);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 50.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 50.0ms); batches={batch_p95:?}",
    );
}
