/// Aggregate usage numbers as reported by `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub total_logs: u64,
    pub total_complaints: u64,
    pub total_overrides: u64,
    /// Percentage of logged answers that drew a complaint.
    pub complaints_ratio: f64,
    pub stats_today: u64,
    pub stats_week: u64,
    pub stats_month: u64,
    pub top_questions: Vec<TopQuestion>,
    pub top_user: Option<String>,
    pub top_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopQuestion {
    pub name: String,
    pub count: u64,
}

/// A horizontal bar; `percent` is relative to the largest bar in its chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: u64,
    pub percent: u32,
}

fn bars(points: Vec<(String, u64)>) -> Vec<ChartBar> {
    let max = points.iter().map(|(_, v)| *v).max().unwrap_or(0);
    points
        .into_iter()
        .map(|(label, value)| ChartBar { percent: percent_of(value, max), label, value })
        .collect()
}

fn percent_of(value: u64, whole: u64) -> u32 {
    if whole == 0 {
        0
    } else {
        ((value as f64 / whole as f64) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Everything the statistics page renders, derived from one snapshot.
#[derive(Debug, Clone)]
pub struct StatsView {
    pub snapshot: StatsSnapshot,
    pub usage: Vec<ChartBar>,
    pub top_questions: Vec<ChartBar>,
    /// Complaint breakdown: answers with and without a complaint.
    pub breakdown: Vec<ChartBar>,
    pub ratio_label: String,
}

impl From<StatsSnapshot> for StatsView {
    fn from(snapshot: StatsSnapshot) -> Self {
        let usage = bars(vec![
            ("Today".to_string(), snapshot.stats_today),
            ("Last 7 days".to_string(), snapshot.stats_week),
            ("Last 30 days".to_string(), snapshot.stats_month),
        ]);
        let top_questions = bars(
            snapshot
                .top_questions
                .iter()
                .map(|q| (q.name.clone(), q.count))
                .collect(),
        );

        let with = snapshot.total_complaints;
        let without = snapshot.total_logs.saturating_sub(with);
        let breakdown = vec![
            ChartBar {
                label: "With complaints".to_string(),
                value: with,
                percent: percent_of(with, snapshot.total_logs),
            },
            ChartBar {
                label: "Without complaints".to_string(),
                value: without,
                percent: percent_of(without, snapshot.total_logs),
            },
        ];
        let ratio_label = format!("{:.2}%", snapshot.complaints_ratio);

        Self { snapshot, usage, top_questions, breakdown, ratio_label }
    }
}
