//! Plain-text rendering of coordinator output.

use runlog_core::{ChartSeries, PaginationView, RenderSink, RunRow, TopRun};

const BAR_WIDTH: f64 = 30.0;

/// Which coordinator outputs a command prints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sections {
    pub table: bool,
    pub charts: bool,
    pub top_list: bool,
    pub pagination: bool,
}

impl Sections {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn history() -> Self {
        Self {
            table: true,
            pagination: true,
            ..Self::default()
        }
    }

    pub fn top_list() -> Self {
        Self {
            top_list: true,
            ..Self::default()
        }
    }

    pub fn charts() -> Self {
        Self {
            charts: true,
            ..Self::default()
        }
    }
}

/// Collects rendered text; each render cycle replaces the previous one.
pub struct TextRenderer {
    sections: Sections,
    table: String,
    charts: String,
    top_list: String,
    pagination: String,
}

impl TextRenderer {
    pub fn new(sections: Sections) -> Self {
        Self {
            sections,
            table: String::new(),
            charts: String::new(),
            top_list: String::new(),
            pagination: String::new(),
        }
    }

    /// Text of the last cycle for the enabled sections.
    pub fn output(&self) -> String {
        let mut parts = Vec::new();
        if self.sections.table {
            parts.push(self.table.as_str());
        }
        if self.sections.pagination && !self.pagination.is_empty() {
            parts.push(self.pagination.as_str());
        }
        if self.sections.top_list {
            parts.push(self.top_list.as_str());
        }
        if self.sections.charts {
            parts.push(self.charts.as_str());
        }
        parts.join("\n")
    }
}

impl RenderSink for TextRenderer {
    fn render_table(&mut self, rows: &[RunRow]) {
        self.table.clear();
        if rows.is_empty() {
            self.table.push_str("No runs recorded for the selected period.\n");
            return;
        }

        self.table.push_str(&format!(
            "{:<15} {:<10} {:>11} {:>8} {:>6} {:>8} {:<12} {}\n",
            "ID", "DATE", "DISTANCE", "TIME", "PACE", "KCAL", "TYPE", "FEELING"
        ));
        for row in rows {
            self.table.push_str(&format!(
                "{:<15} {:<10} {:>11} {:>8} {:>6} {:>8} {:<12} {} {}\n",
                row.id,
                row.date,
                row.distance,
                row.time,
                row.pace,
                row.calories,
                row.kind,
                row.feeling_icon,
                row.feeling_label
            ));
        }
    }

    fn render_charts(&mut self, series: &ChartSeries) {
        self.charts.clear();
        if series.labels.is_empty() {
            self.charts.push_str("No runs recorded for the selected period.\n");
            return;
        }

        let max_distance = series.distances.iter().copied().fold(0.0_f64, f64::max);
        self.charts.push_str("DATE        DISTANCE  PACE(min/km)  KCAL\n");
        for (index, label) in series.labels.iter().enumerate() {
            let distance = series.distances[index];
            let bar_len = if max_distance > 0.0 {
                (distance / max_distance * BAR_WIDTH).round() as usize
            } else {
                0
            };
            self.charts.push_str(&format!(
                "{:<10} {:>9.2} {:>13.2} {:>5}  {}\n",
                label,
                distance,
                series.pace_minutes[index],
                series.calories[index],
                "#".repeat(bar_len)
            ));
        }
    }

    fn render_top_list(&mut self, runs: &[TopRun]) {
        self.top_list.clear();
        if runs.is_empty() {
            self.top_list.push_str("No runs recorded for the selected period.\n");
            return;
        }

        for (rank, run) in runs.iter().enumerate() {
            self.top_list.push_str(&format!(
                "{}. {} - {} ({})\n",
                rank + 1,
                run.date,
                run.distance,
                run.calories
            ));
        }
    }

    fn render_pagination(&mut self, pagination: &PaginationView) {
        self.pagination.clear();
        if !pagination.visible {
            return;
        }

        let mut controls = Vec::with_capacity(pagination.total_pages + 2);
        controls.push(if pagination.has_previous { "«" } else { "-" }.to_string());
        for page in 1..=pagination.total_pages {
            if page == pagination.current_page {
                controls.push(format!("[{page}]"));
            } else {
                controls.push(page.to_string());
            }
        }
        controls.push(if pagination.has_next { "»" } else { "-" }.to_string());

        self.pagination.push_str(&controls.join(" "));
        self.pagination.push('\n');
    }
}
