use crate::error::{CropCastError, Result};
use crate::models::ChartSeries;

/// Turns a chart into a text snapshot for the report
pub trait ChartRenderer {
    fn render(&self, chart: &ChartSeries) -> Result<Vec<String>>;
}

/// Horizontal bar chart drawn with block characters
pub struct TextBarChartRenderer {
    bar_width: usize,
}

const LEGEND_MARKS: [char; 3] = ['█', '▓', '░'];

impl TextBarChartRenderer {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
        }
    }

    fn mark(series: usize) -> char {
        LEGEND_MARKS[series % LEGEND_MARKS.len()]
    }
}

impl Default for TextBarChartRenderer {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartRenderer for TextBarChartRenderer {
    fn render(&self, chart: &ChartSeries) -> Result<Vec<String>> {
        let max = chart
            .max_value()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                CropCastError::InvalidInput(format!("chart '{}' has no data", chart.title))
            })?;

        if let Some((label, _)) = chart
            .groups
            .iter()
            .find(|(_, values)| values.len() != chart.legend.len())
        {
            return Err(CropCastError::InvalidInput(format!(
                "chart '{}': group '{}' does not match the legend",
                chart.title, label
            )));
        }

        let label_width = chart
            .groups
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = vec![chart.title.to_string(), chart.description.to_string()];

        let legend: Vec<String> = chart
            .legend
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} {}", Self::mark(i), name))
            .collect();
        lines.push(legend.join("   "));
        lines.push(String::new());

        for (label, values) in &chart.groups {
            for (i, value) in values.iter().enumerate() {
                let len = (*value as usize * self.bar_width).div_ceil(max as usize);
                let shown_label = if i == 0 { *label } else { "" };
                lines.push(format!(
                    "{:<width$}  {} {}",
                    shown_label,
                    Self::mark(i).to_string().repeat(len),
                    value,
                    width = label_width
                ));
            }
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_largest_value() {
        let chart = ChartSeries::yield_prediction();
        let lines = TextBarChartRenderer::new(89).render(&chart).unwrap();
        assert_eq!(lines[0], "Yield Prediction Analysis");
        assert!(lines[2].contains("AI Predicted"));
        // Jun optimized is the maximum, so its bar is full width
        let jun_optimized = lines.last().unwrap();
        assert_eq!(jun_optimized.matches('░').count(), 89);
        assert!(jun_optimized.ends_with(" 89"));
        // one line per value
        assert_eq!(lines.len(), 4 + 6 * 3);
    }

    #[test]
    fn empty_chart_fails() {
        let chart = ChartSeries {
            title: "Empty",
            description: "",
            legend: vec!["a"],
            groups: Vec::new(),
        };
        assert!(TextBarChartRenderer::default().render(&chart).is_err());
    }

    #[test]
    fn mismatched_group_fails() {
        let chart = ChartSeries {
            title: "Broken",
            description: "",
            legend: vec!["a", "b"],
            groups: vec![("x", vec![1])],
        };
        let err = TextBarChartRenderer::default().render(&chart).unwrap_err();
        assert!(matches!(err, CropCastError::InvalidInput(_)));
    }
}
