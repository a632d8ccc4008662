// Renderer module - formatting utilities shared by the dashboard panels

use crate::text_report::format_currency;

/// Format a monetary value for display
pub fn format_money(currency: &str, amount: f64) -> String {
    format_currency(currency, amount)
}

/// Cut a label to `width` characters, marking the cut with `…`
pub fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let kept: String = label.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Bar chart data: labels truncated to `label_width`, values rounded to whole units
pub fn bar_data<'a, I>(items: I, label_width: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    items
        .into_iter()
        .map(|(label, value)| (truncate(label, label_width), value.max(0.0).round() as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Mumbai", 10), "Mumbai");
        assert_eq!(truncate("Beauty & Personal Care", 8), "Beauty …");
    }

    #[test]
    fn test_bar_data() {
        let bars = bar_data([("Mumbai", 300.4), ("Delhi", -1.0)], 6);
        assert_eq!(bars, vec![("Mumbai".to_string(), 300), ("Delhi".to_string(), 0)]);
    }
}
