use {
    crate::{
        analysis_core::{AnalysisReport, Describe},
        state::{DashboardState, Tab},
        text_report::{format_growth, format_number},
        ui::renderer::{bar_data, format_money, truncate},
    },
    ratatui::{
        layout::{Alignment, Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{BarChart, Block, Borders, Paragraph, Row, Table, Tabs},
        Frame,
    },
};

const LABEL_WIDTH: usize = 10;

/// Render the main UI layout
pub fn render_layout(f: &mut Frame, area: Rect, state: &DashboardState) -> Result<(), Box<dyn std::error::Error>> {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header + overview
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Active tab
            Constraint::Length(3), // Footer/Status
        ])
        .split(area);

    render_header(f, chunks[0], state);
    render_tabs(f, chunks[1], state);

    match state.report().filter(|_| state.has_data()) {
        Some(report) => render_tab(f, chunks[2], state, report)?,
        None => render_no_data(f, chunks[2], state),
    }

    render_footer(f, chunks[3], state);
    Ok(())
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Block::default()
        .borders(Borders::ALL)
        .title("Salesflow - E-commerce Sales Dashboard");

    let metrics = match state.report() {
        Some(report) => {
            let o = &report.overview;
            let currency = state.currency();
            Line::from(vec![
                Span::styled("Orders: ", Style::default().fg(Color::Cyan)),
                Span::raw(o.total_orders.to_string()),
                Span::raw(" | "),
                Span::styled("Revenue: ", Style::default().fg(Color::Cyan)),
                Span::raw(format_money(currency, o.total_revenue)),
                Span::raw(" | "),
                Span::styled("AOV: ", Style::default().fg(Color::Cyan)),
                Span::raw(format_money(currency, o.average_order_value)),
                Span::raw(" | "),
                Span::styled("Customers: ", Style::default().fg(Color::Cyan)),
                Span::raw(o.total_customers.to_string()),
                Span::raw(" | "),
                Span::styled("Repeat: ", Style::default().fg(Color::Cyan)),
                Span::raw(o.repeat_customers.to_string()),
            ])
        }
        None => Line::from(Span::styled("No dataset loaded", Style::default().fg(Color::Red))),
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Salesflow", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" - "),
            Span::raw(state.data_path().display().to_string()),
        ]),
        metrics,
    ];

    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_tabs(f: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Views"))
        .select(state.tab().index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

fn render_no_data(f: &mut Frame, area: Rect, state: &DashboardState) {
    let text = vec![
        Line::from(Span::styled(
            "No data available",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Could not load orders from {}", state.data_path().display())),
        Line::from("Generate a dataset with `sample_data generate`, then press 'r' to reload"),
    ];

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(state.tab().title()));
    f.render_widget(panel, area);
}

/// Split the tab area into a table (left) and a bar chart (right)
fn split_panels(area: Rect) -> (Rect, Rect) {
    let chunks = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    (chunks[0], chunks[1])
}

fn header_row(cells: &[&'static str]) -> Row<'static> {
    Row::new(cells.to_vec()).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

fn render_bars(f: &mut Frame, area: Rect, title: &str, data: &[(String, u64)]) {
    let bars: Vec<(&str, u64)> = data.iter().map(|(label, value)| (label.as_str(), *value)).collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .data(bars.as_slice())
        .bar_width(LABEL_WIDTH as u16)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    f.render_widget(chart, area);
}

fn render_tab(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    report: &AnalysisReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let currency = state.currency();
    let top_n = state.top_n();
    let (left, right) = split_panels(area);

    match state.tab() {
        Tab::Products => {
            let rows: Vec<Row> = report
                .product_analysis
                .iter()
                .map(|p| {
                    Row::new(vec![
                        p.product.clone(),
                        format_money(currency, p.total_revenue),
                        p.units_sold.to_string(),
                        p.order_count.to_string(),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Percentage(34),
                Constraint::Percentage(26),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ];
            let table = Table::new(rows, widths)
                .header(header_row(&["Product", "Revenue", "Units", "Orders"]))
                .block(Block::default().borders(Borders::ALL).title("Products by Revenue"));
            f.render_widget(table, left);

            let data = bar_data(
                report
                    .product_analysis
                    .iter()
                    .take(top_n)
                    .map(|p| (p.product.as_str(), p.total_revenue)),
                LABEL_WIDTH,
            );
            render_bars(f, right, &format!("Top {} Products", top_n), &data);
        }
        Tab::Regions => {
            let rows: Vec<Row> = report
                .regional_analysis
                .iter()
                .map(|c| {
                    Row::new(vec![
                        c.city.clone(),
                        format_money(currency, c.total_revenue),
                        format_money(currency, c.avg_order_value),
                        c.order_count.to_string(),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Percentage(28),
                Constraint::Percentage(28),
                Constraint::Percentage(26),
                Constraint::Percentage(18),
            ];
            let table = Table::new(rows, widths)
                .header(header_row(&["City", "Revenue", "Avg Order", "Orders"]))
                .block(Block::default().borders(Borders::ALL).title("Regional Performance"));
            f.render_widget(table, left);

            let data = bar_data(
                report
                    .regional_analysis
                    .iter()
                    .take(top_n)
                    .map(|c| (c.city.as_str(), c.total_revenue)),
                LABEL_WIDTH,
            );
            render_bars(f, right, &format!("Top {} Cities", top_n), &data);
        }
        Tab::Payments => {
            let rows: Vec<Row> = report
                .payment_analysis
                .iter()
                .map(|m| {
                    Row::new(vec![
                        m.method.clone(),
                        m.order_count.to_string(),
                        format_money(currency, m.total_revenue),
                        format_money(currency, m.avg_order_value),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Percentage(28),
                Constraint::Percentage(18),
                Constraint::Percentage(28),
                Constraint::Percentage(26),
            ];
            let table = Table::new(rows, widths)
                .header(header_row(&["Method", "Orders", "Revenue", "Avg Order"]))
                .block(Block::default().borders(Borders::ALL).title("Payment Methods"));
            f.render_widget(table, left);

            let data = bar_data(
                report
                    .payment_analysis
                    .iter()
                    .map(|m| (m.method.as_str(), m.order_count as f64)),
                LABEL_WIDTH,
            );
            render_bars(f, right, "Orders per Method", &data);
        }
        Tab::Customers => {
            let behavior = &report.customer_behavior;
            let rows = describe_rows(
                currency,
                &behavior.purchase_frequency,
                &behavior.avg_order_value,
                &behavior.customer_lifetime,
            );
            let widths = [
                Constraint::Percentage(16),
                Constraint::Percentage(24),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ];
            let table = Table::new(rows, widths)
                .header(header_row(&["Stat", "Orders/Cust", "Avg Order", "Lifetime"]))
                .block(Block::default().borders(Borders::ALL).title("Customer Statistics"));
            f.render_widget(table, left);

            let data = bar_data(
                behavior
                    .city_distribution
                    .iter()
                    .take(top_n)
                    .map(|(city, n)| (city.as_str(), *n as f64)),
                LABEL_WIDTH,
            );
            render_bars(f, right, "Customers by Preferred City", &data);
        }
        Tab::Trends => {
            let trends = &state.views().trends;
            let rows: Vec<Row> = trends
                .iter()
                .map(|m| {
                    let growth_color = match m.growth_pct {
                        Some(g) if g > 0.0 => Color::Green,
                        Some(g) if g < 0.0 => Color::Red,
                        _ => Color::Gray,
                    };
                    Row::new(vec![
                        m.month.to_string(),
                        format_money(currency, m.revenue),
                        format_growth(m.growth_pct),
                    ])
                    .style(Style::default().fg(growth_color))
                })
                .collect();
            let widths = [
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ];
            let table = Table::new(rows, widths)
                .header(header_row(&["Month", "Revenue", "Growth"]))
                .block(Block::default().borders(Borders::ALL).title("Monthly Revenue"));
            f.render_widget(table, left);

            let labels: Vec<String> = trends.iter().map(|m| m.month.to_string()).collect();
            let data = bar_data(
                labels.iter().map(String::as_str).zip(trends.iter().map(|m| m.revenue)),
                7,
            );
            render_bars(f, right, "Revenue by Month", &data);
        }
    }

    Ok(())
}

fn describe_rows(
    currency: &str,
    frequency: &Describe,
    aov: &Describe,
    lifetime: &Describe,
) -> Vec<Row<'static>> {
    let plain = |v: Option<f64>| v.map_or("-".to_string(), format_number);
    let money = |v: Option<f64>| v.map_or("-".to_string(), |v| format_money(currency, v));

    let (f, a, l) = (frequency.rows(), aov.rows(), lifetime.rows());
    (0..f.len())
        .map(|i| {
            let (a_cell, l_cell) = if i == 0 {
                (plain(a[i].1), plain(l[i].1))
            } else {
                (money(a[i].1), money(l[i].1))
            };
            Row::new(vec![f[i].0.to_string(), plain(f[i].1), a_cell, l_cell])
        })
        .collect()
}

fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let loaded = state
        .loaded_at()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let text = vec![Line::from(vec![
        Span::styled("Loaded: ", Style::default().fg(Color::Green)),
        Span::raw(loaded),
        Span::raw(" | "),
        Span::styled("Keys: ", Style::default().fg(Color::Cyan)),
        Span::raw("Tab/←/→ switch view · r reload · q/Esc quit"),
        Span::raw(" | "),
        Span::raw(truncate(&state.data_path().display().to_string(), 40)),
    ])];

    let footer = Block::default().borders(Borders::ALL).title("Status");
    f.render_widget(Paragraph::new(text).block(footer), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::DatasetLoader;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::tempdir;

    fn draw(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_layout(f, area, state).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test]
    async fn test_no_data_state() {
        let dir = tempdir().unwrap();
        let mut state = DashboardState::new(DatasetLoader::new(dir.path().join("missing.csv")), "₹", 5);
        state.refresh().await.unwrap();

        let screen = draw(&state);
        assert!(screen.contains("No data available"));
    }

    #[tokio::test]
    async fn test_tabs_render_views() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "order_id,customer_id,product_name,quantity,total_price,city,payment_method,order_date\n\
             OD1,C1,Books,1,100,Pune,UPI,2023-01-01\n\
             OD2,C2,Toys,2,50,Delhi,COD,2023-02-01\n",
        )
        .unwrap();

        let mut state = DashboardState::new(DatasetLoader::new(&path), "$", 5);
        state.refresh().await.unwrap();

        let screen = draw(&state);
        assert!(screen.contains("Books"));
        assert!(screen.contains("Products by Revenue"));

        state.next_tab();
        assert!(draw(&state).contains("Regional Performance"));

        state.prev_tab();
        state.prev_tab();
        let screen = draw(&state);
        assert!(screen.contains("Monthly Revenue"));
        assert!(screen.contains("2023-02"));
    }

    #[tokio::test]
    async fn test_chart_panels_per_tab() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "order_id,customer_id,product_name,quantity,total_price,city,payment_method,order_date\n\
             OD1,C1,Books,1,100,Pune,UPI,2023-01-01\n\
             OD2,C2,Toys,2,50,Delhi,COD,2023-02-01\n",
        )
        .unwrap();

        let mut state = DashboardState::new(DatasetLoader::new(&path), "$", 5);
        state.refresh().await.unwrap();

        let mut screens = Vec::new();
        for _ in Tab::ALL {
            screens.push((state.tab(), draw(&state)));
            state.next_tab();
        }

        let chart = |tab: Tab| &screens.iter().find(|(t, _)| *t == tab).unwrap().1;
        assert!(chart(Tab::Products).contains("Top 5 Products"));
        assert!(chart(Tab::Regions).contains("Top 5 Cities"));
        assert!(chart(Tab::Payments).contains("Orders per Method"));
        assert!(chart(Tab::Trends).contains("Revenue by Month"));
    }
}
