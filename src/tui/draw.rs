use crate::tui::app::App;
use flowgraph::state::edge_state::EdgeStatus;
use flowgraph::state::path_state::PathStatus;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table};

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length((app.snapshot().paths.len() + 3).min(16) as u16),
            Constraint::Min(5),
        ])
        .split(frame.area());

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_metrics(app), chunks[1]);
    frame.render_widget(build_selection(app), chunks[2]);
    frame.render_widget(build_message(app), chunks[3]);
    frame.render_widget(build_path_table(app), chunks[4]);
    frame.render_widget(build_edge_table(app), chunks[5]);
}

fn util_style(utilization: f64) -> Style {
    if utilization < 0.8 {
        Style::default().fg(Color::Green)
    } else if utilization <= 1.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn format_util(utilization: f64) -> String {
    if utilization.is_finite() {
        format!("{:>6.2}", utilization)
    } else {
        format!("{:>6}", "∞")
    }
}

fn build_header(app: &'_ App) -> Block<'_> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    Block::new()
        .title(Line::from(vec![
            Span::raw(" Flowgraph ").style(Style::default().bold().cyan()),
            Span::raw("·").style(dim),
            Span::raw(format!(" {} ", app.scenario)).style(Style::default().bold()),
            Span::raw("·").style(dim),
            Span::raw(" Turn: ").style(dim),
            Span::raw(format!("{}", app.engine.turn())).style(Style::default().bold()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_metrics(app: &'_ App) -> Paragraph<'_> {
    let m = &app.snapshot().system_metrics;
    let dim = Style::default().add_modifier(Modifier::DIM);
    let efficiency_style = if m.network_efficiency >= 0.8 {
        Style::default().green()
    } else if m.network_efficiency >= 0.5 {
        Style::default().yellow()
    } else {
        Style::default().light_red()
    };
    let conservation_style = if m.flow_conservation_violations == 0 {
        Style::default().green()
    } else {
        Style::default().red().bold()
    };

    Paragraph::new(Line::from(vec![
        Span::raw(" Throughput ").style(dim),
        Span::raw(format!("{:.1}", m.total_throughput)).style(Style::default().bold()),
        Span::raw("  Max flow ").style(dim),
        Span::raw(format!("{:.1}", m.theoretical_max_flow)),
        Span::raw("  Efficiency ").style(dim),
        Span::raw(format!("{:.0}%", m.network_efficiency * 100.0)).style(efficiency_style),
        Span::raw("  Edges up/down ").style(dim),
        Span::raw(format!("{}/{}", m.operational_edges, m.failed_edges)),
        Span::raw("  Blocked paths ").style(dim),
        Span::raw(format!("{}", m.blocked_paths)),
        Span::raw("  Violations ").style(dim),
        Span::raw(format!("{}", m.flow_conservation_violations)).style(conservation_style),
    ]))
}

fn build_selection(app: &'_ App) -> Paragraph<'_> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let info = app
        .selected_path()
        .and_then(|path| app.engine.controller().get_path_info(&path).ok());
    let Some(info) = info else {
        return Paragraph::new("");
    };
    let shared = if info.shared_paths.is_empty() {
        "none".to_string()
    } else {
        info.shared_paths.join(", ")
    };

    Paragraph::new(Line::from(vec![
        Span::raw(format!(" {} ", info.path_id)).style(Style::default().cyan().bold()),
        Span::raw(info.route_description),
        Span::raw("  available ").style(dim),
        Span::raw(format!("{:.1}", info.available_capacity)),
        Span::raw("  shares edges with ").style(dim),
        Span::raw(shared),
    ]))
}

fn build_message(app: &'_ App) -> Paragraph<'_> {
    // first line only, multi-line errors carry their alternatives below
    let line = app.message().lines().next().unwrap_or_default();
    Paragraph::new(Line::from(Span::raw(format!(" {}", line)).italic()))
}

fn build_path_table(app: &'_ App) -> Table<'_> {
    let selected = app.selected_path();

    Table::new(
        app.snapshot().paths.iter().map(|(name, path)| {
            let status_style = match path.status {
                PathStatus::Blocked => Style::default().red().bold(),
                PathStatus::Saturated => Style::default().light_red(),
                PathStatus::High => Style::default().yellow(),
                PathStatus::Normal => Style::default(),
                PathStatus::Low => Style::default().add_modifier(Modifier::DIM),
            };
            let marker = if selected.as_deref() == Some(name.as_str()) {
                "▶"
            } else {
                " "
            };

            Row::new(vec![
                Cell::from(marker).style(Style::default().cyan().bold()),
                Cell::from(name.clone()),
                Cell::from(format!("{:>6.1}", path.current_flow)),
                Cell::from(format!("{:>6.1}", path.bottleneck_capacity)),
                Cell::from(format_util(path.utilization)).style(util_style(path.utilization)),
                Cell::from(path.status.to_string()).style(status_style),
                Cell::from(path.bottleneck_edge.clone()),
                Cell::from(path.edge_sequence.join(" → ")),
            ])
        }),
        [
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new([
            Cell::from(""),
            Cell::from("Path"),
            Cell::from("  Flow"),
            Cell::from("  Bneck"),
            Cell::from(" Util"),
            Cell::from("Status"),
            Cell::from("At"),
            Cell::from("Route"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Paths ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_edge_table(app: &'_ App) -> Table<'_> {
    let mut edges = app.snapshot().edges.iter().collect::<Vec<_>>();
    edges.sort_by(|a, b| b.1.utilization.total_cmp(&a.1.utilization));

    Table::new(
        edges.into_iter().map(|(name, edge)| {
            let status_style = match edge.status {
                EdgeStatus::Disabled => Style::default().red().bold(),
                EdgeStatus::Overload => Style::default().light_red(),
                EdgeStatus::High => Style::default().yellow(),
                EdgeStatus::Normal => Style::default(),
                EdgeStatus::Low => Style::default().add_modifier(Modifier::DIM),
            };

            Row::new(vec![
                Cell::from(name.clone()),
                Cell::from(format!("{} → {}", edge.from_node, edge.to_node)),
                Cell::from(format_util(edge.utilization)).style(util_style(edge.utilization)),
                Cell::from(format!("{:>6.1}", edge.current_flow)),
                Cell::from(format!("{:>6.1}", edge.capacity)),
                Cell::from(format!("{:>6.1}", edge.base_capacity)),
                Cell::from(edge.status.to_string()).style(status_style),
            ])
        }),
        [
            Constraint::Length(6),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new([
            Cell::from("Edge"),
            Cell::from("Link"),
            Cell::from(" Util"),
            Cell::from("  Flow"),
            Cell::from("   Cap"),
            Cell::from("  Base"),
            Cell::from("Status"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Edges ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}
