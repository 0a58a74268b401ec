use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::simulation::agent::Reading;
use crate::simulation::world::World;
use crate::ui::field::{EMPTY_CHAR, LINE_CHAR};
use crate::ui::input::KEY_HELP;

fn reading_span(label: &str, reading: Reading) -> Line<'static> {
    let color = match reading {
        Reading::Line => Color::Green,
        Reading::NoLine => Color::Gray,
        Reading::OutOfBounds => Color::Red,
    };
    Line::from(vec![
        Span::raw(format!("{label:<8}")),
        Span::styled(reading.label(), Style::default().fg(color)),
    ])
}

pub fn draw_ui(f: &mut Frame, world: &World, field_lines: Vec<String>, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Help
        ])
        .split(f.area());

    let agent = world.agent();
    let position = agent.position();

    // HUD
    let hud = format!(
        "Tick {} | Pos ({},{}) | Heading {} | Contact {} | {}{}",
        world.log().records().last().map_or(0, |r| r.tick),
        position.x,
        position.y,
        agent.heading().symbol(),
        if agent.wall_contact() { "yes" } else { "no" },
        if world.is_paused() { "PAUSED | " } else { "" },
        status,
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            hud,
            Style::default().add_modifier(Modifier::REVERSED),
        )),
        chunks[0],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(world.grid().width() as u16 + 2),
            Constraint::Min(30),
        ])
        .split(chunks[1]);

    // Field
    let text: Vec<Line> = field_lines
        .into_iter()
        .map(|s| {
            let spans: Vec<Span> = s
                .chars()
                .map(|c| {
                    let style = match c {
                        LINE_CHAR => Style::default().fg(Color::White),
                        EMPTY_CHAR => Style::default().fg(Color::DarkGray),
                        _ => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    };
                    Span::styled(c.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let field = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Grid"))
        .style(Style::default().bg(Color::Black));
    f.render_widget(field, body[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(body[1]);

    // Perception
    let perception = world.perceive();
    let sensors = Paragraph::new(vec![
        reading_span("own", perception.own),
        reading_span("left", perception.left),
        reading_span("center", perception.center),
        reading_span("right", perception.right),
        Line::from(format!("lines   {} cells", world.grid().line_count())),
        Line::from(format!("log     {} steps", world.log().len())),
    ])
    .block(Block::default().borders(Borders::ALL).title("Sensors"));
    f.render_widget(sensors, side[0]);

    // Recent steps
    let rows_shown = world.config().log.table_rows;
    let rows: Vec<Row> = world
        .log()
        .recent(rows_shown)
        .iter()
        .map(|r| {
            Row::new(vec![
                r.tick.to_string(),
                r.own.label().to_string(),
                r.left.label().to_string(),
                r.center.label().to_string(),
                r.right.label().to_string(),
                r.action.label().to_string(),
                format!("({},{})", r.x, r.y),
                r.heading.symbol().to_string(),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(13),
            Constraint::Length(8),
            Constraint::Length(3),
        ],
    )
    .header(
        Row::new(vec![
            "Tick", "Own", "Left", "Center", "Right", "Action", "Pos", "Hd",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Steps"));
    f.render_widget(table, side[1]);

    f.render_widget(
        Paragraph::new(KEY_HELP).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
