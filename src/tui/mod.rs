//! TUI module - Terminal view of a workout plan with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::engine::WorkoutPlan;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App {
    plan: WorkoutPlan,
    should_quit: bool,
}

/// Table rows: group, exercise, weight, reps, alternative
pub fn plan_rows(plan: &WorkoutPlan) -> Vec<[String; 5]> {
    plan.suggestions
        .iter()
        .flat_map(|group_plan| {
            group_plan.exercises.iter().map(move |s| {
                let weight = match s.weight.target() {
                    Some(_) => format!("{} lbs", s.weight),
                    None => s.weight.to_string(),
                };
                [
                    group_plan.group.to_string(),
                    s.exercise.clone(),
                    weight,
                    s.reps.clone(),
                    s.alt.clone(),
                ]
            })
        })
        .collect()
}

impl App {
    pub fn new(plan: WorkoutPlan) -> Self {
        Self {
            plan,
            should_quit: false,
        }
    }

    /// Run the TUI application. The terminal is restored even if drawing
    /// or event handling fails.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        run_then_restore(|| self.event_loop(&mut terminal), restore_terminal)
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        let focus: Vec<_> = self.plan.focus_groups.iter().map(|g| g.name()).collect();
        let header = Paragraph::new(format!(
            "nextset - Suggested focus for tomorrow: {}",
            focus.join(", ")
        ))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let rows: Vec<Row> = plan_rows(&self.plan)
            .into_iter()
            .map(|cells| Row::new(cells.into_iter().map(Cell::from).collect::<Vec<_>>()))
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(26),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Min(20),
            ],
        )
        .header(Row::new(vec!["Group", "Exercise", "Weight", "Reps", "Alternative"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(format!("Plan for {}", self.plan.today)));

        frame.render_widget(table, chunks[1]);

        let footer = Paragraph::new("q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            self.should_quit = true;
        }
        Ok(())
    }
}

/// Run `body`, then `restore` regardless of the outcome. The body's error
/// takes precedence over a restore error.
fn run_then_restore<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    restore_on_setup_error(|| {
        stdout().execute(EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
    })
}

/// Raw mode is already on; undo it if the rest of the setup fails
fn restore_on_setup_error(setup: impl FnOnce() -> Result<Tui>) -> Result<Tui> {
    let result = setup();
    if result.is_err() {
        let _ = restore_terminal();
    }
    result
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::suggest_workout;
    use crate::history::History;
    use chrono::NaiveDate;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_when_body_fails() {
        let restored = Cell::new(false);
        let result: Result<()> = run_then_restore(
            || anyhow::bail!("draw failed"),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn test_body_error_wins_over_restore_error() {
        let result: Result<()> = run_then_restore(
            || anyhow::bail!("draw failed"),
            || anyhow::bail!("restore failed"),
        );
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_run() {
        let result = run_then_restore(|| Ok(7), || anyhow::bail!("restore failed"));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");

        let result = run_then_restore(|| Ok(7), || Ok(()));
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_plan_rows() {
        let history = History::from_reader(
            "Date,Exercise,Category,Weight,Reps\n2024-01-05,Cable Fly,Chest,20,12\n".as_bytes(),
        )
        .unwrap();
        let config = EngineConfig {
            focus_count: 8,
            ..EngineConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let plan = suggest_workout(history.entries(), today, &config);
        let rows = plan_rows(&plan);

        assert_eq!(rows.len(), 24);
        let fly = rows.iter().find(|r| r[1] == "Cable Fly").unwrap();
        assert_eq!(fly[0], "Chest");
        assert_eq!(fly[2], "20.5 lbs");
        let dips = rows.iter().find(|r| r[1] == "Dips").unwrap();
        assert_eq!(dips[2], "Start Light");
    }
}
