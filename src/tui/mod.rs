//! Ratatui-based terminal UI.
//!
//! Two calculator tabs (CO2 and ROI) share one event loop. Field text is edited
//! in place and only accepted while it stays a valid partial number; results
//! are computed on Enter and rendered next to the form.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::calc::{emissions, roi};
use crate::catalog::load_solutions;
use crate::config::Settings;
use crate::debug::{BundleKind, render_emissions_debug, render_roi_debug, write_debug_bundle};
use crate::domain::{NamedProjection, RoiField, RoiOutcome, ShipmentField, Solution};
use crate::error::AppError;
use crate::form::{Co2Form, RoiForm};
use crate::plot::{render_breakdown_bar, render_savings_ranges};
use crate::report::{format_emissions_report, format_roi_report, format_validation_error};

/// Start the TUI.
pub fn run(settings: Settings) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(settings);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Co2,
    Roi,
}

/// One selectable row of the CO2 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Co2Row {
    Field(ShipmentField),
    IncludeReturn,
}

struct App {
    settings: Settings,
    tab: Tab,
    co2: Co2Form,
    roi: RoiForm,
    /// Catalog from `RTK_SOLUTIONS_CSV`, projected alongside each ROI outcome.
    solutions: Vec<Solution>,
    co2_selected: usize,
    roi_selected: usize,
    status: String,
}

impl App {
    fn new(settings: Settings) -> Self {
        let (solutions, status) = match settings.solutions_csv.as_deref() {
            None => (Vec::new(), "Ready.".to_string()),
            Some(path) => match load_solutions(path) {
                Ok(catalog) => {
                    let status = format!(
                        "Loaded {} solutions ({} rows skipped).",
                        catalog.solutions.len(),
                        catalog.row_errors.len()
                    );
                    (catalog.solutions, status)
                }
                Err(err) => (Vec::new(), format!("Catalog not loaded: {err}")),
            },
        };
        Self {
            settings,
            tab: Tab::Co2,
            co2: Co2Form::default(),
            roi: RoiForm::default(),
            solutions,
            co2_selected: 0,
            roi_selected: 0,
            status,
        }
    }

    fn solution_projections(&self, outcome: &RoiOutcome) -> Vec<NamedProjection> {
        self.solutions
            .iter()
            .filter_map(|s| roi::project_solution(s, &outcome.baseline))
            .collect()
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('d') if ctrl => self.write_debug(),
            KeyCode::Char('r') if ctrl => {
                if self.tab == Tab::Roi {
                    self.roi.reset();
                    self.roi_selected = 0;
                    self.status = "ROI form reset.".to_string();
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = match self.tab {
                    Tab::Co2 => Tab::Roi,
                    Tab::Roi => Tab::Co2,
                };
                self.status = "Ready.".to_string();
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.calculate(),
            KeyCode::Char(' ') => self.toggle_return(),
            KeyCode::Backspace => self.edit_selected(|text| {
                text.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit_selected(|text| text.push(c)),
            _ => {}
        }
        false
    }

    fn co2_rows(&self) -> Vec<Co2Row> {
        let mut rows: Vec<Co2Row> = self.co2.visible_fields().into_iter().map(Co2Row::Field).collect();
        rows.push(Co2Row::IncludeReturn);
        rows
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.tab {
            Tab::Co2 => {
                let len = self.co2_rows().len();
                (&mut self.co2_selected, len)
            }
            Tab::Roi => (&mut self.roi_selected, RoiField::ALL.len()),
        };
        *selected = selected.saturating_add_signed(delta).min(len - 1);
    }

    /// Apply `change` to a copy of the selected field's text and keep it only
    /// if the form accepts the result.
    fn edit_selected(&mut self, change: impl FnOnce(&mut String)) {
        let accepted = match self.tab {
            Tab::Co2 => {
                let Some(Co2Row::Field(field)) = self.co2_rows().get(self.co2_selected).copied() else {
                    return;
                };
                let mut next = self.co2.text.field(field).to_string();
                change(&mut next);
                self.co2.edit(field, &next)
            }
            Tab::Roi => {
                let field = RoiField::ALL[self.roi_selected];
                let mut next = self.roi.text.field(field).to_string();
                change(&mut next);
                self.roi.edit(field, &next)
            }
        };
        self.status = if accepted { String::new() } else { "Numbers only.".to_string() };
    }

    fn toggle_return(&mut self) {
        if self.tab != Tab::Co2 {
            return;
        }
        let include = !self.co2.text.include_return;
        self.co2.set_include_return(include);
        self.co2_selected = self.co2_selected.min(self.co2_rows().len() - 1);
        self.status = format!("Include return: {}", if include { "yes" } else { "no" });
    }

    fn calculate(&mut self) {
        match self.tab {
            Tab::Co2 => {
                let result = self.co2.calculate();
                self.status = format!("Total: {:.2} kg CO2e", result.total_emissions_kg);
            }
            Tab::Roi => {
                self.status = match self.roi.calculate() {
                    Ok(_) => "ROI calculated.".to_string(),
                    Err(err) => err.to_string(),
                };
            }
        }
    }

    fn write_debug(&mut self) {
        let dir = &self.settings.debug_dir;
        let written = match self.tab {
            Tab::Co2 => {
                let Some(calc) = &self.co2.result else {
                    self.status = "Nothing to debug yet (press Enter).".to_string();
                    return;
                };
                let breakdown = emissions::breakdown(&calc.result);
                let md = render_emissions_debug(Some(&calc.text), &calc.input, &calc.result, &breakdown);
                write_debug_bundle(dir, BundleKind::Co2, &md)
            }
            Tab::Roi => {
                let md = match (&self.roi.calculated_text, &self.roi.outcome, &self.roi.error) {
                    (Some(text), Some(outcome), _) => render_roi_debug(text, Ok(outcome)),
                    (Some(text), None, Some(err)) => render_roi_debug(text, Err(err)),
                    _ => {
                        self.status = "Nothing to debug yet (press Enter).".to_string();
                        return;
                    }
                };
                write_debug_bundle(dir, BundleKind::Roi, &md)
            }
        };
        self.status = match written {
            Ok(path) => format!("Wrote debug bundle: {}", path.display()),
            Err(err) => format!("Debug write failed: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_tabs(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(0)])
            .split(chunks[1]);
        match self.tab {
            Tab::Co2 => {
                self.draw_co2_form(frame, body[0]);
                self.draw_co2_results(frame, body[1]);
            }
            Tab::Roi => {
                self.draw_roi_form(frame, body[0]);
                self.draw_roi_results(frame, body[1]);
            }
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = match self.tab {
            Tab::Co2 => 0,
            Tab::Roi => 1,
        };
        let tabs = Tabs::new(vec!["CO2 Emissions", "ROI Simulator"])
            .select(selected)
            .block(Block::default().title("rtk").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_co2_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .co2_rows()
            .into_iter()
            .map(|row| match row {
                Co2Row::Field(field) => ListItem::new(format!("{}: {}", field.label(), self.co2.text.field(field))),
                Co2Row::IncludeReturn => ListItem::new(format!(
                    "Include return: [{}]",
                    if self.co2.text.include_return { "x" } else { " " }
                )),
            })
            .collect();
        render_form(frame, area, "Shipment", items, self.co2_selected);
    }

    fn draw_roi_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let error = self.roi.error.as_ref();
        let items: Vec<ListItem> = RoiField::ALL
            .into_iter()
            .map(|field| {
                let item = ListItem::new(format!("{}: {}", field.label(), self.roi.text.field(field)));
                if error.is_some_and(|e| e.involves(field)) {
                    item.style(Style::default().fg(Color::Red))
                } else {
                    item
                }
            })
            .collect();
        render_form(frame, area, "Business inputs", items, self.roi_selected);
    }

    fn draw_co2_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let body = match &self.co2.result {
            Some(calc) => {
                let breakdown = emissions::breakdown(&calc.result);
                let bar_width = usize::from(area.width.saturating_sub(6));
                format!(
                    "{}\n{}",
                    format_emissions_report(&calc.input, &calc.result, &breakdown),
                    render_breakdown_bar(&breakdown, bar_width)
                )
            }
            None => "Press Enter to calculate.".to_string(),
        };
        render_text(frame, area, "Results", body);
    }

    fn draw_roi_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let body = match (&self.roi.outcome, &self.roi.error) {
            (Some(outcome), _) => {
                let bar_width = usize::from(area.width.saturating_sub(30));
                format!(
                    "{}\n{}",
                    format_roi_report(outcome, &self.solution_projections(outcome), &self.settings.currency),
                    render_savings_ranges(outcome, bar_width)
                )
            }
            (None, Some(err)) => format_validation_error(err),
            (None, None) => "Fill in the fields and press Enter.".to_string(),
        };
        render_text(frame, area, "Simulation", body);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.tab {
            Tab::Co2 => "Tab switch  ↑/↓ select  Space return leg  Enter calculate  Ctrl+D debug  Esc quit",
            Tab::Roi => "Tab switch  ↑/↓ select  Enter calculate  Ctrl+R reset  Ctrl+D debug  Esc quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn render_form(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let list = List::new(items)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("» ");

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_text(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, body: String) {
    let p = Paragraph::new(Text::from(body))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_is_gated_by_the_numeric_predicate() {
        let mut app = App::new(Settings::default());
        // Initial weight "6"
        type_text(&mut app, ".5x");
        assert_eq!(app.co2.text.initial_weight, "6.5");
        assert_eq!(app.status, "Numbers only.");

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.co2.text.initial_weight, "6");
    }

    #[test]
    fn space_hides_return_weight_and_clamps_selection() {
        let mut app = App::new(Settings::default());
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.co2_selected, 5);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.co2.text.include_return);
        assert_eq!(app.co2_rows().len(), 5);
        assert_eq!(app.co2_selected, 4);

        press(&mut app, KeyCode::Enter);
        let calc = app.co2.result.as_ref().unwrap();
        assert_eq!(calc.result.return_transport_emissions_kg, 0.0);
    }

    #[test]
    fn roi_enter_then_ctrl_r_resets() {
        let mut app = App::new(Settings::default());
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1000");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "85");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "30");
        press(&mut app, KeyCode::Enter);

        let outcome = app.roi.outcome.as_ref().unwrap();
        assert!((outcome.baseline.monthly_processing_cost - 3750.0).abs() < 1e-9);

        assert!(!ctrl(&mut app, 'r'));
        assert_eq!(app.roi, RoiForm::default());
        assert_eq!(app.roi_selected, 0);
    }

    #[test]
    fn roi_enter_on_blank_form_shows_every_violation() {
        let mut app = App::new(Settings::default());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        let err = app.roi.error.as_ref().unwrap();
        assert_eq!(err.violations.len(), 2);
        assert!(!err.involves(RoiField::CurrentReturnRate));
        assert_eq!(app.status, err.to_string());
    }

    #[test]
    fn esc_quits() {
        let mut app = App::new(Settings::default());
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn editing_after_enter_does_not_relabel_the_shown_result() {
        let mut app = App::new(Settings::default());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "0");
        assert_eq!(app.co2.text.distance, "1250");

        let calc = app.co2.result.as_ref().unwrap();
        assert_eq!(calc.input.distance_km, 125.0);
        assert_eq!(calc.result, emissions::compute(&calc.input));

        let md = render_emissions_debug(
            Some(&calc.text),
            &calc.input,
            &calc.result,
            &emissions::breakdown(&calc.result),
        );
        assert!(md.contains("| One-way Distance (km) | `125` | 125 |"));
        assert!(md.contains("- initial transport: 0.442500"));
    }

    #[test]
    fn accepted_edit_clears_numbers_only_status() {
        let mut app = App::new(Settings::default());
        type_text(&mut app, "x");
        assert_eq!(app.status, "Numbers only.");
        type_text(&mut app, "1");
        assert_eq!(app.status, "");
        assert_eq!(app.co2.text.initial_weight, "61");
    }

    #[test]
    fn roi_tab_projects_catalog_from_settings() {
        let path = std::env::temp_dir().join(format!("rtk_tui_catalog_{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "name,category,reduction_rate_low,reduction_rate_high\nFit Finder,Size Recommendation,10,25\nNo Range,VTO/AR,,\n",
        )
        .unwrap();
        let settings = Settings {
            solutions_csv: Some(path.clone()),
            ..Settings::default()
        };
        let mut app = App::new(settings);
        let _ = std::fs::remove_file(&path);
        assert_eq!(app.solutions.len(), 2);

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1000");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "85");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "30");
        press(&mut app, KeyCode::Enter);

        let outcome = app.roi.outcome.clone().unwrap();
        let projections = app.solution_projections(&outcome);
        assert_eq!(projections.len(), 1);
        assert_eq!(projections[0].name, "Fit Finder");
    }

    #[test]
    fn missing_catalog_is_reported_not_fatal() {
        let settings = Settings {
            solutions_csv: Some(std::path::PathBuf::from("/nonexistent/rtk_catalog.csv")),
            ..Settings::default()
        };
        let app = App::new(settings);
        assert!(app.solutions.is_empty());
        assert!(app.status.starts_with("Catalog not loaded:"));
    }
}
