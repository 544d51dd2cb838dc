// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts the route overlay in a ratatui + crossterm shell: the map canvas draws the in-memory
//! [`Scene`], mouse clicks add locations, and the keyboard drives selection, solving and saving.

use std::{
    cell::RefCell,
    collections::VecDeque,
    error::Error,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::model::fixtures::{demo_plan, demo_routes};
use crate::model::{Degree, Location, Plan, RouteSet, VehicleId};
use crate::overlay::{CanvasReport, MapCanvas, MapInput};
use crate::solver::{RouteSolver, SolveMetrics, SolveOutcome, SolveRequest, SolverError};
use crate::store::PlanFolder;
use crate::style::MapStyle;
use crate::surface::{PointerEvent, PointerKind, Scene, SurfaceError};

use self::map_view::MapProjection;
use self::theme::{tui_color, TuiTheme};

mod map_view;
mod theme;

const TICK: Duration = Duration::from_millis(100);
const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_DIAGNOSTIC_LINES: usize = 5;
const DEFAULT_DEMAND: u32 = 1;
const FOOTER_HELP: &str =
    "click add · d depot · x del · +/- demand · c calc · s save · o open · D forget · Tab/1-9 select · Esc clear · q quit";
const NO_STORE: &str = "No store configured (start with --store <dir>)";

/// Everything the terminal UI starts from.
pub struct TuiOptions {
    pub plan: Plan,
    /// Name used when saving the plan to the store.
    pub plan_name: String,
    pub outcome: Option<SolveOutcome>,
    pub style: MapStyle,
    pub store: Option<PlanFolder>,
    pub solver: Option<Box<dyn RouteSolver>>,
}

impl TuiOptions {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            plan_name: "untitled".to_owned(),
            outcome: None,
            style: MapStyle::default(),
            store: None,
            solver: None,
        }
    }
}

/// The built-in demo: central Berlin with three pre-solved routes.
pub fn demo_options() -> TuiOptions {
    let mut options = TuiOptions::new(demo_plan());
    options.plan_name = "demo".to_owned();
    options.outcome = Some(SolveOutcome {
        routes: demo_routes(),
        metrics: None,
        message: Some("demo".to_owned()),
    });
    options
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(options: TuiOptions) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut app = App::new(options, theme)?;
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.expire_toast(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
        app.tick = app.tick.wrapping_add(1);
    }

    Ok(())
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    plan: Plan,
    plan_name: String,
    routes: RouteSet,
    metrics: Option<SolveMetrics>,
    routes_stale: bool,
    canvas: MapCanvas<Scene>,
    clicks: Rc<RefCell<Vec<(Degree, Degree)>>>,
    solver: Option<Box<dyn RouteSolver>>,
    store: Option<PlanFolder>,
    projection: Option<MapProjection>,
    theme: TuiTheme,
    toast: Option<Toast>,
    diagnostics: VecDeque<String>,
    next_demand: u32,
    tick: u64,
    should_quit: bool,
}

impl App {
    fn new(options: TuiOptions, theme: TuiTheme) -> Result<Self, SurfaceError> {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        let canvas = MapCanvas::mount(Scene::new(), options.style, move |lat, lng| {
            sink.borrow_mut().push((lat, lng));
        })?;
        let (routes, metrics) = options
            .outcome
            .map(|outcome| (outcome.routes, outcome.metrics))
            .unwrap_or_default();

        let mut app = Self {
            plan: options.plan,
            plan_name: options.plan_name,
            routes,
            metrics,
            routes_stale: false,
            canvas,
            clicks,
            solver: options.solver,
            store: options.store,
            projection: None,
            theme,
            toast: None,
            diagnostics: VecDeque::new(),
            next_demand: DEFAULT_DEMAND,
            tick: 0,
            should_quit: false,
        };
        app.sync();
        Ok(app)
    }

    /// Hands the current plan and routes to the canvas.
    fn sync(&mut self) {
        let report = self.canvas.update(MapInput {
            locations: self.plan.locations().to_vec(),
            routes: self.routes.clone(),
            depot_index: self.plan.depot_index(),
        });
        self.absorb(report);
    }

    fn absorb(&mut self, report: CanvasReport) {
        for diagnostic in &report.diagnostics {
            if diagnostic.is_informational() {
                continue;
            }
            if self.diagnostics.len() == MAX_DIAGNOSTIC_LINES {
                self.diagnostics.pop_front();
            }
            self.diagnostics.push_back(diagnostic.to_string());
        }
    }

    fn route_ids(&self) -> Vec<VehicleId> {
        self.routes.keys().cloned().collect()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.cycle_selection(true),
            KeyCode::BackTab => self.cycle_selection(false),
            KeyCode::Esc => {
                let report = self.canvas.clear_selection();
                self.absorb(report);
            }
            KeyCode::Char(ch @ '1'..='9') => {
                let position = usize::from(ch as u8 - b'1');
                self.toggle_nth_route(position);
            }
            KeyCode::Char('d') => self.make_last_location_depot(),
            KeyCode::Char('x') => self.remove_last_location(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.next_demand = self.next_demand.saturating_add(1);
            }
            KeyCode::Char('-') => {
                self.next_demand = self.next_demand.saturating_sub(1);
            }
            KeyCode::Char('c') => self.calculate_routes(),
            KeyCode::Char('s') => self.save_plan(),
            KeyCode::Char('o') => self.open_next_saved_plan(),
            KeyCode::Char('D') => self.forget_saved_plan(),
            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Primary,
            MouseEventKind::Down(_) => PointerKind::Secondary,
            MouseEventKind::Drag(_) => PointerKind::Drag,
            MouseEventKind::Moved => PointerKind::Move,
            _ => return,
        };
        let position = self
            .projection
            .and_then(|projection| projection.unproject(mouse.column, mouse.row));
        self.handle_pointer(PointerEvent { kind, position });
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let report = self.canvas.handle_pointer(event);
        self.absorb(report);
        let clicks = self.clicks.borrow_mut().drain(..).collect::<Vec<_>>();
        for (lat, lng) in clicks {
            self.add_location(lat, lng);
        }
    }

    fn add_location(&mut self, lat: Degree, lng: Degree) {
        let index = self
            .plan
            .add_location(Location::new(lat, lng, self.next_demand));
        self.routes_stale = !self.routes.is_empty();
        self.set_toast(format!("Added point {} at {lat:.4}, {lng:.4}", index + 1));
        self.sync();
    }

    fn make_last_location_depot(&mut self) {
        let Some(last) = self.plan.locations().len().checked_sub(1) else {
            self.set_toast("No locations yet");
            return;
        };
        self.plan.set_depot(Some(last));
        self.routes_stale = !self.routes.is_empty();
        self.set_toast(format!("Point {} is now the depot", last + 1));
        self.sync();
    }

    fn remove_last_location(&mut self) {
        let Some(last) = self.plan.locations().len().checked_sub(1) else {
            self.set_toast("No locations yet");
            return;
        };
        self.plan.remove_location(last);
        self.routes_stale = !self.routes.is_empty();
        self.set_toast(format!("Removed point {}", last + 1));
        self.sync();
    }

    fn cycle_selection(&mut self, forward: bool) {
        let ids = self.route_ids();
        if ids.is_empty() {
            self.set_toast("No routes to select");
            return;
        }
        let current = self
            .canvas
            .selected()
            .and_then(|selected| ids.iter().position(|id| id == selected));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(ids.len() - 1),
            (Some(index), true) => Some(index + 1).filter(|next| *next < ids.len()),
            (Some(index), false) => index.checked_sub(1),
        };
        let report = match next {
            Some(index) => self.canvas.select_route(&ids[index]),
            None => self.canvas.clear_selection(),
        };
        self.absorb(report);
    }

    fn toggle_nth_route(&mut self, position: usize) {
        let Some(vehicle_id) = self.routes.keys().nth(position).cloned() else {
            self.set_toast(format!("No route {}", position + 1));
            return;
        };
        let report = self.canvas.select_route(&vehicle_id);
        self.absorb(report);
    }

    fn calculate_routes(&mut self) {
        match self.solve() {
            Ok(outcome) => {
                let count = outcome.routes.len();
                self.routes = outcome.routes;
                self.metrics = outcome.metrics;
                self.routes_stale = false;
                self.sync();
                self.set_toast(format!("Calculated {count} route(s)"));
            }
            Err(err) => {
                log::warn!("route calculation failed: {err}");
                self.set_toast(format!("Calculation failed: {err}"));
            }
        }
    }

    fn solve(&mut self) -> Result<SolveOutcome, SolverError> {
        let request = SolveRequest::from_plan(&self.plan)?;
        let solver = self.solver.as_mut().ok_or(SolverError::Unavailable)?;
        solver.solve(&request)
    }

    fn save_plan(&mut self) {
        let Some(store) = &self.store else {
            self.set_toast(NO_STORE);
            return;
        };
        match store.save(&self.plan_name, &self.plan) {
            Ok(path) => self.set_toast(format!("Saved {}", path.display())),
            Err(err) => {
                log::warn!("saving plan failed: {err}");
                self.set_toast(format!("Save failed: {err}"));
            }
        }
    }

    /// Replaces the current plan with the saved plan after it (by name), wrapping around.
    fn open_next_saved_plan(&mut self) {
        let Some(store) = self.store.clone() else {
            self.set_toast(NO_STORE);
            return;
        };
        let names = match store.list() {
            Ok(names) => names,
            Err(err) => {
                log::warn!("listing saved plans failed: {err}");
                self.set_toast(format!("Listing saved plans failed: {err}"));
                return;
            }
        };
        if names.is_empty() {
            self.set_toast(format!("No saved plans in {}", store.root().display()));
            return;
        }
        let next = names
            .iter()
            .position(|name| *name == self.plan_name)
            .map_or(0, |current| (current + 1) % names.len());
        let name = &names[next];
        match store.load(name) {
            Ok(plan) => {
                self.plan = plan;
                self.plan_name = name.clone();
                self.routes = RouteSet::new();
                self.metrics = None;
                self.routes_stale = false;
                self.sync();
                self.set_toast(format!("Opened {name} ({}/{})", next + 1, names.len()));
            }
            Err(err) => {
                log::warn!("opening saved plan {name} failed: {err}");
                self.set_toast(format!("Opening {name} failed: {err}"));
            }
        }
    }

    /// Removes the current plan's saved copy; the plan on screen stays.
    fn forget_saved_plan(&mut self) {
        let Some(store) = self.store.clone() else {
            self.set_toast(NO_STORE);
            return;
        };
        match store.delete(&self.plan_name) {
            Ok(true) => self.set_toast(format!("Deleted saved plan {}", self.plan_name)),
            Ok(false) => self.set_toast(format!("{} is not saved", self.plan_name)),
            Err(err) => {
                log::warn!("deleting saved plan failed: {err}");
                self.set_toast(format!("Delete failed: {err}"));
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_area);
    let map_area = panes[0];
    let sidebar_area = panes[1];

    let title = map_title(&app.plan_name, app.plan.locations().len(), app.routes.len());
    let projection = map_view::draw_map(
        frame,
        map_area,
        app.canvas.surface(),
        &app.theme,
        app.tick,
        &title,
    );
    app.projection = Some(projection);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
        ])
        .split(sidebar_area);
    frame.render_widget(locations_panel(app), sidebar[0]);
    frame.render_widget(routes_panel(app), sidebar[1]);
    frame.render_widget(summary_panel(app), sidebar[2]);
    frame.render_widget(Paragraph::new(status_line(app)), status_area);
}

fn map_title(plan_name: &str, locations: usize, routes: usize) -> String {
    format!(" {plan_name} · {locations} point(s) · {routes} route(s) ")
}

fn locations_panel(app: &App) -> List<'static> {
    let depot = app.plan.depot_index();
    let sequence = app.canvas.sequence();
    let items = app
        .plan
        .locations()
        .iter()
        .enumerate()
        .map(|(index, location)| {
            let marker = if depot == Some(index) { "■" } else { "●" };
            let marker_style = if depot == Some(index) {
                Style::default().fg(tui_color(app.canvas.style().depot_color))
            } else {
                Style::default().fg(tui_color(app.canvas.style().stop_color))
            };
            let mut spans = vec![
                Span::styled(format!("{marker} "), marker_style),
                Span::raw(location_label(index, location)),
            ];
            if let Some(position) = sequence.iter().position(|visited| *visited == index) {
                spans.push(Span::styled(
                    format!("  #{}", position + 1),
                    app.theme.accent_style(),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();
    List::new(items).style(app.theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Locations ")
            .border_style(app.theme.panel_border_style(false)),
    )
}

fn location_label(index: usize, location: &Location) -> String {
    format!(
        "{:>2}  {:.4}, {:.4}  demand {}",
        index + 1,
        location.latitude,
        location.longitude,
        location.demand
    )
}

fn routes_panel(app: &App) -> List<'static> {
    let style = app.canvas.style();
    let selected = app.canvas.selected();
    let items = app
        .routes
        .iter()
        .enumerate()
        .map(|(position, (vehicle_id, waypoints))| {
            let is_selected = selected == Some(vehicle_id);
            let color = if is_selected {
                style.highlight_color
            } else {
                style.palette.color_for(vehicle_id)
            };
            let label = route_label(position, vehicle_id, waypoints.len());
            let label_style = if is_selected {
                app.theme.selection_style()
            } else {
                app.theme.base_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled("━━ ", Style::default().fg(tui_color(color))),
                Span::styled(label, label_style),
            ]))
        })
        .collect::<Vec<_>>();
    let title = if app.routes_stale {
        " Routes (outdated, press c) "
    } else {
        " Routes "
    };
    List::new(items).style(app.theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(app.theme.panel_border_style(false)),
    )
}

fn route_label(position: usize, vehicle_id: &VehicleId, waypoints: usize) -> String {
    let key = if position < 9 {
        format!("{}", position + 1)
    } else {
        " ".to_owned()
    };
    format!("{key}  vehicle {vehicle_id}  {waypoints} waypoint(s)")
}

fn summary_panel(app: &App) -> Paragraph<'static> {
    let capacities = app
        .plan
        .vehicle_capacities()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        Line::from(format!("Plan: {}", app.plan_name)),
        Line::from(format!("Fleet capacities: [{capacities}]")),
        Line::from(format!("Next demand: {}", app.next_demand)),
    ];
    if let Some(metrics) = app.metrics {
        lines.push(Line::from(format!(
            "Distance {:.1} · load {}",
            metrics.total_distance, metrics.total_load
        )));
    }
    for diagnostic in &app.diagnostics {
        lines.push(Line::styled(diagnostic.clone(), app.theme.error_style()));
    }
    Paragraph::new(lines)
        .style(app.theme.base_style())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Summary ")
                .border_style(app.theme.panel_border_style(false)),
        )
}

fn status_line(app: &App) -> Line<'static> {
    if let Some(toast) = &app.toast {
        return Line::styled(toast.message.clone(), app.theme.accent_style());
    }
    Line::styled(FOOTER_HELP, app.theme.muted_style())
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
