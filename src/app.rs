use std::collections::{HashSet, VecDeque};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pcmanager::config::{Config, KeybindsConfig, parse_key};
use pcmanager::error::QueryError;
use pcmanager::format::format_megabytes;
use pcmanager::optimize::{optimize, protected_set};
use pcmanager::system::collector::Collector;
use pcmanager::system::process::ProcessRecord;
use pcmanager::system::sample::ResourceSample;

use crate::action::{Action, Direction};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    SystemInfo,
    Processes,
    Resources,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::SystemInfo, Tab::Processes, Tab::Resources];

    pub fn next(self) -> Self {
        match self {
            Tab::SystemInfo => Tab::Processes,
            Tab::Processes => Tab::Resources,
            Tab::Resources => Tab::SystemInfo,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::SystemInfo => Tab::Resources,
            Tab::Processes => Tab::SystemInfo,
            Tab::Resources => Tab::Processes,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::SystemInfo => "System Information",
            Tab::Processes => "Process Manager",
            Tab::Resources => "Resource Monitor",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::SystemInfo => 0,
            Tab::Processes => 1,
            Tab::Resources => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub kill: KeyCode,
    pub optimize: KeyCode,
    pub refresh: KeyCode,
    pub next_tab: KeyCode,
    pub prev_tab: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            optimize: parse_key(&kb.optimize).unwrap_or(KeyCode::Char('o')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            next_tab: parse_key(&kb.next_tab).unwrap_or(KeyCode::Tab),
            prev_tab: parse_key(&kb.prev_tab).unwrap_or(KeyCode::BackTab),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Keybinds grouped by where they apply. Labels follow the user's config.
    pub fn help_sections(&self) -> Vec<HelpSection> {
        vec![
            HelpSection {
                title: "Global",
                scope: None,
                entries: vec![
                    (key_label(self.next_tab), "Next tab"),
                    (key_label(self.prev_tab), "Previous tab"),
                    (key_label(self.optimize), "Optimize system"),
                    (key_label(self.help), "Toggle help"),
                    (key_label(self.quit), "Quit"),
                    ("Ctrl+C".to_string(), "Quit (always)"),
                ],
            },
            HelpSection {
                title: Tab::Processes.title(),
                scope: Some(Tab::Processes),
                entries: vec![
                    ("↑↓".to_string(), "Select process"),
                    (key_label(self.kill), "End selected process"),
                    (key_label(self.refresh), "Refresh process list"),
                ],
            },
            HelpSection {
                title: "Dialogs",
                scope: None,
                entries: vec![("Enter/Esc".to_string(), "Dismiss message")],
            },
        ]
    }
}

/// One titled block of the help overlay. `scope` names the tab the keys act
/// on, `None` when they work everywhere.
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: &'static str,
    pub scope: Option<Tab>,
    pub entries: Vec<(String, &'static str)>,
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "S-Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub tab: Tab,
    pub help_open: bool,
    pub system_rows: Vec<(&'static str, String)>,
    pub processes: Vec<ProcessRecord>,
    pub selected: Option<usize>,
    pub latest_sample: Option<ResourceSample>,
    pub cpu_history: VecDeque<u64>,
    cpu_history_capacity: usize,
    pub dialogs: VecDeque<Dialog>,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    protected_names: HashSet<String>,
    target_bytes: u64,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut collector = Collector::new();
        let self_name = if config.optimizer.protect_self {
            collector.self_process_name()
        } else {
            None
        };
        let protected_names = protected_set(config.optimizer.protected_names.clone(), self_name);
        let history_length = config.general.history_length.max(1);

        let mut app = App {
            running: true,
            collector,
            tab: Tab::default(),
            help_open: false,
            system_rows: Vec::new(),
            processes: Vec::new(),
            selected: None,
            latest_sample: None,
            cpu_history: VecDeque::with_capacity(history_length),
            cpu_history_capacity: history_length,
            dialogs: VecDeque::new(),
            theme: Theme::from_config(&config.general.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            protected_names,
            target_bytes: config.optimizer.target_bytes(),
        };
        app.load_system_info();
        app.reload_processes();
        app
    }

    pub fn input_mode(&self) -> InputMode {
        if !self.dialogs.is_empty() {
            InputMode::Dialog
        } else if self.help_open {
            InputMode::Help
        } else {
            InputMode::Normal
        }
    }

    pub fn current_dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    fn push_dialog(&mut self, kind: DialogKind, title: &str, message: String) {
        self.dialogs.push_back(Dialog {
            kind,
            title: title.to_string(),
            message,
        });
    }

    fn load_system_info(&mut self) {
        match self.collector.capture_snapshot() {
            Ok(snapshot) => self.system_rows = snapshot.rows(),
            Err(err) => {
                tracing::warn!(%err, "system snapshot failed");
                self.push_dialog(
                    DialogKind::Error,
                    "Error",
                    format!("Failed to get system information: {err}"),
                );
            }
        }
    }

    /// Re-enumerates and keeps the highlight on the same pid. Only when that
    /// process is gone does the selection fall back to the nearest row.
    pub fn reload_processes(&mut self) {
        let selected_pid = self.selected_process().map(|p| p.pid);
        self.processes = self.collector.list_processes().collect();

        match selected_pid.and_then(|pid| self.processes.iter().position(|p| p.pid == pid)) {
            Some(index) => self.selected = Some(index),
            None => self.clamp_selection(),
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = match (self.selected, self.processes.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => None,
        };
    }

    pub fn on_sample(&mut self, result: Result<ResourceSample, QueryError>) {
        match result {
            Ok(sample) => {
                if self.cpu_history.len() == self.cpu_history_capacity {
                    self.cpu_history.pop_front();
                }
                self.cpu_history
                    .push_back((sample.cpu_percent * 100.0) as u64);
                self.latest_sample = Some(sample);
            }
            Err(err) => {
                let message = format!("Failed to update resource monitor: {err}");
                // A persistent failure stays one dialog instead of one per cycle.
                if self.dialogs.back().is_some_and(|d| d.message == message) {
                    return;
                }
                self.push_dialog(DialogKind::Error, "Error", message);
            }
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode() {
            InputMode::Dialog => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Action::DismissDialog,
                _ => Action::None,
            },
            InputMode::Help => {
                if key.code == self.keybinds.help || key.code == KeyCode::Esc {
                    Action::ToggleHelp
                } else {
                    Action::None
                }
            }
            InputMode::Normal => self.map_key_normal(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Up = code {
            return Action::Navigate(Direction::Up);
        }
        if let KeyCode::Down = code {
            return Action::Navigate(Direction::Down);
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.next_tab {
            return Action::NextTab;
        }
        if code == kb.prev_tab {
            return Action::PrevTab;
        }
        if code == kb.kill {
            return Action::EndSelected;
        }
        if code == kb.optimize {
            return Action::Optimize;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::Navigate(dir) => self.navigate(dir),
            Action::EndSelected => self.end_selected(),
            Action::Optimize => self.optimize_system(),
            Action::Refresh => self.reload_processes(),
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::DismissDialog => {
                self.dialogs.pop_front();
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if self.processes.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.processes.len() - 1;
        self.selected = Some(match (self.selected, direction) {
            (None, _) => 0,
            (Some(i), Direction::Up) => i.saturating_sub(1),
            (Some(i), Direction::Down) => (i + 1).min(last),
        });
    }

    pub fn selected_process(&self) -> Option<&ProcessRecord> {
        self.selected.and_then(|i| self.processes.get(i))
    }

    fn end_selected(&mut self) {
        let Some(index) = self.selected.filter(|&i| i < self.processes.len()) else {
            self.push_dialog(
                DialogKind::Warning,
                "Process Manager",
                "No process selected.".to_string(),
            );
            return;
        };

        let pid = self.processes[index].pid;
        match self.collector.terminate(pid) {
            Ok(()) => {
                self.processes.remove(index);
                self.clamp_selection();
                self.push_dialog(
                    DialogKind::Info,
                    "Process Manager",
                    format!("Process {pid} terminated successfully."),
                );
            }
            Err(err) => {
                self.push_dialog(DialogKind::Error, "Process Manager", err.to_string());
            }
        }
    }

    fn optimize_system(&mut self) {
        let candidates: Vec<ProcessRecord> = self.collector.list_processes().collect();
        let result = optimize(
            &mut self.collector,
            candidates,
            &self.protected_names,
            self.target_bytes,
        );
        self.push_dialog(
            DialogKind::Info,
            "Optimization",
            format!(
                "System optimization completed. {} of memory freed.",
                format_megabytes(result.freed_bytes)
            ),
        );
        self.reload_processes();
    }

    pub fn help_sections(&self) -> Vec<HelpSection> {
        self.keybinds.help_sections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_app(processes: Vec<ProcessRecord>) -> App {
        let mut app = App::new(Config::default());
        app.dialogs.clear();
        app.processes = processes;
        app.selected = None;
        app
    }

    fn press(app: &App, code: KeyCode) -> Action {
        app.map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(Tab::SystemInfo.next(), Tab::Processes);
        assert_eq!(Tab::Resources.next(), Tab::SystemInfo);
        assert_eq!(Tab::SystemInfo.prev(), Tab::Resources);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), i);
        }
    }

    #[test]
    fn startup_populates_tables() {
        let app = App::new(Config::default());
        assert!(!app.processes.is_empty());
        // Either the snapshot rendered or its failure is waiting in a dialog.
        assert!(!app.system_rows.is_empty() || !app.dialogs.is_empty());
    }

    #[test]
    fn default_keybinds() {
        let app = make_test_app(vec![]);
        assert_eq!(press(&app, KeyCode::Char('q')), Action::Quit);
        assert_eq!(press(&app, KeyCode::Char('k')), Action::EndSelected);
        assert_eq!(press(&app, KeyCode::Char('o')), Action::Optimize);
        assert_eq!(press(&app, KeyCode::Char('r')), Action::Refresh);
        assert_eq!(press(&app, KeyCode::Tab), Action::NextTab);
        assert_eq!(press(&app, KeyCode::BackTab), Action::PrevTab);
        assert_eq!(press(&app, KeyCode::Char('?')), Action::ToggleHelp);
        assert_eq!(press(&app, KeyCode::Down), Action::Navigate(Direction::Down));

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
    }

    #[test]
    fn custom_keybind_remap_works() {
        let mut app = make_test_app(vec![]);
        app.keybinds.optimize = KeyCode::Char('O');
        assert_eq!(press(&app, KeyCode::Char('O')), Action::Optimize);
        assert_eq!(press(&app, KeyCode::Char('o')), Action::None);
    }

    #[test]
    fn navigation_selects_first_then_clamps() {
        let mut app = make_test_app(vec![
            ProcessRecord::new(1, "a", 10),
            ProcessRecord::new(2, "b", 20),
        ]);
        app.dispatch(Action::Navigate(Direction::Down));
        assert_eq!(app.selected, Some(0));
        app.dispatch(Action::Navigate(Direction::Down));
        app.dispatch(Action::Navigate(Direction::Down));
        assert_eq!(app.selected, Some(1));
        app.dispatch(Action::Navigate(Direction::Up));
        app.dispatch(Action::Navigate(Direction::Up));
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn refresh_keeps_selection_on_same_pid() {
        let own = std::process::id();
        // Rows above ours that the next enumeration will not report.
        let mut stale: Vec<ProcessRecord> = (0..5)
            .map(|i| ProcessRecord::new(u32::MAX - i, "exited", 10))
            .collect();
        stale.push(ProcessRecord::new(own, "self", 10));

        let mut app = make_test_app(stale);
        app.selected = Some(5);
        app.dispatch(Action::Refresh);

        assert_eq!(app.selected_process().map(|p| p.pid), Some(own));
    }

    #[test]
    fn refresh_clamps_when_selected_pid_is_gone() {
        let mut app = make_test_app(vec![ProcessRecord::new(u32::MAX, "exited", 10)]);
        app.selected = Some(0);
        app.dispatch(Action::Refresh);

        assert!(!app.processes.is_empty());
        assert_eq!(app.selected, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn selection_follows_pid_when_earlier_process_exits() {
        let spawn = || {
            std::process::Command::new("sleep")
                .arg("30")
                .spawn()
                .expect("spawn sleep")
        };
        let first = spawn();
        let second = spawn();
        let (mut earlier, mut kept) = if first.id() < second.id() {
            (first, second)
        } else {
            (second, first)
        };
        let kept_pid = kept.id();

        let mut app = make_test_app(vec![]);
        app.reload_processes();
        app.selected = app.processes.iter().position(|p| p.pid == kept_pid);
        assert!(app.selected.is_some(), "child listed");

        let _ = earlier.kill();
        let _ = earlier.wait();
        app.dispatch(Action::Refresh);
        let selected = app.selected_process().map(|p| p.pid);

        let _ = kept.kill();
        let _ = kept.wait();
        assert_eq!(selected, Some(kept_pid));
    }

    #[test]
    fn end_without_selection_warns() {
        let mut app = make_test_app(vec![ProcessRecord::new(1, "a", 10)]);
        app.dispatch(Action::EndSelected);
        let dialog = app.current_dialog().expect("warning dialog");
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.message, "No process selected.");
        assert_eq!(app.processes.len(), 1);
    }

    #[test]
    fn end_vanished_process_reports_error_and_keeps_row() {
        let mut app = make_test_app(vec![ProcessRecord::new(u32::MAX, "ghost", 10)]);
        app.dispatch(Action::Navigate(Direction::Down));
        app.dispatch(Action::EndSelected);
        let dialog = app.current_dialog().expect("error dialog");
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.message.contains("not found"));
        assert_eq!(app.processes.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn end_live_child_removes_row() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("spawn sleep");
        let pid = child.id();

        let mut app = make_test_app(vec![]);
        app.reload_processes();
        let index = app
            .processes
            .iter()
            .position(|p| p.pid == pid)
            .expect("child listed");
        app.selected = Some(index);
        app.dispatch(Action::EndSelected);

        let dialog = app.current_dialog().expect("info dialog").clone();
        let _ = child.kill();
        let _ = child.wait();

        assert_eq!(dialog.kind, DialogKind::Info);
        assert_eq!(dialog.message, format!("Process {pid} terminated successfully."));
        assert!(app.processes.iter().all(|p| p.pid != pid));
    }

    #[test]
    fn optimize_with_zero_target_reports_and_refreshes() {
        let mut app = make_test_app(vec![]);
        app.target_bytes = 0;
        app.dispatch(Action::Optimize);

        let dialog = app.current_dialog().expect("summary dialog");
        assert_eq!(dialog.kind, DialogKind::Info);
        assert_eq!(
            dialog.message,
            "System optimization completed. 0.00 MB of memory freed."
        );
        assert!(!app.processes.is_empty());
    }

    #[test]
    fn dialogs_queue_and_block_other_keys() {
        let mut app = make_test_app(vec![]);
        app.on_sample(Err(QueryError::Unavailable("memory usage")));
        app.on_sample(Err(QueryError::Unavailable("cpu usage")));
        assert_eq!(app.dialogs.len(), 2);
        assert_eq!(app.input_mode(), InputMode::Dialog);
        assert_eq!(press(&app, KeyCode::Char('q')), Action::None);

        app.dispatch(press(&app, KeyCode::Enter));
        assert!(app.current_dialog().unwrap().message.contains("cpu usage"));
        app.dispatch(press(&app, KeyCode::Esc));
        assert_eq!(app.input_mode(), InputMode::Normal);
    }

    #[test]
    fn repeated_sample_failure_queues_one_dialog() {
        let mut app = make_test_app(vec![]);
        for _ in 0..5 {
            app.on_sample(Err(QueryError::Unavailable("memory usage")));
        }
        assert_eq!(app.dialogs.len(), 1);

        app.on_sample(Err(QueryError::Unavailable("cpu usage")));
        app.on_sample(Err(QueryError::Unavailable("memory usage")));
        assert_eq!(app.dialogs.len(), 3);

        app.dispatch(Action::DismissDialog);
        app.dispatch(Action::DismissDialog);
        app.dispatch(Action::DismissDialog);
        app.on_sample(Err(QueryError::Unavailable("memory usage")));
        assert_eq!(app.dialogs.len(), 1);
    }

    #[test]
    fn help_sections_follow_custom_keybinds() {
        let mut app = make_test_app(vec![]);
        app.keybinds.kill = KeyCode::Delete;
        let sections = app.help_sections();

        let processes = sections
            .iter()
            .find(|s| s.scope == Some(Tab::Processes))
            .expect("process section");
        assert!(
            processes
                .entries
                .contains(&("Del".to_string(), "End selected process"))
        );
        assert!(sections.iter().any(|s| s.title == "Global" && s.scope.is_none()));
    }

    #[test]
    fn samples_feed_bounded_history() {
        let mut app = make_test_app(vec![]);
        app.cpu_history_capacity = 3;
        for cpu in [10.0, 20.0, 30.0, 40.0] {
            app.on_sample(Ok(ResourceSample {
                cpu_percent: cpu,
                memory_percent: 50.0,
            }));
        }
        assert_eq!(app.cpu_history, VecDeque::from(vec![2000, 3000, 4000]));
        assert_eq!(app.latest_sample.unwrap().cpu_percent, 40.0);
        assert!(app.dialogs.is_empty());
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = make_test_app(vec![]);
        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode(), InputMode::Help);
        assert_eq!(press(&app, KeyCode::Char('o')), Action::None);
        assert_eq!(press(&app, KeyCode::Esc), Action::ToggleHelp);
        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode(), InputMode::Normal);
    }
}
