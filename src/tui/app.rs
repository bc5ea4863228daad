use flowgraph::control::controller::FlowController;
use flowgraph::simulation::engine::SimulationEngine;
use flowgraph::state::snapshot::NetworkSnapshot;

const FLOW_STEP: f64 = 1.0;

pub struct App {
    pub engine: SimulationEngine,
    pub scenario: String,
    pub running: bool,
    selected: usize,
    message: String,
    snapshot: NetworkSnapshot,
}

impl App {
    pub fn new(mut engine: SimulationEngine, scenario: String) -> Self {
        let snapshot = engine.controller_mut().get_complete_network_state();
        Self {
            engine,
            scenario,
            running: true,
            selected: 0,
            message: "space: step  ↑/↓: select  +/-: flow  s: saturate  x: toggle bottleneck  c: clear  h: handle failures  q: quit".to_string(),
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &NetworkSnapshot {
        &self.snapshot
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_path(&self) -> Option<String> {
        self.engine
            .network()
            .paths()
            .get(self.selected)
            .map(|p| p.name().to_string())
    }

    pub fn select_next(&mut self) {
        let count = self.engine.network().paths().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.engine.network().paths().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn step(&mut self) {
        let report = self.engine.advance_timestep();
        self.message = format!(
            "Turn {}: throughput {:.1}, failed [{}], restored [{}]",
            report.turn,
            report.throughput,
            report.failed_edges.join(", "),
            report.restored_edges.join(", ")
        );
        if !report.clamped_paths.is_empty() {
            self.message.push_str(&format!(", clamped [{}]", report.clamped_paths.join(", ")));
        }
        self.refresh();
    }

    pub fn adjust_flow(&mut self, up: bool) {
        let delta = if up { FLOW_STEP } else { -FLOW_STEP };
        self.with_selected(|controller, path| match controller.update_path_flow(path, delta) {
            Ok(message) => message,
            Err(err) => err.to_string(),
        });
    }

    pub fn saturate(&mut self) {
        self.with_selected(|controller, path| controller.saturate_path_flow(path).message);
    }

    /// Disables the selected path's bottleneck edge, or re-enables it if it
    /// is already down.
    pub fn toggle_bottleneck(&mut self) {
        self.with_selected(|controller, path| {
            let edge = match controller.calculate_max_safe_flow(path) {
                Ok(safe) => safe.bottleneck_edge,
                Err(err) => return err.to_string(),
            };
            let failed = controller
                .network()
                .edge(&edge)
                .is_some_and(|e| e.is_failed());
            let result = if failed {
                controller.enable_edge(&edge)
            } else {
                controller.disable_edge(&edge)
            };
            result.unwrap_or_else(|err| err.to_string())
        });
    }

    pub fn clear(&mut self) {
        self.engine.controller_mut().clear_all_flows();
        self.message = "All path flows cleared".to_string();
        self.refresh();
    }

    pub fn handle_failures(&mut self) {
        let (count, paths) = self.engine.controller_mut().handle_failed_edges();
        self.message = if count == 0 {
            "No flowing path crosses a failed edge".to_string()
        } else {
            format!("Zeroed {} path(s): {}", count, paths.join(", "))
        };
        self.refresh();
    }

    fn with_selected(&mut self, action: impl FnOnce(&mut FlowController, &str) -> String) {
        if let Some(path) = self.selected_path() {
            self.message = action(self.engine.controller_mut(), &path);
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.snapshot = self.engine.controller_mut().get_complete_network_state();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
