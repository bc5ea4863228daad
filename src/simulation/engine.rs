use crate::config::SimulationConfig;
use crate::control::controller::FlowController;
use crate::graph::network::NetworkState;
use crate::simulation::disturbance::{Disturbance, EdgeEvent, RandomDisturbance};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimestepReport {
    pub turn: usize,
    pub failed_edges: Vec<String>,
    pub restored_edges: Vec<String>,
    pub adjusted_edges: usize,
    /// paths zeroed by the automatic failure sweep
    pub zeroed_paths: Vec<String>,
    /// paths lowered to a bottleneck that shrank this turn
    pub clamped_paths: Vec<String>,
    pub throughput: f64,
}

/// Drives simulated time over one controller and the network it owns.
pub struct SimulationEngine {
    controller: FlowController,
    disturbance: Box<dyn Disturbance>,
    turn: usize,
    auto_handle_failures: bool,
    last_report: Option<TimestepReport>,
}

impl SimulationEngine {
    pub fn new(
        controller: FlowController,
        disturbance: Box<dyn Disturbance>,
        auto_handle_failures: bool,
    ) -> Self {
        Self {
            controller,
            disturbance,
            turn: 0,
            auto_handle_failures,
            last_report: None,
        }
    }

    pub fn from_config(network: NetworkState, config: &SimulationConfig) -> Self {
        Self::new(
            FlowController::new(network),
            Box::new(RandomDisturbance::from_config(config)),
            config.auto_handle_failures,
        )
    }

    pub fn controller(&self) -> &FlowController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FlowController {
        &mut self.controller
    }

    pub fn network(&self) -> &NetworkState {
        self.controller.network()
    }

    pub fn disturbance(&self) -> &dyn Disturbance {
        self.disturbance.as_ref()
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn last_report(&self) -> Option<&TimestepReport> {
        self.last_report.as_ref()
    }

    pub fn advance_timestep(&mut self) -> TimestepReport {
        self.turn += 1;
        let events = self.disturbance.events(self.turn, self.controller.network());
        let mut report = TimestepReport {
            turn: self.turn,
            ..TimestepReport::default()
        };

        let network = self.controller.network_mut();
        for (id, event) in events {
            let edge = network.edge_by_id_mut(id);
            match event {
                EdgeEvent::Fail if !edge.is_failed() => {
                    edge.fail();
                    report.failed_edges.push(edge.name().to_string());
                }
                EdgeEvent::Restore if edge.is_failed() && !edge.is_disabled() => {
                    edge.restore();
                    report.restored_edges.push(edge.name().to_string());
                }
                EdgeEvent::SetCapacity(capacity) if !edge.is_failed() => {
                    edge.set_capacity(capacity);
                    report.adjusted_edges += 1;
                }
                _ => {}
            }
        }

        if self.auto_handle_failures {
            let (_, zeroed) = self.controller.handle_failed_edges();
            report.zeroed_paths = zeroed;
            report.clamped_paths = self.controller.clamp_to_bottlenecks();
        }

        let network = self.controller.network_mut();
        report.throughput = network.calculate_total_throughput();
        network.record_throughput(report.throughput);

        if !report.failed_edges.is_empty() {
            warn!(
                turn = report.turn,
                edges = ?report.failed_edges,
                "edges failed"
            );
        }
        debug!(
            turn = report.turn,
            restored = report.restored_edges.len(),
            adjusted = report.adjusted_edges,
            throughput = report.throughput,
            "timestep advanced"
        );
        self.last_report = Some(report.clone());
        report
    }
}
