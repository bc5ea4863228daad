pub mod edge_state;
pub mod path_state;
pub mod snapshot;
