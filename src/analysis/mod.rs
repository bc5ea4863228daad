pub mod enumerator;
pub mod maxflow;
pub mod report;
