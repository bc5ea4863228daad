use thiserror::Error;

/// Structural problems found while assembling a network. These are fatal for
/// the caller: there is no partially built network to fall back to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("no source node found")]
    MissingSource,
    #[error("no sink node found")]
    MissingSink,
    #[error("multiple source nodes found: '{0}' and '{1}'")]
    MultipleSources(String, String),
    #[error("multiple sink nodes found: '{0}' and '{1}'")]
    MultipleSinks(String, String),
    #[error("invalid node type '{kind}' for node '{node}'")]
    UnknownNodeKind { node: String, kind: String },
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),
    #[error("duplicate edge id '{0}'")]
    DuplicateEdge(String),
    #[error("duplicate path id '{0}'")]
    DuplicatePath(String),
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownNode { edge: String, node: String },
    #[error("edge '{edge}' has invalid capacity {capacity}")]
    InvalidCapacity { edge: String, capacity: f64 },
    #[error("path '{path}' references unknown edge '{edge}'")]
    UnknownEdge { path: String, edge: String },
    #[error("path '{0}' has no edges")]
    EmptyPath(String),
    #[error("path '{path}' is not connected between '{prev}' and '{next}'")]
    BrokenPath {
        path: String,
        prev: String,
        next: String,
    },
    #[error("path '{path}' visits node '{node}' more than once")]
    NonSimplePath { path: String, node: String },
    #[error("path '{0}' does not run from source to sink")]
    PathEndpoints(String),
    #[error("no paths found from source to sink - network is disconnected")]
    Disconnected,
    #[error("max_paths must be at least 1")]
    ZeroPathLimit,
    #[error("no paths found within the enumeration limits (max_length {max_length:?}, max_paths {max_paths:?})")]
    NoPathsWithinLimits {
        max_length: Option<usize>,
        max_paths: Option<usize>,
    },
}

/// Rejections of runtime control requests. Returned as values; the network
/// is left untouched whenever one of these comes back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("Path {0} not found")]
    PathNotFound(String),
    #[error("Edge {edge} not found. Available: {available}")]
    EdgeNotFound { edge: String, available: String },
    #[error("Invalid flow amount {0} for path {1}")]
    InvalidAmount(f64, String),
    #[error("Cannot update flow: flow on path {path} would become negative: {resulting:.2}")]
    NegativeFlow { path: String, resulting: f64 },
    #[error("Cannot update flow: path {path} blocked at edge {edge}")]
    PathBlocked { path: String, edge: String },
    #[error(
        "Cannot update flow: flow increase of {delta:.2} would exceed capacity by {excess:.2} at edge {edge}"
    )]
    CapacityExceeded {
        path: String,
        delta: f64,
        excess: f64,
        edge: String,
    },
    #[error("Edge {0} is already disabled")]
    EdgeAlreadyDisabled(String),
    #[error("Edge {0} is already enabled")]
    EdgeAlreadyEnabled(String),
    #[error("No paths available")]
    NoPaths,
    #[error("Partially successful: {updated}/{total} paths updated")]
    PartialDistribution { updated: usize, total: usize },
}

pub type ControlResult<T = String> = Result<T, ControlError>;
