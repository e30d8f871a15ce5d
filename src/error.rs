use crate::graph::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node {0} does not exist in this mind map")]
    UnknownNode(NodeId),
    #[error("node {0} cannot be its own parent")]
    SelfLoop(NodeId),
    #[error("linking {parent} -> {child} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },
    #[error("no node ids left to allocate")]
    IdsExhausted,
    #[error("mind map contains a parent/child cycle; layout refused")]
    CycleDetected,
    #[error("invalid mind map document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
