use std::fmt;

use crate::io::store::TransportError;
use crate::model::{Item, ItemId};

/// Correlates a completion with the request that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A remote call the view state wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    List,
    Create { title: String, completed: bool },
    Update(Item),
    Delete(ItemId),
}

impl Op {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Op::List => "list",
            Op::Create { .. } => "create",
            Op::Update(_) => "update",
            Op::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub op: Op,
}

/// What a successful call returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Items(Vec<Item>),
    Created(Item),
    Updated(Option<Item>),
    Deleted,
}

/// A settled request. Every issued request yields exactly one.
#[derive(Debug)]
pub struct Completion {
    pub request: RequestId,
    pub result: Result<Reply, TransportError>,
}

impl Completion {
    pub fn ok(request: RequestId, reply: Reply) -> Self {
        Completion {
            request,
            result: Ok(reply),
        }
    }

    pub fn err(request: RequestId, error: TransportError) -> Self {
        Completion {
            request,
            result: Err(error),
        }
    }
}
