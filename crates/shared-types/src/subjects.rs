//! Subject naming for capability request/reply.

use crate::entities::Resource;
use std::fmt;

/// Capability operations served for every resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Find,
    Set,
    Del,
}

impl Operation {
    pub const ALL: [Operation; 4] = [Operation::Get, Operation::Find, Operation::Set, Operation::Del];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Find => "find",
            Operation::Set => "set",
            Operation::Del => "del",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed subjects for one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subjects {
    kind: &'static str,
}

impl Subjects {
    pub fn of<R: Resource>() -> Self {
        Self { kind: R::KIND }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn subject(&self, op: Operation) -> String {
        format!("{}.{}", self.kind, op)
    }
}
