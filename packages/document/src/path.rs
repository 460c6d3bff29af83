//! # Path Codec
//!
//! Addresses any slot of a layout tree as an ordered list of steps.
//!
//! ```text
//! /blocks/1/tabs/0/blocks/2
//!  └─┬──┘ │ └┬─┘ │ └─┬──┘ │
//!  field idx field idx field idx
//! ```
//!
//! A segment is an index if and only if it is a non-negative decimal
//! literal without leading zeros (`"0"` is the only literal that may start
//! with `0`). Everything else is a field name. There is no percent-decoding:
//! paths are not URLs.
//!
//! Paths are values. They are not stable across structural edits of their
//! ancestors, so callers re-resolve or use the path returned by a mutation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;

/// One addressing step
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Enter an object by key
    Field(String),
    /// Enter an ordered list by position
    Index(usize),
}

impl Step {
    pub fn field(name: impl Into<String>) -> Self {
        Step::Field(name.into())
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Step::Index(i) => Some(*i),
            Step::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&str> {
        match self {
            Step::Field(name) => Some(name),
            Step::Index(_) => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => f.write_str(name),
            Step::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<usize> for Step {
    fn from(i: usize) -> Self {
        Step::Index(i)
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::Field(name.to_string())
    }
}

/// Address of a node or value inside a tree. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// `/blocks/<index>`, the address of a top-level block
    pub fn block(index: usize) -> Self {
        Self::root().field("blocks").index(index)
    }

    /// Builder-style: append a field step
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Field(name.into()));
        self
    }

    /// Builder-style: append an index step
    pub fn index(mut self, index: usize) -> Self {
        self.steps.push(Step::Index(index));
        self
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Path with the final step removed. `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.steps.is_empty() {
            return None;
        }
        Some(Path::from_steps(self.steps[..self.steps.len() - 1].to_vec()))
    }

    /// Same parent list, different index. `None` unless the last step is an index.
    pub fn with_last_index(&self, index: usize) -> Option<Path> {
        match self.steps.last() {
            Some(Step::Index(_)) => {
                let mut steps = self.steps.clone();
                let last = steps.len() - 1;
                steps[last] = Step::Index(index);
                Some(Path::from_steps(steps))
            }
            _ => None,
        }
    }

    pub fn last_index(&self) -> Option<usize> {
        self.steps.last().and_then(Step::as_index)
    }

    /// True when `decode(encode(self)) == self`: field names must be
    /// non-empty, free of `/`, and must not read as an index literal.
    pub fn is_well_formed(&self) -> bool {
        self.steps.iter().all(|step| match step {
            Step::Index(_) => true,
            Step::Field(name) => {
                !name.is_empty()
                    && !name.contains('/')
                    && !matches!(classify_segment("", name), Ok(Step::Index(_)) | Err(_))
            }
        })
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.steps.starts_with(&prefix.steps)
    }

    /// Canonical text form: `/` + steps joined by `/`. The root encodes as `/`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse the canonical text form.
    pub fn decode(input: &str) -> Result<Path, PathError> {
        let rest = input.strip_prefix('/').ok_or_else(|| PathError::Malformed {
            input: input.to_string(),
            reason: "path must start with '/'".to_string(),
        })?;

        if rest.is_empty() {
            return Ok(Path::root());
        }

        let mut steps = Vec::new();
        for segment in rest.split('/') {
            steps.push(classify_segment(input, segment)?);
        }

        Ok(Path { steps })
    }
}

fn classify_segment(input: &str, segment: &str) -> Result<Step, PathError> {
    if segment.is_empty() {
        return Err(PathError::Malformed {
            input: input.to_string(),
            reason: "empty segment".to_string(),
        });
    }

    let is_index_literal = segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));

    if !is_index_literal {
        return Ok(Step::Field(segment.to_string()));
    }

    segment
        .parse::<usize>()
        .map(Step::Index)
        .map_err(|_| PathError::Malformed {
            input: input.to_string(),
            reason: format!("index '{}' is out of range", segment),
        })
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }
        for step in &self.steps {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::decode(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Path::decode(&raw).map_err(serde::de::Error::custom)
    }
}
