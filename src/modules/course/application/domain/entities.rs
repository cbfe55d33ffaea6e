use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(i64);

impl CourseId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CourseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<CourseId> for i64 {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
