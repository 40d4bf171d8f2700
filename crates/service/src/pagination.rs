//! Offset/limit window applied to list results after filtering and sorting.

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// leading results to skip
    pub offset: usize,
    /// maximum results to return after the offset; `None` for all
    pub limit: Option<usize>,
}

impl Pagination {
    /// A zero limit is rejected rather than returning an empty page.
    pub fn validate(self) -> Result<(), ServiceError> {
        if self.limit == Some(0) {
            return Err(ServiceError::invalid("limit", "limit must be at least 1"));
        }
        Ok(())
    }

    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        let rest = items.into_iter().skip(self.offset);
        match self.limit {
            Some(n) => rest.take(n).collect(),
            None => rest.collect(),
        }
    }
}
