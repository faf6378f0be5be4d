use bytesize::ByteSize;
use std::{
    fmt::{Display, Formatter},
    ops::Deref,
    str::FromStr,
};
use utoipa::{IntoParams, ToSchema};

/// A byte size which parses and renders in binary units (e.g. `256 KiB`).
#[derive(
    Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Default, serde::Serialize,
    serde::Deserialize,
)]
pub struct BinaryByteSize(pub ByteSize);

impl Deref for BinaryByteSize {
    type Target = ByteSize;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ByteSize> for BinaryByteSize {
    fn from(value: ByteSize) -> Self {
        Self(value)
    }
}

impl From<usize> for BinaryByteSize {
    fn from(value: usize) -> Self {
        Self(ByteSize(value as u64))
    }
}

impl Display for BinaryByteSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_as(true))
    }
}

impl FromStr for BinaryByteSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ByteSize::from_str(s).map(Self)
    }
}

#[derive(
    IntoParams, ToSchema, Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Paginated {
    /// The first item to return, skipping all that come before it.
    ///
    /// NOTE: The order of items is defined by the API being called.
    #[serde(default)]
    pub offset: u64,

    /// The maximum number of entries to return.
    ///
    /// Zero means: no limit
    #[serde(default = "default::limit")]
    pub limit: u64,
}

mod default {
    pub(super) const fn limit() -> u64 {
        25
    }
}

impl Default for Paginated {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default::limit(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct PaginatedResults<R> {
    pub items: Vec<R>,
    /// The total number of items, disregarding pagination
    pub total: u64,
}

impl<R> PaginatedResults<R> {
    pub fn map<O, F: Fn(R) -> O>(self, f: F) -> PaginatedResults<O> {
        PaginatedResults {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paginated_defaults() {
        let paginated: Paginated = serde_json::from_str("{}").expect("must parse");
        assert_eq!(paginated.offset, 0);
        assert_eq!(paginated.limit, 25);
    }
}
