use std::sync::Arc;

use super::{Id, Kind};

/// A git blob: uninterpreted file content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Blob {
    id: Id,
    data: Arc<[u8]>,
}

impl Blob {
    /// Creates a blob from its content, computing its ID.
    pub fn new<T: Into<Arc<[u8]>>>(data: T) -> Blob {
        let data = data.into();
        Blob {
            id: Id::for_object(Kind::Blob, &data),
            data,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the size (in bytes) of the blob.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
