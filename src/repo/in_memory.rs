use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;

use super::{Error, Repo, Result};
use crate::object::{Id, Kind};

/// A `Repo` that keeps every object in memory.
///
/// It may be shared between threads. Reads take a shared lock;
/// only `put` takes the exclusive lock.
#[derive(Debug, Default)]
pub struct InMemoryRepo {
    objects: RwLock<HashMap<Id, (Kind, Arc<[u8]>)>>,
}

impl InMemoryRepo {
    pub fn new() -> InMemoryRepo {
        InMemoryRepo::default()
    }

    /// Returns the number of objects stored.
    pub fn len(&self) -> Result<usize> {
        let objects = self.objects.read().map_err(|_| Error::Poisoned)?;
        Ok(objects.len())
    }

    /// Returns true if no objects are stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Repo for InMemoryRepo {
    fn get_raw(&self, id: &Id) -> Result<(Kind, Arc<[u8]>)> {
        let objects = self.objects.read().map_err(|_| Error::Poisoned)?;

        match objects.get(id) {
            Some((kind, data)) => Ok((*kind, data.clone())),
            None => Err(Error::ObjectNotFound(*id)),
        }
    }

    fn put(&self, kind: Kind, data: &[u8]) -> Result<Id> {
        let id = Id::for_object(kind, data);

        let mut objects = self.objects.write().map_err(|_| Error::Poisoned)?;
        if !objects.contains_key(&id) {
            objects.insert(id, (kind, data.into()));
            debug!("stored {} {} ({} bytes)", kind, id, data.len());
        }

        Ok(id)
    }
}
