use std::cell::RefCell;

use site_types::{decode_transcript, encode_transcript, TranscriptEntry};
use web_sys::Storage;

use crate::error::StorageError;

/// Tab-scoped slot holding the serialized transcript
pub trait TranscriptStore {
    fn get(&self) -> Result<Option<String>, StorageError>;
    fn set(&self, value: &str) -> Result<(), StorageError>;
    fn remove(&self) -> Result<(), StorageError>;

    fn load(&self) -> Result<Option<Vec<TranscriptEntry>>, StorageError> {
        match self.get()? {
            Some(raw) => Ok(Some(decode_transcript(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, entries: &[TranscriptEntry]) -> Result<(), StorageError> {
        self.set(&encode_transcript(entries)?)
    }
}

/// `window.sessionStorage` under a fixed key
#[derive(Debug, Clone)]
pub struct SessionTranscriptStore {
    key: String,
}

impl SessionTranscriptStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.session_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable("no sessionStorage on window".to_string()))
    }
}

impl TranscriptStore for SessionTranscriptStore {
    fn get(&self) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

/// In-memory slot, used when the browser refuses `sessionStorage`
#[derive(Debug, Default)]
pub struct MemoryTranscriptStore {
    value: RefCell<Option<String>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }
}

impl TranscriptStore for MemoryTranscriptStore {
    fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.borrow().clone())
    }

    fn set(&self, value: &str) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.value.borrow_mut().take();
        Ok(())
    }
}

impl<T: TranscriptStore + ?Sized> TranscriptStore for std::rc::Rc<T> {
    fn get(&self) -> Result<Option<String>, StorageError> {
        (**self).get()
    }

    fn set(&self, value: &str) -> Result<(), StorageError> {
        (**self).set(value)
    }

    fn remove(&self) -> Result<(), StorageError> {
        (**self).remove()
    }
}

/// Pick `sessionStorage` when the browser grants it
pub fn session_or_memory(key: &str) -> Box<dyn TranscriptStore> {
    let session = SessionTranscriptStore::new(key);
    match session.storage() {
        Ok(_) => Box::new(session),
        Err(e) => {
            log::warn!("{e}; chat history will not survive a reload");
            Box::new(MemoryTranscriptStore::new())
        }
    }
}

impl TranscriptStore for Box<dyn TranscriptStore> {
    fn get(&self) -> Result<Option<String>, StorageError> {
        (**self).get()
    }

    fn set(&self, value: &str) -> Result<(), StorageError> {
        (**self).set(value)
    }

    fn remove(&self) -> Result<(), StorageError> {
        (**self).remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_transcript() {
        let store = MemoryTranscriptStore::new();
        assert!(store.load().unwrap().is_none());

        let entries = vec![TranscriptEntry::user("hi"), TranscriptEntry::bot("<p>hey</p>")];
        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), Some(entries));

        store.remove().unwrap();
        store.remove().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn malformed_value_is_reported() {
        let store = MemoryTranscriptStore::with_value("{not json");
        assert!(matches!(store.load(), Err(StorageError::Malformed(_))));
    }
}
