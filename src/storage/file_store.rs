// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed document store.
//!
//! Each document is a pretty-printed JSON file under
//! `{root}/{collection}/{id}.json`. Writes go to a temp file first and are
//! renamed into place, so readers never observe a half-written document.
//! Mutations are serialized by a store-wide write lock; reads are lock-free.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

use super::document::validate_id;
use super::{
    Collection, Document, DocumentStore, StorageError, StoragePaths, StorageResult, UpdateFn,
};

/// Document store persisting JSON files on the local filesystem.
#[derive(Debug)]
pub struct FileStore {
    paths: StoragePaths,
    initialized: bool,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a new FileStore.
    ///
    /// Does NOT initialize the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Create one directory per collection. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        for collection in Collection::ALL {
            fs::create_dir_all(self.paths.collection_dir(collection))?;
        }

        self.initialized = true;
        Ok(())
    }

    fn ensure_initialized(&self) -> StorageResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StorageError::NotInitialized)
        }
    }

    fn read_document(&self, path: &Path) -> StorageResult<Option<Document>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Write a JSON file (atomic write via rename).
    fn write_document<T: Serialize>(&self, path: &Path, value: &T) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Document ids in a collection, sorted ascending.
    fn list_ids(&self, collection: Collection) -> StorageResult<Vec<String>> {
        let dir = self.paths.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl DocumentStore for FileStore {
    fn find(&self, collection: Collection, id: &str) -> StorageResult<Option<Document>> {
        self.ensure_initialized()?;
        if validate_id(id).is_err() {
            return Ok(None);
        }
        self.read_document(&self.paths.document(collection, id))
    }

    fn insert(&self, collection: Collection, id: &str, document: Document) -> StorageResult<()> {
        self.ensure_initialized()?;
        validate_id(id)?;

        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let path = self.paths.document(collection, id);
        if path.exists() {
            return Err(StorageError::AlreadyExists {
                collection,
                id: id.to_string(),
            });
        }
        self.write_document(&path, &document)
    }

    fn update(
        &self,
        collection: Collection,
        id: &str,
        apply: &mut UpdateFn<'_>,
    ) -> StorageResult<Option<Document>> {
        self.ensure_initialized()?;
        validate_id(id)?;

        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let path = self.paths.document(collection, id);
        let current = self.read_document(&path)?;

        match apply(current.clone())? {
            Some(next) => {
                self.write_document(&path, &next)?;
                Ok(Some(next))
            }
            None => Ok(current),
        }
    }

    fn scan(&self, collection: Collection) -> StorageResult<Vec<Document>> {
        self.ensure_initialized()?;

        let mut documents = Vec::new();
        for id in self.list_ids(collection)? {
            // A document removed between listing and reading is skipped.
            if let Some(doc) = self.read_document(&self.paths.document(collection, &id))? {
                documents.push(doc);
            }
        }
        Ok(documents)
    }

    fn count(&self, collection: Collection) -> StorageResult<usize> {
        self.ensure_initialized()?;
        Ok(self.list_ids(collection)?.len())
    }

    /// Write-read-delete probe of the data directory.
    fn health_check(&self) -> StorageResult<()> {
        self.ensure_initialized()?;

        let probe = self.paths.health_probe(&Uuid::new_v4().simple().to_string());
        let data = b"health_check_data";

        fs::write(&probe, data)?;
        let read_back = fs::read(&probe)?;
        fs::remove_file(&probe)?;

        if read_back != data {
            return Err(StorageError::IntegrityViolation(
                "Health check data mismatch".to_string(),
            ));
        }
        Ok(())
    }
}
