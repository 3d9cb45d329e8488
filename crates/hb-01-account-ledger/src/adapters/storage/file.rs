use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File header: magic bytes followed by a format version.
const MAGIC: &[u8; 4] = b"HBKV";
const FORMAT_VERSION: u8 = 1;

/// File-backed key-value store for deployments without RocksDB.
///
/// The whole key space is kept in memory and rewritten to disk on every
/// mutation (temp file + fsync + rename). A failed write leaves both the
/// file and the in-memory view unchanged.
///
/// Layout: `HBKV` `version:u8` then `[key_len:u32][key][value_len:u32][value]...`
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, creating an empty one if the file is missing.
    ///
    /// A truncated or foreign file is reported as `CorruptionError`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = decode(&bytes)?;
                tracing::info!(
                    path = %path.display(),
                    bytes = bytes.len(),
                    keys = data.len(),
                    "Loaded storage file"
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No existing storage file, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        Ok(Self { data, path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, next: BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let bytes = encode(&next);
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        self.data = next;
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        next.insert(key.to_vec(), value.to_vec());
        self.commit(next)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        for BatchOperation::Put { key, value } in operations {
            next.insert(key, value);
        }
        self.commit(next)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn count_prefix(&self, prefix: &[u8]) -> Result<usize, KVStoreError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .count())
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn corruption(message: impl Into<String>) -> KVStoreError {
    KVStoreError::CorruptionError {
        message: message.into(),
    }
}

fn encode(data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(5 + data.len() * 64);
    bytes.extend_from_slice(MAGIC);
    bytes.push(FORMAT_VERSION);
    for (key, value) in data {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }
    bytes
}

fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
    let mut data = BTreeMap::new();
    if bytes.is_empty() {
        return Ok(data);
    }
    if bytes.len() < 5 || &bytes[..4] != MAGIC {
        return Err(corruption("missing storage file header"));
    }
    if bytes[4] != FORMAT_VERSION {
        return Err(corruption(format!(
            "unsupported storage format version {}",
            bytes[4]
        )));
    }

    let mut cursor = 5;
    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }
    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let len_end = *cursor + 4;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| corruption(format!("truncated length at offset {}", cursor)))?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let chunk = bytes
        .get(len_end..len_end + len)
        .ok_or_else(|| corruption(format!("truncated record at offset {}", len_end)))?;
    *cursor = len_end + len;
    Ok(chunk.to_vec())
}
