//! Split a slice range into cluster tasks, one parameter file per task.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{paths, ReconError, ReconSettings};

/// Name of the chunk summary written next to the chunk files.
pub const CHUNK_LIST: &str = "chunklist.txt";
/// Copy of the settings every chunk was derived from.
pub const SETTINGS_USED: &str = "settings_used.xml";

/// One contiguous run of slices, reconstructed by a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Zero based chunk index.
    pub index: u32,
    /// One based task number used by the queue.
    pub task: u32,
    pub start: i32,
    /// Last slice, inclusive.
    pub end: i32,
}

impl Chunk {
    /// Number of slices in the chunk.
    pub fn len(&self) -> i64 {
        1 + i64::from(self.end) - i64::from(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    /// Parameter file of this task, `chunk_<task>.xml`.
    pub fn file_name(&self) -> String {
        format!("chunk_{:03}.xml", self.task)
    }

    /// Log file of this task inside `dir`.
    pub fn log_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("log_{:03}.xml", self.task))
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chunk {} sge-task {} start {} end {} num {}",
            self.index,
            self.task,
            self.start,
            self.end,
            self.len()
        )
    }
}

/// Slices `first..last` divided into equally sized chunks; the last chunk
/// absorbs the remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    first: i32,
    last: i32,
    step: i32,
    chunks: Vec<Chunk>,
}

impl ChunkPlan {
    pub fn new(first: i32, last: i32, count: u32) -> Result<Self, ReconError> {
        let invalid = || ReconError::InvalidChunkPlan {
            first,
            last,
            chunks: count,
        };
        if count == 0 || last <= first {
            return Err(invalid());
        }
        let span = i64::from(last) - i64::from(first);
        let size = span / i64::from(count);
        if size == 0 {
            return Err(invalid());
        }
        let mut chunks = Vec::with_capacity(count as usize);
        for index in 0..count {
            let start = i64::from(first) + i64::from(index) * size;
            let end = if index + 1 == count {
                i64::from(last) - 1
            } else {
                start + size - 1
            };
            chunks.push(Chunk {
                index,
                task: index + 1,
                start: i32::try_from(start).map_err(|_| invalid())?,
                end: i32::try_from(end).map_err(|_| invalid())?,
            });
        }
        debug!(first, last, count, size, "planned chunks");
        Ok(Self {
            first,
            last,
            step: 1,
            chunks,
        })
    }

    /// Slice step written to every chunk (default 1).
    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step;
        self
    }

    pub fn first(&self) -> i32 {
        self.first
    }

    pub fn last(&self) -> i32 {
        self.last
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Summary lines, one per chunk.
    pub fn chunk_list(&self) -> String {
        let mut text = String::new();
        for chunk in &self.chunks {
            text.push_str(&chunk.to_string());
            text.push('\n');
        }
        text
    }

    /// Restrict `settings` to `chunk` and point its log file into `dir`.
    pub fn apply(&self, settings: &mut ReconSettings, chunk: &Chunk, dir: &Path) -> Result<(), ReconError> {
        let document = settings.document_mut();
        document.set(paths::INPUT_FILE_FIRST, &chunk.start.to_string())?;
        document.set(paths::INPUT_FILE_LAST, &chunk.end.to_string())?;
        document.set(paths::INPUT_FILE_STEP, &self.step.to_string())?;
        document.set(paths::LOG_FILE, &chunk.log_file(dir).to_string_lossy())?;
        Ok(())
    }

    /// Write `settings_used.xml`, one `chunk_<task>.xml` per chunk and the
    /// chunk list into `dir`. Returns the chunk files in task order.
    pub fn write(&self, settings: &ReconSettings, dir: &Path) -> Result<Vec<PathBuf>, ReconError> {
        fs::create_dir_all(dir).map_err(|err| ReconError::io(dir, err))?;
        settings.save(dir.join(SETTINGS_USED))?;

        let mut files = Vec::with_capacity(self.chunks.len());
        let mut chunk_settings = settings.clone();
        for chunk in &self.chunks {
            self.apply(&mut chunk_settings, chunk, dir)?;
            let path = dir.join(chunk.file_name());
            chunk_settings.save(&path)?;
            debug!(%chunk, "wrote chunk");
            files.push(path);
        }

        let list = dir.join(CHUNK_LIST);
        fs::write(&list, self.chunk_list()).map_err(|err| ReconError::io(&list, err))?;
        info!(dir = %dir.display(), chunks = files.len(), "wrote chunk files");
        Ok(files)
    }
}

impl IntoIterator for ChunkPlan {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChunkPlan {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Split slices `first..last` into `count` chunks.
pub fn plan_chunks(first: i32, last: i32, count: u32) -> Result<ChunkPlan, ReconError> {
    ChunkPlan::new(first, last, count)
}
