use std::{
    fmt,
    fs::File,
    io::{self, Seek, SeekFrom, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Shared handle to a writable destination.
///
/// A file logger holds a clone of the handle and never owns the destination: dropping or
/// destroying the logger leaves the destination open for every other clone.
#[derive(Clone)]
pub struct FileHandle {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl FileHandle {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Opens `path` for appending, creating it if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let mut file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.seek(SeekFrom::End(0))?;
        Ok(Self::new(file))
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Whether both handles point at the same destination.
    pub fn ptr_eq(&self, other: &FileHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    fn lock(&self) -> MutexGuard<'_, dyn Write + Send + 'static> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(bytes)?;
        writer.flush()
    }

    /// Writes `line` between `prefix` and `suffix` without releasing the destination.
    pub(crate) fn write_wrapped(&self, prefix: &str, line: &str, suffix: &str) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(prefix.as_bytes())?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(suffix.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("refs", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

/// In-memory destination whose clones share one buffer. Handy for capturing output.
#[derive(Clone, Default, Debug)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap_or_else(PoisonError::into_inner))
            .into_owned()
    }

    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock().unwrap_or_else(PoisonError::into_inner));
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_file_handle_shares_destination() {
    let buffer = SharedBuffer::new();
    let handle = FileHandle::new(buffer.clone());
    let clone = handle.clone();
    assert!(handle.ptr_eq(&clone));
    assert!(!handle.ptr_eq(&FileHandle::new(SharedBuffer::new())));
    handle.write_bytes(b"Hello, ").unwrap();
    drop(handle);
    clone.write_wrapped("<", "world", ">").unwrap();
    assert_eq!(buffer.take(), "Hello, <world>");
    assert!(buffer.is_empty());
}

#[test]
fn test_open_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("append.log");
    std::fs::write(&path, "first\n").unwrap();
    let handle = FileHandle::open(&path).unwrap();
    handle.write_bytes(b"second\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}
