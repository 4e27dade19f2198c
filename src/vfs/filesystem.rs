use bstr::ByteSlice as _;
use crate::{
    bsa::Archive,
    glob::Pattern,
    host::HostIo,
    prelude::*,
    vfs::{Error, Options, Result, Stream},
};
use std::{
    collections::HashSet,
    fs,
    io::Read as _,
    path::{Path, PathBuf},
};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// The namespace formed by layering containers over loose-file data directories.
///
/// There is no global instance. Construct one per session and hand a reference to whatever needs
/// to read game data.
#[derive(Debug, Default)]
pub struct Vfs {
    roots: Vec<PathBuf>,
    archives: Vec<Archive>,
    arch: Option<Archive>,
    sound: Option<Archive>,
}

impl Vfs {
    /// Makes a namespace with no data directories and no containers.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the game's containers from `root` and registers `root` as the lowest-priority data
    /// directory, using the default container names.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(root, &Options::default())
    }

    /// Loads the game's containers from `root` and registers `root` as the lowest-priority data
    /// directory.
    ///
    /// Any container that fails to load aborts the whole initialization.
    pub fn with_options(root: impl AsRef<Path>, options: &Options) -> Result<Self> {
        let root = normalize_root(root.as_ref());
        info!("initializing vfs from {root:?}");

        let load = |file: &str| -> Result<Archive> {
            let path = root.join(file);
            Archive::read(path.as_path()).map_err(|source| Error::Archive { path, source })
        };

        let archives = options
            .named_archives()
            .into_iter()
            .map(load)
            .collect::<Result<Vec<_>>>()?;
        let arch = load(options.arch())?;
        let sound = load(options.sound())?;

        Ok(Self {
            roots: vec![root],
            archives,
            arch: Some(arch),
            sound: Some(sound),
        })
    }

    /// Registers another data directory, which takes priority over every directory added before.
    pub fn add_data_path(&mut self, path: impl AsRef<Path>) {
        let path = normalize_root(path.as_ref());
        debug!("adding data path {path:?}");
        self.roots.push(path);
    }

    /// Loads another container, which takes priority over every container loaded before.
    pub fn add_archive(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let archive = Archive::read(path).map_err(|source| Error::Archive {
            path: path.to_path_buf(),
            source,
        })?;
        self.archives.push(archive);
        Ok(())
    }

    /// Opens the named file, searching containers before data directories, newest first.
    ///
    /// Returns `None` if no layer has the file.
    #[must_use]
    pub fn open(&self, name: &str) -> Option<Stream> {
        trace!("opening {name:?}");
        self.archives
            .iter()
            .rev()
            .find_map(|archive| archive.open(name))
            .map(Stream::Archived)
            .or_else(|| {
                self.roots
                    .iter()
                    .rev()
                    .find_map(|root| open_loose(root, name))
                    .map(Stream::Loose)
            })
    }

    /// Opens the sound effect with the given id. Only the sound container is consulted.
    #[must_use]
    pub fn open_sound_id(&self, id: u32) -> Option<Stream> {
        self.sound.as_ref()?.open_id(id).map(Stream::Archived)
    }

    /// Opens the architecture mesh with the given id. Only the architecture container is consulted.
    #[must_use]
    pub fn open_arch_id(&self, id: u32) -> Option<Stream> {
        self.arch.as_ref()?.open_id(id).map(Stream::Archived)
    }

    /// Checks whether [`open`](Vfs::open) would find the named file.
    ///
    /// Files in data directories are probed by briefly opening them.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.archives.iter().rev().any(|archive| archive.exists(name))
            || self
                .roots
                .iter()
                .rev()
                .any(|root| open_loose(root, name).is_some())
    }

    /// Reads the named file into memory.
    #[must_use]
    pub fn read(&self, name: &str) -> Option<Vec<u8>> {
        let mut stream = self.open(name)?;
        let mut bytes = Vec::new();
        match stream.read_to_end(&mut bytes) {
            Ok(_) => Some(bytes),
            Err(err) => {
                debug!("failed to read {name:?}: {err}");
                None
            }
        }
    }

    /// Collects every file name reachable by [`open`](Vfs::open) that matches `pattern`, or all of
    /// them if there is no pattern.
    ///
    /// Files in data directories are named by their path relative to the directory, using `/` as
    /// the separator. Container names that are not valid UTF-8 are skipped, since
    /// [`open`](Vfs::open) could never find them. The result is a set; no particular order is
    /// implied.
    pub fn list(&self, pattern: Option<&str>) -> Result<HashSet<String>> {
        let pattern = pattern
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| Error::Pattern {
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .transpose()?;
        let accepts = |name: &str| pattern.as_ref().map_or(true, |x| x.matches(name));

        let mut files = HashSet::new();
        for root in &self.roots {
            for name in walk_root(root) {
                if accepts(name.as_str()) {
                    files.insert(name);
                }
            }
        }

        for archive in &self.archives {
            for name in archive.list() {
                let Ok(name) = name.trimmed().to_str() else {
                    debug!("skipping non-utf8 name {name} in {:?}", archive.path());
                    continue;
                };
                if accepts(name) {
                    files.insert(name.to_owned());
                }
            }
        }

        Ok(files)
    }

    /// Builds the adapter a host asset framework reads through.
    #[must_use]
    pub fn host_io<I, S>(&self, search_paths: I) -> HostIo<'_, Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HostIo::new(self, search_paths)
    }

    /// The data directories, lowest priority first.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// The containers searched by name, lowest priority first.
    #[must_use]
    pub fn archives(&self) -> &[Archive] {
        &self.archives
    }
}

fn normalize_root(root: &Path) -> PathBuf {
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root.to_path_buf()
    }
}

fn open_loose(root: &Path, name: &str) -> Option<fs::File> {
    // names are relative to the root even when they start with a separator
    let path = root.join(name.trim_start_matches(['/', '\\']));
    let fd = fs::File::open(&path).ok()?;
    match fd.metadata() {
        Ok(metadata) if metadata.is_file() => Some(fd),
        _ => None,
    }
}

fn walk_root(root: &Path) -> impl Iterator<Item = String> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let relative = entry.path().strip_prefix(root).ok()?;
                let components: Vec<_> = relative
                    .components()
                    .map(|x| x.as_os_str().to_string_lossy())
                    .collect();
                Some(components.join("/"))
            }
            Ok(_) => None,
            Err(err) => {
                debug!("skipping unreadable entry under {root:?}: {err}");
                None
            }
        })
}
