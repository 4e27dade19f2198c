use crate::vfs::{Stream, Vfs};
use tracing::trace;

/// Something that can resolve a resource name to a stream.
pub trait ResourceOpener {
    fn open_resource(&self, name: &str) -> Option<Stream>;
}

impl ResourceOpener for Vfs {
    fn open_resource(&self, name: &str) -> Option<Stream> {
        self.open(name)
    }
}

/// Routes the file reads of a host asset framework through a [`ResourceOpener`].
///
/// A name is first resolved as is. Failing that, it is retried under each of the host's own
/// search paths, in the order the host gave them.
pub struct HostIo<'opener, O>
where
    O: ?Sized,
{
    opener: &'opener O,
    search_paths: Vec<String>,
}

impl<'opener, O> HostIo<'opener, O>
where
    O: ?Sized + ResourceOpener,
{
    #[must_use]
    pub fn new<I, S>(opener: &'opener O, search_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            opener,
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn open(&self, name: &str) -> Option<Stream> {
        self.opener.open_resource(name).or_else(|| {
            self.search_paths.iter().find_map(|prefix| {
                let name = format!("{prefix}/{name}");
                trace!("retrying host resource as {name:?}");
                self.opener.open_resource(&name)
            })
        })
    }

    #[must_use]
    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        host::{HostIo, ResourceOpener},
        testing::write_loose,
        vfs::{Stream, Vfs},
    };
    use anyhow::Context as _;
    use std::{cell::RefCell, io::Read as _};

    struct Recorder<'vfs> {
        vfs: &'vfs Vfs,
        requests: RefCell<Vec<String>>,
    }

    impl ResourceOpener for Recorder<'_> {
        fn open_resource(&self, name: &str) -> Option<Stream> {
            self.requests.borrow_mut().push(name.to_owned());
            self.vfs.open(name)
        }
    }

    fn read_to_string(stream: Option<Stream>) -> anyhow::Result<String> {
        let mut result = String::new();
        stream
            .context("stream should exist")?
            .read_to_string(&mut result)?;
        Ok(result)
    }

    #[test]
    fn direct_hits_skip_the_search_paths() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_loose(&dir.path().join("mesh.obj"), b"root")?;
        write_loose(&dir.path().join("models").join("mesh.obj"), b"models")?;
        let mut vfs = Vfs::empty();
        vfs.add_data_path(dir.path());

        let host = vfs.host_io(["models"]);
        assert_eq!(read_to_string(host.open("mesh.obj"))?, "root");
        Ok(())
    }

    #[test]
    fn search_paths_are_tried_in_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_loose(&dir.path().join("second").join("tex.png"), b"second")?;
        write_loose(&dir.path().join("third").join("tex.png"), b"third")?;
        let mut vfs = Vfs::empty();
        vfs.add_data_path(dir.path());

        let recorder = Recorder {
            vfs: &vfs,
            requests: RefCell::default(),
        };
        let host = HostIo::new(&recorder, ["first", "second", "third"]);
        assert_eq!(host.search_paths(), ["first", "second", "third"]);
        assert_eq!(read_to_string(host.open("tex.png"))?, "second");
        assert_eq!(
            *recorder.requests.borrow(),
            ["tex.png", "first/tex.png", "second/tex.png"]
        );

        assert!(host.open("missing.png").is_none());
        Ok(())
    }
}
