//! Byte storage for encoded keys and signatures.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Writes `contents` to `path`, creating or truncating it, and sets its
/// permission bits to `mode` before any contents are written.
///
/// The mode is applied on Unix only.
#[cfg_attr(not(unix), allow(unused_variables))]
pub(crate) fn write_with_mode<P: AsRef<Path>>(
    path: P,
    contents: &[u8],
    mode: u32,
) -> io::Result<()> {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(path)?;
    // An existing file keeps its old mode through open(), and a new one is
    // subject to the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(mode))?;
    }

    file.write_all(contents)?;
    trace!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

pub(crate) fn read<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    fs::read(path)
}

pub(crate) fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
    fs::read_to_string(path)
}
