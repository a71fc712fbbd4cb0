use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;

/// Write `bytes` to `dest` through a sibling temp file and rename it into
/// place, so `dest` is either the previous content or the complete new one.
///
/// The temp file is created with the mode a plain `fs::write` would use
/// (`0o666` less the umask) so the published file is readable by the later
/// stages, not owner-only.
pub fn publish_bytes(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut builder = Builder::new();
    builder.prefix(".").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|err| err.error)?;
    Ok(())
}
