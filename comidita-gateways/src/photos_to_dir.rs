use anyhow::{bail, Result};
use comidita_core::gateways::PhotoStorageGateway;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Stores photos in a local directory for development setups.
///
/// The web server serves the directory under `public_base_url`.
#[derive(Debug, Clone)]
pub struct PhotosToDir {
    dir: PathBuf,
    public_base_url: String,
}

impl PhotosToDir {
    pub fn try_new<P: AsRef<Path>>(dir: P, public_base_url: String) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            public_base_url,
        })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

// Only plain file names, no path traversal
fn is_plain_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.starts_with('.')
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl PhotoStorageGateway for PhotosToDir {
    fn upload(&self, file_name: &str, _content_type: &str, data: &[u8]) -> Result<String> {
        if !is_plain_file_name(file_name) {
            bail!("Invalid photo file name '{file_name}'");
        }
        let path = self.dir.join(file_name);
        fs::write(&path, data)?;
        log::debug!("Saved photo to {}", path.display());
        Ok(format!(
            "{}/{file_name}",
            self.public_base_url.trim_end_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_photo_and_return_public_url() {
        let dir = std::env::temp_dir().join(format!("comidita-photos-{}", std::process::id()));
        let gw = PhotosToDir::try_new(&dir, "/photos/".into()).unwrap();
        let url = gw.upload("u_r_1_1.jpg", "image/jpeg", b"jpeg").unwrap();
        assert_eq!("/photos/u_r_1_1.jpg", url);
        assert_eq!(b"jpeg".to_vec(), fs::read(dir.join("u_r_1_1.jpg")).unwrap());
        assert!(gw.upload("../escape.jpg", "image/jpeg", b"x").is_err());
        fs::remove_dir_all(gw.path()).unwrap();
    }
}
