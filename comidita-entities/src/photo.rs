/// Raw image data as uploaded by a user.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// A photo attached to a review draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// Binary data that still needs to be compressed and uploaded.
    Upload(ImageFile),
    /// An image that is already hosted somewhere.
    Hosted(String),
}
