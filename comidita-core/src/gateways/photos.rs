pub trait PhotoStorageGateway {
    /// Stores the data under the given name, replacing an existing
    /// object, and returns its public URL.
    fn upload(&self, file_name: &str, content_type: &str, data: &[u8]) -> anyhow::Result<String>;
}
