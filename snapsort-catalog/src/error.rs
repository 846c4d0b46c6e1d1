/// Errors that can occur while fetching or parsing the remote catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("download failed: {0}")]
    Download(String),
}

impl CatalogError {
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }
}
