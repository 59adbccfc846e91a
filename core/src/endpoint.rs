//! Fixed resource paths of the service

/// One of the four supported endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Completions,
    Images,
    Embeddings,
    Chats,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Completions => "/v1/completions",
            Endpoint::Images => "/v1/images/generations",
            Endpoint::Embeddings => "/v1/embeddings",
            Endpoint::Chats => "/v1/chat/completions",
        }
    }

    /// Full URL of this endpoint under `api_base`
    pub fn url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Endpoint::Completions => "completions",
            Endpoint::Images => "images",
            Endpoint::Embeddings => "embeddings",
            Endpoint::Chats => "chats",
        };
        f.write_str(name)
    }
}
