//! Registration request options

use crate::models::{DispatchError, DispatchResult};

/// Options for registering a service with the dispatcher.
///
/// The service name is required and used for name-based lookup on the
/// dispatcher side. Hostname and port are optional: an explicit value always
/// wins, otherwise the port falls back to the `PORT` environment variable
/// (then `"3000"`) and the hostname is resolved from the local machine name.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub name: String,
    pub tags: Vec<String>,
    pub hostname: Option<String>,
    pub port: Option<String>,
}

impl RegistrationRequest {
    /// Create a request for the given service name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            hostname: None,
            port: None,
        }
    }

    /// Replace the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Add a single tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set an explicit hostname, skipping auto-resolution.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set an explicit port, skipping the `PORT` environment fallback.
    pub fn with_port(mut self, port: impl ToString) -> Self {
        self.port = Some(port.to_string());
        self
    }

    /// Check the request for required fields.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.name.trim().is_empty() {
            return Err(DispatchError::invalid_argument(
                "service name must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = RegistrationRequest::new("search-api")
            .with_tag("search")
            .with_tag("v2")
            .with_hostname("10.0.0.5")
            .with_port(8080);

        assert_eq!(request.name, "search-api");
        assert_eq!(request.tags, vec!["search", "v2"]);
        assert_eq!(request.hostname.as_deref(), Some("10.0.0.5"));
        assert_eq!(request.port.as_deref(), Some("8080"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_name_is_invalid() {
        assert!(RegistrationRequest::new("").validate().is_err());
        assert!(RegistrationRequest::new("   ").validate().is_err());
    }
}
