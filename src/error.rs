use thiserror::Error;

/// Failure reported by an introspection backend.
///
/// Collectors never let these escape; each one is folded into a sentinel
/// before a category is returned.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The management/introspection layer is not installed or not reachable
    #[error("{capability} is unavailable on this system")]
    CapabilityUnavailable { capability: String },

    /// The query ran but the backend rejected it or returned garbage
    #[error("Query failed: {message}")]
    Query { message: String },

    /// Reading an OS introspection source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WMI error (Windows only)
    #[cfg(windows)]
    #[error("WMI query failed: {0}")]
    Wmi(#[from] wmi::WMIError),
}

impl QueryError {
    pub fn unavailable(capability: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability: capability.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Process-level errors raised outside the collector.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to serialize snapshot as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize snapshot as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_names_capability() {
        let err = QueryError::unavailable("WMI (root\\cimv2)");
        assert_eq!(err.to_string(), "WMI (root\\cimv2) is unavailable on this system");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: QueryError = io.into();
        assert!(err.to_string().contains("access denied"));
    }
}
