use crate::page::Lookup;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Status page request failed{}", status_suffix(.status))]
    Connection {
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Status page has not been downloaded yet")]
    MissingDocument,

    #[error("{0} not found in status page")]
    NotFound(Lookup),

    #[error("Unexpected layout in {context}: expected at least {expected} elements, found {found}")]
    StructureMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("Malformed band token {token:?} in {context}")]
    MalformedBandToken { context: String, token: String },

    #[error("Cannot read status page from file")]
    Io(#[from] std::io::Error),
}

/// Message of `e` followed by each of its causes.
pub fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(": got wrong response code {}", code),
        None => String::new(),
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        ScrapeError::Connection {
            status: e.status().map(|s| s.as_u16()),
            source: Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_chain_includes_causes() {
        let err = ScrapeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "status.html is missing",
        ));
        assert_eq!(
            error_chain(&err),
            "Cannot read status page from file: status.html is missing"
        );
    }

    #[test]
    fn test_error_chain_without_cause() {
        let err = ScrapeError::Connection {
            status: Some(503),
            source: None,
        };
        assert_eq!(
            error_chain(&err),
            "Status page request failed: got wrong response code 503"
        );
    }
}
