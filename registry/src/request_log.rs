use parking_lot::Mutex;
use std::sync::Arc;

/// Every request URL the endpoint has answered, in arrival order.
///
/// Clones share the same log, so the harness keeps one handle and passes
/// another into the app.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        url: impl Into<String>,
    ) {
        let url = url.into();
        tracing::debug!("recording request {url}");
        self.entries.lock().push(url);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compares the log with a newline separated list of expected URLs,
    /// ignoring order.
    pub fn verify(
        &self,
        expected: &str,
    ) -> crate::Result<()> {
        let mut expected: Vec<String> = expected
            .lines()
            .map(String::from)
            .collect();
        expected.sort();

        let mut actual = self.snapshot();
        actual.sort();

        if expected == actual {
            tracing::info!("all {} expected requests were made", actual.len());
            Ok(())
        } else {
            Err(crate::Error::UnexpectedRequests { expected, actual })
        }
    }

    /// Runs [`RequestLog::verify`] when an expectation is configured.
    pub fn verify_expected(
        &self,
        expected: Option<&str>,
    ) -> crate::Result<()> {
        match expected {
            Some(expected) => self.verify(expected),
            None => Ok(()),
        }
    }
}
