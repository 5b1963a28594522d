use std::time::Duration;

use crate::elements::fallback::{fallback_elements, is_eligible};
use crate::error::ConjunctionError;

pub const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Resolves catalog numbers to 3-line element text over HTTP, substituting a
/// fixed offline element set whenever the remote source cannot answer.
pub struct ElementSource {
    client: reqwest::Client,
    base_url: String,
    attempts: u32,
    retry_delay: Duration,
}

impl ElementSource {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            attempts: attempts.max(1),
            retry_delay,
        })
    }

    /// Only fails for identifiers that have no offline fallback either.
    pub async fn fetch(&self, id: &str) -> Result<String, ConjunctionError> {
        let id = id.trim();
        if !is_eligible(id) {
            return Err(ConjunctionError::ElementSourceUnavailable(format!(
                "'{}' is not a catalog number",
                id
            )));
        }

        for attempt in 1..=self.attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry_delay).await;
            }

            match self.fetch_attempt(id).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    log::warn!(
                        "Element fetch for {} failed (attempt {}/{}): {}",
                        id,
                        attempt,
                        self.attempts,
                        e
                    );
                }
            }
        }

        log::warn!("Using offline element set for {}", id);
        fallback_elements(id).ok_or_else(|| {
            ConjunctionError::ElementSourceUnavailable(format!("no element set for {}", id))
        })
    }

    async fn fetch_attempt(&self, id: &str) -> Result<String, ConjunctionError> {
        let unavailable = |e: reqwest::Error| ConjunctionError::ElementSourceUnavailable(e.to_string());

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("CATNR", id), ("FORMAT", "tle")])
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            return Err(ConjunctionError::ElementSourceUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(unavailable)?;
        normalize_response(id, &body).ok_or_else(|| {
            ConjunctionError::ElementSourceUnavailable(format!(
                "unusable response: {}",
                body.trim()
            ))
        })
    }
}

/// Trims the response down to exactly three lines, inventing a name line when
/// the source returned bare element lines.
pub fn normalize_response(id: &str, body: &str) -> Option<String> {
    let lines: Vec<&str> = body
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    match lines.len() {
        0 | 1 => None,
        2 => Some(format!("Sat {}\n{}", id, lines.join("\n"))),
        _ => Some(lines[..3].join("\n")),
    }
}
