use super::VersionNotifier;
use crate::model::Coordinate;
use async_trait::async_trait;
use reqwest::Url;
use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

// ============================================================================
// Console sink, one `groupId:artifactId:version` line per event
// ============================================================================

pub struct ConsoleNotifier {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    /// Write to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    #[must_use]
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionNotifier for ConsoleNotifier {
    async fn notify(&self, _: &str, coordinate: &Coordinate, version: &str) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{coordinate}:{version}")?;
        writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// NDJSON sink, one JSON object per event
// ============================================================================

pub struct NdjsonNotifier {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl NdjsonNotifier {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn write_event(&self, event: &serde_json::Value) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *writer, event)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl VersionNotifier for NdjsonNotifier {
    async fn notify(
        &self,
        repository_name: &str,
        coordinate: &Coordinate,
        version: &str,
    ) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "new_version",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "repository": repository_name,
            "coordinate": coordinate.to_string(),
            "group_id": coordinate.group_id(),
            "artifact_id": coordinate.artifact_id(),
            "version": version,
        });
        self.write_event(&event)
    }
}

// ============================================================================
// Webhook sinks, HTTP POST of a service-specific JSON body
// ============================================================================

/// Payload shape expected by the receiving service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookFormat {
    /// IFTTT maker event: `value1`..`value3`
    Ifttt,
    /// Slack incoming webhook, markdown text
    Slack,
    /// Microsoft Teams connector `MessageCard`
    Teams,
}

impl WebhookFormat {
    /// Build the request body for one new version.
    #[must_use]
    pub fn payload(
        self,
        repository_name: &str,
        coordinate: &Coordinate,
        version: &str,
    ) -> serde_json::Value {
        match self {
            Self::Ifttt => serde_json::json!({
                "value1": repository_name,
                "value2": coordinate.to_string(),
                "value3": version,
            }),
            Self::Slack => serde_json::json!({
                "text": format!("*New artifact in {repository_name}*\n\n{version} of {coordinate}"),
                "type": "mrkdwn",
            }),
            Self::Teams => serde_json::json!({
                "@type": "MessageCard",
                "@context": "http://schema.org/extensions",
                "summary": format!("New {version} of {coordinate} available in {repository_name}"),
                "sections": [{
                    "activityTitle": format!("*New artifact in {repository_name}*"),
                    "activitySubtitle": format!("{version} of {coordinate}"),
                }],
            }),
        }
    }
}

impl fmt::Display for WebhookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ifttt => "IFTTT",
            Self::Slack => "Slack",
            Self::Teams => "Teams",
        })
    }
}

pub struct WebhookNotifier {
    format: WebhookFormat,
    url: Url,
    client: reqwest::Client,
}

impl WebhookNotifier {
    #[must_use]
    pub fn new(format: WebhookFormat, url: Url, client: reqwest::Client) -> Self {
        Self {
            format,
            url,
            client,
        }
    }

    async fn post_json(&self, payload: &serde_json::Value) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} webhook returned status {status}", self.format);
        }
        Ok(())
    }
}

#[async_trait]
impl VersionNotifier for WebhookNotifier {
    async fn notify(
        &self,
        repository_name: &str,
        coordinate: &Coordinate,
        version: &str,
    ) -> anyhow::Result<()> {
        let payload = self.format.payload(repository_name, coordinate, version);
        self.post_json(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct ArcWriter(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for ArcWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn example() -> Coordinate {
        Coordinate::new("com.example", "example")
    }

    #[tokio::test]
    async fn test_console_sink_prints_coordinate_and_version() {
        let buffer = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = ConsoleNotifier::with_writer(Box::new(ArcWriter(buffer.clone())));

        sink.notify("Repo", &example(), "1.1.0").await.unwrap();
        sink.notify("Repo", &example(), "1.2.0").await.unwrap();

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(
            output,
            "com.example:example:1.1.0\ncom.example:example:1.2.0\n"
        );
    }

    #[tokio::test]
    async fn test_ndjson_sink_produces_valid_json() {
        let buffer = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = NdjsonNotifier::new(Box::new(ArcWriter(buffer.clone())));

        sink.notify("Maven Central", &example(), "1.1.0")
            .await
            .unwrap();

        let output = buffer.lock().unwrap();
        let line = String::from_utf8_lossy(&output);
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["type"], "new_version");
        assert_eq!(parsed["repository"], "Maven Central");
        assert_eq!(parsed["coordinate"], "com.example:example");
        assert_eq!(parsed["version"], "1.1.0");
    }

    #[test]
    fn test_ifttt_payload() {
        let payload = WebhookFormat::Ifttt.payload("Repo", &example(), "1.1.0");
        assert_eq!(
            payload,
            serde_json::json!({
                "value1": "Repo",
                "value2": "com.example:example",
                "value3": "1.1.0",
            })
        );
    }

    #[test]
    fn test_slack_payload() {
        let payload = WebhookFormat::Slack.payload("Repo", &example(), "1.1.0");
        assert_eq!(
            payload.to_string(),
            r#"{"text":"*New artifact in Repo*\n\n1.1.0 of com.example:example","type":"mrkdwn"}"#
        );
    }

    #[test]
    fn test_teams_payload() {
        let payload = WebhookFormat::Teams.payload("Repo", &example(), "1.1.0");
        assert_eq!(payload["@type"], "MessageCard");
        assert_eq!(payload["@context"], "http://schema.org/extensions");
        assert_eq!(
            payload["summary"],
            "New 1.1.0 of com.example:example available in Repo"
        );
        let section = &payload["sections"][0];
        assert_eq!(section["activityTitle"], "*New artifact in Repo*");
        assert_eq!(section["activitySubtitle"], "1.1.0 of com.example:example");
    }
}
