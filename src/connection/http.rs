use crate::connection::{ReportingClient, TransportError, TransportErrorKind, TransportResult};
use crate::reporter::{
    ItemId, KeywordSession, Launch, LaunchId, LogEntry, Status, SuiteSession, TestSession,
};
use crate::time::timestamp;
use derivative::*;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

const API_VERSION: &str = "api/v1";
const JSON_PART: &str = "json_request_part";
const FILE_PART: &str = "file";

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_connect() || e.is_timeout() {
            TransportErrorKind::Connection
        } else if e.is_decode() {
            TransportErrorKind::Response
        } else if e.is_builder() {
            TransportErrorKind::Rejected
        } else if let Some(status) = e.status() {
            status_kind(status)
        } else {
            TransportErrorKind::Http
        };
        TransportError::new(kind, e.to_string())
    }
}

fn status_kind(status: reqwest::StatusCode) -> TransportErrorKind {
    if status.is_client_error() {
        TransportErrorKind::Rejected
    } else {
        TransportErrorKind::Http
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartLaunchRq<'a> {
    name: &'a str,
    description: &'a str,
    start_time: i64,
    mode: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinishRq<'a> {
    end_time: i64,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    launch_uuid: Option<&'a str>,
}

#[derive(Serialize)]
struct ValueRef<'a> {
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartItemRq<'a> {
    name: &'a str,
    description: &'a str,
    start_time: i64,
    launch_uuid: &'a str,
    #[serde(rename = "type")]
    item_type: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<ValueRef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<ValueRef<'a>>,
}

#[derive(Serialize)]
struct FileRef<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveLogRq<'a> {
    launch_uuid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_uuid: Option<&'a str>,
    time: i64,
    message: &'a str,
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<FileRef<'a>>,
}

#[derive(Deserialize)]
struct EntryCreated {
    id: String,
}

#[derive(Derivative)]
#[derivative(Debug)]
struct Session {
    #[derivative(Debug = "ignore")]
    client: Client,
    base: String,
}

/// [`ReportingClient`] speaking the ReportPortal v1 REST API.
#[derive(Debug)]
pub struct HttpReportingClient {
    timeout: Duration,
    session: Option<Session>,
}

impl HttpReportingClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            session: None,
        }
    }

    fn session(&self) -> TransportResult<&Session> {
        self.session.as_ref().ok_or_else(|| {
            TransportError::new(TransportErrorKind::Closed, "reporting client is not initialized")
        })
    }

    fn url(&self, path: &str) -> TransportResult<String> {
        Ok(format!("{}/{}", self.session()?.base, path))
    }

    fn encode<T: serde::Serialize>(body: &T) -> TransportResult<Vec<u8>> {
        serde_json::to_vec(body).map_err(|e| TransportError::new(TransportErrorKind::Encoding, e.to_string()))
    }

    fn send(request: RequestBuilder) -> TransportResult<reqwest::blocking::Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(TransportError::new(
                status_kind(status),
                format!("{} {}", status, body),
            ))
        }
    }

    fn json_request<T: serde::Serialize>(
        &self,
        request: RequestBuilder,
        body: &T,
    ) -> TransportResult<reqwest::blocking::Response> {
        let payload = Self::encode(body)?;
        trace!("Sending {}", String::from_utf8_lossy(&payload));
        Self::send(request.header(CONTENT_TYPE, "application/json").body(payload))
    }

    fn create<T: serde::Serialize>(&self, path: &str, body: &T) -> TransportResult<String> {
        let request = self.session()?.client.post(&self.url(path)?);
        let created: EntryCreated = self.json_request(request, body)?.json()?;
        Ok(created.id)
    }

    fn update<T: serde::Serialize>(&self, path: &str, body: &T) -> TransportResult<()> {
        let request = self.session()?.client.put(&self.url(path)?);
        self.json_request(request, body).map(|_| ())
    }

    fn start_item(
        &self,
        launch: &LaunchId,
        parent: Option<&ItemId>,
        rq: StartItemRq<'_>,
    ) -> TransportResult<ItemId> {
        let path = match parent {
            Some(parent) => format!("item/{}", parent),
            None => "item".to_owned(),
        };
        debug!("Starting {} '{}' in launch {}", rq.item_type, rq.name, launch);
        self.create(&path, &rq).map(ItemId::new)
    }

    fn finish_item(&self, launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        let rq = FinishRq {
            end_time: timestamp(),
            status,
            launch_uuid: Some(launch.as_str()),
        };
        debug!("Finishing item {} with {}", id, status);
        self.update(&format!("item/{}", id), &rq)
    }
}

impl Default for HttpReportingClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl ReportingClient for HttpReportingClient {
    fn initialize(
        &mut self,
        endpoint: &str,
        project: &str,
        credential: &str,
    ) -> TransportResult<()> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&format!("Bearer {}", credential))
            .map_err(|e| TransportError::new(TransportErrorKind::Encoding, e.to_string()))?;
        headers.insert(AUTHORIZATION, token);
        let client = Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;
        let base = format!(
            "{}/{}/{}",
            endpoint.trim_end_matches('/'),
            API_VERSION,
            project
        );
        info!("Reporting into {}", base);
        self.session = Some(Session { client, base });
        Ok(())
    }

    fn start_launch(&mut self, launch: &Launch) -> TransportResult<LaunchId> {
        let rq = StartLaunchRq {
            name: &launch.name,
            description: &launch.doc,
            start_time: timestamp(),
            mode: "DEFAULT",
        };
        let id = self.create("launch", &rq)?;
        info!("Started launch '{}' with id {}", launch.name, id);
        Ok(LaunchId::new(id))
    }

    fn finish_launch(&mut self, launch: &LaunchId, status: Status) -> TransportResult<()> {
        let rq = FinishRq {
            end_time: timestamp(),
            status,
            launch_uuid: None,
        };
        info!("Finishing launch {} with {}", launch, status);
        self.update(&format!("launch/{}/finish", launch), &rq)
    }

    fn start_suite(
        &mut self,
        launch: &LaunchId,
        suite: &SuiteSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId> {
        let rq = StartItemRq {
            name: &suite.name,
            description: &suite.doc,
            start_time: timestamp(),
            launch_uuid: launch.as_str(),
            item_type: "SUITE",
            attributes: vec![],
            parameters: vec![],
        };
        self.start_item(launch, parent, rq)
    }

    fn finish_suite(&mut self, launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        self.finish_item(launch, id, status)
    }

    fn start_test(
        &mut self,
        launch: &LaunchId,
        test: &TestSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId> {
        let rq = StartItemRq {
            name: &test.name,
            description: &test.doc,
            start_time: timestamp(),
            launch_uuid: launch.as_str(),
            item_type: "TEST",
            attributes: test.tags.iter().map(|tag| ValueRef { value: tag.as_str() }).collect(),
            parameters: vec![],
        };
        self.start_item(launch, parent, rq)
    }

    fn finish_test(&mut self, launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        self.finish_item(launch, id, status)
    }

    fn start_step(
        &mut self,
        launch: &LaunchId,
        keyword: &KeywordSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId> {
        let rq = StartItemRq {
            name: &keyword.name,
            description: &keyword.doc,
            start_time: timestamp(),
            launch_uuid: launch.as_str(),
            item_type: keyword.item_type(),
            attributes: vec![],
            parameters: keyword.args.iter().map(|arg| ValueRef { value: arg.as_str() }).collect(),
        };
        self.start_item(launch, parent, rq)
    }

    fn finish_step(&mut self, launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        self.finish_item(launch, id, status)
    }

    fn log(
        &mut self,
        launch: &LaunchId,
        item: Option<&ItemId>,
        entry: &LogEntry,
    ) -> TransportResult<()> {
        let rq = SaveLogRq {
            launch_uuid: launch.as_str(),
            item_uuid: item.map(ItemId::as_str),
            time: timestamp(),
            message: &entry.message,
            level: entry.level.as_wire(),
            file: entry
                .attachment
                .as_ref()
                .map(|attachment| FileRef { name: &attachment.name }),
        };
        let session = self.session()?;
        let request = session.client.post(&self.url("log")?);
        match &entry.attachment {
            None => self.json_request(request, &rq).map(|_| ()),
            Some(attachment) => {
                let payload = Self::encode(&[rq])?;
                let form = Form::new()
                    .part(JSON_PART, Part::bytes(payload).mime_str("application/json")?)
                    .part(
                        FILE_PART,
                        Part::bytes(attachment.data.clone())
                            .file_name(attachment.name.clone())
                            .mime_str(attachment.mime.as_ref())?,
                    );
                debug!("Uploading attachment {} ({})", attachment.name, attachment.mime);
                Self::send(request.multipart(form)).map(|_| ())
            }
        }
    }

    fn terminate(&mut self) -> TransportResult<()> {
        if self.session.take().is_some() {
            info!("Reporting client terminated");
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_calls_before_initialize_are_refused() {
        let mut client = HttpReportingClient::default();
        let launch = Launch {
            name: "Robot".to_owned(),
            doc: String::new(),
        };
        let error = client.start_launch(&launch).unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::Closed);
    }

    #[test]
    fn test_initialize_builds_project_base_url() {
        let mut client = HttpReportingClient::default();
        client
            .initialize("http://rp.local:8080/", "demo", "token")
            .unwrap();
        assert_eq!(
            client.url("launch").unwrap(),
            "http://rp.local:8080/api/v1/demo/launch"
        );
        client.terminate().unwrap();
        assert!(client.url("launch").is_err());
    }

    #[test]
    fn test_item_payload_uses_api_field_names() {
        let rq = StartItemRq {
            name: "Login Works",
            description: "",
            start_time: 1,
            launch_uuid: "launch-1",
            item_type: "TEST",
            attributes: vec![ValueRef { value: "smoke" }],
            parameters: vec![],
        };
        let value = serde_json::to_value(&rq).unwrap();
        assert_eq!(value["type"], "TEST");
        assert_eq!(value["launchUuid"], "launch-1");
        assert_eq!(value["startTime"], 1);
        assert_eq!(value["attributes"][0]["value"], "smoke");
        assert!(value.get("parameters").is_none());
    }

    #[test]
    fn test_endpoint_without_scheme_is_rejected() {
        let mut client = HttpReportingClient::default();
        client.initialize("rp.local", "demo", "token").unwrap();
        let launch = Launch {
            name: "Robot".to_owned(),
            doc: String::new(),
        };
        let error = client.start_launch(&launch).unwrap_err();
        assert_eq!(error.kind(), TransportErrorKind::Rejected);
        assert!(!TransportErrorKind::TRANSIENT.contains(&error.kind()));
    }

    #[test]
    fn test_rejections_are_not_transient() {
        assert_eq!(
            status_kind(reqwest::StatusCode::BAD_REQUEST),
            TransportErrorKind::Rejected
        );
        assert_eq!(
            status_kind(reqwest::StatusCode::BAD_GATEWAY),
            TransportErrorKind::Http
        );
    }
}
