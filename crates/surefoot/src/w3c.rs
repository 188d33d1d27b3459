//! W3C WebDriver HTTP client.
//!
//! Talks to any remote end that speaks the W3C protocol (chromedriver,
//! geckodriver, a Selenium grid) with blocking `reqwest` requests.
//!
//! ```no_run
//! use surefoot::{SessionExt, W3cDriver};
//!
//! let driver = W3cDriver::connect("http://localhost:9515", serde_json::json!({"browserName": "chrome"}))?;
//! driver.switch_to_frame_named("content")?;
//! driver.quit()?;
//! # Ok::<(), surefoot::SurefootError>(())
//! ```

use crate::driver::{Driver, ElementHandle, FrameTarget, NetworkConditions, SearchContext};
use crate::locator::{escape_css_string, Locator};
use crate::result::{SurefootError, SurefootResult};
use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;

/// Key identifying a web element reference in JSON
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// HTTP timeout for a single command
const COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Session on a W3C remote end
#[derive(Debug, Clone)]
pub struct W3cDriver {
    base_url: String,
    session_id: String,
    client: Client,
}

impl W3cDriver {
    /// Start a new session with the given `alwaysMatch` capabilities
    pub fn connect(url: &str, capabilities: Value) -> SurefootResult<Self> {
        let client = http_client()?;
        let base_url = url.trim_end_matches('/').to_string();
        let body = json!({ "capabilities": { "alwaysMatch": capabilities } });
        let response = client
            .post(format!("{base_url}/session"))
            .json(&body)
            .send()
            .map_err(|e| SurefootError::communication(e.to_string()))?;
        let value = read_response(response)?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| protocol_error("new session response has no sessionId"))?
            .to_string();
        tracing::info!(url = %base_url, session = %session_id, "session created");
        Ok(Self {
            base_url,
            session_id,
            client,
        })
    }

    /// Drive a session that already exists
    pub fn attach(url: &str, session_id: impl Into<String>) -> SurefootResult<Self> {
        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            session_id: session_id.into(),
            client: http_client()?,
        })
    }

    /// Session id
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// End the session and close its windows
    pub fn quit(self) -> SurefootResult<()> {
        let _ = self.command(Method::DELETE, "", None)?;
        tracing::info!(session = %self.session_id, "session deleted");
        Ok(())
    }

    fn command(&self, method: Method, path: &str, body: Option<Value>) -> SurefootResult<Value> {
        let url = format!("{}/session/{}{path}", self.base_url, self.session_id);
        tracing::trace!(%method, path, "command");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .map_err(|e| SurefootError::communication(e.to_string()))?;
        read_response(response)
    }

    fn get(&self, path: &str) -> SurefootResult<Value> {
        self.command(Method::GET, path, None)
    }

    fn post(&self, path: &str, body: Value) -> SurefootResult<Value> {
        self.command(Method::POST, path, Some(body))
    }

    fn frame_by_name(&self, name: &str) -> SurefootResult<ElementHandle> {
        let escaped = escape_css_string(name);
        let locator = Locator::css(format!(
            "frame[name=\"{escaped}\"], iframe[name=\"{escaped}\"]"
        ));
        self.find_elements(&SearchContext::Session, &locator)?
            .into_iter()
            .next()
            .ok_or_else(|| SurefootError::NoSuchFrame {
                frame: name.to_string(),
            })
    }
}

fn http_client() -> SurefootResult<Client> {
    Client::builder()
        .timeout(COMMAND_TIMEOUT)
        .build()
        .map_err(|e| SurefootError::communication(e.to_string()))
}

fn protocol_error(message: &str) -> SurefootError {
    SurefootError::Protocol {
        error: "invalid response".to_string(),
        message: message.to_string(),
    }
}

fn read_response(response: reqwest::blocking::Response) -> SurefootResult<Value> {
    let status = response.status();
    let text = response
        .text()
        .map_err(|e| SurefootError::communication(e.to_string()))?;
    let mut body: Value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text)?
    };
    if !status.is_success() {
        return Err(error_from_body(&body));
    }
    Ok(body.get_mut("value").map(Value::take).unwrap_or(Value::Null))
}

/// Map a W3C error body onto a [`SurefootError`]
pub(crate) fn error_from_body(body: &Value) -> SurefootError {
    let value = body.get("value").unwrap_or(&Value::Null);
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match error.as_str() {
        "no such element" => SurefootError::NoSuchElement { locator: message },
        "stale element reference" => SurefootError::StaleElement { element: message },
        "element not interactable" => SurefootError::ElementNotInteractable { message },
        "element click intercepted" => SurefootError::ClickIntercepted { message },
        "no such alert" => SurefootError::NoAlertPresent,
        "no such frame" => SurefootError::NoSuchFrame { frame: message },
        "no such window" => SurefootError::NoSuchWindow { window: message },
        "invalid selector" => SurefootError::InvalidSelector {
            selector: String::new(),
            message,
        },
        "javascript error" => SurefootError::Script { message },
        _ => SurefootError::Protocol { error, message },
    }
}

/// Read a web element reference
pub(crate) fn element_from_value(value: &Value) -> SurefootResult<ElementHandle> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(ElementHandle::new)
        .ok_or_else(|| protocol_error("expected a web element reference"))
}

fn element_json(element: &ElementHandle) -> Value {
    json!({ ELEMENT_KEY: element.id() })
}

fn string_from_value(value: Value) -> SurefootResult<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(protocol_error("expected a string")),
    }
}

fn optional_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Driver for W3cDriver {
    fn navigate(&self, url: &str) -> SurefootResult<()> {
        self.post("/url", json!({ "url": url })).map(drop)
    }

    fn find_elements(
        &self,
        context: &SearchContext,
        locator: &Locator,
    ) -> SurefootResult<Vec<ElementHandle>> {
        let (using, value) = locator.to_w3c();
        let path = match context {
            SearchContext::Session => "/elements".to_string(),
            SearchContext::Element(el) => format!("/element/{}/elements", el.id()),
        };
        let found = self.post(&path, json!({ "using": using, "value": value }))?;
        found
            .as_array()
            .ok_or_else(|| protocol_error("expected a list of elements"))?
            .iter()
            .map(element_from_value)
            .collect()
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> SurefootResult<Option<String>> {
        let value = self.get(&format!("/element/{}/attribute/{name}", element.id()))?;
        Ok(optional_string(value))
    }

    fn value(&self, element: &ElementHandle) -> SurefootResult<Option<String>> {
        let value = self.get(&format!("/element/{}/property/value", element.id()))?;
        Ok(optional_string(value))
    }

    fn text(&self, element: &ElementHandle) -> SurefootResult<String> {
        string_from_value(self.get(&format!("/element/{}/text", element.id()))?)
    }

    fn click(&self, element: &ElementHandle) -> SurefootResult<()> {
        self.post(&format!("/element/{}/click", element.id()), json!({}))
            .map(drop)
    }

    fn send_keys(&self, element: &ElementHandle, keys: &str) -> SurefootResult<()> {
        self.post(
            &format!("/element/{}/value", element.id()),
            json!({ "text": keys }),
        )
        .map(drop)
    }

    fn clear(&self, element: &ElementHandle) -> SurefootResult<()> {
        self.post(&format!("/element/{}/clear", element.id()), json!({}))
            .map(drop)
    }

    fn implicit_wait(&self) -> SurefootResult<Duration> {
        let timeouts = self.get("/timeouts")?;
        timeouts
            .get("implicit")
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
            .ok_or_else(|| protocol_error("timeouts response has no implicit value"))
    }

    fn set_implicit_wait(&self, wait: Duration) -> SurefootResult<()> {
        self.post("/timeouts", json!({ "implicit": millis(wait) }))
            .map(drop)
    }

    fn switch_to_window(&self, handle: &str) -> SurefootResult<()> {
        self.post("/window", json!({ "handle": handle })).map(drop)
    }

    fn switch_to_frame(&self, target: &FrameTarget) -> SurefootResult<()> {
        let id = match target {
            FrameTarget::Index(index) => json!(index),
            FrameTarget::Element(el) => element_json(el),
            FrameTarget::Name(name) => element_json(&self.frame_by_name(name)?),
        };
        self.post("/frame", json!({ "id": id })).map(drop)
    }

    fn switch_to_parent_frame(&self) -> SurefootResult<()> {
        self.post("/frame/parent", json!({})).map(drop)
    }

    fn switch_to_default_content(&self) -> SurefootResult<()> {
        self.post("/frame", json!({ "id": null })).map(drop)
    }

    fn switch_to_alert(&self) -> SurefootResult<()> {
        self.get("/alert/text").map(drop)
    }

    fn window_handles(&self) -> SurefootResult<Vec<String>> {
        let handles = self.get("/window/handles")?;
        Ok(serde_json::from_value(handles)?)
    }

    fn execute_script(&self, script: &str, args: Vec<Value>) -> SurefootResult<Value> {
        self.post("/execute/sync", json!({ "script": script, "args": args }))
    }

    fn accept_alert(&self) -> SurefootResult<()> {
        self.post("/alert/accept", json!({})).map(drop)
    }

    fn alert_text(&self) -> SurefootResult<String> {
        string_from_value(self.get("/alert/text")?)
    }

    fn move_to_element(&self, element: &ElementHandle) -> SurefootResult<()> {
        let actions = json!({
            "actions": [{
                "type": "pointer",
                "id": "surefoot-mouse",
                "parameters": { "pointerType": "mouse" },
                "actions": [{
                    "type": "pointerMove",
                    "duration": 0,
                    "origin": element_json(element),
                    "x": 0,
                    "y": 0
                }]
            }]
        });
        self.post("/actions", actions).map(drop)
    }

    fn set_network_conditions(&self, conditions: &NetworkConditions) -> SurefootResult<()> {
        let body = json!({
            "network_conditions": {
                "offline": conditions.offline,
                "latency": millis(conditions.latency),
                "download_throughput": conditions.download_throughput,
                "upload_throughput": conditions.upload_throughput,
            }
        });
        self.post("/chromium/network_conditions", body).map(drop)
    }
}
