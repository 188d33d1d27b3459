//! Mock driver for unit testing
//!
//! An in-memory session with a scripted DOM: nested frame documents,
//! elements with attributes, queued click/hover failures, alerts, windows
//! and script results. Every command is recorded in a call log, and every
//! implicit-wait change is kept in a history so tests can check that
//! temporary overrides were restored.
//!
//! ```
//! use surefoot::mock::{MockDriver, MockElement};
//! use surefoot::{Driver, Locator, SearchContext};
//!
//! let driver = MockDriver::new();
//! let input = driver.add_element(driver.root(), MockElement::new("input").with_attribute("id", "q"));
//! let found = driver.find_element(&SearchContext::Session, &Locator::id("q")).unwrap();
//! assert_eq!(found, input);
//! ```

use crate::driver::{keys, Driver, ElementHandle, FrameTarget, NetworkConditions, SearchContext};
use crate::locator::{Locator, Strategy};
use crate::result::{SurefootError, SurefootResult};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Identifier of a document (top level or frame content) in the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocId(usize);

impl DocId {
    /// The top-level document
    pub const ROOT: Self = Self(0);
}

/// Failure a scripted command raises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// `ClickIntercepted`
    Intercepted,
    /// `ElementNotInteractable`
    NotInteractable,
    /// `StaleElement`
    Stale,
    /// `Communication`
    Communication,
    /// `NoSuchElement`
    NotFound,
    /// `InvalidSelector`
    InvalidSelector,
    /// `Script`
    Script,
}

impl MockFailure {
    fn into_error(self, element: &str) -> SurefootError {
        match self {
            Self::Intercepted => SurefootError::ClickIntercepted {
                message: format!("{element} is covered by another element"),
            },
            Self::NotInteractable => SurefootError::ElementNotInteractable {
                message: format!("{element} has no size and location"),
            },
            Self::Stale => SurefootError::StaleElement {
                element: element.to_string(),
            },
            Self::Communication => SurefootError::communication("connection reset by peer"),
            Self::NotFound => SurefootError::no_such_element(element),
            Self::InvalidSelector => SurefootError::InvalidSelector {
                selector: element.to_string(),
                message: "not a valid selector".to_string(),
            },
            Self::Script => SurefootError::Script {
                message: "ReferenceError".to_string(),
            },
        }
    }
}

/// Element description used to populate the mock DOM
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    tag: String,
    attributes: HashMap<String, String>,
    text: String,
    aliases: Vec<String>,
    parent: Option<ElementHandle>,
    rejected_inputs: usize,
}

impl MockElement {
    /// Element with the given tag name
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Extra CSS selector this element matches verbatim
    #[must_use]
    pub fn matching(mut self, css: impl Into<String>) -> Self {
        self.aliases.push(css.into());
        self
    }

    /// Nest under another element of the same document
    #[must_use]
    pub fn under(mut self, parent: &ElementHandle) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Garble typed text for the first `attempts` `send_keys` calls
    #[must_use]
    pub const fn rejecting_input(mut self, attempts: usize) -> Self {
        self.rejected_inputs = attempts;
        self
    }
}

#[derive(Debug)]
struct Node {
    doc: DocId,
    element: MockElement,
    value: String,
    frame_doc: Option<DocId>,
    attached: bool,
    click_failures: VecDeque<MockFailure>,
    hover_failures: usize,
}

#[derive(Debug)]
struct MockState {
    next_doc: usize,
    nodes: Vec<(ElementHandle, Node)>,
    frame_path: Vec<DocId>,
    implicit_wait: Duration,
    implicit_history: Vec<Duration>,
    alert: Option<String>,
    alert_after_probes: Option<(usize, String)>,
    windows: Vec<String>,
    current_window: String,
    script_results: VecDeque<serde_json::Value>,
    find_failures: VecDeque<MockFailure>,
    network: Option<NetworkConditions>,
    current_url: String,
    calls: Vec<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            next_doc: 1,
            nodes: Vec::new(),
            frame_path: vec![DocId::ROOT],
            implicit_wait: Duration::ZERO,
            implicit_history: Vec::new(),
            alert: None,
            alert_after_probes: None,
            windows: vec!["window-0".to_string()],
            current_window: "window-0".to_string(),
            script_results: VecDeque::new(),
            find_failures: VecDeque::new(),
            network: None,
            current_url: String::new(),
            calls: Vec::new(),
        }
    }
}

impl MockState {
    fn current_doc(&self) -> DocId {
        self.frame_path.last().copied().unwrap_or(DocId::ROOT)
    }

    fn node(&self, handle: &ElementHandle) -> Option<&Node> {
        self.nodes.iter().find(|(h, _)| h == handle).map(|(_, n)| n)
    }

    fn node_mut(&mut self, handle: &ElementHandle) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(h, _)| h == handle)
            .map(|(_, n)| n)
    }

    /// Element usable from the current browsing context
    fn live(&mut self, handle: &ElementHandle) -> SurefootResult<&mut Node> {
        let doc = self.current_doc();
        match self.node_mut(handle) {
            Some(node) if node.attached && node.doc == doc => Ok(node),
            _ => Err(SurefootError::StaleElement {
                element: handle.id().to_string(),
            }),
        }
    }

    fn is_descendant(&self, handle: &ElementHandle, ancestor: &ElementHandle) -> bool {
        let mut current = self.node(handle).and_then(|n| n.element.parent.clone());
        while let Some(parent) = current {
            if &parent == ancestor {
                return true;
            }
            current = self.node(&parent).and_then(|n| n.element.parent.clone());
        }
        false
    }

    fn frame_elements(&self, doc: DocId) -> Vec<(ElementHandle, DocId, Option<String>)> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.attached && n.doc == doc)
            .filter_map(|(h, n)| {
                n.frame_doc
                    .map(|inner| (h.clone(), inner, n.element.attributes.get("name").cloned()))
            })
            .collect()
    }
}

fn node_matches(node: &Node, locator: &Locator) -> bool {
    let attr = |name: &str| node.element.attributes.get(name).map(String::as_str);
    let selector = locator.selector();
    let alias = node.element.aliases.iter().any(|a| a == selector);
    alias
        || match locator.strategy() {
            Strategy::TagName => node.element.tag == selector,
            Strategy::Id => attr("id") == Some(selector),
            Strategy::Name => attr("name") == Some(selector),
            Strategy::ClassName => attr("class")
                .is_some_and(|c| c.split_whitespace().any(|class| class == selector)),
            Strategy::Css => selector.split(',').map(str::trim).any(|simple| {
                if let Some(id) = simple.strip_prefix('#') {
                    attr("id") == Some(id)
                } else if let Some(class) = simple.strip_prefix('.') {
                    attr("class")
                        .is_some_and(|c| c.split_whitespace().any(|name| name == class))
                } else {
                    node.element.tag == simple
                }
            }),
            Strategy::LinkText => node.element.tag == "a" && node.element.text == selector,
            Strategy::PartialLinkText => node.element.tag == "a" && node.element.text.contains(selector),
            Strategy::XPath => false,
        }
}

/// Scripted in-memory [`Driver`]
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver with an empty top-level document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The top-level document
    #[must_use]
    pub const fn root(&self) -> DocId {
        DocId::ROOT
    }

    /// Add an element to a document
    pub fn add_element(&self, doc: DocId, element: MockElement) -> ElementHandle {
        let mut state = self.state();
        let handle = ElementHandle::new(format!("element-{}", state.nodes.len() + 1));
        let value = element.attributes.get("value").cloned().unwrap_or_default();
        state.nodes.push((
            handle.clone(),
            Node {
                doc,
                element,
                value,
                frame_doc: None,
                attached: true,
                click_failures: VecDeque::new(),
                hover_failures: 0,
            },
        ));
        handle
    }

    /// Add a `<frame>` to a document, returning the element and its content
    pub fn add_frame(&self, doc: DocId, name: Option<&str>) -> (ElementHandle, DocId) {
        self.add_frame_element(doc, "frame", name)
    }

    /// Add an `<iframe>` to a document, returning the element and its content
    pub fn add_iframe(&self, doc: DocId, name: Option<&str>) -> (ElementHandle, DocId) {
        self.add_frame_element(doc, "iframe", name)
    }

    fn add_frame_element(
        &self,
        doc: DocId,
        tag: &str,
        name: Option<&str>,
    ) -> (ElementHandle, DocId) {
        let mut frame = MockElement::new(tag);
        if let Some(name) = name {
            frame = frame.with_attribute("name", name);
        }
        let handle = self.add_element(doc, frame);
        let mut state = self.state();
        let inner = DocId(state.next_doc);
        state.next_doc += 1;
        if let Some(node) = state.node_mut(&handle) {
            node.frame_doc = Some(inner);
        }
        (handle, inner)
    }

    /// Detach an element; later use raises `StaleElement`
    pub fn remove_element(&self, element: &ElementHandle) {
        if let Some(node) = self.state().node_mut(element) {
            node.attached = false;
        }
    }

    /// Replace rendered text
    pub fn set_text(&self, element: &ElementHandle, text: impl Into<String>) {
        if let Some(node) = self.state().node_mut(element) {
            node.element.text = text.into();
        }
    }

    /// Replace the form value
    pub fn set_value(&self, element: &ElementHandle, value: impl Into<String>) {
        if let Some(node) = self.state().node_mut(element) {
            node.value = value.into();
        }
    }

    /// Current form value, regardless of browsing context
    #[must_use]
    pub fn value_of(&self, element: &ElementHandle) -> Option<String> {
        self.state().node(element).map(|n| n.value.clone())
    }

    /// Queue failures raised by the next clicks on the element
    pub fn fail_clicks(&self, element: &ElementHandle, failures: impl IntoIterator<Item = MockFailure>) {
        if let Some(node) = self.state().node_mut(element) {
            node.click_failures.extend(failures);
        }
    }

    /// Make the next `count` hovers over the element fail
    pub fn fail_hovers(&self, element: &ElementHandle, count: usize) {
        if let Some(node) = self.state().node_mut(element) {
            node.hover_failures = count;
        }
    }

    /// Queue failures raised by the next find commands
    pub fn fail_finds(&self, failures: impl IntoIterator<Item = MockFailure>) {
        self.state().find_failures.extend(failures);
    }

    /// Open an alert immediately
    pub fn open_alert(&self, text: impl Into<String>) {
        self.state().alert = Some(text.into());
    }

    /// Open an alert once it has been probed `probes` times without success
    pub fn open_alert_after(&self, probes: usize, text: impl Into<String>) {
        self.state().alert_after_probes = Some((probes, text.into()));
    }

    /// Whether an alert is open
    #[must_use]
    pub fn alert_open(&self) -> bool {
        self.state().alert.is_some()
    }

    /// Queue script results; the last one repeats
    pub fn push_script_results(&self, results: impl IntoIterator<Item = serde_json::Value>) {
        self.state().script_results.extend(results);
    }

    /// Open another window
    pub fn add_window(&self, handle: impl Into<String>) {
        self.state().windows.push(handle.into());
    }

    /// Handle of the focused window
    #[must_use]
    pub fn current_window(&self) -> String {
        self.state().current_window.clone()
    }

    /// Set the session implicit wait without recording it
    pub fn preset_implicit_wait(&self, wait: Duration) {
        self.state().implicit_wait = wait;
    }

    /// Every value passed to `set_implicit_wait`, in order
    #[must_use]
    pub fn implicit_wait_history(&self) -> Vec<Duration> {
        self.state().implicit_history.clone()
    }

    /// Path of documents from the top level to the current frame
    #[must_use]
    pub fn frame_path(&self) -> Vec<DocId> {
        self.state().frame_path.clone()
    }

    /// Document of the current browsing context
    #[must_use]
    pub fn current_document(&self) -> DocId {
        self.state().current_doc()
    }

    /// Last network conditions applied
    #[must_use]
    pub fn network_conditions(&self) -> Option<NetworkConditions> {
        self.state().network.clone()
    }

    /// Last URL navigated to
    #[must_use]
    pub fn current_url(&self) -> String {
        self.state().current_url.clone()
    }

    /// Call history for verification
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of recorded calls starting with `prefix`
    #[must_use]
    pub fn call_count(&self, prefix: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.call_count(prefix) > 0
    }

    /// Calls that targeted the element
    #[must_use]
    pub fn calls_on(&self, element: &ElementHandle) -> Vec<String> {
        let suffix = format!(":{}", element.id());
        self.state()
            .calls
            .iter()
            .filter(|c| c.ends_with(&suffix))
            .cloned()
            .collect()
    }
}

impl Driver for MockDriver {
    fn navigate(&self, url: &str) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("navigate:{url}"));
        state.current_url = url.to_string();
        state.frame_path.truncate(1);
        Ok(())
    }

    fn find_elements(
        &self,
        context: &SearchContext,
        locator: &Locator,
    ) -> SurefootResult<Vec<ElementHandle>> {
        let mut state = self.state();
        state.calls.push(format!("find_elements:{locator}"));
        if let Some(failure) = state.find_failures.pop_front() {
            return Err(failure.into_error(locator.selector()));
        }
        if let SearchContext::Element(scope) = context {
            let _ = state.live(scope)?;
        }
        let doc = state.current_doc();
        let found = state
            .nodes
            .iter()
            .filter(|(_, n)| n.attached && n.doc == doc && node_matches(n, locator))
            .filter(|(h, _)| match context {
                SearchContext::Session => true,
                SearchContext::Element(scope) => state.is_descendant(h, scope),
            })
            .map(|(h, _)| h.clone())
            .collect();
        Ok(found)
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> SurefootResult<Option<String>> {
        let mut state = self.state();
        state.calls.push(format!("attribute:{name}:{element}"));
        let node = state.live(element)?;
        if name == "value" {
            return Ok(Some(node.value.clone()));
        }
        Ok(node.element.attributes.get(name).cloned())
    }

    fn text(&self, element: &ElementHandle) -> SurefootResult<String> {
        let mut state = self.state();
        state.calls.push(format!("text:{element}"));
        Ok(state.live(element)?.element.text.clone())
    }

    fn click(&self, element: &ElementHandle) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("click:{element}"));
        let node = state.live(element)?;
        match node.click_failures.pop_front() {
            Some(failure) => Err(failure.into_error(element.id())),
            None => Ok(()),
        }
    }

    fn send_keys(&self, element: &ElementHandle, keys: &str) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("send_keys:{element}"));
        let node = state.live(element)?;
        match keys {
            keys::END => {}
            keys::BACKSPACE => {
                if node.value.pop().is_none() {
                    let _ = node.element.text.pop();
                }
            }
            typed if node.element.rejected_inputs > 0 => {
                node.element.rejected_inputs -= 1;
                // drop the last keystroke, as a racing page script would
                let mut chars = typed.chars();
                let _ = chars.next_back();
                node.value.push_str(chars.as_str());
            }
            typed => node.value.push_str(typed),
        }
        Ok(())
    }

    fn clear(&self, element: &ElementHandle) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("clear:{element}"));
        state.live(element)?.value.clear();
        Ok(())
    }

    fn implicit_wait(&self) -> SurefootResult<Duration> {
        Ok(self.state().implicit_wait)
    }

    fn set_implicit_wait(&self, wait: Duration) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("set_implicit_wait:{}", wait.as_millis()));
        state.implicit_wait = wait;
        state.implicit_history.push(wait);
        Ok(())
    }

    fn switch_to_window(&self, handle: &str) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("switch_to_window:{handle}"));
        if !state.windows.iter().any(|w| w == handle) {
            return Err(SurefootError::NoSuchWindow {
                window: handle.to_string(),
            });
        }
        state.current_window = handle.to_string();
        state.frame_path.truncate(1);
        Ok(())
    }

    fn switch_to_frame(&self, target: &FrameTarget) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("switch_to_frame:{target}"));
        let frames = state.frame_elements(state.current_doc());
        let inner = match target {
            FrameTarget::Name(name) => frames
                .iter()
                .find(|(_, _, n)| n.as_deref() == Some(name.as_str()))
                .map(|(_, doc, _)| *doc),
            FrameTarget::Index(i) => frames.get(usize::from(*i)).map(|(_, doc, _)| *doc),
            FrameTarget::Element(el) => {
                let _ = state.live(el)?;
                frames.iter().find(|(h, _, _)| h == el).map(|(_, doc, _)| *doc)
            }
        };
        let inner = inner.ok_or_else(|| SurefootError::NoSuchFrame {
            frame: target.to_string(),
        })?;
        state.frame_path.push(inner);
        Ok(())
    }

    fn switch_to_parent_frame(&self) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push("switch_to_parent_frame".to_string());
        if state.frame_path.len() > 1 {
            let _ = state.frame_path.pop();
        }
        Ok(())
    }

    fn switch_to_default_content(&self) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push("switch_to_default_content".to_string());
        state.frame_path.truncate(1);
        Ok(())
    }

    fn switch_to_alert(&self) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push("switch_to_alert".to_string());
        if state.alert.is_none() {
            if let Some((remaining, text)) = state.alert_after_probes.take() {
                if remaining == 0 {
                    state.alert = Some(text);
                } else {
                    state.alert_after_probes = Some((remaining - 1, text));
                }
            }
        }
        if state.alert.is_some() {
            Ok(())
        } else {
            Err(SurefootError::NoAlertPresent)
        }
    }

    fn window_handles(&self) -> SurefootResult<Vec<String>> {
        let mut state = self.state();
        state.calls.push("window_handles".to_string());
        Ok(state.windows.clone())
    }

    fn execute_script(
        &self,
        script: &str,
        _args: Vec<serde_json::Value>,
    ) -> SurefootResult<serde_json::Value> {
        let mut state = self.state();
        state.calls.push(format!("execute_script:{script}"));
        let result = if state.script_results.len() > 1 {
            state.script_results.pop_front()
        } else {
            state.script_results.front().cloned()
        };
        Ok(result.unwrap_or(serde_json::Value::Null))
    }

    fn accept_alert(&self) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push("accept_alert".to_string());
        state.alert.take().map(|_| ()).ok_or(SurefootError::NoAlertPresent)
    }

    fn alert_text(&self) -> SurefootResult<String> {
        let mut state = self.state();
        state.calls.push("alert_text".to_string());
        state.alert.clone().ok_or(SurefootError::NoAlertPresent)
    }

    fn move_to_element(&self, element: &ElementHandle) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("move_to_element:{element}"));
        let node = state.live(element)?;
        if node.hover_failures > 0 {
            node.hover_failures -= 1;
            return Err(SurefootError::Protocol {
                error: "move target out of bounds".to_string(),
                message: format!("{element} is outside the viewport"),
            });
        }
        Ok(())
    }

    fn set_network_conditions(&self, conditions: &NetworkConditions) -> SurefootResult<()> {
        let mut state = self.state();
        state.calls.push(format!("set_network_conditions:{}", conditions.offline));
        state.network = Some(conditions.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod dom_tests {
        use super::*;

        #[test]
        fn test_find_by_id_and_tag() {
            let driver = MockDriver::new();
            let a = driver.add_element(driver.root(), MockElement::new("input").with_attribute("id", "a"));
            let b = driver.add_element(driver.root(), MockElement::new("input"));

            let by_id = driver
                .find_elements(&SearchContext::Session, &Locator::css("#a"))
                .unwrap();
            assert_eq!(by_id, vec![a.clone()]);

            let by_tag = driver
                .find_elements(&SearchContext::Session, &Locator::tag_name("input"))
                .unwrap();
            assert_eq!(by_tag, vec![a, b]);
        }

        #[test]
        fn test_find_scoped_to_element() {
            let driver = MockDriver::new();
            let form = driver.add_element(driver.root(), MockElement::new("form"));
            let inside = driver.add_element(driver.root(), MockElement::new("input").under(&form));
            let _outside = driver.add_element(driver.root(), MockElement::new("input"));

            let found = driver
                .find_elements(&SearchContext::Element(form), &Locator::tag_name("input"))
                .unwrap();
            assert_eq!(found, vec![inside]);
        }

        #[test]
        fn test_removed_element_is_stale() {
            let driver = MockDriver::new();
            let el = driver.add_element(driver.root(), MockElement::new("div"));
            driver.remove_element(&el);
            assert!(matches!(
                driver.text(&el),
                Err(SurefootError::StaleElement { .. })
            ));
        }

        #[test]
        fn test_element_from_other_frame_is_stale() {
            let driver = MockDriver::new();
            let (_, inner) = driver.add_frame(driver.root(), Some("f"));
            let el = driver.add_element(inner, MockElement::new("div"));
            assert!(driver.click(&el).is_err());

            driver.switch_to_frame(&FrameTarget::Name("f".into())).unwrap();
            assert!(driver.click(&el).is_ok());
        }

        #[test]
        fn test_find_failure_queue() {
            let driver = MockDriver::new();
            driver.fail_finds([MockFailure::InvalidSelector]);
            assert!(driver
                .find_elements(&SearchContext::Session, &Locator::css("x"))
                .is_err());
            assert!(driver
                .find_elements(&SearchContext::Session, &Locator::css("x"))
                .unwrap()
                .is_empty());
        }
    }

    mod frame_tests {
        use super::*;

        #[test]
        fn test_switch_by_name_index_and_parent() {
            let driver = MockDriver::new();
            let (_, a) = driver.add_frame(driver.root(), Some("a"));
            let (_, b) = driver.add_frame(driver.root(), Some("b"));

            driver.switch_to_frame(&FrameTarget::Index(1)).unwrap();
            assert_eq!(driver.current_document(), b);
            driver.switch_to_parent_frame().unwrap();
            driver.switch_to_frame(&FrameTarget::Name("a".into())).unwrap();
            assert_eq!(driver.frame_path(), vec![DocId::ROOT, a]);
            driver.switch_to_default_content().unwrap();
            assert_eq!(driver.current_document(), DocId::ROOT);
        }

        #[test]
        fn test_unknown_frame() {
            let driver = MockDriver::new();
            let err = driver
                .switch_to_frame(&FrameTarget::Name("nope".into()))
                .unwrap_err();
            assert!(matches!(err, SurefootError::NoSuchFrame { .. }));
        }

        #[test]
        fn test_parent_of_top_level_is_top_level() {
            let driver = MockDriver::new();
            driver.switch_to_parent_frame().unwrap();
            assert_eq!(driver.frame_path(), vec![DocId::ROOT]);
        }
    }

    mod input_tests {
        use super::*;

        #[test]
        fn test_send_keys_and_backspace() {
            let driver = MockDriver::new();
            let el = driver.add_element(driver.root(), MockElement::new("input"));
            driver.send_keys(&el, "abc").unwrap();
            driver.send_keys(&el, keys::BACKSPACE).unwrap();
            driver.send_keys(&el, keys::END).unwrap();
            assert_eq!(driver.value(&el).unwrap().as_deref(), Some("ab"));
        }

        #[test]
        fn test_rejected_input_drops_last_char() {
            let driver = MockDriver::new();
            let el = driver.add_element(driver.root(), MockElement::new("input").rejecting_input(1));
            driver.send_keys(&el, "hello").unwrap();
            assert_eq!(driver.value_of(&el).as_deref(), Some("hell"));
            driver.clear(&el).unwrap();
            driver.send_keys(&el, "hello").unwrap();
            assert_eq!(driver.value_of(&el).as_deref(), Some("hello"));
        }

        #[test]
        fn test_click_failures_drain() {
            let driver = MockDriver::new();
            let el = driver.add_element(driver.root(), MockElement::new("button"));
            driver.fail_clicks(&el, [MockFailure::Intercepted]);
            assert!(matches!(
                driver.click(&el),
                Err(SurefootError::ClickIntercepted { .. })
            ));
            assert!(driver.click(&el).is_ok());
            assert_eq!(driver.calls_on(&el).len(), 2);
        }
    }

    mod session_tests {
        use super::*;

        #[test]
        fn test_alert_after_probes() {
            let driver = MockDriver::new();
            driver.open_alert_after(2, "hi");
            assert!(driver.switch_to_alert().is_err());
            assert!(driver.switch_to_alert().is_err());
            assert!(driver.switch_to_alert().is_ok());
            assert_eq!(driver.alert_text().unwrap(), "hi");
            driver.accept_alert().unwrap();
            assert!(!driver.alert_open());
        }

        #[test]
        fn test_script_results_last_repeats() {
            let driver = MockDriver::new();
            driver.push_script_results([serde_json::json!("loading"), serde_json::json!("complete")]);
            assert_eq!(driver.execute_script("x", vec![]).unwrap(), "loading");
            assert_eq!(driver.execute_script("x", vec![]).unwrap(), "complete");
            assert_eq!(driver.execute_script("x", vec![]).unwrap(), "complete");
        }

        #[test]
        fn test_implicit_wait_history() {
            let driver = MockDriver::new();
            driver.preset_implicit_wait(Duration::from_secs(3));
            driver.set_implicit_wait(Duration::from_millis(10)).unwrap();
            assert_eq!(driver.implicit_wait().unwrap(), Duration::from_millis(10));
            assert_eq!(driver.implicit_wait_history(), vec![Duration::from_millis(10)]);
        }

        #[test]
        fn test_navigate_records_url() {
            let driver = MockDriver::new();
            driver.navigate("https://example.com").unwrap();
            assert_eq!(driver.current_url(), "https://example.com");
            assert!(driver.was_called("navigate"));
        }

        #[test]
        fn test_windows() {
            let driver = MockDriver::new();
            driver.add_window("popup");
            driver.switch_to_window("popup").unwrap();
            assert_eq!(driver.current_window(), "popup");
            assert!(driver.switch_to_window("missing").is_err());
        }
    }
}
