//! Clipboard Writer
//!
//! Publishes an inlined export as two simultaneous clipboard representations
//! (`text/html` and `text/plain`). Hosts that cannot write structured
//! clipboard items get a legacy path instead: the markup is placed in an
//! off-screen scratch container, selected, and copied with the host's copy
//! command.
//!
//! Host capabilities are traits so the writer can run against the system
//! clipboard (arboard) or in-memory doubles.

use arboard::Clipboard;
use log::{debug, error, warn};

use crate::dom::{parse_fragment, Element};
use crate::error::{Error, Result};

/// Media type of the markup representation.
pub const MIME_HTML: &str = "text/html";
/// Media type of the plain-text representation.
pub const MIME_PLAIN: &str = "text/plain";

// ─────────────────────────────────────────────────────────────────────────────
// Payload
// ─────────────────────────────────────────────────────────────────────────────

/// The two representations published as one clipboard item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardPayload {
    pub html: String,
    pub plain_text: String,
}

impl ClipboardPayload {
    /// Representations keyed by media type.
    pub fn representations(&self) -> [(&'static str, &str); 2] {
        [(MIME_HTML, &self.html), (MIME_PLAIN, &self.plain_text)]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Capabilities
// ─────────────────────────────────────────────────────────────────────────────

/// A clipboard that accepts one item carrying several representations.
pub trait StructuredClipboard {
    /// Write both representations atomically. Errors mean the host refused.
    fn write(&mut self, payload: &ClipboardPayload) -> Result<()>;
}

/// Identifies a scratch container inside a [`SelectionHost`].
pub type ScratchId = usize;

/// A document with a single selection and a legacy copy command.
pub trait SelectionHost {
    /// Append an off-screen, editable container holding `markup`.
    fn append_scratch(&mut self, markup: &str) -> Result<ScratchId>;

    /// Select the entire contents of a container.
    fn select_contents(&mut self, id: ScratchId) -> Result<()>;

    /// Run the copy-selection command. `Ok(false)` means the host has none.
    fn exec_copy(&mut self) -> Result<bool>;

    /// Drop any active selection range.
    fn clear_selection(&mut self);

    /// Detach a container. Unknown ids are ignored.
    fn remove_scratch(&mut self, id: ScratchId);
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Writer
// ─────────────────────────────────────────────────────────────────────────────

/// Writes export payloads through whichever host capability is available.
///
/// The structured clipboard is preferred. The selection host is only used
/// when no structured clipboard is present; a refused structured write is
/// reported as failure, not retried.
#[derive(Default)]
pub struct ClipboardWriter<'h> {
    structured: Option<&'h mut dyn StructuredClipboard>,
    selection: Option<&'h mut dyn SelectionHost>,
}

impl<'h> ClipboardWriter<'h> {
    /// A writer with no host capabilities. Every write fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_structured(mut self, clipboard: &'h mut dyn StructuredClipboard) -> Self {
        self.structured = Some(clipboard);
        self
    }

    pub fn with_selection(mut self, host: &'h mut dyn SelectionHost) -> Self {
        self.selection = Some(host);
        self
    }

    /// Publish the payload. Returns `true` only if the clipboard was written.
    ///
    /// Never fails: every error is logged and reported as `false`.
    pub fn write(&mut self, payload: &ClipboardPayload) -> bool {
        let result = if let Some(clipboard) = self.structured.as_mut() {
            debug!(
                "Writing {} bytes of HTML to the structured clipboard",
                payload.html.len()
            );
            clipboard.write(payload)
        } else if let Some(host) = self.selection.as_mut() {
            debug!("Structured clipboard unavailable, using selection copy");
            fallback_copy(&mut **host, &payload.html)
        } else {
            Err(Error::ClipboardAccess("No clipboard capability available".to_string()))
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                error!("Copy failed: {}", err);
                false
            }
        }
    }
}

/// Copy `markup` through a scratch container and the host's copy command.
///
/// Whatever happens after the container is attached, the selection is
/// cleared and the container removed before returning.
pub fn fallback_copy(host: &mut dyn SelectionHost, markup: &str) -> Result<()> {
    let id = host.append_scratch(markup)?;
    let copied = host.select_contents(id).and_then(|()| host.exec_copy());
    host.clear_selection();
    host.remove_scratch(id);

    if copied? {
        Ok(())
    } else {
        Err(Error::CopyCommandUnsupported)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// The platform clipboard, via arboard.
///
/// On Linux the clipboard contents are served by the process that set them.
/// A short-lived process should enable [`wait_until_replaced`], which blocks
/// each write until another program takes over the clipboard.
///
/// [`wait_until_replaced`]: SystemClipboard::wait_until_replaced
pub struct SystemClipboard {
    clipboard: Clipboard,
    wait: bool,
}

impl SystemClipboard {
    /// Open the platform clipboard.
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().map_err(|e| Error::ClipboardAccess(e.to_string()))?;
        Ok(Self {
            clipboard,
            wait: false,
        })
    }

    /// Keep serving written contents until they are replaced. Only has an
    /// effect on Linux.
    pub fn wait_until_replaced(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }
}

impl StructuredClipboard for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write(&mut self, payload: &ClipboardPayload) -> Result<()> {
        use arboard::SetExtLinux;

        let html = payload.html.as_str();
        let text = Some(payload.plain_text.as_str());
        if self.wait {
            log::info!("Serving clipboard contents until they are replaced");
            self.clipboard.set().wait().html(html, text)?;
        } else {
            self.clipboard.set_html(html, text)?;
        }
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn write(&mut self, payload: &ClipboardPayload) -> Result<()> {
        self.clipboard
            .set_html(payload.html.as_str(), Some(payload.plain_text.as_str()))?;
        Ok(())
    }
}

/// The command a [`ScratchDocument`] runs to copy its selection.
pub trait CopyCommand {
    fn copy(&mut self, selected: &Element) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Scratch Document
// ─────────────────────────────────────────────────────────────────────────────

const SCRATCH_ID_ATTR: &str = "data-scratch-id";
const SCRATCH_STYLE: &str = "position: fixed; left: -9999px; top: 0px;";

/// An owned document body with one selection, implementing [`SelectionHost`].
///
/// Without a copy command, [`exec_copy`](SelectionHost::exec_copy) reports
/// the command as unsupported.
pub struct ScratchDocument {
    body: Element,
    selection: Option<ScratchId>,
    next_id: ScratchId,
    copy_command: Option<Box<dyn CopyCommand>>,
}

impl Default for ScratchDocument {
    fn default() -> Self {
        Self {
            body: Element::new("body"),
            selection: None,
            next_id: 0,
            copy_command: None,
        }
    }
}

impl ScratchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the command run by `exec_copy`.
    pub fn with_copy_command(mut self, command: Box<dyn CopyCommand>) -> Self {
        self.copy_command = Some(command);
        self
    }

    /// The document body, including any attached scratch containers.
    pub fn body(&self) -> &Element {
        &self.body
    }

    /// The container currently selected, if any.
    pub fn selection(&self) -> Option<ScratchId> {
        self.selection
    }

    fn container(&self, id: ScratchId) -> Option<&Element> {
        let id = id.to_string();
        self.body
            .child_elements()
            .find(|c| c.attr(SCRATCH_ID_ATTR) == Some(id.as_str()))
    }
}

impl SelectionHost for ScratchDocument {
    fn append_scratch(&mut self, markup: &str) -> Result<ScratchId> {
        let id = self.next_id;
        self.next_id += 1;

        let container = Element::wrap("div", parse_fragment(markup))
            .with_attr("style", SCRATCH_STYLE)
            .with_attr("contenteditable", "true")
            .with_attr(SCRATCH_ID_ATTR, &id.to_string());
        self.body.children.push(container.into());
        debug!("Attached scratch container {}", id);
        Ok(id)
    }

    fn select_contents(&mut self, id: ScratchId) -> Result<()> {
        if self.container(id).is_none() {
            return Err(Error::ScratchMissing(id));
        }
        self.selection = Some(id);
        Ok(())
    }

    fn exec_copy(&mut self) -> Result<bool> {
        let Some(id) = self.selection else {
            return Err(Error::Application("No active selection to copy".to_string()));
        };
        let Some(container) = self.container(id).cloned() else {
            return Err(Error::ScratchMissing(id));
        };
        match self.copy_command.as_mut() {
            Some(command) => {
                command.copy(&container)?;
                Ok(true)
            }
            None => {
                warn!("Copy command is not available in this document");
                Ok(false)
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn remove_scratch(&mut self, id: ScratchId) {
        let id = id.to_string();
        self.body.children.retain(|node| {
            node.as_element()
                .map_or(true, |c| c.attr(SCRATCH_ID_ATTR) != Some(id.as_str()))
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
