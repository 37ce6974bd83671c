//! Mutable state threaded through the plugins of one pipeline run.

use crate::placeholder::PlaceholderAllocator;
use crate::protocol::Message;

/// The markup being transformed, the messages emitted so far and the
/// placeholder allocator for the run.
///
/// A context is created by [`PipelineRunner::process`](crate::PipelineRunner::process)
/// and never outlives it, so placeholder counters restart for every document.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    markup: String,
    messages: Vec<Message>,
    placeholders: PlaceholderAllocator,
}

impl DocumentContext {
    /// Creates a context for `markup` with an allocator salted against it.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let placeholders = PlaceholderAllocator::for_markup(&markup);
        Self {
            markup,
            messages: Vec::new(),
            placeholders,
        }
    }

    /// Returns the current markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Replaces the current markup.
    pub fn set_markup(&mut self, markup: String) {
        self.markup = markup;
    }

    /// Appends a message.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the messages emitted so far.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the messages emitted so far for adjustment.
    pub fn messages_mut(&mut self) -> &mut [Message] {
        &mut self.messages
    }

    /// Returns the run's placeholder allocator.
    #[must_use]
    pub const fn placeholders(&self) -> &PlaceholderAllocator {
        &self.placeholders
    }

    /// Returns the run's placeholder allocator for issuing new tokens.
    pub const fn placeholders_mut(&mut self) -> &mut PlaceholderAllocator {
        &mut self.placeholders
    }

    /// Consumes the context, yielding the final markup and messages.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Message>) {
        (self.markup, self.messages)
    }
}
