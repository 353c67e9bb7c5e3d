//! Stream wrapper that keeps a tracing span entered while the stream is polled.
//!
//! Without this, a span created next to the stream would be dropped right
//! after the call returns, losing the instrumentation for the actual
//! streaming duration.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use daydream_types::llm::{LlmError, StreamEvent};

use super::provider::EventStream;

pub struct StreamInSpan {
    inner: EventStream,
    span: tracing::Span,
}

impl StreamInSpan {
    pub fn new(inner: EventStream, span: tracing::Span) -> Self {
        Self { inner, span }
    }
}

impl Stream for StreamInSpan {
    type Item = Result<StreamEvent, LlmError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Both fields are Unpin, so the wrapper is too.
        let this = self.get_mut();
        let _enter = this.span.enter();
        this.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_stream_in_span_passes_items_through() {
        let inner: EventStream = Box::pin(futures_util::stream::iter(vec![
            Ok(StreamEvent::Connected),
            Ok(StreamEvent::TextDelta {
                text: "glass".to_string(),
            }),
            Ok(StreamEvent::Done),
        ]));
        let wrapped = StreamInSpan::new(inner, tracing::info_span!("test"));
        let events: Vec<_> = wrapped.map(|r| r.unwrap()).collect().await;
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            StreamEvent::TextDelta {
                text: "glass".to_string()
            }
        );
    }
}
