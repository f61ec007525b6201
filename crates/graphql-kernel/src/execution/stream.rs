//! The response stream of a subscription: the source event stream wrapped
//! with a mapping step that executes the operation once per event.
//!
//! The mapping is serialized: at most one execution is in flight at a time,
//! so responses are delivered strictly in source order. Dropping the stream
//! cancels the subscription: the in-flight execution future is dropped first,
//! then the source stream, releasing the resources backing it.

use crate::ast;
use crate::execution::context::ExecutionContext;
use crate::execution::engine::execute_operation;
use crate::execution::resolver::SourceEventStream;
use crate::execution::response::GraphQLError;
use crate::execution::JsonMap;
use crate::execution::JsonValue;
use crate::execution::Response;
use crate::Node;
use crate::Schema;
use futures::future::BoxFuture;
use futures::stream::Stream;
use std::any::Any;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

/// A lazy stream of [`Response`]s, one per source event.
///
/// Produced by [`subscribe`][crate::execution::subscribe]. Nothing is
/// executed until the stream is polled; dropping it cancels the subscription.
pub struct SubscriptionStream<'a> {
    // Declared before `source`: cancellation must drop the in-flight
    // execution before the source stream.
    in_flight: Option<BoxFuture<'a, Response>>,
    source: SourceEventStream,
    exec: EventExecution<'a>,
}

impl<'a> std::fmt::Debug for SubscriptionStream<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionStream").finish_non_exhaustive()
    }
}

/// Everything needed to execute the subscription operation against one event:
/// the same schema, document, operation, and variables for every event,
/// with the event payload as the root value.
pub(crate) struct EventExecution<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) document: &'a ast::Document,
    pub(crate) operation: &'a Node<ast::OperationDefinition>,
    pub(crate) variable_values: JsonMap,
    pub(crate) context: &'a (dyn Any + Send + Sync),
}

impl<'a> EventExecution<'a> {
    fn execute_event(&self, event: JsonValue) -> BoxFuture<'a, Response> {
        let schema = self.schema;
        let document = self.document;
        let operation = self.operation;
        let variable_values = self.variable_values.clone();
        let context = self.context;
        Box::pin(async move {
            let ctx = ExecutionContext::for_event(
                schema,
                document,
                operation,
                variable_values,
                &event,
                context,
            );
            execute_operation(&ctx).await
        })
    }
}

impl<'a> SubscriptionStream<'a> {
    pub(crate) fn new(source: SourceEventStream, exec: EventExecution<'a>) -> Self {
        Self {
            in_flight: None,
            source,
            exec,
        }
    }
}

impl Stream for SubscriptionStream<'_> {
    type Item = Response;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            // One execution in flight at a time: the source is only polled
            // again once the previous event's response is delivered,
            // so responses keep source order.
            if let Some(future) = &mut this.in_flight {
                return match future.as_mut().poll(cx) {
                    Poll::Ready(response) => {
                        this.in_flight = None;
                        Poll::Ready(Some(response))
                    }
                    Poll::Pending => Poll::Pending,
                };
            }
            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    this.in_flight = Some(this.exec.execute_event(event));
                }
                Poll::Ready(Some(Err(error))) => {
                    // A failed event is delivered as a response carrying the
                    // error; it does not terminate the subscription.
                    return Poll::Ready(Some(Response::from_error(GraphQLError::new(
                        format!("source stream error: {}", error.message),
                        None,
                    ))));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
