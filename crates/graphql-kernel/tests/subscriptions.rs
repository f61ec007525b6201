use crate::execution::YieldNow;
use crate::support::*;
use async_trait::async_trait;
use futures::stream::Stream;
use futures::StreamExt;
use graphql_kernel::execution::FieldResolver;
use graphql_kernel::execution::RequestErrorKind;
use graphql_kernel::execution::Resolved;
use graphql_kernel::execution::ResolverContext;
use graphql_kernel::execution::ResolverError;
use graphql_kernel::execution::SourceEventStream;
use graphql_kernel::execution::SubscriptionResolver;
use graphql_kernel::subscribe;
use graphql_kernel::JsonMap;
use graphql_kernel::JsonValue;
use graphql_kernel::Schema;
use serde_json::json;
use std::pin::Pin;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

fn subscription_schema() -> Schema {
    Schema::from_document(&doc(vec![
        object_type("Query", &[], vec![field("ok", named("Int"))]),
        object_type("Subscription", &[], vec![field("counter", named("Int"))]),
    ]))
    .unwrap()
}

/// Subscribes by replaying a fixed list of event payloads
struct FixedEvents(Vec<serde_json::Value>);

#[async_trait]
impl SubscriptionResolver for FixedEvents {
    async fn subscribe(&self, _ctx: ResolverContext<'_>) -> Result<SourceEventStream, ResolverError> {
        let events: Vec<Result<JsonValue, ResolverError>> =
            self.0.iter().cloned().map(|event| Ok(json(event))).collect();
        Ok(Box::pin(futures::stream::iter(events)))
    }
}

struct FailingSubscriber;

#[async_trait]
impl SubscriptionResolver for FailingSubscriber {
    async fn subscribe(&self, _ctx: ResolverContext<'_>) -> Result<SourceEventStream, ResolverError> {
        Err(ResolverError::new("stream setup failed"))
    }
}

/// Reads `counter` from the event, yielding a few times for small values
/// so that a later event's execution could overtake it if mapping
/// were not serialized
struct SlowForFirstResolver;

#[async_trait]
impl FieldResolver for SlowForFirstResolver {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError> {
        let counter = ctx
            .parent
            .as_object()
            .and_then(|event| event.get("counter"))
            .and_then(JsonValue::as_i64)
            .unwrap_or(0);
        if counter == 1 {
            for _ in 0..5 {
                YieldNow::new().await;
            }
        }
        Ok(Resolved::value(counter))
    }
}

struct FailingResolver;

#[async_trait]
impl FieldResolver for FailingResolver {
    async fn resolve(&self, _ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError> {
        Err(ResolverError::new("event resolver failed"))
    }
}

/// A source stream that records being dropped,
/// to observe subscription cancellation
struct GuardedEvents {
    events: std::vec::IntoIter<Result<JsonValue, ResolverError>>,
    dropped: Arc<AtomicBool>,
}

impl Stream for GuardedEvents {
    type Item = Result<JsonValue, ResolverError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().events.next())
    }
}

impl Drop for GuardedEvents {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst)
    }
}

struct GuardedSubscriber {
    events: Vec<serde_json::Value>,
    dropped: Arc<AtomicBool>,
}

#[async_trait]
impl SubscriptionResolver for GuardedSubscriber {
    async fn subscribe(&self, _ctx: ResolverContext<'_>) -> Result<SourceEventStream, ResolverError> {
        let events: Vec<Result<JsonValue, ResolverError>> =
            self.events.iter().cloned().map(|event| Ok(json(event))).collect();
        Ok(Box::pin(GuardedEvents {
            events: events.into_iter(),
            dropped: self.dropped.clone(),
        }))
    }
}

#[tokio::test]
async fn selecting_two_root_fields_is_a_single_error_result() {
    let schema = Schema::from_document(&doc(vec![
        object_type("Query", &[], vec![field("ok", named("Int"))]),
        object_type(
            "Subscription",
            &[],
            vec![field("a", named("Int")), field("b", named("Int"))],
        ),
    ]))
    .unwrap();
    let document = doc(vec![subscription(vec![sel("a"), sel("b")])]);
    let root = JsonValue::Null;
    let error = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .expect_err("two root fields must not produce a stream");
    assert!(matches!(
        error.kind(),
        RequestErrorKind::MultiRootSubscription
    ));
    let response = error.into_response();
    assert_eq!(response.data, None);
    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn a_schema_without_subscription_root_cannot_subscribe() {
    let schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("ok", named("Int"))],
    )]))
    .unwrap();
    let document = doc(vec![subscription(vec![sel("counter")])]);
    let root = JsonValue::Null;
    let error = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .expect_err("no subscription root");
    assert!(matches!(error.kind(), RequestErrorKind::NoSubscriptionRoot));
}

#[tokio::test]
async fn an_undefined_root_field_is_reported_by_name() {
    let schema = subscription_schema();
    let document = doc(vec![subscription(vec![sel("nope")])]);
    let root = JsonValue::Null;
    let error = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .expect_err("undefined subscription field");
    assert!(matches!(
        error.kind(),
        RequestErrorKind::UnknownSubscriptionField(name) if name == "nope"
    ));
}

#[tokio::test]
async fn a_plain_value_is_not_an_event_stream() {
    let schema = subscription_schema();
    let document = doc(vec![subscription(vec![sel("counter")])]);
    // The default resolver reads a plain value from the root object
    let root = json(json!({"counter": 5}));
    let error = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .expect_err("a plain value is not iterable");
    assert!(matches!(
        error.kind(),
        RequestErrorKind::SubscriptionNotIterable(name) if name == "counter"
    ));
}

#[tokio::test]
async fn a_failing_subscribe_callback_is_a_single_error_result() {
    let mut schema = subscription_schema();
    schema.attach_subscriber("Subscription", "counter", Arc::new(FailingSubscriber));
    let document = doc(vec![subscription(vec![sel("counter")])]);
    let root = JsonValue::Null;
    let error = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .expect_err("subscribe callback failed");
    assert!(matches!(
        error.kind(),
        RequestErrorKind::SubscriptionFieldError { name, .. } if name == "counter"
    ));
}

#[tokio::test]
async fn events_execute_through_the_operation_in_source_order() {
    let mut schema = subscription_schema();
    schema.attach_subscriber(
        "Subscription",
        "counter",
        Arc::new(FixedEvents(vec![
            json!({"counter": 1}),
            json!({"counter": 2}),
            json!({"counter": 3}),
        ])),
    );
    // The first event resolves slowest; order must still hold
    schema.attach_resolver("Subscription", "counter", Arc::new(SlowForFirstResolver));
    let document = doc(vec![subscription(vec![sel("counter")])]);
    let root = JsonValue::Null;
    let stream = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .unwrap();
    let responses: Vec<_> = stream.collect().await;
    let data: Vec<_> = responses
        .iter()
        .map(|response| serde_json::to_value(&response.data).unwrap())
        .collect();
    assert_eq!(
        data,
        [
            json!({"counter": 1}),
            json!({"counter": 2}),
            json!({"counter": 3}),
        ]
    );
    assert!(responses.iter().all(|response| response.errors.is_empty()));
}

#[tokio::test]
async fn a_source_stream_error_is_an_item_not_the_end() {
    let mut schema = subscription_schema();
    struct MixedEvents;
    #[async_trait]
    impl SubscriptionResolver for MixedEvents {
        async fn subscribe(
            &self,
            _ctx: ResolverContext<'_>,
        ) -> Result<SourceEventStream, ResolverError> {
            Ok(Box::pin(futures::stream::iter(vec![
                Ok(json(json!({"counter": 1}))),
                Err(ResolverError::new("kaboom")),
                Ok(json(json!({"counter": 3}))),
            ])))
        }
    }
    schema.attach_subscriber("Subscription", "counter", Arc::new(MixedEvents));
    let document = doc(vec![subscription(vec![sel("counter")])]);
    let root = JsonValue::Null;
    let stream = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .unwrap();
    let responses: Vec<_> = stream.collect().await;
    assert_eq!(responses.len(), 3);
    assert_eq!(
        serde_json::to_value(&responses[0].data).unwrap(),
        json!({"counter": 1})
    );
    assert_eq!(responses[1].data, None);
    assert!(responses[1].errors[0].message.contains("kaboom"));
    assert_eq!(
        serde_json::to_value(&responses[2].data).unwrap(),
        json!({"counter": 3})
    );
}

#[tokio::test]
async fn a_resolver_error_in_one_event_does_not_end_the_stream() {
    let mut schema = subscription_schema();
    schema.attach_subscriber(
        "Subscription",
        "counter",
        Arc::new(FixedEvents(vec![
            json!({"counter": 1}),
            json!({"counter": 2}),
        ])),
    );
    schema.attach_resolver("Subscription", "counter", Arc::new(FailingResolver));
    let document = doc(vec![subscription(vec![sel("counter")])]);
    let root = JsonValue::Null;
    let stream = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .unwrap();
    let responses: Vec<_> = stream.collect().await;
    assert_eq!(responses.len(), 2);
    for response in &responses {
        assert_eq!(response.data, Some(json_map(json!({"counter": null}))));
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("event resolver failed"));
    }
}

#[tokio::test]
async fn dropping_the_stream_cancels_the_source() {
    let dropped = Arc::new(AtomicBool::new(false));
    let mut schema = subscription_schema();
    schema.attach_subscriber(
        "Subscription",
        "counter",
        Arc::new(GuardedSubscriber {
            events: vec![json!({"counter": 1}), json!({"counter": 2})],
            dropped: dropped.clone(),
        }),
    );
    let document = doc(vec![subscription(vec![sel("counter")])]);
    let root = JsonValue::Null;
    let mut stream = subscribe(&schema, &document, None, &JsonMap::new(), &root, &())
        .await
        .unwrap();
    let first = stream.next().await.expect("one response");
    assert_eq!(
        serde_json::to_value(&first.data).unwrap(),
        json!({"counter": 1})
    );
    assert!(!dropped.load(Ordering::SeqCst));
    drop(stream);
    assert!(dropped.load(Ordering::SeqCst), "source must be released");
}
