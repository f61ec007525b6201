use crate::support::*;
use async_trait::async_trait;
use graphql_kernel::ast::OperationType;
use graphql_kernel::ast::Value;
use graphql_kernel::execute;
use graphql_kernel::execution::FieldResolver;
use graphql_kernel::execution::Resolved;
use graphql_kernel::execution::ResolverContext;
use graphql_kernel::execution::ResolverError;
use graphql_kernel::JsonMap;
use graphql_kernel::JsonValue;
use graphql_kernel::Schema;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::task::Context;
use std::task::Poll;

/// A future that is not ready on its first poll;
/// enough to observe interleaving without a timer
pub struct YieldNow(bool);

impl YieldNow {
    pub fn new() -> Self {
        Self(false)
    }
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Records the order resolvers start and finish in,
/// reached through the opaque user context
#[derive(Default)]
struct Trace(Mutex<Vec<String>>);

impl Trace {
    fn record(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into())
    }

    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Resolves to a fixed value after yielding a configurable number of times,
/// recording start and end into the [`Trace`] context
struct TracedResolver {
    value: i32,
    yields: usize,
}

#[async_trait]
impl FieldResolver for TracedResolver {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError> {
        let trace = ctx
            .context
            .downcast_ref::<Trace>()
            .ok_or_else(|| ResolverError::new("missing trace context"))?;
        trace.record(format!("start {}", ctx.field_name));
        for _ in 0..self.yields {
            YieldNow::new().await;
        }
        trace.record(format!("end {}", ctx.field_name));
        Ok(Resolved::value(self.value))
    }
}

/// Resolves to the `by` argument added to the parent's `counter` entry
struct AddResolver;

#[async_trait]
impl FieldResolver for AddResolver {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError> {
        let by = ctx.arguments.get("by").and_then(JsonValue::as_i64).unwrap_or(0);
        let counter = ctx
            .parent
            .as_object()
            .and_then(|parent| parent.get("counter"))
            .and_then(JsonValue::as_i64)
            .unwrap_or(0);
        Ok(Resolved::value(counter + by))
    }
}

struct FailingResolver;

#[async_trait]
impl FieldResolver for FailingResolver {
    async fn resolve(&self, _ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError> {
        Err(ResolverError::new("boom"))
    }
}

fn str_schema() -> Schema {
    Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("str", named("String"))],
    )]))
    .unwrap()
}

fn response_json(response: &graphql_kernel::Response) -> serde_json::Value {
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn default_resolver_reads_the_root_value_and_string_serializes_numbers() {
    let schema = str_schema();
    let document = doc(vec![query(vec![sel("str")])]);
    let root = json(json!({"str": 123}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(
        response_json(&response),
        json!({"data": {"str": "123"}})
    );
}

#[tokio::test]
async fn missing_entries_resolve_to_null() {
    let schema = str_schema();
    let document = doc(vec![query(vec![sel("str")])]);
    let root = json(json!({}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response_json(&response), json!({"data": {"str": null}}));
}

#[tokio::test]
async fn null_for_a_non_null_field_propagates_to_the_response_root() {
    let schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("req", named("Int").non_null())],
    )]))
    .unwrap();
    let document = doc(vec![query(vec![sel("req")])]);
    let root = json(json!({"req": null}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response.data, None);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].path.len(), 1);
}

#[tokio::test]
async fn a_failing_resolver_nullifies_only_its_field() {
    let mut schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("ok", named("Int")), field("bad", named("Int"))],
    )]))
    .unwrap();
    schema.attach_resolver("Query", "bad", Arc::new(FailingResolver));
    let document = doc(vec![query(vec![sel("ok"), sel("bad")])]);
    let root = json(json!({"ok": 1}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(
        response.data,
        Some(json_map(json!({"ok": 1, "bad": null})))
    );
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("boom"));
}

#[tokio::test]
async fn response_order_follows_selection_order_not_completion_order() {
    let mut schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("slow", named("Int")), field("fast", named("Int"))],
    )]))
    .unwrap();
    schema.attach_resolver("Query", "slow", Arc::new(TracedResolver { value: 1, yields: 5 }));
    schema.attach_resolver("Query", "fast", Arc::new(TracedResolver { value: 2, yields: 0 }));
    let document = doc(vec![query(vec![sel("slow"), sel("fast")])]);
    let trace = Trace::default();
    let root = JsonValue::Null;
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &trace).await;
    // `fast` finished first but the response still lists `slow` first
    let data = serde_json::to_string(&response.data).unwrap();
    assert_eq!(data, r#"{"slow":1,"fast":2}"#);
    let events = trace.events();
    assert_eq!(events.first().map(String::as_str), Some("start slow"));
    assert!(
        events.iter().position(|event| event == "end fast")
            < events.iter().position(|event| event == "end slow"),
        "fast must complete before slow: {events:?}"
    );
}

#[tokio::test]
async fn mutation_fields_run_strictly_in_order() {
    let mut schema = Schema::from_document(&doc(vec![
        object_type("Query", &[], vec![field("q", named("Int"))]),
        object_type(
            "Mutation",
            &[],
            vec![field("first", named("Int")), field("second", named("Int"))],
        ),
    ]))
    .unwrap();
    schema.attach_resolver(
        "Mutation",
        "first",
        Arc::new(TracedResolver { value: 1, yields: 3 }),
    );
    schema.attach_resolver(
        "Mutation",
        "second",
        Arc::new(TracedResolver { value: 2, yields: 0 }),
    );
    let document = doc(vec![mutation(vec![sel("first"), sel("second")])]);
    let trace = Trace::default();
    let root = JsonValue::Null;
    execute(&schema, &document, None, &JsonMap::new(), &root, &trace).await;
    // `second` would finish first if the fields overlapped
    assert_eq!(
        trace.events(),
        ["start first", "end first", "start second", "end second"]
    );
}

#[tokio::test]
async fn skip_and_include_directives_honor_variables() {
    let schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![
            field("a", named("Int")),
            field("b", named("Int")),
            field("c", named("Int")),
        ],
    )]))
    .unwrap();
    let document = doc(vec![operation(
        OperationType::Query,
        None,
        vec![var_def("yes", named("Boolean").non_null())],
        vec![
            sel_directives("a", vec![directive("skip", vec![("if", Value::Boolean(true))])]),
            sel_directives(
                "b",
                vec![directive("include", vec![("if", Value::Variable(name("yes")))])],
            ),
            sel("c"),
        ],
    )]);
    let root = json(json!({"a": 1, "b": 2, "c": 3}));
    let variables = json_map(json!({"yes": true}));
    let response = execute(&schema, &document, None, &variables, &root, &()).await;
    assert_eq!(response_json(&response), json!({"data": {"b": 2, "c": 3}}));
}

#[tokio::test]
async fn fragments_expand_against_the_runtime_type() {
    let schema = Schema::from_document(&doc(vec![
        interface_type("Pet", &[], vec![field("name", named("String"))]),
        object_type(
            "Dog",
            &["Pet"],
            vec![field("name", named("String")), field("barks", named("Boolean"))],
        ),
        object_type(
            "Cat",
            &["Pet"],
            vec![field("name", named("String")), field("meows", named("Boolean"))],
        ),
        object_type("Query", &[], vec![field("pet", named("Pet"))]),
    ]))
    .unwrap();
    let document = doc(vec![
        query(vec![sel_sub(
            "pet",
            vec![
                fragment_spread("PetName"),
                inline_fragment(Some("Dog"), vec![sel("barks")]),
                inline_fragment(Some("Cat"), vec![sel("meows")]),
            ],
        )]),
        fragment_def("PetName", "Pet", vec![sel("name")]),
    ]);
    // The value names its concrete type; only the Dog fragment applies
    let root = json(json!({"pet": {"__typename": "Dog", "name": "Rex", "barks": true}}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(
        response_json(&response),
        json!({"data": {"pet": {"name": "Rex", "barks": true}}})
    );
}

#[tokio::test]
async fn typename_resolves_on_every_object_type() {
    let schema = str_schema();
    let document = doc(vec![query(vec![sel("__typename"), sel("str")])]);
    let root = json(json!({"str": "hi"}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(
        response_json(&response),
        json!({"data": {"__typename": "Query", "str": "hi"}})
    );
}

#[tokio::test]
async fn arguments_are_coerced_with_defaults_and_variables() {
    let mut schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field_with_args(
            "add",
            named("Int"),
            vec![arg_with_default("by", named("Int"), Value::Int(10))],
        )],
    )]))
    .unwrap();
    schema.attach_resolver("Query", "add", Arc::new(AddResolver));
    let root = json(json!({"counter": 30}));

    // Literal argument
    let document = doc(vec![query(vec![sel_args("add", vec![("by", Value::Int(7))])])]);
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response_json(&response), json!({"data": {"add": 37}}));

    // Defaulted argument
    let document = doc(vec![query(vec![sel("add")])]);
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response_json(&response), json!({"data": {"add": 40}}));

    // Variable argument
    let document = doc(vec![operation(
        OperationType::Query,
        None,
        vec![var_def("by", named("Int"))],
        vec![sel_args("add", vec![("by", Value::Variable(name("by")))])],
    )]);
    let variables = json_map(json!({"by": 12}));
    let response = execute(&schema, &document, None, &variables, &root, &()).await;
    assert_eq!(response_json(&response), json!({"data": {"add": 42}}));
}

#[tokio::test]
async fn variable_coercion_failure_is_a_request_error() {
    let schema = str_schema();
    let document = doc(vec![operation(
        OperationType::Query,
        None,
        vec![var_def("x", named("Int").non_null())],
        vec![sel("str")],
    )]);
    let variables = json_map(json!({"x": "not an int"}));
    let root = JsonValue::Null;
    let response = execute(&schema, &document, None, &variables, &root, &()).await;
    assert_eq!(response.data, None);
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("$x"));
}

#[tokio::test]
async fn operation_selection_failures_are_request_errors() {
    let schema = str_schema();
    let root = JsonValue::Null;

    let no_operations = doc(vec![fragment_def("F", "Query", vec![sel("str")])]);
    let response = execute(&schema, &no_operations, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response.errors.len(), 1);

    let two = doc(vec![
        operation(OperationType::Query, Some("a"), vec![], vec![sel("str")]),
        operation(OperationType::Query, Some("b"), vec![], vec![sel("str")]),
    ]);
    let response = execute(&schema, &two, None, &JsonMap::new(), &root, &()).await;
    assert!(response.errors[0].message.contains("operation name"));

    let response = execute(&schema, &two, Some("c"), &JsonMap::new(), &root, &()).await;
    assert!(response.errors[0].message.contains("`c`"));

    let response = execute(&schema, &two, Some("b"), &JsonMap::new(), &root, &()).await;
    assert!(response.errors.is_empty());
}

#[tokio::test]
async fn enum_results_must_name_a_defined_value() {
    let schema = Schema::from_document(&doc(vec![
        object_type("Query", &[], vec![field("mood", named("Mood"))]),
        enum_type("Mood", &["HAPPY", "GRUMPY"]),
    ]))
    .unwrap();
    let document = doc(vec![query(vec![sel("mood")])]);

    let root = json(json!({"mood": "HAPPY"}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response_json(&response), json!({"data": {"mood": "HAPPY"}}));

    let root = json(json!({"mood": "SLEEPY"}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(response.data, Some(json_map(json!({"mood": null}))));
    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn lists_complete_item_by_item_with_error_paths() {
    let schema = Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("ints", named("Int").list())],
    )]))
    .unwrap();
    let document = doc(vec![query(vec![sel("ints")])]);
    let root = json(json!({"ints": [1, "not an int", 3]}));
    let response = execute(&schema, &document, None, &JsonMap::new(), &root, &()).await;
    assert_eq!(
        response.data,
        Some(json_map(json!({"ints": [1, null, 3]})))
    );
    assert_eq!(response.errors.len(), 1);
    let path = serde_json::to_value(&response.errors[0].path).unwrap();
    assert_eq!(path, json!(["ints", 1]));
}
