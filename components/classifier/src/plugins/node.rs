//! Node.js runtime objects.

use host_value::Value;

use super::{constructed_by, object_with, plain_object};
use crate::capability::{Capability, CapabilitySet};
use crate::extensible::Plugin;
use crate::reflect;

const READABLE: CapabilitySet = CapabilitySet::new(&[
    Capability::present("readable"),
    Capability::callable("read"),
    Capability::present("_readableState"),
]);

const WRITABLE: CapabilitySet = CapabilitySet::new(&[
    Capability::present("writable"),
    Capability::callable("write"),
    Capability::present("_writableState"),
]);

const SERVER: CapabilitySet = CapabilitySet::new(&[
    Capability::callable("listen"),
    Capability::present("close"),
    Capability::present("address"),
]);

const INCOMING_MESSAGE: CapabilitySet = CapabilitySet::new(&[
    Capability::present("headers"),
    Capability::present("method"),
    Capability::present("url"),
]);

const SERVER_RESPONSE: CapabilitySet = CapabilitySet::new(&[
    Capability::present("statusCode"),
    Capability::present("setHeader"),
    Capability::present("writeHead"),
]);

const CHILD_PROCESS: CapabilitySet = CapabilitySet::new(&[
    Capability::present("pid"),
    Capability::callable("kill"),
    Capability::present("stdin"),
    Capability::present("stdout"),
    Capability::present("stderr"),
]);

const WORKER: CapabilitySet = CapabilitySet::new(&[
    Capability::present("threadId"),
    Capability::callable("postMessage"),
    Capability::present("terminate"),
]);

const MESSAGE_PORT: CapabilitySet = CapabilitySet::new(&[
    Capability::callable("postMessage"),
    Capability::present("start"),
    Capability::present("close"),
]);

const URL: CapabilitySet = CapabilitySet::new(&[
    Capability::present("href"),
    Capability::present("protocol"),
    Capability::present("hostname"),
    Capability::present("pathname"),
    Capability::present("search"),
    Capability::present("hash"),
]);

const URL_SEARCH_PARAMS: CapabilitySet = CapabilitySet::new(&[
    Capability::callable("append"),
    Capability::present("get"),
    Capability::present("set"),
    Capability::present("delete"),
]);

const TEXT_ENCODER: CapabilitySet = CapabilitySet::new(&[Capability::callable("encode")]);
const TEXT_DECODER: CapabilitySet = CapabilitySet::new(&[Capability::callable("decode")]);

const ABORT_CONTROLLER: CapabilitySet = CapabilitySet::new(&[
    Capability::present("signal"),
    Capability::callable("abort"),
]);

const PERFORMANCE_OBSERVER: CapabilitySet = CapabilitySet::new(&[
    Capability::callable("observe"),
    Capability::present("disconnect"),
]);

const PERFORMANCE_ENTRY: CapabilitySet = CapabilitySet::new(&[
    Capability::present("name"),
    Capability::present("entryType"),
    Capability::present("startTime"),
    Capability::present("duration"),
]);

fn is_readable_stream(value: &Value) -> bool {
    object_with(value, READABLE)
}

fn is_writable_stream(value: &Value) -> bool {
    object_with(value, WRITABLE)
}

fn is_duplex_stream(value: &Value) -> bool {
    is_readable_stream(value) && is_writable_stream(value)
}

fn is_transform_stream(value: &Value) -> bool {
    is_duplex_stream(value)
        && plain_object(value).is_some_and(|object| reflect::has_callable(object, "_transform"))
}

fn is_incoming_message(value: &Value) -> bool {
    object_with(value, INCOMING_MESSAGE) && is_readable_stream(value)
}

fn is_server_response(value: &Value) -> bool {
    object_with(value, SERVER_RESPONSE) && is_writable_stream(value)
}

fn is_abort_signal(value: &Value) -> bool {
    plain_object(value).is_some_and(|object| {
        matches!(reflect::get(object, "aborted"), Some(Value::Boolean(_)))
    }) && constructed_by(value, "AbortSignal")
}

fn is_performance_entry(value: &Value) -> bool {
    object_with(value, PERFORMANCE_ENTRY)
        && reflect::constructor_name(value).is_some_and(|name| name.contains("Performance"))
}

/// Streams, servers, processes, workers and web-platform classes of Node.js.
///
/// Rules are named `node.<kind>`; later rules take precedence, so a transform
/// stream is reported as `node.transformstream`, not `node.duplexstream`.
pub fn node() -> Plugin {
    Plugin::new("node", "1.0.0")
        .with_type("node.readablestream", is_readable_stream)
        .with_type("node.writablestream", is_writable_stream)
        .with_type("node.duplexstream", is_duplex_stream)
        .with_type("node.transformstream", is_transform_stream)
        .with_type("node.server", |v: &Value| object_with(v, SERVER))
        .with_type("node.incomingmessage", is_incoming_message)
        .with_type("node.serverresponse", is_server_response)
        .with_type("node.childprocess", |v: &Value| object_with(v, CHILD_PROCESS))
        .with_type("node.worker", |v: &Value| object_with(v, WORKER))
        .with_type("node.messageport", |v: &Value| object_with(v, MESSAGE_PORT))
        .with_type("node.url", |v: &Value| {
            object_with(v, URL) && constructed_by(v, "URL")
        })
        .with_type("node.urlsearchparams", |v: &Value| {
            object_with(v, URL_SEARCH_PARAMS) && constructed_by(v, "URLSearchParams")
        })
        .with_type("node.textencoder", |v: &Value| {
            object_with(v, TEXT_ENCODER) && constructed_by(v, "TextEncoder")
        })
        .with_type("node.textdecoder", |v: &Value| {
            object_with(v, TEXT_DECODER) && constructed_by(v, "TextDecoder")
        })
        .with_type("node.abortcontroller", |v: &Value| {
            object_with(v, ABORT_CONTROLLER) && constructed_by(v, "AbortController")
        })
        .with_type("node.abortsignal", is_abort_signal)
        .with_type("node.performanceobserver", |v: &Value| {
            object_with(v, PERFORMANCE_OBSERVER) && constructed_by(v, "PerformanceObserver")
        })
        .with_type("node.performanceentry", is_performance_entry)
}
