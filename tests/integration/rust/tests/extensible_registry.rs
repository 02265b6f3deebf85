//! Extensible classifier scenarios across both crates

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use classifier::{plugins, ExtensibleClassifier, Plugin, PluginOptions, RegistryError};
use host_value::{Realm, Symbol, Value};
use integration_tests::{init_tracing, object_with_methods};
use regex::Regex;

#[test]
fn test_email_rule() {
    init_tracing();
    let email = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex");
    let classifier = ExtensibleClassifier::new(&Realm::new());
    classifier
        .define_type("email", move |v: &Value| {
            v.as_str().is_some_and(|s| email.is_match(s))
        })
        .expect("fresh registry");
    assert_eq!(classifier.classify(&Value::from("a@b.com")), "email");
    assert_eq!(classifier.classify(&Value::from("not-an-email")), "string");
}

#[test]
fn test_rule_precedence_and_fallback() {
    init_tracing();
    let realm = Realm::new();
    let classifier = ExtensibleClassifier::new(&realm);
    let promise = Value::from(realm.new_promise());
    classifier.define_type("first", |v: &Value| v.is_object()).unwrap();
    classifier.define_type("second", |v: &Value| v.is_object()).unwrap();
    assert_eq!(classifier.classify(&promise), "second");
    classifier.remove_type("second").unwrap();
    assert_eq!(classifier.classify(&promise), "first");
    classifier.remove_type("first").unwrap();
    assert_eq!(classifier.classify(&promise), "promise");
}

#[test]
fn test_plugin_atomicity() {
    init_tracing();
    let classifier = ExtensibleClassifier::new(&Realm::new());
    classifier.define_type("dup", |_: &Value| false).unwrap();
    let setups = Arc::new(AtomicUsize::new(0));
    let counter = setups.clone();
    let plugin = Plugin::new("clashing", "0.1.0")
        .with_type("a", |_: &Value| true)
        .with_type("dup", |_: &Value| true)
        .with_type("b", |_: &Value| true)
        .on_setup(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    let before = classifier.list_custom_types();
    assert_eq!(
        classifier.register_plugin(plugin.clone(), PluginOptions::default()),
        Err(RegistryError::DuplicateType("dup".into()))
    );
    assert_eq!(classifier.list_custom_types(), before);
    assert_eq!(setups.load(Ordering::SeqCst), 0);

    classifier
        .register_plugin(plugin, PluginOptions::default().overriding())
        .unwrap();
    assert_eq!(classifier.list_custom_types(), vec!["a", "dup", "b"]);
    assert_eq!(setups.load(Ordering::SeqCst), 1);
}

#[test]
fn test_node_plugin_on_node_realm() {
    init_tracing();
    let realm = Realm::node();
    let classifier = ExtensibleClassifier::new(&realm);
    classifier
        .register_plugin(plugins::node(), PluginOptions::default())
        .unwrap();

    let worker = object_with_methods(&realm, &["postMessage", "terminate"]);
    worker.set("threadId", 1);
    assert_eq!(classifier.classify(&Value::from(worker)), "node.worker");

    // Rules fall back to the base pipeline, which knows Node buffers.
    let buffer = realm.new_buffer(2).unwrap();
    assert_eq!(classifier.classify(&Value::from(buffer)), "buffer");

    classifier.unregister_plugin("node").unwrap();
    assert!(classifier.custom_types().is_empty());
}

#[test]
fn test_react_plugin_with_prefix() {
    init_tracing();
    let realm = Realm::new();
    let classifier = ExtensibleClassifier::new(&realm);
    classifier
        .register_plugin(plugins::react(), PluginOptions::default().with_prefix("ui:"))
        .unwrap();

    let lazy = realm.new_object();
    lazy.set("$$typeof", Symbol::for_key("react.lazy"))
        .set("_payload", Value::Null)
        .set("_init", realm.new_native_function("init"));
    assert_eq!(classifier.classify(&Value::from(lazy)), "ui:react.lazy");
    assert!(classifier.has_type("ui:react.memo"));
    assert!(!classifier.has_type("react.memo"));
}
