//! Realms: intrinsic prototypes, constructors and the global object.
//!
//! A [`Realm`] is one instance of the host's built-in world. Two realms never
//! share intrinsics, so a `Map` made in one realm is not `instanceof` the other
//! realm's `Map.prototype`. The realm flavour decides which host-specific
//! built-ins exist (Node's `Buffer`, the browser DOM).
//!
//! Intrinsic constructors carry a `name` but no `prototype` back-reference,
//! which keeps the intrinsic object graph free of reference cycles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{HostError, HostResult};
use crate::object::{
    FunctionData, FunctionKind, GetTrap, Object, ObjectClass, Property, ProxyData, TypedArrayKind,
};
use crate::symbol::Symbol;
use crate::value::{PropertyKey, Value};

/// Which host environment a realm emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostFlavor {
    /// Plain ECMAScript built-ins only
    #[default]
    Bare,
    /// Node.js: `Buffer` and a global tagged `global`
    Node,
    /// Browser: DOM prototypes, `window` and `document`
    Browser,
}

/// The intrinsic objects of a realm.
pub struct Intrinsics {
    /// `Object.prototype`
    pub object_prototype: Object,
    /// `Object`
    pub object_constructor: Object,
    /// `Function.prototype`
    pub function_prototype: Object,
    /// `%AsyncFunction.prototype%`
    pub async_function_prototype: Object,
    /// `%GeneratorFunction.prototype%`
    pub generator_function_prototype: Object,
    /// `%AsyncGeneratorFunction.prototype%`
    pub async_generator_function_prototype: Object,
    /// `Array.prototype`
    pub array_prototype: Object,
    /// `Boolean.prototype`
    pub boolean_prototype: Object,
    /// `Number.prototype`
    pub number_prototype: Object,
    /// `String.prototype`
    pub string_prototype: Object,
    /// `Symbol.prototype`
    pub symbol_prototype: Object,
    /// `BigInt.prototype`
    pub bigint_prototype: Object,
    /// `Date.prototype`
    pub date_prototype: Object,
    /// `RegExp.prototype`
    pub regexp_prototype: Object,
    /// `Error.prototype`
    pub error_prototype: Object,
    /// `Map.prototype`
    pub map_prototype: Object,
    /// `Set.prototype`
    pub set_prototype: Object,
    /// `WeakMap.prototype`
    pub weak_map_prototype: Object,
    /// `WeakSet.prototype`
    pub weak_set_prototype: Object,
    /// `Promise.prototype`
    pub promise_prototype: Object,
    /// `ArrayBuffer.prototype`
    pub array_buffer_prototype: Object,
    /// `SharedArrayBuffer.prototype`, absent when the host lacks it
    pub shared_array_buffer_prototype: Option<Object>,
    /// `DataView.prototype`
    pub data_view_prototype: Object,
    /// `%TypedArray%.prototype`
    pub typed_array_prototype: Object,
    typed_array_prototypes: Vec<Object>,
    /// `Buffer.prototype` (Node only)
    pub buffer_prototype: Option<Object>,
    /// `Node.prototype` (browser only)
    pub node_prototype: Option<Object>,
    /// `Element.prototype` (browser only)
    pub element_prototype: Option<Object>,
    /// `HTMLElement.prototype` (browser only)
    pub html_element_prototype: Option<Object>,
}

impl Intrinsics {
    /// Prototype for a concrete typed array kind, e.g. `Int32Array.prototype`
    pub fn typed_array_prototype_for(&self, kind: TypedArrayKind) -> &Object {
        &self.typed_array_prototypes[kind.index()]
    }
}

/// A user class: its constructor function and its `prototype` object.
#[derive(Debug, Clone)]
pub struct Class {
    /// The class constructor (`typeof` is `"function"`)
    pub constructor: Object,
    /// Instances inherit from this object
    pub prototype: Object,
}

impl Class {
    /// `new C()` for a class without a constructor body
    pub fn instantiate(&self) -> Object {
        Object::ordinary(Some(&self.prototype))
    }
}

static REALM_COUNTER: AtomicU64 = AtomicU64::new(1);

struct RealmInner {
    id: u64,
    flavor: HostFlavor,
    intrinsics: Intrinsics,
    global: Object,
    document: Option<Object>,
}

/// A host realm. Cheap to clone; clones share the same intrinsics.
///
/// # Examples
///
/// ```
/// use host_value::Realm;
///
/// let home = Realm::new();
/// let other = Realm::new();
///
/// let map = other.new_map(vec![]);
/// assert!(map.instance_of(&other.intrinsics().map_prototype).unwrap());
/// assert!(!map.instance_of(&home.intrinsics().map_prototype).unwrap());
/// assert_eq!(map.class_string().unwrap(), "[object Map]");
/// ```
#[derive(Clone)]
pub struct Realm(Arc<RealmInner>);

impl std::fmt::Debug for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realm")
            .field("id", &self.0.id)
            .field("flavor", &self.0.flavor)
            .field("global", &self.0.global)
            .finish()
    }
}

/// Configures which intrinsics a new realm gets.
#[derive(Debug, Clone)]
pub struct RealmBuilder {
    flavor: HostFlavor,
    shared_array_buffer: bool,
}

impl Default for RealmBuilder {
    fn default() -> Self {
        RealmBuilder {
            flavor: HostFlavor::Bare,
            shared_array_buffer: true,
        }
    }
}

impl RealmBuilder {
    /// Start from a bare realm with `SharedArrayBuffer`
    pub fn new() -> Self {
        Self::default()
    }

    /// Host flavour
    pub fn flavor(mut self, flavor: HostFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Whether `SharedArrayBuffer` exists
    pub fn shared_array_buffer(mut self, enabled: bool) -> Self {
        self.shared_array_buffer = enabled;
        self
    }

    /// Create the realm
    pub fn build(self) -> Realm {
        let intrinsics = create_intrinsics(self.flavor, self.shared_array_buffer);

        let global = Object::ordinary(Some(&intrinsics.object_prototype));
        let mut document = None;
        match self.flavor {
            HostFlavor::Bare => {}
            HostFlavor::Node => {
                global.set(Symbol::to_string_tag(), "global");
            }
            HostFlavor::Browser => {
                global.set(Symbol::to_string_tag(), "Window");
                if let Some(node_proto) = &intrinsics.node_prototype {
                    let doc = Object::ordinary(Some(node_proto));
                    doc.set(Symbol::to_string_tag(), "HTMLDocument");
                    doc.set("nodeType", 9);
                    doc.set("nodeName", "#document");
                    document = Some(doc);
                }
            }
        }

        Realm(Arc::new(RealmInner {
            id: REALM_COUNTER.fetch_add(1, Ordering::Relaxed),
            flavor: self.flavor,
            intrinsics,
            global,
            document,
        }))
    }
}

fn native_function(name: &str, prototype: Option<&Object>) -> Object {
    Object::new(
        ObjectClass::Function(FunctionData::new(name, FunctionKind::Normal)),
        prototype.cloned(),
    )
}

/// Ordinary prototype object with a `constructor` pointing at a native
/// function named `constructor_name`.
fn intrinsic_prototype(parent: Option<&Object>, constructor_name: &str) -> Object {
    let proto = Object::ordinary(parent);
    proto.set("constructor", native_function(constructor_name, None));
    proto
}

fn tagged(proto: Object, tag: &str) -> Object {
    proto.set(Symbol::to_string_tag(), tag);
    proto
}

fn with_methods(proto: Object, function_prototype: &Object, names: &[&str]) -> Object {
    for name in names {
        proto.set(*name, native_function(name, Some(function_prototype)));
    }
    proto
}

fn create_intrinsics(flavor: HostFlavor, shared_array_buffer: bool) -> Intrinsics {
    let object_prototype = Object::ordinary(None);
    let object_constructor = native_function("Object", None);
    object_prototype.set("constructor", &object_constructor);

    let function_prototype = intrinsic_prototype(Some(&object_prototype), "Function");
    let fp = &function_prototype;
    object_prototype.set("hasOwnProperty", native_function("hasOwnProperty", Some(fp)));
    object_prototype.set("toString", native_function("toString", Some(fp)));

    let async_function_prototype = tagged(
        intrinsic_prototype(Some(fp), "AsyncFunction"),
        "AsyncFunction",
    );
    let generator_function_prototype = tagged(
        intrinsic_prototype(Some(fp), "GeneratorFunction"),
        "GeneratorFunction",
    );
    let async_generator_function_prototype = tagged(
        intrinsic_prototype(Some(fp), "AsyncGeneratorFunction"),
        "AsyncGeneratorFunction",
    );

    let values = native_function("values", Some(fp));

    let array_prototype = with_methods(
        intrinsic_prototype(Some(&object_prototype), "Array"),
        fp,
        &["push", "pop", "map", "filter", "forEach"],
    );
    array_prototype.set(Symbol::iterator(), &values);

    let string_prototype = intrinsic_prototype(Some(&object_prototype), "String");
    string_prototype.set(Symbol::iterator(), &values);

    let map_prototype = tagged(
        with_methods(
            intrinsic_prototype(Some(&object_prototype), "Map"),
            fp,
            &["get", "set", "has", "delete", "clear", "forEach"],
        ),
        "Map",
    );
    map_prototype.set(Symbol::iterator(), native_function("entries", Some(fp)));

    let set_prototype = tagged(
        with_methods(
            intrinsic_prototype(Some(&object_prototype), "Set"),
            fp,
            &["add", "has", "delete", "clear", "forEach"],
        ),
        "Set",
    );
    set_prototype.set(Symbol::iterator(), &values);

    let typed_array_prototype = intrinsic_prototype(Some(&object_prototype), "TypedArray");
    typed_array_prototype.set(Symbol::iterator(), &values);
    typed_array_prototype.define_getter(Symbol::to_string_tag(), |receiver| {
        Ok(receiver
            .as_object()
            .and_then(Object::typed_array_kind)
            .map(|kind| Value::from(kind.name()))
            .unwrap_or(Value::Undefined))
    });
    let typed_array_prototypes: Vec<Object> = TypedArrayKind::ALL
        .iter()
        .map(|kind| {
            let proto = intrinsic_prototype(Some(&typed_array_prototype), kind.name());
            proto.set("BYTES_PER_ELEMENT", kind.bytes_per_element());
            proto
        })
        .collect();

    let promise_prototype = tagged(
        with_methods(
            intrinsic_prototype(Some(&object_prototype), "Promise"),
            fp,
            &["then", "catch", "finally"],
        ),
        "Promise",
    );

    let error_prototype = intrinsic_prototype(Some(&object_prototype), "Error");
    error_prototype.set("name", "Error");
    error_prototype.set("message", "");

    let shared_array_buffer_prototype = shared_array_buffer.then(|| {
        tagged(
            intrinsic_prototype(Some(&object_prototype), "SharedArrayBuffer"),
            "SharedArrayBuffer",
        )
    });

    let buffer_prototype = (flavor == HostFlavor::Node).then(|| {
        let proto = intrinsic_prototype(
            Some(&typed_array_prototypes[TypedArrayKind::Uint8.index()]),
            "Buffer",
        );
        // Buffers report a plain object tag so the host-buffer check sees them.
        proto.set(Symbol::to_string_tag(), Value::Undefined);
        with_methods(proto, fp, &["toString", "write", "slice"])
    });

    let (node_prototype, element_prototype, html_element_prototype) =
        if flavor == HostFlavor::Browser {
            let event_target = with_methods(
                intrinsic_prototype(Some(&object_prototype), "EventTarget"),
                fp,
                &["addEventListener", "removeEventListener", "dispatchEvent"],
            );
            let node = with_methods(
                intrinsic_prototype(Some(&event_target), "Node"),
                fp,
                &["appendChild", "removeChild", "cloneNode"],
            );
            let element = with_methods(
                intrinsic_prototype(Some(&node), "Element"),
                fp,
                &["getAttribute", "setAttribute", "querySelector"],
            );
            let html_element = intrinsic_prototype(Some(&element), "HTMLElement");
            (Some(node), Some(element), Some(html_element))
        } else {
            (None, None, None)
        };

    Intrinsics {
        async_function_prototype,
        generator_function_prototype,
        async_generator_function_prototype,
        array_prototype,
        boolean_prototype: intrinsic_prototype(Some(&object_prototype), "Boolean"),
        number_prototype: intrinsic_prototype(Some(&object_prototype), "Number"),
        string_prototype,
        symbol_prototype: tagged(
            intrinsic_prototype(Some(&object_prototype), "Symbol"),
            "Symbol",
        ),
        bigint_prototype: tagged(
            intrinsic_prototype(Some(&object_prototype), "BigInt"),
            "BigInt",
        ),
        date_prototype: with_methods(
            intrinsic_prototype(Some(&object_prototype), "Date"),
            fp,
            &["getTime", "toISOString"],
        ),
        regexp_prototype: with_methods(
            intrinsic_prototype(Some(&object_prototype), "RegExp"),
            fp,
            &["test", "exec"],
        ),
        error_prototype,
        map_prototype,
        set_prototype,
        weak_map_prototype: tagged(
            intrinsic_prototype(Some(&object_prototype), "WeakMap"),
            "WeakMap",
        ),
        weak_set_prototype: tagged(
            intrinsic_prototype(Some(&object_prototype), "WeakSet"),
            "WeakSet",
        ),
        promise_prototype,
        array_buffer_prototype: tagged(
            intrinsic_prototype(Some(&object_prototype), "ArrayBuffer"),
            "ArrayBuffer",
        ),
        shared_array_buffer_prototype,
        data_view_prototype: tagged(
            intrinsic_prototype(Some(&object_prototype), "DataView"),
            "DataView",
        ),
        typed_array_prototype,
        typed_array_prototypes,
        buffer_prototype,
        node_prototype,
        element_prototype,
        html_element_prototype,
        function_prototype,
        object_constructor,
        object_prototype,
    }
}

impl Default for Realm {
    fn default() -> Self {
        Realm::new()
    }
}

impl Realm {
    /// A bare ECMAScript realm
    pub fn new() -> Self {
        RealmBuilder::new().build()
    }

    /// A Node.js-like realm
    pub fn node() -> Self {
        RealmBuilder::new().flavor(HostFlavor::Node).build()
    }

    /// A browser-like realm
    pub fn browser() -> Self {
        RealmBuilder::new().flavor(HostFlavor::Browser).build()
    }

    /// Builder for custom realms
    pub fn builder() -> RealmBuilder {
        RealmBuilder::new()
    }

    /// Host flavour of this realm
    pub fn flavor(&self) -> HostFlavor {
        self.0.flavor
    }

    /// Intrinsic prototypes and constructors
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.0.intrinsics
    }

    /// The global object (`globalThis`)
    pub fn global(&self) -> &Object {
        &self.0.global
    }

    /// Every name the global object is reachable under
    /// (`globalThis`, `global`, `window`, `self`). They are the same object.
    pub fn global_aliases(&self) -> Vec<Object> {
        vec![self.0.global.clone()]
    }

    /// `document` (browser only)
    pub fn document(&self) -> Option<&Object> {
        self.0.document.as_ref()
    }

    /// Whether two handles refer to the same realm
    pub fn ptr_eq(&self, other: &Realm) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Process-unique id of this realm; never reused, unlike its address
    pub fn identity(&self) -> u64 {
        self.0.id
    }

    /// `{}`
    pub fn new_object(&self) -> Object {
        Object::ordinary(Some(&self.intrinsics().object_prototype))
    }

    /// `Object.create(proto)`
    pub fn new_object_with_proto(&self, prototype: Option<&Object>) -> Object {
        Object::ordinary(prototype)
    }

    /// Array literal
    pub fn new_array(&self, elements: Vec<Value>) -> Object {
        Object::new(
            ObjectClass::Array(elements),
            Some(self.intrinsics().array_prototype.clone()),
        )
    }

    /// Strict-mode `arguments`: reading `callee` throws
    pub fn new_arguments(&self, values: Vec<Value>) -> Object {
        let args = self.arguments_object(values);
        args.define_getter("callee", |_| {
            Err(HostError::type_error(
                "'caller', 'callee', and 'arguments' properties may not be accessed on strict mode functions",
            ))
        });
        args
    }

    /// Sloppy-mode `arguments` with a `callee` data property
    pub fn new_sloppy_arguments(&self, values: Vec<Value>, callee: &Object) -> Object {
        let args = self.arguments_object(values);
        args.set("callee", callee);
        args
    }

    fn arguments_object(&self, values: Vec<Value>) -> Object {
        let args = Object::new(
            ObjectClass::Arguments(values),
            Some(self.intrinsics().object_prototype.clone()),
        );
        if let Ok(values) = self.intrinsics().array_prototype.get(Symbol::iterator()) {
            args.set(Symbol::iterator(), values);
        }
        args
    }

    /// A user function with source text. The prototype follows `kind`.
    pub fn new_function(&self, kind: FunctionKind, name: &str, source: &str) -> Object {
        self.new_function_from(FunctionData::new(name, kind).with_source(source))
    }

    /// A function from explicit slots
    pub fn new_function_from(&self, data: FunctionData) -> Object {
        let intrinsics = self.intrinsics();
        let prototype = match data.kind {
            FunctionKind::Async => &intrinsics.async_function_prototype,
            FunctionKind::Generator => &intrinsics.generator_function_prototype,
            FunctionKind::AsyncGenerator => &intrinsics.async_generator_function_prototype,
            FunctionKind::Normal | FunctionKind::Arrow | FunctionKind::Class => {
                &intrinsics.function_prototype
            }
        };
        Object::new(ObjectClass::Function(data), Some(prototype.clone()))
    }

    /// A built-in function
    pub fn new_native_function(&self, name: &str) -> Object {
        native_function(name, Some(&self.intrinsics().function_prototype))
    }

    /// `class Name {}`
    pub fn new_class(&self, name: &str) -> Class {
        let intrinsics = self.intrinsics();
        let constructor = self.new_function(
            FunctionKind::Class,
            name,
            &format!("class {} {{}}", name),
        );
        let prototype = Object::ordinary(Some(&intrinsics.object_prototype));
        prototype.set("constructor", &constructor);
        Class {
            constructor,
            prototype,
        }
    }

    /// `class Name extends Parent {}` where `parent_prototype` is
    /// `Parent.prototype` (a user class or an intrinsic)
    pub fn new_subclass(&self, parent_prototype: &Object, name: &str) -> Class {
        let parent_constructor = parent_prototype
            .own_property("constructor")
            .and_then(|property| match property {
                Property::Data(Value::Object(ctor)) => Some(ctor),
                _ => None,
            });
        let parent_name = parent_constructor
            .as_ref()
            .and_then(|ctor| ctor.function_data().map(|data| data.name.clone()))
            .unwrap_or_default();

        let data = FunctionData::new(name, FunctionKind::Class)
            .with_source(format!("class {} extends {} {{}}", name, parent_name));
        let constructor = Object::new(
            ObjectClass::Function(data),
            Some(parent_constructor.unwrap_or_else(|| self.intrinsics().function_prototype.clone())),
        );
        let prototype = Object::ordinary(Some(parent_prototype));
        prototype.set("constructor", &constructor);
        Class {
            constructor,
            prototype,
        }
    }

    /// `new Date(time)`
    pub fn new_date(&self, time: f64) -> Object {
        Object::new(
            ObjectClass::Date(time),
            Some(self.intrinsics().date_prototype.clone()),
        )
    }

    /// Regular expression literal
    pub fn new_regexp(&self, source: &str, flags: &str) -> Object {
        Object::new(
            ObjectClass::RegExp {
                source: source.to_string(),
                flags: flags.to_string(),
            },
            Some(self.intrinsics().regexp_prototype.clone()),
        )
    }

    /// `new Error(message)`
    pub fn new_error(&self, message: &str) -> Object {
        self.new_named_error("Error", message)
    }

    /// An error of a specific kind, e.g. `TypeError`
    pub fn new_named_error(&self, name: &str, message: &str) -> Object {
        Object::new(
            ObjectClass::Error {
                name: name.to_string(),
                message: message.to_string(),
            },
            Some(self.intrinsics().error_prototype.clone()),
        )
    }

    /// `Object(primitive)`: box a primitive into its wrapper object
    pub fn new_boxed(&self, primitive: &Value) -> HostResult<Object> {
        let intrinsics = self.intrinsics();
        let (class, prototype) = match primitive {
            Value::Boolean(b) => (ObjectClass::Boolean(*b), &intrinsics.boolean_prototype),
            Value::Number(n) => (ObjectClass::Number(*n), &intrinsics.number_prototype),
            Value::String(s) => (ObjectClass::String(s.clone()), &intrinsics.string_prototype),
            Value::Symbol(s) => (ObjectClass::Symbol(s.clone()), &intrinsics.symbol_prototype),
            Value::BigInt(n) => (ObjectClass::BigInt(n.clone()), &intrinsics.bigint_prototype),
            Value::Undefined | Value::Null => {
                return Err(HostError::type_error(
                    "Cannot convert undefined or null to object",
                ))
            }
            Value::Object(obj) => return Ok(obj.clone()),
        };
        Ok(Object::new(class, Some(prototype.clone())))
    }

    /// `new Map(entries)`
    pub fn new_map(&self, entries: Vec<(Value, Value)>) -> Object {
        Object::new(
            ObjectClass::Map(entries),
            Some(self.intrinsics().map_prototype.clone()),
        )
    }

    /// `new Set(values)`
    pub fn new_set(&self, values: Vec<Value>) -> Object {
        Object::new(
            ObjectClass::Set(values),
            Some(self.intrinsics().set_prototype.clone()),
        )
    }

    /// `new WeakMap()`
    pub fn new_weak_map(&self) -> Object {
        Object::new(
            ObjectClass::WeakMap,
            Some(self.intrinsics().weak_map_prototype.clone()),
        )
    }

    /// `new WeakSet()`
    pub fn new_weak_set(&self) -> Object {
        Object::new(
            ObjectClass::WeakSet,
            Some(self.intrinsics().weak_set_prototype.clone()),
        )
    }

    /// `Promise.resolve()`
    pub fn new_promise(&self) -> Object {
        Object::new(
            ObjectClass::Promise,
            Some(self.intrinsics().promise_prototype.clone()),
        )
    }

    /// `new ArrayBuffer(byte_length)`
    pub fn new_array_buffer(&self, byte_length: usize) -> Object {
        Object::new(
            ObjectClass::ArrayBuffer { byte_length },
            Some(self.intrinsics().array_buffer_prototype.clone()),
        )
    }

    /// `new SharedArrayBuffer(byte_length)`; `None` when the host lacks it
    pub fn new_shared_array_buffer(&self, byte_length: usize) -> Option<Object> {
        self.intrinsics()
            .shared_array_buffer_prototype
            .as_ref()
            .map(|proto| {
                Object::new(
                    ObjectClass::SharedArrayBuffer { byte_length },
                    Some(proto.clone()),
                )
            })
    }

    /// `new DataView(buffer)` over the whole buffer
    pub fn new_data_view(&self, buffer: &Object) -> HostResult<Object> {
        let byte_length = match buffer.class() {
            ObjectClass::ArrayBuffer { byte_length }
            | ObjectClass::SharedArrayBuffer { byte_length } => *byte_length,
            _ => {
                return Err(HostError::type_error(
                    "First argument to DataView constructor must be an ArrayBuffer",
                ))
            }
        };
        Ok(Object::new(
            ObjectClass::DataView {
                buffer: buffer.clone(),
                byte_offset: 0,
                byte_length,
            },
            Some(self.intrinsics().data_view_prototype.clone()),
        ))
    }

    /// `new Int32Array(length)` and friends, backed by a fresh buffer
    pub fn new_typed_array(&self, kind: TypedArrayKind, length: usize) -> Object {
        let buffer = self.new_array_buffer(length * kind.bytes_per_element());
        Object::new(
            ObjectClass::TypedArray {
                kind,
                buffer,
                byte_offset: 0,
                length,
            },
            Some(self.intrinsics().typed_array_prototype_for(kind).clone()),
        )
    }

    /// `Buffer.alloc(length)` (Node only)
    pub fn new_buffer(&self, length: usize) -> HostResult<Object> {
        let prototype = self
            .intrinsics()
            .buffer_prototype
            .clone()
            .ok_or_else(|| HostError::thrown("ReferenceError: Buffer is not defined"))?;
        Ok(Object::new(
            ObjectClass::TypedArray {
                kind: TypedArrayKind::Uint8,
                buffer: self.new_array_buffer(length),
                byte_offset: 0,
                length,
            },
            Some(prototype),
        ))
    }

    /// `document.createElement(tag)` (browser only)
    pub fn new_element(&self, tag_name: &str) -> HostResult<Object> {
        let prototype = self
            .intrinsics()
            .html_element_prototype
            .as_ref()
            .ok_or_else(|| HostError::thrown("ReferenceError: document is not defined"))?;
        let element = Object::ordinary(Some(prototype));
        element.set(Symbol::to_string_tag(), html_element_tag(tag_name));
        element.set("tagName", tag_name.to_ascii_uppercase());
        element.set("nodeType", 1);
        Ok(element)
    }

    /// `document.createTextNode(text)` (browser only)
    pub fn new_text_node(&self, text: &str) -> HostResult<Object> {
        let prototype = self
            .intrinsics()
            .node_prototype
            .as_ref()
            .ok_or_else(|| HostError::thrown("ReferenceError: document is not defined"))?;
        let node = Object::ordinary(Some(prototype));
        node.set(Symbol::to_string_tag(), "Text");
        node.set("nodeType", 3);
        node.set("data", text);
        Ok(node)
    }

    /// `new Proxy(target, {})`
    pub fn new_proxy(&self, target: &Object) -> Object {
        Object::new(
            ObjectClass::Proxy(ProxyData::new(target.clone(), None)),
            None,
        )
    }

    /// `new Proxy(target, { get })`
    pub fn new_proxy_with_trap<F>(&self, target: &Object, get: F) -> Object
    where
        F: Fn(&Object, &PropertyKey, &Value) -> HostResult<Value> + Send + Sync + 'static,
    {
        let trap: GetTrap = Arc::new(get);
        Object::new(
            ObjectClass::Proxy(ProxyData::new(target.clone(), Some(trap))),
            None,
        )
    }
}

fn html_element_tag(tag_name: &str) -> String {
    let lower = tag_name.to_ascii_lowercase();
    let interface = match lower.as_str() {
        "div" => "Div",
        "span" => "Span",
        "p" => "Paragraph",
        "a" => "Anchor",
        "img" => "Image",
        "input" => "Input",
        "button" => "Button",
        "form" => "Form",
        "ul" | "ol" => "List",
        "li" => "LI",
        "canvas" => "Canvas",
        "body" => "Body",
        _ => "",
    };
    format!("HTML{}Element", interface)
}
