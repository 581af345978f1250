use crate::bean::{Bean, BeanRef, StdError};
use crate::container::BeanError;
use crate::processor::PostProcessor;

/// Scope of a managed bean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// One shared instance per name, created once and cached.
    Singleton,
    /// A fresh instance on every request, never cached.
    Prototype,
}

/// Zero-argument constructor registered for a component type.
pub type Constructor = fn() -> Result<Box<dyn Bean>, StdError>;

/// Injector function registered for a single injectable field.
pub type InjectFn = fn(&mut dyn Bean, BeanRef) -> Result<(), BeanError>;

/// Constructor registered for a component with the post-processor capability.
pub type ProcessorConstructor = fn() -> Result<Box<dyn PostProcessor>, StdError>;

/// An injectable field together with its registered injector.
///
/// The field name doubles as the name of the bean resolved for it: injection
/// is by exact name match, never by type.
#[derive(Clone, Copy)]
pub struct FieldInjector {
    field: &'static str,
    apply: InjectFn,
}

impl FieldInjector {
    pub const fn new(field: &'static str, apply: InjectFn) -> Self {
        Self { field, apply }
    }

    /// Field name, which is also the bean name resolved for it.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub(crate) fn apply(&self, bean: &mut dyn Bean, value: BeanRef) -> Result<(), BeanError> {
        (self.apply)(bean, value)
    }
}

/// Everything the container needs to know about a discovered component type.
///
/// Descriptors are produced by a [`ComponentSource`](crate::ComponentSource)
/// (usually through `#[derive(Component)]`) and consumed by the container
/// during its scan phase. A descriptor records where the type lives, how to
/// construct it without arguments, which fields want injection and whether
/// the type doubles as a post-processor.
#[derive(Clone)]
pub struct TypeDescriptor {
    type_path: &'static str,
    type_name: &'static str,
    name: Option<&'static str>,
    scope: Option<Scope>,
    construct: Constructor,
    fields: Vec<FieldInjector>,
    post_processor: Option<ProcessorConstructor>,
}

impl TypeDescriptor {
    /// Creates a descriptor for a type declared in the module `type_path`
    /// with the simple name `type_name`.
    pub fn new(type_path: &'static str, type_name: &'static str, construct: Constructor) -> Self {
        Self {
            type_path,
            type_name,
            name: None,
            scope: None,
            construct,
            fields: Vec::new(),
            post_processor: None,
        }
    }

    /// Sets an explicit bean name, overriding the derived default.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets an explicit scope marker. Without one the bean is a singleton.
    pub fn scoped(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Registers an injector for the field `field`. The dependency is
    /// resolved under the bean name equal to the field name.
    pub fn with_field(mut self, field: &'static str, apply: InjectFn) -> Self {
        self.fields.push(FieldInjector::new(field, apply));
        self
    }

    /// Marks the type as a post-processor and registers the constructor used
    /// to instantiate it for the processor chain.
    pub fn with_post_processor(mut self, construct: ProcessorConstructor) -> Self {
        self.post_processor = Some(construct);
        self
    }

    /// Module path of the declaring module.
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Simple type name, e.g. `UserService`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Explicit scope marker, if the component carries one.
    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    /// The name the bean registers under: the explicit name if present,
    /// otherwise the simple type name with only its first character
    /// lowercased (`UserService` becomes `userService`).
    pub fn bean_name(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => decapitalize(self.type_name),
        }
    }

    /// Returns `true` if the declaring module equals `scan_root` or lies
    /// beneath it.
    pub fn is_under(&self, scan_root: &str) -> bool {
        match self.type_path.strip_prefix(scan_root) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }

    pub(crate) fn construct(&self) -> Result<Box<dyn Bean>, StdError> {
        (self.construct)()
    }

    pub(crate) fn fields(&self) -> &[FieldInjector] {
        &self.fields
    }

    pub(crate) fn post_processor(&self) -> Option<ProcessorConstructor> {
        self.post_processor
    }
}

/// Trait implemented by annotated component types.
///
/// `#[derive(Component)]` provides the impl; the descriptor it returns is
/// what a [`ComponentSource`](crate::ComponentSource) hands to the container.
pub trait Component: Bean + Sized {
    /// Descriptor used to register this type with a container.
    fn descriptor() -> TypeDescriptor;
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
