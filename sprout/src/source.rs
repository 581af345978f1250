use crate::descriptor::{Component, TypeDescriptor};

/// Source of candidate component types for a container scan.
///
/// This is the container's only view of type discovery: given a scan root, a
/// source returns the descriptors of every annotated type reachable under it.
/// How the descriptors are collected is the source's business; the container
/// performs no module or filesystem logic itself.
pub trait ComponentSource: Send + Sync {
    /// Descriptors of the annotated types reachable under `scan_root`.
    fn types(&self, scan_root: &str) -> Vec<TypeDescriptor>;
}

/// A component source backed by an explicit, ordered list of types.
///
/// The registration order of the list is the order post-processors run in.
///
/// # Examples
///
/// ```rust
/// use sprout::{Component, ComponentSet, ComponentSource as _};
///
/// #[derive(Component, Default)]
/// struct Mailer {}
///
/// let components = ComponentSet::new().with::<Mailer>();
/// assert_eq!(components.types(module_path!()).len(), 1);
/// ```
#[derive(Default)]
pub struct ComponentSet {
    types: Vec<TypeDescriptor>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the component type `T` to the set.
    pub fn with<T>(mut self) -> Self
    where
        T: Component,
    {
        self.types.push(T::descriptor());
        self
    }
}

impl ComponentSource for ComponentSet {
    fn types(&self, scan_root: &str) -> Vec<TypeDescriptor> {
        self.types
            .iter()
            .filter(|descriptor| descriptor.is_under(scan_root))
            .cloned()
            .collect()
    }
}

/// Configuration root handed to [`Container::new`](crate::Container::new).
///
/// A configuration carries the scan-path directive (which module subtree to
/// scan) and the component source to scan. A configuration without a scan
/// directive yields an empty container.
pub trait Configuration: Send + Sync {
    /// The scan-path directive: the module path under which components are
    /// picked up, or `None` when the configuration does not ask for a scan.
    fn component_scan(&self) -> Option<&str>;

    /// The type-discovery collaborator consulted during the scan.
    fn component_source(&self) -> &dyn ComponentSource;
}

/// The standard configuration root: a scan path plus a [`ComponentSet`].
///
/// # Examples
///
/// ```rust
/// use sprout::{Component, Container, ScanConfig};
///
/// #[derive(Component, Default)]
/// struct Ledger {}
///
/// let container = Container::new(ScanConfig::new(module_path!()).with::<Ledger>()).unwrap();
/// assert!(container.get_bean("ledger").is_ok());
/// ```
pub struct ScanConfig {
    scan: String,
    components: ComponentSet,
}

impl ScanConfig {
    /// Creates a configuration scanning the module subtree rooted at `scan`.
    pub fn new(scan: impl Into<String>) -> Self {
        Self {
            scan: scan.into(),
            components: ComponentSet::new(),
        }
    }

    /// Adds the component type `T` to the configuration's component set.
    pub fn with<T>(mut self) -> Self
    where
        T: Component,
    {
        self.components = self.components.with::<T>();
        self
    }
}

impl Configuration for ScanConfig {
    fn component_scan(&self) -> Option<&str> {
        Some(&self.scan)
    }

    fn component_source(&self) -> &dyn ComponentSource {
        &self.components
    }
}
