use std::any::type_name;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::bean::{Bean, BeanRef, StdError, downcast_arc};
use crate::descriptor::Scope;
use crate::processor::PostProcessorChain;
use crate::registry::{BeanDefinition, DefinitionRegistry};
use crate::source::Configuration;

/// Errors that can occur while building a container or resolving a bean.
///
/// Every error is fatal to the triggering call and never retried: a bean is
/// either produced through all pipeline steps or not produced at all. A
/// failure aborts only the `get_bean` call that triggered it and leaves other
/// beans untouched.
#[derive(Debug)]
pub enum BeanError {
    /// `get_bean` was called with a name no definition is registered under.
    DefinitionNotFound(String),
    /// The target type's constructor failed.
    Construction { name: String, source: StdError },
    /// A dependency referenced by an injectable field could not be resolved
    /// or applied; the underlying failure is carried as the source.
    Injection {
        name: String,
        field: &'static str,
        source: Box<BeanError>,
    },
    /// A bean resolved under `name` is not of the requested type.
    TypeMismatch { name: String, expected: &'static str },
    /// The bean's initialization hook failed.
    Initialization { name: String, source: StdError },
    /// A post-processor hook failed during before- or after-initialization
    /// processing.
    Processor { name: String, source: StdError },
    /// A bean's dependencies lead back to a bean that is still being created.
    CircularDependency { chain: Vec<String> },
}

impl std::fmt::Display for BeanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BeanError::DefinitionNotFound(name) => write!(f, "bean not found: {name}"),
            BeanError::Construction { name, source } => {
                write!(f, "cannot construct bean {name}: {source}")
            }
            BeanError::Injection {
                name,
                field,
                source,
            } => write!(f, "cannot inject field {field} of bean {name}: {source}"),
            BeanError::TypeMismatch { name, expected } => {
                write!(f, "bean {name} is not of type {expected}")
            }
            BeanError::Initialization { name, source } => {
                write!(f, "cannot initialize bean {name}: {source}")
            }
            BeanError::Processor { name, source } => {
                write!(f, "post-processing of bean {name} failed: {source}")
            }
            BeanError::CircularDependency { chain } => {
                write!(f, "circular dependency: {}", chain.join(" -> "))
            }
        }
    }
}

impl std::error::Error for BeanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BeanError::Construction { source, .. }
            | BeanError::Initialization { source, .. }
            | BeanError::Processor { source, .. } => Some(source.as_ref()),
            BeanError::Injection { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// The dependency-injection container.
///
/// A container is built from a [`Configuration`]: it scans the configured
/// component source, registers a bean definition per discovered type, builds
/// the post-processor chain and eagerly constructs every singleton. After
/// construction, [`Container::get_bean`] is the sole entry point: it serves
/// singletons from the cache and runs the creation pipeline fresh for every
/// prototype request. Resolution is synchronous on the calling thread;
/// lookups are safe from multiple threads.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use sprout::{Component, Container, ScanConfig};
///
/// #[derive(Component, Default)]
/// struct OrderService {}
///
/// #[derive(Component, Default)]
/// #[component(name = "userService")]
/// struct UserService {
///     #[inject]
///     order_service: Option<Arc<OrderService>>,
/// }
///
/// # fn main() -> Result<(), sprout::BeanError> {
/// let container = Container::new(
///     ScanConfig::new(module_path!())
///         .with::<OrderService>()
///         .with::<UserService>(),
/// )?;
///
/// let user = container.get::<UserService>("userService")?;
/// assert!(user.order_service.is_some());
/// # Ok(())
/// # }
/// ```
pub struct Container {
    registry: DefinitionRegistry,
    singletons: DashMap<String, BeanRef>,
    processors: PostProcessorChain,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container").finish_non_exhaustive()
    }
}

impl Container {
    /// Builds a container from the configuration root.
    ///
    /// Scans the configured component source under the scan-path directive,
    /// registers one definition per discovered type (explicit name, or the
    /// decapitalized simple type name), instantiates every discovered
    /// post-processor into the chain, then eagerly constructs all singleton
    /// beans in registry order. The first creation failure aborts
    /// construction.
    pub fn new(config: impl Configuration) -> Result<Self, BeanError> {
        let registry = DefinitionRegistry::default();
        let mut processors = PostProcessorChain::default();
        match config.component_scan() {
            Some(scan_root) => {
                for descriptor in config.component_source().types(scan_root) {
                    let name = descriptor.bean_name();
                    if let Some(construct) = descriptor.post_processor() {
                        let processor = construct().map_err(|source| BeanError::Construction {
                            name: name.clone(),
                            source,
                        })?;
                        processors.push(processor);
                    }
                    tracing::debug!("Registering bean definition {name}");
                    registry.register(name, BeanDefinition::new(descriptor));
                }
            }
            None => tracing::warn!("Configuration carries no component scan directive"),
        }
        tracing::debug!(
            "Scan finished with {} post-processors in the chain",
            processors.len()
        );
        let container = Self {
            registry,
            singletons: DashMap::new(),
            processors,
        };
        for name in container.registry.singleton_names() {
            container.get_bean(&name)?;
        }
        Ok(container)
    }

    /// Resolves the bean registered under `name`.
    ///
    /// Singletons are served from the cache once created; prototypes run the
    /// creation pipeline on every call. A name without a definition fails
    /// with [`BeanError::DefinitionNotFound`], and a dependency chain leading
    /// back to a bean still being created fails with
    /// [`BeanError::CircularDependency`].
    pub fn get_bean(&self, name: &str) -> Result<BeanRef, BeanError> {
        self.resolve(name, &mut Vec::new())
    }

    /// Resolves the bean registered under `name` and downcasts it to `T`.
    ///
    /// Fails with [`BeanError::TypeMismatch`] when the resolved instance is
    /// of another type, for example after a post-processor substituted it
    /// with a proxy.
    pub fn get<T>(&self, name: &str) -> Result<Arc<T>, BeanError>
    where
        T: Bean,
    {
        let bean = self.get_bean(name)?;
        downcast_arc::<T>(&bean).ok_or_else(|| BeanError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<T>(),
        })
    }

    fn resolve(&self, name: &str, creating: &mut Vec<String>) -> Result<BeanRef, BeanError> {
        let definition = self
            .registry
            .lookup(name)
            .ok_or_else(|| BeanError::DefinitionNotFound(name.to_string()))?;
        match definition.scope() {
            Scope::Prototype => self.create_bean(name, &definition, creating),
            Scope::Singleton => {
                if let Some(bean) = self.singletons.get(name) {
                    return Ok(bean.value().clone());
                }
                let bean = self.create_bean(name, &definition, creating)?;
                // The read-check and the store are not one critical section;
                // a concurrent first access may run the pipeline twice for
                // the same name. The first stored instance wins and is never
                // replaced.
                match self.singletons.entry(name.to_string()) {
                    Entry::Occupied(entry) => {
                        tracing::debug!("Discarding concurrently created duplicate of {name}");
                        Ok(entry.get().clone())
                    }
                    Entry::Vacant(entry) => Ok(entry.insert(bean).clone()),
                }
            }
        }
    }

    fn create_bean(
        &self,
        name: &str,
        definition: &BeanDefinition,
        creating: &mut Vec<String>,
    ) -> Result<BeanRef, BeanError> {
        if creating.iter().any(|pending| pending == name) {
            let mut chain = creating.clone();
            chain.push(name.to_string());
            return Err(BeanError::CircularDependency { chain });
        }
        creating.push(name.to_string());
        let result = self.run_pipeline(name, definition, creating);
        creating.pop();
        result
    }

    /// The creation pipeline: instantiate, inject, aware callback,
    /// before-initialization hooks, initialize, after-initialization hooks.
    /// The steps always run in this order; capability steps degrade to no-ops
    /// and processor passes to identity transforms.
    fn run_pipeline(
        &self,
        name: &str,
        definition: &BeanDefinition,
        creating: &mut Vec<String>,
    ) -> Result<BeanRef, BeanError> {
        tracing::debug!("Creating bean {name}");
        let descriptor = definition.descriptor();
        let mut bean = descriptor
            .construct()
            .map_err(|source| BeanError::Construction {
                name: name.to_string(),
                source,
            })?;
        for injector in descriptor.fields() {
            let dependency =
                self.resolve(injector.field(), creating)
                    .map_err(|source| BeanError::Injection {
                        name: name.to_string(),
                        field: injector.field(),
                        source: Box::new(source),
                    })?;
            injector
                .apply(bean.as_mut(), dependency)
                .map_err(|source| BeanError::Injection {
                    name: name.to_string(),
                    field: injector.field(),
                    source: Box::new(source),
                })?;
        }
        if let Some(aware) = bean.as_name_aware() {
            aware.set_bean_name(name);
        }
        let mut bean =
            self.processors
                .run_before(bean, name)
                .map_err(|source| BeanError::Processor {
                    name: name.to_string(),
                    source,
                })?;
        if let Some(init) = bean.as_initialize() {
            init.initialize()
                .map_err(|source| BeanError::Initialization {
                    name: name.to_string(),
                    source,
                })?;
        }
        let bean = self
            .processors
            .run_after(bean, name)
            .map_err(|source| BeanError::Processor {
                name: name.to_string(),
                source,
            })?;
        Ok(Arc::from(bean))
    }
}
