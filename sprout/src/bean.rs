use std::any::Any;
use std::sync::Arc;

/// Type alias for boxed errors that can be sent across threads.
///
/// This is used as the standard error type throughout the sprout framework
/// for failures raised by user code: constructors, initialization hooks and
/// post-processor hooks.
pub type StdError = Box<dyn std::error::Error + Send + Sync>;

/// Trait implemented by every container-managed type.
///
/// `Bean` is the dynamically-typed currency of the container: the creation
/// pipeline works on `Box<dyn Bean>` while an instance is still being wired,
/// and the singleton cache stores finished instances as [`BeanRef`]. The
/// `#[derive(Component)]` macro emits this impl for you.
///
/// The two provided methods are capability accessors. A type that wants a
/// lifecycle callback overrides the matching accessor to return itself (the
/// derive macro does this when the component is tagged `aware` or `init`).
/// The pipeline probes the *instance* it currently holds, so a post-processor
/// that replaces an instance also replaces the set of callbacks that later
/// stages observe.
///
/// # Examples
///
/// ```rust
/// use sprout::{Bean, NameAware};
///
/// #[derive(Default)]
/// struct AuditLog {
///     bean_name: Option<String>,
/// }
///
/// impl Bean for AuditLog {
///     fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
///         Some(self)
///     }
/// }
///
/// impl NameAware for AuditLog {
///     fn set_bean_name(&mut self, name: &str) {
///         self.bean_name = Some(name.to_string());
///     }
/// }
/// ```
pub trait Bean: Any + Send + Sync {
    /// Returns the instance as a [`NameAware`] callback target, if the type
    /// wants its registered bean name before initialization.
    fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
        None
    }

    /// Returns the instance as an [`Initialize`] callback target, if the type
    /// wants an initialization hook after its dependencies are wired.
    fn as_initialize(&mut self) -> Option<&mut dyn Initialize> {
        None
    }
}

/// Shared handle to a fully-processed bean instance.
///
/// This is what [`Container::get_bean`](crate::Container::get_bean) returns
/// and what injected `Option<BeanRef>` fields receive. Use
/// [`downcast_arc`] to recover the concrete type.
pub type BeanRef = Arc<dyn Bean>;

/// Callback capability for beans that want to learn their registered name.
///
/// Invoked exactly once per creation, strictly after dependency injection and
/// strictly before any post-processing, so the callback observes a fully
/// wired (but not yet initialized) instance.
pub trait NameAware {
    /// Receives the name under which the bean was registered.
    fn set_bean_name(&mut self, name: &str);
}

/// Callback capability for beans that want an initialization hook.
///
/// Invoked exactly once per creation, after the before-initialization
/// post-processing pass and before the after-initialization pass.
pub trait Initialize {
    /// Runs the initialization hook. An error aborts the enclosing bean
    /// creation.
    fn initialize(&mut self) -> Result<(), StdError>;
}

impl std::fmt::Debug for dyn Bean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Bean")
    }
}

impl dyn Bean {
    /// Returns `true` if the boxed instance is of type `T`.
    pub fn is<T>(&self) -> bool
    where
        T: Bean,
    {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Returns a reference to the instance if it is of type `T`.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: Bean,
    {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Returns a mutable reference to the instance if it is of type `T`.
    pub fn downcast_mut<T>(&mut self) -> Option<&mut T>
    where
        T: Bean,
    {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }
}

/// Downcasts a shared bean handle to a concrete type.
///
/// Returns `None` when the handle holds a different type, which also happens
/// when a post-processor substituted the original instance with a wrapper of
/// another type.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use sprout::{Bean, BeanRef, downcast_arc};
///
/// struct Clock;
///
/// impl Bean for Clock {}
///
/// let bean: BeanRef = Arc::new(Clock);
/// assert!(downcast_arc::<Clock>(&bean).is_some());
/// ```
pub fn downcast_arc<T>(bean: &BeanRef) -> Option<Arc<T>>
where
    T: Bean,
{
    let any: Arc<dyn Any + Send + Sync> = bean.clone();
    any.downcast::<T>().ok()
}
