use crate::bean::{Bean, StdError};

/// Hook invoked around every bean's initialization step.
///
/// A processor sees each bean twice per creation: once after dependency
/// injection and the name-aware callback, and once after initialization. Both
/// hooks receive ownership of the current instance and return the instance to
/// continue with, so a hook may pass the bean through untouched, mutate it,
/// or replace it entirely. The after-initialization hook is the designated
/// place to substitute a proxy: whatever it returns is what the container
/// caches and hands out.
///
/// Post-processors are discovered like any other component, but they are
/// instantiated directly at scan time and are never field-injected or run
/// through the creation pipeline themselves.
///
/// # Examples
///
/// ```rust
/// use sprout::{Bean, PostProcessor, StdError};
///
/// #[derive(Default)]
/// struct CreationLogger;
///
/// impl Bean for CreationLogger {}
///
/// impl PostProcessor for CreationLogger {
///     fn before_initialization(
///         &self,
///         bean: Box<dyn Bean>,
///         name: &str,
///     ) -> Result<Box<dyn Bean>, StdError> {
///         println!("about to initialize {name}");
///         Ok(bean)
///     }
/// }
/// ```
pub trait PostProcessor: Send + Sync {
    /// Invoked before the bean's initialization hook. Defaults to the
    /// identity transform.
    fn before_initialization(
        &self,
        bean: Box<dyn Bean>,
        _name: &str,
    ) -> Result<Box<dyn Bean>, StdError> {
        Ok(bean)
    }

    /// Invoked after the bean's initialization hook. The returned instance is
    /// authoritative; returning a different object substitutes it for the
    /// original. Defaults to the identity transform.
    fn after_initialization(
        &self,
        bean: Box<dyn Bean>,
        _name: &str,
    ) -> Result<Box<dyn Bean>, StdError> {
        Ok(bean)
    }
}

/// Ordered chain of post-processors, built once at scan time and shared by
/// every bean creation.
#[derive(Default)]
pub(crate) struct PostProcessorChain {
    processors: Vec<Box<dyn PostProcessor>>,
}

impl PostProcessorChain {
    pub(crate) fn push(&mut self, processor: Box<dyn PostProcessor>) {
        self.processors.push(processor);
    }

    pub(crate) fn len(&self) -> usize {
        self.processors.len()
    }

    /// Feeds `bean` through every before-initialization hook in registration
    /// order; the result of each hook feeds the next.
    pub(crate) fn run_before(
        &self,
        mut bean: Box<dyn Bean>,
        name: &str,
    ) -> Result<Box<dyn Bean>, StdError> {
        for processor in &self.processors {
            bean = processor.before_initialization(bean, name)?;
        }
        Ok(bean)
    }

    /// Feeds `bean` through every after-initialization hook in registration
    /// order.
    pub(crate) fn run_after(
        &self,
        mut bean: Box<dyn Bean>,
        name: &str,
    ) -> Result<Box<dyn Bean>, StdError> {
        for processor in &self.processors {
            bean = processor.after_initialization(bean, name)?;
        }
        Ok(bean)
    }
}
