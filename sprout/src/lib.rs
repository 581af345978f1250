//! # sprout
//!
//! An annotation-driven dependency injection container for Rust: component
//! types are tagged with a derive macro, discovered through a configuration
//! root, wired by name-based field injection and carried through an ordered
//! lifecycle before they are handed out as shared handles.
//!
//! ## Core Concepts
//!
//! - **Container**: scans a configuration root, registers bean definitions
//!   and serves instances through [`Container::get_bean`]
//! - **Component**: an application type tagged with `#[derive(Component)]`,
//!   constructed from its `Default` impl and wired by the container
//! - **Bean**: a container-managed instance; singletons are cached per name,
//!   prototypes are created fresh on every request
//! - **Injection**: `#[inject]` fields are resolved by bean name equal to the
//!   field name, recursively creating dependencies as needed
//! - **Lifecycle**: instantiate, inject, name-aware callback, before hooks,
//!   initialize, after hooks, always in that order
//! - **Post-processors**: components implementing [`PostProcessor`] hook into
//!   every creation and may transform or replace instances, which is how
//!   proxies are substituted
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use sprout::{Component, Container, ScanConfig};
//!
//! #[derive(Component, Default)]
//! struct OrderService {
//!     discount: f64,
//! }
//!
//! #[derive(Component, Default)]
//! #[component(name = "userService")]
//! struct UserService {
//!     #[inject]
//!     order_service: Option<Arc<OrderService>>,
//! }
//!
//! fn main() -> Result<(), sprout::BeanError> {
//!     let container = Container::new(
//!         ScanConfig::new(module_path!())
//!             .with::<OrderService>()
//!             .with::<UserService>(),
//!     )?;
//!
//!     let user = container.get::<UserService>("userService")?;
//!     assert!(user.order_service.is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Scopes
//!
//! Beans are singletons unless marked otherwise. Singletons are constructed
//! eagerly while the container is built and every lookup returns the same
//! shared handle; prototypes run the full creation pipeline per request:
//!
//! ```rust
//! use std::sync::Arc;
//! use sprout::{Component, Container, ScanConfig};
//!
//! #[derive(Component, Default)]
//! #[component(scope = "prototype")]
//! struct ReportBuilder {}
//!
//! # fn main() -> Result<(), sprout::BeanError> {
//! let container =
//!     Container::new(ScanConfig::new(module_path!()).with::<ReportBuilder>())?;
//!
//! let first = container.get_bean("reportBuilder")?;
//! let second = container.get_bean("reportBuilder")?;
//! assert!(!Arc::ptr_eq(&first, &second));
//! # Ok(())
//! # }
//! ```
//!
//! ## Lifecycle Callbacks
//!
//! A component opts into callbacks by implementing the capability trait and
//! tagging the component so the derive wires it up:
//!
//! ```rust
//! use sprout::{Component, Container, Initialize, NameAware, ScanConfig, StdError};
//!
//! #[derive(Component, Default)]
//! #[component(aware, init)]
//! struct Scheduler {
//!     bean_name: Option<String>,
//!     started: bool,
//! }
//!
//! impl NameAware for Scheduler {
//!     fn set_bean_name(&mut self, name: &str) {
//!         self.bean_name = Some(name.to_string());
//!     }
//! }
//!
//! impl Initialize for Scheduler {
//!     fn initialize(&mut self) -> Result<(), StdError> {
//!         self.started = true;
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), sprout::BeanError> {
//! let container = Container::new(ScanConfig::new(module_path!()).with::<Scheduler>())?;
//! let scheduler = container.get::<Scheduler>("scheduler")?;
//! assert_eq!(scheduler.bean_name.as_deref(), Some("scheduler"));
//! assert!(scheduler.started);
//! # Ok(())
//! # }
//! ```
//!
//! ## Proxy Substitution
//!
//! An after-initialization hook may return a different object than it
//! received; the container treats the returned instance as authoritative and
//! caches it in place of the original:
//!
//! ```rust
//! use sprout::{Bean, Component, Container, PostProcessor, ScanConfig, StdError};
//!
//! #[derive(Component, Default)]
//! struct PaymentService {}
//!
//! struct PaymentProxy {
//!     inner: Box<dyn Bean>,
//! }
//!
//! impl Bean for PaymentProxy {}
//!
//! #[derive(Component, Default)]
//! #[component(post_processor)]
//! struct ProxyInstaller;
//!
//! impl PostProcessor for ProxyInstaller {
//!     fn after_initialization(
//!         &self,
//!         bean: Box<dyn Bean>,
//!         name: &str,
//!     ) -> Result<Box<dyn Bean>, StdError> {
//!         if name == "paymentService" {
//!             return Ok(Box::new(PaymentProxy { inner: bean }));
//!         }
//!         Ok(bean)
//!     }
//! }
//!
//! # fn main() -> Result<(), sprout::BeanError> {
//! let container = Container::new(
//!     ScanConfig::new(module_path!())
//!         .with::<PaymentService>()
//!         .with::<ProxyInstaller>(),
//! )?;
//! assert!(container.get::<PaymentProxy>("paymentService").is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `macros` (default): Enables `#[derive(Component)]` for component
//!   definitions

mod bean;
mod container;
mod descriptor;
mod processor;
mod registry;
mod source;

pub use bean::*;
pub use container::*;
pub use descriptor::*;
pub use processor::*;
pub use source::*;

#[cfg(feature = "macros")]
pub use sprout_macros::*;
