use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sprout::{
    Bean, BeanError, Component, ComponentSource, Configuration, Container, ScanConfig,
    TypeDescriptor,
};

#[derive(Component, Default)]
struct Repository {}

#[test]
fn test_singleton_identity() {
    let container =
        Container::new(ScanConfig::new(module_path!()).with::<Repository>()).unwrap();
    let first = container.get_bean("repository").unwrap();
    let second = container.get_bean("repository").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[derive(Component, Default)]
#[component(scope = "prototype")]
struct TaskBuffer {}

#[test]
fn test_prototype_freshness() {
    let container =
        Container::new(ScanConfig::new(module_path!()).with::<TaskBuffer>()).unwrap();
    let first = container.get_bean("taskBuffer").unwrap();
    let second = container.get_bean("taskBuffer").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[derive(Component, Default)]
struct Inventory {}

#[derive(Component, Default)]
struct Checkout {
    #[inject]
    inventory: Option<Arc<Inventory>>,
}

#[test]
fn test_injection_resolves_by_field_name() {
    let container = Container::new(
        ScanConfig::new(module_path!())
            .with::<Inventory>()
            .with::<Checkout>(),
    )
    .unwrap();
    let checkout = container.get::<Checkout>("checkout").unwrap();
    let inventory = container.get::<Inventory>("inventory").unwrap();
    assert!(Arc::ptr_eq(checkout.inventory.as_ref().unwrap(), &inventory));
}

#[derive(Component, Default)]
#[component(scope = "prototype")]
struct Ticket {}

#[derive(Component, Default)]
struct TicketDesk {
    #[inject]
    ticket: Option<Arc<Ticket>>,
}

#[test]
fn test_injection_snapshots_prototype_dependency() {
    let container = Container::new(
        ScanConfig::new(module_path!())
            .with::<Ticket>()
            .with::<TicketDesk>(),
    )
    .unwrap();
    let desk = container.get::<TicketDesk>("ticketDesk").unwrap();
    let later = container.get::<Ticket>("ticket").unwrap();
    assert!(!Arc::ptr_eq(desk.ticket.as_ref().unwrap(), &later));
}

#[test]
fn test_unknown_bean() {
    let container =
        Container::new(ScanConfig::new(module_path!()).with::<Repository>()).unwrap();
    assert!(matches!(
        container.get_bean("ghost"),
        Err(BeanError::DefinitionNotFound(_))
    ));
}

#[derive(Component, Default)]
struct Sidecar {}

#[test]
fn test_scan_root_filters_types() {
    let container =
        Container::new(ScanConfig::new("elsewhere").with::<Sidecar>()).unwrap();
    assert!(matches!(
        container.get_bean("sidecar"),
        Err(BeanError::DefinitionNotFound(_))
    ));
}

static BOOTSTRAPPED_BUILDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Component)]
struct Bootstrapped;

impl Default for Bootstrapped {
    fn default() -> Self {
        BOOTSTRAPPED_BUILDS.fetch_add(1, Ordering::SeqCst);
        Self
    }
}

#[derive(Component, Default)]
struct EagerHolder {
    #[allow(unused)]
    #[inject]
    bootstrapped: Option<Arc<Bootstrapped>>,
}

#[test]
fn test_singletons_are_constructed_eagerly() {
    let container = Container::new(
        ScanConfig::new(module_path!())
            .with::<Bootstrapped>()
            .with::<EagerHolder>(),
    )
    .unwrap();
    assert_eq!(BOOTSTRAPPED_BUILDS.load(Ordering::SeqCst), 1);
    container.get_bean("bootstrapped").unwrap();
    container.get_bean("eagerHolder").unwrap();
    assert_eq!(BOOTSTRAPPED_BUILDS.load(Ordering::SeqCst), 1);
}

#[derive(Component, Default)]
#[component(name = "alpha", scope = "prototype")]
struct Alpha {
    #[allow(unused)]
    #[inject]
    beta: Option<sprout::BeanRef>,
}

#[derive(Component, Default)]
#[component(name = "beta", scope = "prototype")]
struct Beta {
    #[allow(unused)]
    #[inject]
    alpha: Option<sprout::BeanRef>,
}

fn find_circular(error: &BeanError) -> Option<&BeanError> {
    match error {
        BeanError::CircularDependency { .. } => Some(error),
        BeanError::Injection { source, .. } => find_circular(source),
        _ => None,
    }
}

#[test]
fn test_circular_prototypes() {
    let container = Container::new(
        ScanConfig::new(module_path!())
            .with::<Alpha>()
            .with::<Beta>()
            .with::<Repository>(),
    )
    .unwrap();
    let error = container.get_bean("alpha").unwrap_err();
    let circular = find_circular(&error).expect("expected a circular dependency in the chain");
    match circular {
        BeanError::CircularDependency { chain } => {
            assert_eq!(chain.join(" -> "), "alpha -> beta -> alpha");
        }
        _ => unreachable!(),
    }
    // The failed resolution does not poison other beans.
    container.get_bean("repository").unwrap();
}

#[derive(Component, Default)]
#[component(name = "north")]
struct North {
    #[allow(unused)]
    #[inject]
    south: Option<Arc<South>>,
}

#[derive(Component, Default)]
#[component(name = "south")]
struct South {
    #[allow(unused)]
    #[inject]
    north: Option<Arc<North>>,
}

#[test]
fn test_circular_singletons_fail_bootstrap() {
    // Eager singleton construction hits the cycle while the container is
    // being built; no partially created bean ever becomes observable.
    let error = Container::new(
        ScanConfig::new(module_path!())
            .with::<North>()
            .with::<South>(),
    )
    .unwrap_err();
    assert!(find_circular(&error).is_some());
}

#[derive(Component, Default)]
#[component(name = "worker")]
struct FirstWorker {}

#[derive(Component, Default)]
#[component(name = "worker")]
struct SecondWorker {}

#[test]
fn test_registration_overwrites_previous_definition() {
    let container = Container::new(
        ScanConfig::new(module_path!())
            .with::<FirstWorker>()
            .with::<SecondWorker>(),
    )
    .unwrap();
    assert!(container.get::<SecondWorker>("worker").is_ok());
    assert!(matches!(
        container.get::<FirstWorker>("worker"),
        Err(BeanError::TypeMismatch { .. })
    ));
}

#[derive(Component, Default)]
struct MissingLink {
    #[allow(unused)]
    #[inject]
    nowhere: Option<sprout::BeanRef>,
}

#[test]
fn test_missing_dependency_fails_injection() {
    let error =
        Container::new(ScanConfig::new(module_path!()).with::<MissingLink>()).unwrap_err();
    match error {
        BeanError::Injection {
            name,
            field,
            source,
        } => {
            assert_eq!(name, "missingLink");
            assert_eq!(field, "nowhere");
            assert!(matches!(*source, BeanError::DefinitionNotFound(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

struct CustomSource {
    types: Vec<TypeDescriptor>,
}

struct CustomConfig {
    source: CustomSource,
}

impl ComponentSource for CustomSource {
    fn types(&self, _scan_root: &str) -> Vec<TypeDescriptor> {
        self.types.clone()
    }
}

impl Configuration for CustomConfig {
    fn component_scan(&self) -> Option<&str> {
        Some(module_path!())
    }

    fn component_source(&self) -> &dyn ComponentSource {
        &self.source
    }
}

#[test]
fn test_failing_constructor() {
    let config = CustomConfig {
        source: CustomSource {
            types: vec![TypeDescriptor::new(module_path!(), "Flaky", || {
                Err("broken constructor".into())
            })],
        },
    };
    let error = Container::new(config).unwrap_err();
    assert!(matches!(error, BeanError::Construction { .. }));
}

struct Anonymous {}

impl Bean for Anonymous {}

#[test]
fn test_empty_bean_name_is_skipped() {
    let config = CustomConfig {
        source: CustomSource {
            types: vec![
                TypeDescriptor::new(module_path!(), "Anonymous", || {
                    let bean: Box<dyn Bean> = Box::new(Anonymous {});
                    Ok(bean)
                })
                .named(""),
            ],
        },
    };
    // The definition with an empty name is dropped during the scan.
    let container = Container::new(config).unwrap();
    assert!(matches!(
        container.get_bean(""),
        Err(BeanError::DefinitionNotFound(_))
    ));
}
