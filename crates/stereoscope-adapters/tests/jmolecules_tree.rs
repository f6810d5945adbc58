//! Built-in catalog + codebase model + tree walker, end to end.

use std::sync::Arc;

use stereoscope_adapters::{
    BufferSink, BuiltinCatalog, CodebaseModel, DefaultNodeHandler,
    model::TypeEntry,
};
use stereoscope_core::prelude::*;

const LAYERED: &str = "org.jmolecules.architecture.layered";

fn shop() -> CodebaseModel {
    CodebaseModel::builder()
        .package("com.acme.shop.order", [format!("{LAYERED}.DomainLayer")])
        .package("com.acme.shop.web", [format!("{LAYERED}.InterfaceLayer")])
        .ty(TypeEntry::new("com.acme.shop.order.Order")
            .marker("org.jmolecules.ddd.annotation.AggregateRoot"))
        .ty(TypeEntry::new("com.acme.shop.order.Customer")
            .implements("org.jmolecules.ddd.types.AggregateRoot"))
        .ty(TypeEntry::new("com.acme.shop.order.OrderRepository")
            .implements("org.jmolecules.ddd.types.Repository"))
        .ty(TypeEntry::new("com.acme.shop.order.OrderPlaced")
            .marker("org.jmolecules.event.annotation.DomainEvent"))
        .ty(TypeEntry::new("com.acme.shop.order.PlaceOrder")
            .marker("org.jmolecules.architecture.hexagonal.PrimaryPort"))
        .ty(TypeEntry::new("com.acme.shop.order.OrderService")
            .implements("com.acme.shop.order.PlaceOrder"))
        .ty(TypeEntry::new("com.acme.shop.web.OrderController"))
        .build()
        .unwrap()
}

fn catalog() -> Arc<Catalog> {
    Arc::new(BuiltinCatalog::catalog().unwrap())
}

#[test]
fn renders_classified_tree() {
    let model = shop();
    let catalog = catalog();
    let factory = CachingStereotypeFactory::new(IntrospectingStereotypeFactory::new(
        &model,
        catalog.clone(),
    ));
    let options = WalkOptions {
        groupers: vec!["architecture".into()],
        ..WalkOptions::default()
    };
    let walker = TreeWalker::new(&factory, &catalog, &model, &model).with_options(options);

    let mut sink = BufferSink::new();
    let root = model.package("com").unwrap();
    let report = walker
        .walk(&root, &DefaultNodeHandler::new(), &mut sink)
        .unwrap();

    let expected = [
        "com",
        "  com.acme",
        "    com.acme.shop",
        "      com.acme.shop.order [Architecture: Domain Layer]",
        "        Customer (Aggregate Root) [DDD: Aggregate Root | Architecture: Domain Layer]",
        "        Order (Aggregate Root) [DDD: Aggregate Root | Architecture: Domain Layer]",
        "        OrderPlaced (Domain Event) [Events: Domain Event | Architecture: Domain Layer]",
        "        OrderRepository (Repository) [DDD: Repository | Architecture: Domain Layer]",
        "        OrderService (Domain Layer) [Architecture: Primary Port, Domain Layer]",
        "        PlaceOrder (Domain Layer) [Architecture: Primary Port, Domain Layer]",
        "      com.acme.shop.web [Architecture: Interface Layer]",
        "        OrderController (Interface Layer) [Architecture: Interface Layer]",
    ];
    assert_eq!(sink.lines(), expected);
    assert_eq!(report.packages, 5);
    assert_eq!(report.types, 7);
    assert_eq!(report.stereotyped_types, 7);
    assert!(report.is_clean());
    assert_eq!(factory.cached_counts().types, 7);
}

#[test]
fn local_only_keeps_ports_on_the_port() {
    let model = shop();
    let factory = IntrospectingStereotypeFactory::new(&model, catalog()).local_only(true);

    let service = factory
        .from_type(&model.type_ref("com.acme.shop.order.OrderService").unwrap())
        .unwrap();
    let port = factory
        .from_type(&model.type_ref("com.acme.shop.order.PlaceOrder").unwrap())
        .unwrap();

    assert_eq!(service.ids(), vec!["architecture.layered.DomainLayer"]);
    assert_eq!(
        port.ids(),
        vec![
            "architecture.hexagonal.PrimaryPort",
            "architecture.layered.DomainLayer"
        ]
    );
}

#[test]
fn detected_groups_come_from_the_catalog() {
    let model = shop();
    let factory = IntrospectingStereotypeFactory::new(&model, catalog());

    let order = factory
        .from_type(&model.type_ref("com.acme.shop.order.Order").unwrap())
        .unwrap();

    let root = order.primary().unwrap();
    assert_eq!(root.id(), "ddd.AggregateRoot");
    assert_eq!(root.groups(), &["ddd".to_string()]);
    assert!(order.get("architecture.layered.DomainLayer").unwrap().is_in_group("architecture"));
}
