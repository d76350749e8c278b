//! Integration tests for tree building and grouping

mod common;

use std::rc::Rc;

use common::init_test_setup;
use pin_layout::canvas::{Canvas, ElementId};
use pin_layout::relation::{EdgePin, StaticConstraint};
use pin_layout::{
    AnchorKey, Attribute, Containment, ConstraintSpec, Node, PinOptions, Pinnable, Priority,
    Relation, RelationKind, SelfRelation, Target,
};
use pretty_assertions::assert_eq;

fn elements(canvas: &mut Canvas, names: &[&str]) -> Vec<ElementId> {
    names.iter().map(|name| canvas.element(*name)).collect()
}

fn child_elements(node: &Node<Canvas>) -> Vec<ElementId> {
    node.children().iter().map(Node::element).collect()
}

#[test]
fn test_builders_leave_receiver_untouched() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let ids = elements(&mut canvas, &["root", "a", "b"]);
    let (root, a, b) = (ids[0], ids[1], ids[2]);

    let base = root.to_node();
    let with_child = base.add([a]);
    let pinned = with_child.pin_to_edges(4.0);
    let sized = pinned.size(10.0, 20.0);
    let more = sized.add([b]);

    assert!(base.children().is_empty());
    assert!(base.parent_relations().is_empty());
    assert_eq!(child_elements(&with_child), vec![a]);
    assert!(with_child.parent_relations().is_empty());
    assert_eq!(pinned.parent_relations().len(), 1);
    assert!(pinned.self_relations().is_empty());
    assert_eq!(sized.self_relations().len(), 2);
    assert_eq!(child_elements(&more), vec![a, b]);
    assert_eq!(child_elements(&sized), vec![a]);
}

#[test]
fn test_derived_nodes_share_relations() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let root = canvas.element("root");
    let child = canvas.element("child");

    let sized = root.size_width(100.0);
    let derived = sized.add([child]);

    assert!(Rc::ptr_eq(
        &sized.self_relations()[0],
        &derived.self_relations()[0]
    ));
}

#[test]
fn test_appending_sorts_relations_by_kind() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let child = canvas.element("child");

    let width = StaticConstraint::<Canvas>::new(ConstraintSpec::constant(
        Target::Element(child),
        Attribute::Width,
        RelationKind::GreaterOrEqual,
        10.0,
    ));
    let pin = EdgePin::<Canvas>::new(child, Attribute::SIZE, PinOptions::default());
    let node = child.appending([Relation::from(width), Relation::from(pin)]);

    assert_eq!(node.self_relations().len(), 1);
    assert_eq!(node.parent_relations().len(), 1);
    assert_eq!(node.self_relations().live_count(), 0);
}

#[test]
fn test_contain_replaces_strategy_and_add_keeps_it() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let ids = elements(&mut canvas, &["root", "a", "b"]);

    let noop = Containment::<Canvas>::custom(|_, _, _| {});
    let custom = ids[0].contain([ids[1]], noop);
    assert!(matches!(custom.containment(), Containment::Custom(_)));

    let extended = custom.add([ids[2]]);
    assert!(matches!(extended.containment(), Containment::Custom(_)));

    let replaced = extended.using(Containment::Append);
    assert!(matches!(replaced.containment(), Containment::Append));
    assert_eq!(child_elements(&replaced), vec![ids[1], ids[2]]);
}

#[test]
fn test_pin_options_flow_into_edge_pins() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let child = canvas.element("child");

    let pin = EdgePin::<Canvas>::new(
        child,
        &[Attribute::Leading, Attribute::TrailingMargin],
        PinOptions::new()
            .with_padding(6.0)
            .with_priority(Priority::DEFAULT_HIGH),
    );
    let pins = pin.pins();

    assert_eq!(pins[0].child, Attribute::Leading);
    assert_eq!(pins[0].offset, 6.0);
    assert_eq!(pins[1].child, Attribute::Trailing);
    assert_eq!(pins[1].parent, Attribute::TrailingMargin);
    assert_eq!(pins[1].offset, -6.0);
}

#[test]
fn test_pin_anchor_is_a_self_relation() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let a = canvas.element("a");
    let b = canvas.element("b");

    let node = a.pin_anchor_with(
        AnchorKey::TOP,
        b.anchor(AnchorKey::BOTTOM),
        12.0,
        Priority::DEFAULT_LOW,
    );

    assert_eq!(node.self_relations().len(), 1);
    assert!(node.parent_relations().is_empty());
}

#[test]
fn test_group_builder_flattens_in_order() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let ids = elements(&mut canvas, &["root", "a", "b", "c", "d", "e", "f"]);
    let &[root, a, b, c, d, e, f] = ids.as_slice() else {
        panic!("expected seven elements");
    };
    let show_optional = false;
    let extra: Option<ElementId> = Some(f);

    let tree = root.add_group(|group| {
        group
            .push(a)
            .group(|inner| {
                inner.push(b.size_square(4.0)).push_if(show_optional, || c);
            })
            .push_either(show_optional, || c.to_node(), || d)
            .push_some(None::<ElementId>)
            .group(|_| {})
            .push_if(true, || e)
            .push_some(extra);
    });

    assert_eq!(child_elements(&tree), vec![a, b, d, e, f]);
    assert_eq!(tree.children()[1].self_relations().len(), 2);
}

#[test]
fn test_group_children_follow_existing_children() {
    init_test_setup();
    let mut canvas = Canvas::new();
    let ids = elements(&mut canvas, &["root", "a", "b"]);

    let tree = ids[0].add([ids[1]]).add_group(|group| {
        group.push(ids[2]);
    });

    assert_eq!(child_elements(&tree), vec![ids[1], ids[2]]);
    assert_eq!(tree.node_count(), 3);
}
