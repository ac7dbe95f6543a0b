//! Tests for longer mutation sequences
//!
//! This tests:
//! - Delete cascades followed by undo
//! - Drag gestures batched into one undo step
//! - Graph integrity after every step

use composer_editor::{
    ComponentId, ComponentTree, EditSession, EditorConfig, Mutation, PlacementRef,
};
use std::collections::BTreeMap;

fn add(title: &str) -> Mutation {
    Mutation::AddComponent {
        title: title.to_string(),
    }
}

fn embed(title: &str) -> Mutation {
    Mutation::AddChild {
        title: title.to_string(),
        child_type: "COMP".to_string(),
        html_info: BTreeMap::new(),
    }
}

fn focus(title: &str) -> Mutation {
    Mutation::ChangeFocusComponent {
        title: Some(title.to_string()),
    }
}

/// Icon inside Button, Button twice inside Toolbar
fn toolbar_session() -> EditSession {
    let mut session = EditSession::new(EditorConfig::default());
    for mutation in [
        add("Icon"),
        add("Button"),
        embed("Icon"),
        add("Toolbar"),
        embed("Button"),
        embed("Button"),
    ] {
        assert!(session.dispatch(mutation));
        assert!(session.state().graph().validate().is_ok());
    }
    session
}

#[test]
fn test_nested_ancestors() {
    let mut session = toolbar_session();
    session.dispatch(focus("Icon"));

    assert_eq!(
        session.state().ancestors(),
        &[ComponentId(2), ComponentId(3)]
    );
    assert!(session.state().selectable_children().is_empty());

    // Neither Button nor Toolbar can go inside Icon
    assert!(!session.dispatch(embed("Button")));
    assert!(!session.dispatch(embed("Toolbar")));
}

#[test]
fn test_delete_component_then_undo() {
    let mut session = toolbar_session();

    assert!(session.dispatch(Mutation::DeleteComponent {
        component_id: ComponentId(2),
    }));

    let toolbar = session.state().component(ComponentId(3)).unwrap();
    assert!(toolbar.children.is_empty());
    assert!(session.state().component(ComponentId(2)).is_none());
    assert!(session.state().graph().validate().is_ok());

    // The cascade undoes together with the deletion
    assert!(session.undo());
    let toolbar = session.state().component(ComponentId(3)).unwrap();
    assert_eq!(toolbar.children.len(), 2);
    assert_eq!(
        ComponentTree::build(session.state(), ComponentId(3))
            .unwrap()
            .len(),
        5
    );
}

#[test]
fn test_drag_gesture_is_one_undo_step() {
    let mut session = toolbar_session();
    let before = session.state().component(ComponentId(3)).unwrap().children[0].position;

    session.begin_gesture("Drag Button");
    for step in 1..=5 {
        let moved = session.dispatch(Mutation::HandleTransform {
            component_id: ComponentId(3),
            child_id: PlacementRef::Child(composer_editor::ChildId(1)),
            x: before.x + f64::from(step) * 10.0,
            y: before.y + f64::from(step) * 5.0,
            width: 0.0,
            height: 0.0,
        });
        assert!(moved);
    }
    session.end_gesture();

    let dragged = session.state().component(ComponentId(3)).unwrap().children[0].position;
    assert_eq!(dragged.x, before.x + 50.0);
    assert_eq!(session.history().undo_description(), Some("Drag Button"));

    assert!(session.undo());
    let restored = session.state().component(ComponentId(3)).unwrap().children[0].position;
    assert_eq!(restored, before);

    assert!(session.redo());
    let redone = session.state().component(ComponentId(3)).unwrap().children[0].position;
    assert_eq!(redone, dragged);
}

#[test]
fn test_rejected_mutations_do_not_enter_history() {
    let mut session = toolbar_session();
    let levels = session.history().undo_levels();
    let version = session.version();

    assert!(!session.dispatch(add("toolbar")));
    assert!(!session.dispatch(Mutation::TogglePanel {
        component_id: ComponentId(99),
    }));

    assert_eq!(session.history().undo_levels(), levels);
    assert_eq!(session.version(), version);
}

#[test]
fn test_only_newest_panel_is_expanded() {
    let mut session = toolbar_session();

    let expanded: Vec<ComponentId> = session
        .state()
        .components()
        .filter(|c| c.expanded)
        .map(|c| c.id)
        .collect();
    assert_eq!(expanded, vec![ComponentId(3)]);

    session.dispatch(Mutation::TogglePanel {
        component_id: ComponentId(1),
    });
    assert!(session.state().component(ComponentId(1)).unwrap().expanded);
}
