//! Tests for individual mutations against a prepared state

use composer_editor::{
    ApplicationState, ChildId, ComponentId, ErrorClass, Mutation, MutationError, PlacementRef,
    SortValue,
};
use composer_common::Position;
use std::collections::BTreeMap;

fn apply(state: &ApplicationState, mutation: Mutation) -> ApplicationState {
    mutation.apply(state).unwrap()
}

fn add(title: &str) -> Mutation {
    Mutation::AddComponent {
        title: title.to_string(),
    }
}

fn html(element: &str) -> Mutation {
    Mutation::AddChild {
        title: element.to_string(),
        child_type: element.to_string(),
        html_info: BTreeMap::new(),
    }
}

fn delete(child_id: u32) -> Mutation {
    Mutation::DeleteChild {
        parent_id: None,
        child_id: Some(PlacementRef::Child(ChildId(child_id))),
        called_from_delete_component: false,
    }
}

/// "Page" with three HTML children
fn page() -> ApplicationState {
    let state = apply(&ApplicationState::default(), add("Page"));
    let state = apply(&state, html("Button"));
    let state = apply(&state, html("Paragraph"));
    apply(&state, html("Image"))
}

#[test]
fn test_titles_stay_unique() {
    let state = apply(&ApplicationState::default(), add("Box"));

    for title in ["box", "BOX", " box ", "b-ox"] {
        let result = add(title).apply(&state);
        assert!(
            matches!(result, Err(MutationError::DuplicateTitle(_))),
            "{} should collide with Box",
            title
        );
    }

    assert_eq!(
        add("!!").apply(&state).unwrap_err(),
        MutationError::EmptyTitle
    );
    assert_eq!(state.len(), 1);
}

#[test]
fn test_child_ids_are_never_reused() {
    let state = apply(&page(), delete(2));
    let state = apply(&state, html("Link"));

    let ids: Vec<u32> = state
        .focus_component()
        .unwrap()
        .children
        .iter()
        .map(|c| c.child_id.0)
        .collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert_eq!(state.focus_component().unwrap().next_child_id, 5);
}

#[test]
fn test_delete_child_moves_focus_to_last_child() {
    let state = apply(&page(), delete(3));

    assert_eq!(
        state.focus_child_ref(),
        Some(PlacementRef::Child(ChildId(2)))
    );
    assert_eq!(state.focus_component().unwrap().focus_child_id, None);
}

#[test]
fn test_delete_child_guards() {
    let state = page();

    let self_delete = Mutation::DeleteChild {
        parent_id: None,
        child_id: Some(PlacementRef::SelfPlacement),
        called_from_delete_component: false,
    };
    let err = self_delete.apply(&state).unwrap_err();
    assert_eq!(err, MutationError::CannotDeleteSelfPlacement);
    assert_eq!(err.class(), ErrorClass::UserInput);

    // During a component cascade the self placement is simply skipped
    let cascading = Mutation::DeleteChild {
        parent_id: None,
        child_id: Some(PlacementRef::SelfPlacement),
        called_from_delete_component: true,
    };
    let after = cascading.apply(&state).unwrap();
    assert_eq!(after.focus_component().unwrap().children.len(), 3);

    let missing = delete(42).apply(&state).unwrap_err();
    assert_eq!(missing.class(), ErrorClass::DataIntegrity);
}

#[test]
fn test_transform_is_idempotent() {
    let transform = Mutation::HandleTransform {
        component_id: ComponentId(1),
        child_id: PlacementRef::Child(ChildId(2)),
        x: 120.0,
        y: 80.0,
        width: 300.0,
        height: 0.0,
    };

    let once = apply(&page(), transform.clone());
    let twice = apply(&once, transform);

    assert_eq!(once.component(ComponentId(1)), twice.component(ComponentId(1)));
    let child = once.component(ComponentId(1)).unwrap().children[1].clone();
    assert_eq!(child.position, Position::new(120.0, 80.0, 300.0, 75.0));
}

fn box_in_card() -> ApplicationState {
    let state = apply(&ApplicationState::default(), add("Box"));
    let state = apply(&state, add("Card"));
    apply(
        &state,
        Mutation::AddChild {
            title: "Box".to_string(),
            child_type: "COMP".to_string(),
            html_info: BTreeMap::new(),
        },
    )
}

#[test]
fn test_transform_refuses_negative_sizes() {
    let state = box_in_card();

    let shrink_self = Mutation::HandleTransform {
        component_id: ComponentId(1),
        child_id: PlacementRef::SelfPlacement,
        x: 0.0,
        y: 0.0,
        width: -10.0,
        height: 0.0,
    };
    let err = shrink_self.apply(&state).unwrap_err();
    assert_eq!(
        err,
        MutationError::DegenerateGeometry {
            component_id: ComponentId(1),
            target: PlacementRef::SelfPlacement,
            width: -10.0,
            height: 550.0,
        }
    );
    assert_eq!(err.class(), ErrorClass::DataIntegrity);

    let shrink_child = Mutation::HandleTransform {
        component_id: ComponentId(2),
        child_id: PlacementRef::Child(ChildId(1)),
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: -1.0,
    };
    assert!(matches!(
        shrink_child.apply(&state),
        Err(MutationError::DegenerateGeometry { .. })
    ));

    // Untouched, so every instance of Box can still be scaled
    let boxed = state.component(ComponentId(1)).unwrap();
    assert!(!boxed.position.is_degenerate());
}

#[test]
fn test_delete_component_removes_instances() {
    let state = box_in_card();

    let after = Mutation::DeleteComponent {
        component_id: ComponentId(1),
    }
    .apply(&state)
    .unwrap();

    assert!(after.component(ComponentId(1)).is_none());
    let card = after.component(ComponentId(2)).unwrap();
    assert!(card.children.is_empty());
    assert_eq!(card.next_child_id, 2);
    assert!(after.graph().validate().is_ok());
}

#[test]
fn test_self_placement_is_not_a_child() {
    let state = apply(
        &page(),
        Mutation::ChangeFocusChild {
            child_id: PlacementRef::SelfPlacement,
        },
    );

    let component = state.focus_component().unwrap();
    assert_eq!(component.children.len(), 3);
    assert!(component.children.iter().all(|c| c.child_id.0 > 0));
    assert_eq!(state.focus_child_ref(), Some(PlacementRef::SelfPlacement));
}

#[test]
fn test_focus_child_falls_back_to_self() {
    let state = apply(
        &page(),
        Mutation::ChangeFocusChild {
            child_id: PlacementRef::Child(ChildId(99)),
        },
    );

    assert_eq!(state.focus_child_ref(), Some(PlacementRef::SelfPlacement));
}

#[test]
fn test_component_focus_child_is_restored() {
    let state = apply(
        &page(),
        Mutation::ChangeComponentFocusChild {
            component_id: ComponentId(1),
            child_id: PlacementRef::Child(ChildId(2)),
        },
    );
    let state = apply(&state, add("Other"));
    assert_eq!(state.focus_child_ref(), None);

    let state = apply(
        &state,
        Mutation::ChangeFocusComponent {
            title: Some("Page".to_string()),
        },
    );
    assert_eq!(
        state.focus_child_ref(),
        Some(PlacementRef::Child(ChildId(2)))
    );

    let missing_child = Mutation::ChangeComponentFocusChild {
        component_id: ComponentId(1),
        child_id: PlacementRef::Child(ChildId(77)),
    };
    assert!(matches!(
        missing_child.apply(&state),
        Err(MutationError::ChildNotFound { .. })
    ));
}

#[test]
fn test_update_html_attr_requires_html_child() {
    let state = apply(&ApplicationState::default(), add("Box"));
    let state = apply(&state, add("Card"));
    let state = apply(
        &state,
        Mutation::AddChild {
            title: "Box".to_string(),
            child_type: "COMP".to_string(),
            html_info: BTreeMap::new(),
        },
    );

    let result = Mutation::UpdateHtmlAttr {
        attr: "id".to_string(),
        value: "main".to_string(),
    }
    .apply(&state);

    assert_eq!(result.unwrap_err(), MutationError::NotAnHtmlChild(ChildId(1)));
}

#[test]
fn test_children_sort_is_all_or_nothing() {
    let state = page();

    let partial = Mutation::UpdateChildrenSort {
        new_sort_values: vec![SortValue {
            child_id: ChildId(1),
            child_sort: 9,
        }],
    };
    assert_eq!(
        partial.apply(&state).unwrap_err(),
        MutationError::MissingSortValue(ChildId(2))
    );

    let full = Mutation::UpdateChildrenSort {
        new_sort_values: vec![
            SortValue {
                child_id: ChildId(3),
                child_sort: 1,
            },
            SortValue {
                child_id: ChildId(1),
                child_sort: 2,
            },
            SortValue {
                child_id: ChildId(2),
                child_sort: 3,
            },
        ],
    };
    let state = apply(&state, full);
    let sorts: Vec<i64> = state
        .focus_component()
        .unwrap()
        .children
        .iter()
        .map(|c| c.child_sort)
        .collect();
    assert_eq!(sorts, vec![2, 3, 1]);
}

#[test]
fn test_rename_propagates_to_instances() {
    let state = apply(&ApplicationState::default(), add("Box"));
    let state = apply(&state, add("Card"));
    let state = apply(
        &state,
        Mutation::AddChild {
            title: "Box".to_string(),
            child_type: "COMP".to_string(),
            html_info: BTreeMap::new(),
        },
    );

    let state = apply(
        &state,
        Mutation::UpdateComponent {
            component_id: Some(ComponentId(1)),
            title: Some("crate".to_string()),
            stateful: Some(true),
            props: None,
        },
    );

    let renamed = state.component(ComponentId(1)).unwrap();
    assert_eq!(renamed.title, "Crate");
    assert!(renamed.stateful);
    let card = state.component(ComponentId(2)).unwrap();
    assert_eq!(card.children[0].component_name, "Crate");

    let clash = Mutation::UpdateComponent {
        component_id: Some(ComponentId(2)),
        title: Some("CRATE".to_string()),
        stateful: None,
        props: None,
    };
    assert_eq!(
        clash.apply(&state).unwrap_err(),
        MutationError::DuplicateTitle("CRATE".to_string())
    );
}

#[test]
fn test_child_position_offsets() {
    let state = apply(&ApplicationState::default(), add("Box"));
    let state = apply(&state, add("Card"));

    // Component children wrap every 150px, HTML children keep stepping
    let mut state = state;
    for _ in 0..10 {
        state = apply(
            &state,
            Mutation::AddChild {
                title: "Box".to_string(),
                child_type: "COMP".to_string(),
                html_info: BTreeMap::new(),
            },
        );
    }
    state = apply(&state, html("Button"));

    let card = state.component(ComponentId(2)).unwrap();
    assert_eq!(card.children[0].position.x, 41.0);
    // child 10: 160 % 150 = 10
    assert_eq!(card.children[9].position.x, 35.0);
    assert_eq!(card.children[9].position.width, 800.0);
    // child 11: 176
    assert_eq!(card.children[10].position, Position::new(201.0, 201.0, 75.0, 28.0));
}
