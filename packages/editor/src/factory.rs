//! # Component Factory
//!
//! Creates component definitions from user-entered titles.
//!
//! Creation never fails in the error sense: an empty or duplicate title yields
//! [`CreateOutcome::Rejected`] carrying the untouched template, and the caller
//! decides what to tell the user.

use crate::config::EditorConfig;
use crate::model::{Component, ComponentId};
use composer_common::ColorPicker;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Why a title was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    EmptyTitle,
    DuplicateTitle(String),
}

/// Result of running the factory
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Component),
    Rejected {
        template: Component,
        reason: RejectReason,
    },
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }

    /// The created component, or the unchanged template
    pub fn into_component(self) -> Component {
        match self {
            CreateOutcome::Created(component) => component,
            CreateOutcome::Rejected { template, .. } => template,
        }
    }
}

/// Normalize a user-entered title into a component identifier.
///
/// Every word (a run of ASCII letters, digits, `_` or `-`) gets an upper-case
/// first letter, then everything except ASCII letters, digits and `_` is
/// dropped: `"my fancy-box"` becomes `"MyFancybox"`.
pub fn normalize_title(title: &str) -> String {
    let mut normalized = String::with_capacity(title.len());
    let mut in_word = false;

    for ch in title.chars() {
        let word_char = ch.is_ascii_alphanumeric() || ch == '_' || ch == '-';
        let ch = if word_char && !in_word {
            ch.to_ascii_uppercase()
        } else {
            ch
        };
        in_word = word_char;

        if ch.is_ascii_alphanumeric() || ch == '_' {
            normalized.push(ch);
        }
    }

    normalized
}

/// Build a new component titled `title`, unless the title is empty or collides
/// case-insensitively with an existing title after normalization.
pub fn create_component<'a>(
    id: ComponentId,
    title: &str,
    existing: impl IntoIterator<Item = &'a Component>,
    config: &EditorConfig,
) -> CreateOutcome {
    let template = Component::template(config.component_position);

    let normalized = normalize_title(title);
    if normalized.is_empty() {
        return CreateOutcome::Rejected {
            template,
            reason: RejectReason::EmptyTitle,
        };
    }

    let existing: Vec<&Component> = existing.into_iter().collect();
    if existing
        .iter()
        .any(|c| c.title.eq_ignore_ascii_case(&normalized))
    {
        return CreateOutcome::Rejected {
            template,
            reason: RejectReason::DuplicateTitle(normalized),
        };
    }

    let color = ColorPicker::new(&config.palette).pick(existing.iter().map(|c| c.color.as_str()));

    CreateOutcome::Created(Component {
        id,
        title: normalized,
        color,
        expanded: true,
        ..template
    })
}

/// Deferred form of [`create_component`].
///
/// The future owns its inputs and always resolves to an outcome; the caller
/// re-enters the reducer with the value once it settles.
pub fn create_component_deferred(
    id: ComponentId,
    title: String,
    existing: Vec<Component>,
    config: Arc<EditorConfig>,
) -> BoxFuture<'static, CreateOutcome> {
    async move { create_component(id, &title, &existing, &config) }.boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("box"), "Box");
        assert_eq!(normalize_title("my fancy box"), "MyFancyBox");
        assert_eq!(normalize_title("my fancy-box"), "MyFancybox");
        assert_eq!(normalize_title("snake_case name!"), "Snake_caseName");
        assert_eq!(normalize_title("  ?? "), "");
    }

    #[test]
    fn test_create_assigns_id_title_and_color() {
        let config = EditorConfig::default();
        let outcome = create_component(ComponentId(1), "box", [], &config);

        let component = match outcome {
            CreateOutcome::Created(component) => component,
            other => panic!("Expected created component, got {:?}", other),
        };
        assert_eq!(component.id, ComponentId(1));
        assert_eq!(component.title, "Box");
        assert_eq!(component.color, config.palette[0]);
        assert!(component.expanded);
        assert_eq!(component.next_child_id, 1);
        assert_eq!(component.position, config.component_position);
    }

    #[test]
    fn test_empty_title_returns_template() {
        let config = EditorConfig::default();
        let outcome = create_component(ComponentId(1), "", [], &config);

        assert_eq!(
            outcome,
            CreateOutcome::Rejected {
                template: Component::template(config.component_position),
                reason: RejectReason::EmptyTitle,
            }
        );
    }

    #[test]
    fn test_duplicate_after_normalization_is_rejected() {
        let config = EditorConfig::default();
        let existing = create_component(ComponentId(1), "fancy box", [], &config).into_component();

        let outcome = create_component(ComponentId(2), "FANCY-BOX", [&existing], &config);
        assert!(!outcome.is_created());

        let outcome = create_component(ComponentId(2), "fancyBox!", [&existing], &config);
        match outcome {
            CreateOutcome::Rejected { reason, template } => {
                assert_eq!(reason, RejectReason::DuplicateTitle("FancyBox".to_string()));
                assert_eq!(template.id, ComponentId(0));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_colors_avoid_reuse() {
        let config = EditorConfig::default();
        let first = create_component(ComponentId(1), "a", [], &config).into_component();
        let second = create_component(ComponentId(2), "b", [&first], &config).into_component();

        assert_ne!(first.color, second.color);
    }

    #[test]
    fn test_deferred_creation_resolves_to_outcome() {
        let config = Arc::new(EditorConfig::default());
        let outcome = futures::executor::block_on(create_component_deferred(
            ComponentId(3),
            "card".to_string(),
            Vec::new(),
            config,
        ));

        assert_eq!(outcome.into_component().title, "Card");
    }
}
