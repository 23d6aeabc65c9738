//! Additive tree merge: overlay an additions template onto a node tree.
//!
//! Merge rules, per template entry:
//!
//! - **Sub-template** — find the first child container with the entry's
//!   name, or create and append an empty one, then merge into it. Applying
//!   the same nested template twice extends one container, never two.
//! - **List** — every element produces its own new sibling container with
//!   the entry's name. Repeated elements are not deduplicated.
//! - **Scalar** — always appended as a new leaf, even if a leaf with the
//!   same name already exists.
//!
//! Nodes the template does not name are never touched.

use cfgup_plan::{Template, TemplateValue};
use cfgup_tree::path::display_segments;
use cfgup_tree::Node;
use tracing::trace;

use crate::error::{UpgradeError, UpgradeResult};

/// Merge `template` into the direct children of `root`.
///
/// Returns the number of nodes created. On error `root` may hold a partial
/// merge; callers work on a copy and discard it.
pub fn merge_template(template: &Template, root: &mut Node) -> UpgradeResult<usize> {
    let mut merger = TreeMerger::default();
    merger.extend(template, "", root, &[])?;
    Ok(merger.added)
}

#[derive(Default)]
struct TreeMerger {
    added: usize,
}

impl TreeMerger {
    /// Extend the child of `destination` named `node_name` with `template`.
    ///
    /// An empty `node_name` extends `destination` itself. `at` is the
    /// location of `destination`.
    fn extend(
        &mut self,
        template: &Template,
        node_name: &str,
        destination: &mut Node,
        at: &[String],
    ) -> UpgradeResult<()> {
        if node_name.is_empty() {
            return self.extend_node(template, destination, at);
        }

        if destination.child(node_name).is_none() {
            self.added += 1;
        }
        let working = destination.child_container_or_insert(node_name, at)?;

        let mut location = at.to_vec();
        location.push(node_name.to_string());
        self.extend_node(template, working, &location)
    }

    /// Apply every template entry to `working`, in template order.
    fn extend_node(&mut self, template: &Template, working: &mut Node, at: &[String]) -> UpgradeResult<()> {
        for (key, value) in template.entries() {
            match value {
                TemplateValue::Object(inner) => self.extend(inner, key, working, at)?,
                TemplateValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let TemplateValue::Object(inner) = item else {
                            let mut location = at.to_vec();
                            location.push(key.to_string());
                            return Err(UpgradeError::MalformedTemplate {
                                key: format!("{}[{index}]", display_segments(&location)),
                                reason: format!("list elements must be objects, found {}", item.kind()),
                            });
                        };

                        let mut location = at.to_vec();
                        location.push(key.to_string());
                        let mut element = Node::empty(key);
                        self.added += 1;
                        self.extend_node(inner, &mut element, &location)?;
                        working.push_child(element, at)?;
                    }
                }
                TemplateValue::Scalar(text) => {
                    trace!(at = %display_segments(at), key, "appending leaf");
                    working.push_child(Node::leaf(key, text.as_str()), at)?;
                    self.added += 1;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgup_tree::NodePath;
    use proptest::prelude::*;
    use serde_json::json;

    fn path(s: &str) -> NodePath {
        NodePath::parse(s).unwrap()
    }

    fn template(value: serde_json::Value) -> Template {
        Template::from_json(&value).unwrap()
    }

    fn default_tree() -> Node {
        Node::container(
            "configuration",
            vec![
                Node::leaf("ExampleString", "test"),
                Node::leaf("ExampleNumber", "2"),
            ],
        )
    }

    fn deep_tree() -> Node {
        Node::container(
            "configuration",
            vec![Node::container(
                "ExampleStructure",
                vec![Node::leaf("DeepSettingOne", "One")],
            )],
        )
    }

    #[test]
    fn add_scalar_to_root() {
        let mut root = default_tree();
        let added = merge_template(&template(json!({ "AddedNumber": "3" })), &mut root).unwrap();

        assert_eq!(added, 1);
        assert_eq!(root.resolve(&path("/AddedNumber")).unwrap().value(), Some("3"));
        assert_eq!(root.children().len(), 3);
    }

    #[test]
    fn add_new_structure() {
        let mut root = default_tree();
        merge_template(
            &template(json!({ "AddedStructure": { "SettingOne": "works" } })),
            &mut root,
        )
        .unwrap();

        assert_eq!(
            root.resolve(&path("/AddedStructure/SettingOne")).unwrap().value(),
            Some("works")
        );
    }

    #[test]
    fn extend_existing_structure_without_duplicating_it() {
        let mut root = deep_tree();
        let added = merge_template(
            &template(json!({ "ExampleStructure": { "DeepSettingTwo": "Two" } })),
            &mut root,
        )
        .unwrap();

        assert_eq!(added, 1);
        assert_eq!(root.children_named("ExampleStructure").count(), 1);
        let structure = root.child("ExampleStructure").unwrap();
        assert_eq!(structure.child("DeepSettingOne").unwrap().value(), Some("One"));
        assert_eq!(structure.child("DeepSettingTwo").unwrap().value(), Some("Two"));
    }

    #[test]
    fn nested_template_applied_twice_reuses_container() {
        let additions = template(json!({ "Outer": { "Inner": { "Leaf": "x" } } }));
        let mut root = default_tree();
        merge_template(&additions, &mut root).unwrap();
        merge_template(&additions, &mut root).unwrap();

        assert_eq!(root.children_named("Outer").count(), 1);
        let outer = root.child("Outer").unwrap();
        assert_eq!(outer.children_named("Inner").count(), 1);
        // Scalars are appended on every pass.
        assert_eq!(outer.child("Inner").unwrap().children_named("Leaf").count(), 2);
    }

    #[test]
    fn scalar_applied_twice_duplicates_leaf() {
        let additions = template(json!({ "ExampleString": "again" }));
        let mut root = default_tree();
        merge_template(&additions, &mut root).unwrap();

        let values: Vec<_> = root
            .children_named("ExampleString")
            .filter_map(Node::value)
            .collect();
        assert_eq!(values, ["test", "again"]);
    }

    #[test]
    fn list_elements_become_sibling_containers() {
        let additions = template(json!({
            "Servers": {
                "Server": [ { "Host": "a" }, { "Host": "b" } ]
            }
        }));
        let mut root = default_tree();
        let added = merge_template(&additions, &mut root).unwrap();

        let servers = root.child("Servers").unwrap();
        let hosts: Vec<_> = servers
            .children_named("Server")
            .map(|s| s.child("Host").and_then(Node::value))
            .collect();
        assert_eq!(hosts, [Some("a"), Some("b")]);
        // Servers + 2 * (Server + Host)
        assert_eq!(added, 5);
    }

    #[test]
    fn list_elements_are_appended_next_to_existing_ones() {
        let mut root = Node::container(
            "configuration",
            vec![Node::container("Server", vec![Node::leaf("Host", "old")])],
        );
        merge_template(&template(json!({ "Server": [ { "Host": "new" } ] })), &mut root).unwrap();

        assert_eq!(root.children_named("Server").count(), 2);
        assert_eq!(
            root.children()[0].child("Host").unwrap().value(),
            Some("old")
        );
    }

    #[test]
    fn descending_into_leaf_is_a_conflict() {
        let mut root = default_tree();
        let err = merge_template(
            &template(json!({ "ExampleString": { "Inner": "x" } })),
            &mut root,
        )
        .unwrap_err();

        assert_eq!(
            err,
            UpgradeError::StructuralConflict {
                path: "/ExampleString".into()
            }
        );
    }

    #[test]
    fn deep_conflict_reports_full_path() {
        let mut root = deep_tree();
        let err = merge_template(
            &template(json!({ "ExampleStructure": { "DeepSettingOne": { "X": "1" } } })),
            &mut root,
        )
        .unwrap_err();

        assert_eq!(
            err,
            UpgradeError::StructuralConflict {
                path: "/ExampleStructure/DeepSettingOne".into()
            }
        );
    }

    #[test]
    fn scalar_list_element_is_malformed() {
        let additions = Template::new().with("Items", TemplateValue::List(vec!["x".into()]));
        let mut root = default_tree();
        let err = merge_template(&additions, &mut root).unwrap_err();

        assert!(matches!(
            err,
            UpgradeError::MalformedTemplate { ref key, .. } if key == "/Items[0]"
        ));
    }

    #[test]
    fn empty_template_changes_nothing() {
        let mut root = deep_tree();
        assert_eq!(merge_template(&Template::new(), &mut root).unwrap(), 0);
        assert_eq!(root, deep_tree());
    }

    proptest! {
        #[test]
        fn merge_with_new_names_preserves_existing_nodes(
            names in proptest::collection::btree_set("[A-Z][a-z]{1,6}", 1..6),
            values in proptest::collection::vec("[a-z0-9]{0,8}", 6),
        ) {
            let original = default_tree();
            let mut additions = Template::new();
            for (name, value) in names.iter().zip(&values) {
                let key = format!("New{name}");
                additions.insert(key, Template::new().with("Value", value.as_str()));
            }

            let mut root = original.clone();
            let added = merge_template(&additions, &mut root).unwrap();

            prop_assert_eq!(added, names.len() * 2);
            prop_assert_eq!(&root.children()[..2], original.children());
            for (name, value) in names.iter().zip(&values) {
                let found = root.resolve(&path(&format!("/New{name}/Value")));
                prop_assert_eq!(found.and_then(Node::value), Some(value.as_str()));
            }
        }
    }
}
