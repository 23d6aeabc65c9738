use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::path::{display_segments, NodePath};

/// What a node holds: a scalar value or an ordered list of children.
///
/// A node is never both. An empty `Children` list is a container that has
/// not been filled yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeContent {
    /// Leaf node carrying scalar text.
    Value(String),
    /// Container node with ordered, possibly same-named children.
    Children(Vec<Node>),
}

/// A named element of a document tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element name. Siblings may share a name.
    pub name: String,
    pub content: NodeContent,
}

impl Node {
    /// Create a leaf node with a scalar value.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: NodeContent::Value(value.into()),
        }
    }

    /// Create a container node with the given children.
    pub fn container(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            content: NodeContent::Children(children),
        }
    }

    /// Create an empty container node.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::container(name, Vec::new())
    }

    /// Returns `true` if this node carries a scalar value.
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Value(_))
    }

    /// The scalar value, if this is a leaf.
    pub fn value(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Value(v) => Some(v),
            NodeContent::Children(_) => None,
        }
    }

    /// Child nodes in document order. Empty for leaves.
    pub fn children(&self) -> &[Node] {
        match &self.content {
            NodeContent::Value(_) => &[],
            NodeContent::Children(children) => children,
        }
    }

    /// Mutable access to the child list; `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.content {
            NodeContent::Value(_) => None,
            NodeContent::Children(children) => Some(children),
        }
    }

    /// The first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Mutable access to the first direct child with the given name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children_mut()?.iter_mut().find(|c| c.name == name)
    }

    /// All direct children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().iter().filter(move |c| c.name == name)
    }

    /// Return this node under a different name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }

    /// Append a child node.
    ///
    /// Fails with [`TreeError::StructuralConflict`] if this node is a leaf;
    /// `at` names this node's location for the error message.
    pub fn push_child(&mut self, child: Node, at: &[String]) -> TreeResult<()> {
        match self.children_mut() {
            Some(children) => {
                children.push(child);
                Ok(())
            }
            None => Err(TreeError::StructuralConflict {
                path: display_segments(at),
            }),
        }
    }

    /// Find the first direct child container named `name`, creating and
    /// appending an empty one if none exists.
    ///
    /// `at` is this node's own location and is only used for error messages.
    /// Fails with [`TreeError::StructuralConflict`] if this node is a leaf or
    /// if the first child named `name` is a leaf.
    pub fn child_container_or_insert(&mut self, name: &str, at: &[String]) -> TreeResult<&mut Node> {
        let conflict = |mut path: Vec<String>| {
            path.push(name.to_string());
            TreeError::StructuralConflict {
                path: display_segments(&path),
            }
        };

        let Some(children) = self.children_mut() else {
            return Err(TreeError::StructuralConflict {
                path: display_segments(at),
            });
        };

        let index = match children.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                children.push(Node::empty(name));
                children.len() - 1
            }
        };

        let child = &mut children[index];
        if child.is_leaf() {
            return Err(conflict(at.to_vec()));
        }
        Ok(child)
    }

    /// Walk `segments` from this node, creating missing containers on the way.
    ///
    /// Returns the container at the end of the chain. An empty chain yields
    /// `self`.
    pub fn ensure_containers(&mut self, segments: &[String]) -> TreeResult<&mut Node> {
        let mut current = self;
        for (depth, segment) in segments.iter().enumerate() {
            current = current.child_container_or_insert(segment, &segments[..depth])?;
        }
        if current.is_leaf() {
            return Err(TreeError::StructuralConflict {
                path: display_segments(segments),
            });
        }
        Ok(current)
    }

    /// Resolve an absolute path against this node as the document root.
    ///
    /// At every level the first child with the matching name is taken.
    pub fn resolve(&self, path: &NodePath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Detach the node addressed by `path` from its parent and return it.
    ///
    /// Returns `None` when any segment does not resolve.
    pub fn detach(&mut self, path: &NodePath) -> Option<Node> {
        let mut parent = self;
        for segment in path.parent_segments() {
            parent = parent.child_mut(segment)?;
        }
        let children = parent.children_mut()?;
        let index = children.iter().position(|c| c.name == path.leaf_name())?;
        Some(children.remove(index))
    }
}
