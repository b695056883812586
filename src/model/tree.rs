// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The search tree as the search engine hands it over: a synthetic root plus expanded nodes.

use super::ids::{NodeId, TrialId};

/// Score carried by nodes that have no real score yet (the root, in particular).
pub const ROOT_SCORE: f64 = -1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Node<S> {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
    score: f64,
    state: Option<S>,
    trial_id: Option<TrialId>,
}

impl<S> Node<S> {
    fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            parent: None,
            children: Vec::new(),
            depth: 0,
            score: ROOT_SCORE,
            state: None,
            trial_id: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn trial_id(&self) -> Option<&TrialId> {
        self.trial_id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("parent node {parent} does not exist")]
    UnknownParent { parent: NodeId },
    #[error("node {id} does not exist")]
    UnknownNode { id: NodeId },
}

/// Arena of search nodes. Ids are handed out in insertion (expansion) order starting at `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<S> {
    root: Node<S>,
    nodes: Vec<Node<S>>,
}

impl<S> Default for Tree<S> {
    fn default() -> Self {
        Self::with_root()
    }
}

impl<S> Tree<S> {
    pub fn with_root() -> Self {
        Self { root: Node::root(), nodes: Vec::new() }
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len() + 1
    }

    /// A tree always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        if id.is_root() {
            return Some(&self.root);
        }
        usize::try_from(id.get()).ok().and_then(|idx| self.nodes.get(idx))
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<S>> {
        if id.is_root() {
            return Some(&mut self.root);
        }
        usize::try_from(id.get()).ok().and_then(move |idx| self.nodes.get_mut(idx))
    }

    /// Every node, root first, then in expansion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<S>> + '_ {
        std::iter::once(&self.root).chain(self.nodes.iter())
    }

    pub fn add_node(&mut self, parent: NodeId, state: S, score: f64) -> Result<NodeId, TreeError> {
        self.insert(parent, state, score, None)
    }

    pub fn add_node_with_trial(
        &mut self,
        parent: NodeId,
        state: S,
        score: f64,
        trial_id: TrialId,
    ) -> Result<NodeId, TreeError> {
        self.insert(parent, state, score, Some(trial_id))
    }

    /// Adds a node whose payload has not been attached yet (e.g. while its trial is running).
    pub fn add_pending_node(
        &mut self,
        parent: NodeId,
        score: f64,
        trial_id: Option<TrialId>,
    ) -> Result<NodeId, TreeError> {
        self.insert_node(parent, None, score, trial_id)
    }

    /// Attaches the payload of a pending node; returns the previous payload.
    pub fn set_state(&mut self, id: NodeId, state: S) -> Result<Option<S>, TreeError> {
        let node = self.get_mut(id).ok_or(TreeError::UnknownNode { id })?;
        Ok(node.state.replace(state))
    }

    fn insert(
        &mut self,
        parent: NodeId,
        state: S,
        score: f64,
        trial_id: Option<TrialId>,
    ) -> Result<NodeId, TreeError> {
        self.insert_node(parent, Some(state), score, trial_id)
    }

    fn insert_node(
        &mut self,
        parent: NodeId,
        state: Option<S>,
        score: f64,
        trial_id: Option<TrialId>,
    ) -> Result<NodeId, TreeError> {
        let id = NodeId::new(self.nodes.len() as i64);
        let parent_node = self.get_mut(parent).ok_or(TreeError::UnknownParent { parent })?;
        parent_node.children.push(id);
        let depth = parent_node.depth + 1;

        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            score,
            state,
            trial_id,
        });
        Ok(id)
    }
}

/// Payload-free view of a tree's shape, handed to metric adapters.
pub trait TreeTopology {
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    fn children_of(&self, id: NodeId) -> &[NodeId];

    /// All strict descendants of `id`, each paired with the index (within `id`'s children) of the
    /// child subtree it belongs to.
    fn descendants_by_child(&self, id: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        for (child_idx, child) in self.children_of(id).iter().copied().enumerate() {
            let mut stack = vec![child];
            while let Some(next) = stack.pop() {
                out.push((next, child_idx));
                stack.extend(self.children_of(next).iter().rev().copied());
            }
        }
        out
    }
}

impl<S> TreeTopology for Tree<S> {
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::{Tree, TreeError, TreeTopology, ROOT_SCORE};
    use crate::model::NodeId;

    #[test]
    fn ids_follow_expansion_order_and_depths_accumulate() {
        let mut tree = Tree::with_root();
        let a = tree.add_node(NodeId::ROOT, "a", 0.1).expect("a");
        let b = tree.add_node(a, "b", 0.2).expect("b");
        let c = tree.add_node(NodeId::ROOT, "c", 0.3).expect("c");

        assert_eq!([a, b, c].map(NodeId::get), [0, 1, 2]);
        assert_eq!(tree.get(b).map(|n| n.depth()), Some(2));
        assert_eq!(tree.root().children(), &[a, c]);
        assert_eq!(tree.root().score(), ROOT_SCORE);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.nodes().next().map(|n| n.id()), Some(NodeId::ROOT));
    }

    #[test]
    fn add_node_rejects_unknown_parent() {
        let mut tree: Tree<&str> = Tree::with_root();
        let err = tree.add_node(NodeId::new(7), "x", 0.0).unwrap_err();
        assert_eq!(err, TreeError::UnknownParent { parent: NodeId::new(7) });
        assert!(tree.get(NodeId::new(-5)).is_none());
    }

    #[test]
    fn descendants_are_grouped_by_originating_child() {
        let mut tree = Tree::with_root();
        let a = tree.add_node(NodeId::ROOT, "a", 0.1).expect("a");
        let b = tree.add_node(NodeId::ROOT, "b", 0.2).expect("b");
        let a1 = tree.add_node(a, "a1", 0.3).expect("a1");
        let a1x = tree.add_node(a1, "a1x", 0.4).expect("a1x");

        let mut found = tree.descendants_by_child(NodeId::ROOT);
        found.sort();
        assert_eq!(found, vec![(a, 0), (b, 1), (a1, 0), (a1x, 0)]);
        assert_eq!(tree.descendants_by_child(a1x), vec![]);
        assert_eq!(tree.parent_of(a1x), Some(a1));
    }

    #[test]
    fn pending_nodes_receive_their_state_later() {
        let mut tree = Tree::with_root();
        let pending = tree.add_pending_node(NodeId::ROOT, 0.0, None).expect("pending");
        assert_eq!(tree.get(pending).and_then(|n| n.state()), None);

        assert_eq!(tree.set_state(pending, "done"), Ok(None));
        assert_eq!(tree.get(pending).and_then(|n| n.state()), Some(&"done"));
        assert_eq!(
            tree.set_state(NodeId::new(9), "x"),
            Err(TreeError::UnknownNode { id: NodeId::new(9) })
        );
    }
}
