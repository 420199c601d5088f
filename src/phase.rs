//! Staged-construction phase definitions.
//!
//! Phases form an explicit tree: each node carries a label, a setup
//! closure, and its child phases. [`PhaseNode::realize`] materializes the
//! tree against the host, mapping the root to the host's initial phase and
//! every child to a phase following its parent, and runs each node's setup
//! against the created phase handle. Realization always starts from the
//! root, since children are owned by their parents.

use crate::session::{Handle, SessionError, StageSession};

/// The setup action run against a realized phase handle.
pub type PhaseSetup = Box<dyn Fn(&dyn StageSession, Handle) -> Result<(), SessionError>>;

/// One node of a phase-definition tree.
pub struct PhaseNode {
    label: String,
    setup: PhaseSetup,
    children: Vec<PhaseNode>,
}

impl PhaseNode {
    /// Creates a phase definition with the given label and setup action.
    pub fn new<F>(label: impl Into<String>, setup: F) -> Self
    where
        F: Fn(&dyn StageSession, Handle) -> Result<(), SessionError> + 'static,
    {
        PhaseNode {
            label: label.into(),
            setup: Box::new(setup),
            children: Vec::new(),
        }
    }

    /// Attaches a child phase, returning the modified node for chaining.
    pub fn with_child(mut self, child: PhaseNode) -> Self {
        self.children.push(child);
        self
    }

    /// This node's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The direct children of this node.
    pub fn children(&self) -> &[PhaseNode] {
        &self.children
    }

    /// Materializes this tree against the host.
    ///
    /// The root realizes as the host's initial phase; every other node as a
    /// phase following its parent. Nodes are visited in stack order: after
    /// a node is realized its children are pushed in declaration order, so
    /// the most recently declared subtree is realized first. Returns the
    /// realized `(label, handle)` pairs in visit order.
    pub fn realize(
        &self,
        session: &dyn StageSession,
    ) -> Result<Vec<(String, Handle)>, SessionError> {
        let root_handle = session.initial_phase()?;
        (self.setup)(session, root_handle)?;

        let mut realized = vec![(self.label.clone(), root_handle)];
        let mut to_visit: Vec<(&PhaseNode, Handle)> =
            self.children.iter().map(|c| (c, root_handle)).collect();

        while let Some((node, parent)) = to_visit.pop() {
            let handle = session.phase_after(parent)?;
            (node.setup)(session, handle)?;
            realized.push((node.label.clone(), handle));
            to_visit.extend(node.children.iter().map(|c| (c, handle)));
        }

        Ok(realized)
    }
}
