//! Path-addressed item tree
//!
//! Items are named nodes under an unnamed root. A node with children is a
//! submenu; a node without children is an action whose execute callbacks
//! run when it is opened. Nodes live in an arena and refer to each other by
//! [`ItemId`].

use super::window::WindowList;

/// What an item callback gets to work with
pub struct ItemContext<'a> {
    /// Full path of the item the callback belongs to
    pub path: &'a str,
    pub windows: &'a mut WindowList,
}

/// Execute or dispose callback
pub type ItemHandler = Box<dyn FnMut(&mut ItemContext<'_>)>;

/// Arena index of an item node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(usize);

impl ItemId {
    pub const ROOT: ItemId = ItemId(0);
}

struct ItemNode {
    name: String,
    parent: Option<ItemId>,
    children: Vec<ItemId>,
    on_execute: Vec<ItemHandler>,
    on_dispose: Vec<ItemHandler>,
}

impl ItemNode {
    fn new(name: &str, parent: Option<ItemId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            on_execute: Vec::new(),
            on_dispose: Vec::new(),
        }
    }
}

/// Result of walking a path from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindResult {
    /// Deepest node reached
    pub node: ItemId,
    /// Number of segments matched
    pub depth: usize,
    /// Whether every segment matched
    pub found: bool,
}

/// What opening an item did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A submenu; the caller should move its cursor here
    Navigated(ItemId),
    /// An action; this many execute callbacks ran
    Executed(usize),
    /// The id no longer refers to a live node
    Missing,
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Arena of item nodes rooted at [`ItemId::ROOT`]
pub struct ItemTree {
    nodes: Vec<Option<ItemNode>>,
    free: Vec<usize>,
}

impl Default for ItemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(ItemNode::new("", None))],
            free: Vec::new(),
        }
    }

    fn node(&self, id: ItemId) -> Option<&ItemNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: ItemId) -> Option<&mut ItemNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: ItemNode) -> ItemId {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                ItemId(index)
            }
            None => {
                self.nodes.push(Some(node));
                ItemId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: ItemId) {
        if id != ItemId::ROOT && self.nodes.get(id.0).is_some_and(Option::is_some) {
            self.nodes[id.0] = None;
            self.free.push(id.0);
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.node(id).is_some()
    }

    pub fn name(&self, id: ItemId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ItemId) -> &[ItemId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn is_leaf(&self, id: ItemId) -> bool {
        self.children(id).is_empty()
    }

    /// Number of live nodes, root excluded
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live node ids, root excluded, in arena order
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| ItemId(i))
    }

    /// Slash-joined names from below the root down to `id`
    pub fn full_path(&self, id: ItemId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ItemId::ROOT {
                break;
            }
            let Some(node) = self.node(cur) else {
                break;
            };
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names.join("/")
    }

    /// Walk `path` from the root, matching the first child with each name
    pub fn find(&self, path: &str) -> FindResult {
        let mut node = ItemId::ROOT;
        let mut depth = 0;
        for segment in segments(path) {
            let next = self
                .children(node)
                .iter()
                .copied()
                .find(|child| self.name(*child) == Some(segment));
            match next {
                Some(child) => {
                    node = child;
                    depth += 1;
                }
                None => {
                    return FindResult {
                        node,
                        depth,
                        found: false,
                    };
                }
            }
        }
        FindResult {
            node,
            depth,
            found: true,
        }
    }

    /// Create any missing nodes along `path` and attach callbacks to the last one.
    ///
    /// Registering an existing path adds to its callbacks. Returns `None`
    /// for a path with no segments.
    pub fn register(
        &mut self,
        path: &str,
        on_execute: Option<ItemHandler>,
        on_dispose: Option<ItemHandler>,
    ) -> Option<ItemId> {
        let result = self.find(path);
        let mut current = result.node;
        for segment in segments(path).skip(result.depth) {
            let child = self.alloc(ItemNode::new(segment, Some(current)));
            if let Some(parent) = self.node_mut(current) {
                parent.children.push(child);
            }
            current = child;
        }

        if current == ItemId::ROOT {
            tracing::warn!("debug menu item path '{}' is empty, ignored", path);
            return None;
        }

        let node = self.node_mut(current)?;
        node.on_execute.extend(on_execute);
        node.on_dispose.extend(on_dispose);
        tracing::debug!("debug menu item registered: {}", path);
        Some(current)
    }

    fn detach(&mut self, id: ItemId) {
        if let Some(parent) = self.parent(id)
            && let Some(parent) = self.node_mut(parent)
        {
            parent.children.retain(|c| *c != id);
        }
    }

    /// Dispose `id` and everything below it, descendants first
    fn dispose_subtree(&mut self, id: ItemId, windows: &mut WindowList, removed: &mut Vec<ItemId>) {
        let children = self.children(id).to_vec();
        for child in children {
            self.dispose_subtree(child, windows, removed);
        }

        let path = self.full_path(id);
        if let Some(node) = self.node_mut(id) {
            let mut callbacks = std::mem::take(&mut node.on_dispose);
            let mut ctx = ItemContext {
                path: &path,
                windows,
            };
            for callback in &mut callbacks {
                callback(&mut ctx);
            }
        }
        self.release(id);
        removed.push(id);
    }

    /// Remove `path` and its subtree, then prune ancestors left without children.
    ///
    /// Pruning stops at the first ancestor that still has children, and never
    /// removes the root. Returns every removed id; a missing path removes nothing.
    pub fn remove(&mut self, path: &str, windows: &mut WindowList) -> Vec<ItemId> {
        let result = self.find(path);
        if !result.found || result.node == ItemId::ROOT {
            return Vec::new();
        }

        let mut removed = Vec::new();
        let mut target = result.node;
        loop {
            let parent = self.parent(target);
            self.detach(target);
            self.dispose_subtree(target, windows, &mut removed);

            match parent {
                Some(p) if p != ItemId::ROOT && self.is_leaf(p) => target = p,
                _ => break,
            }
        }

        tracing::debug!("debug menu item removed: {} ({} nodes)", path, removed.len());
        removed
    }

    /// Dispose every item, leaving only the root
    pub fn clear(&mut self, windows: &mut WindowList) -> Vec<ItemId> {
        let mut removed = Vec::new();
        for child in self.children(ItemId::ROOT).to_vec() {
            self.detach(child);
            self.dispose_subtree(child, windows, &mut removed);
        }
        removed
    }

    /// Open an item: run its execute callbacks if it is a leaf.
    ///
    /// A node with children is a submenu and never runs its callbacks.
    pub fn open(&mut self, id: ItemId, windows: &mut WindowList) -> OpenOutcome {
        if !self.contains(id) {
            return OpenOutcome::Missing;
        }
        if id == ItemId::ROOT || !self.is_leaf(id) {
            return OpenOutcome::Navigated(id);
        }

        let path = self.full_path(id);
        let Some(node) = self.node_mut(id) else {
            return OpenOutcome::Missing;
        };
        let mut callbacks = std::mem::take(&mut node.on_execute);
        let mut ctx = ItemContext {
            path: &path,
            windows,
        };
        for callback in &mut callbacks {
            callback(&mut ctx);
        }
        let count = callbacks.len();
        if let Some(node) = self.node_mut(id) {
            node.on_execute = callbacks;
        }
        OpenOutcome::Executed(count)
    }
}
