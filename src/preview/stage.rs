// src/preview/stage.rs
//! The stage holds mounted preview trees keyed by node id, standing in for
//! the live page the exporter captures from. A node carries an inline style
//! the exporter can force for capture and must restore afterwards.

use std::collections::HashMap;

use super::layout::PreviewTree;

/// Id of the node the exporter captures.
pub const PREVIEW_NODE_ID: &str = "resume-preview-content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Flex,
    None,
}

/// Inline overrides applied on top of the tree's natural geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineStyle {
    pub width: Option<f32>,
    pub display: Display,
}

impl Default for InlineStyle {
    fn default() -> Self {
        Self {
            width: None,
            display: Display::Flex,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MountedNode {
    pub tree: PreviewTree,
    pub style: InlineStyle,
}

impl MountedNode {
    /// Effective width as the capture sees it. Zero when hidden or empty.
    pub fn measured_width(&self) -> f32 {
        if self.style.display == Display::None || self.tree.is_empty() {
            return 0.0;
        }
        self.style.width.unwrap_or(self.tree.width)
    }

    pub fn measured_height(&self) -> f32 {
        if self.style.display == Display::None || self.tree.is_empty() {
            return 0.0;
        }
        self.tree.height
    }
}

/// All currently mounted nodes.
#[derive(Debug, Default)]
pub struct Stage {
    nodes: HashMap<String, MountedNode>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount or replace the tree under `id`. A re-mount keeps the node's
    /// existing inline style so a style forced elsewhere survives updates.
    pub fn mount(&mut self, id: &str, tree: PreviewTree) {
        match self.nodes.get_mut(id) {
            Some(node) => node.tree = tree,
            None => {
                self.nodes.insert(
                    id.to_string(),
                    MountedNode {
                        tree,
                        style: InlineStyle::default(),
                    },
                );
            }
        }
    }

    pub fn node(&self, id: &str) -> Option<&MountedNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut MountedNode> {
        self.nodes.get_mut(id)
    }
}

/// Forces a capture width on a node and restores the original inline style
/// when dropped, so the on-screen style comes back on every exit path.
pub struct StyleGuard<'a> {
    node: &'a mut MountedNode,
    original: InlineStyle,
}

impl<'a> StyleGuard<'a> {
    pub fn force(node: &'a mut MountedNode, width: f32) -> Self {
        let original = node.style;
        node.style = InlineStyle {
            width: Some(width),
            display: Display::Flex,
        };
        Self { node, original }
    }

    pub fn node(&self) -> &MountedNode {
        self.node
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        self.node.style = self.original;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{render, PreviewTheme};
    use crate::types::ResumeData;

    fn tree() -> PreviewTree {
        render(&ResumeData::default(), &PreviewTheme::default())
    }

    #[test]
    fn test_hidden_node_measures_zero() {
        let mut stage = Stage::new();
        stage.mount(PREVIEW_NODE_ID, tree());
        let node = stage.node_mut(PREVIEW_NODE_ID).unwrap();
        assert!(node.measured_width() > 0.0);

        node.style.display = Display::None;
        assert_eq!(node.measured_width(), 0.0);
        assert_eq!(node.measured_height(), 0.0);
    }

    #[test]
    fn test_remount_preserves_style() {
        let mut stage = Stage::new();
        stage.mount(PREVIEW_NODE_ID, tree());
        stage.node_mut(PREVIEW_NODE_ID).unwrap().style.width = Some(640.0);

        stage.mount(PREVIEW_NODE_ID, tree());
        assert_eq!(stage.node(PREVIEW_NODE_ID).unwrap().style.width, Some(640.0));
    }

    #[test]
    fn test_style_guard_restores_on_drop() {
        let mut node = MountedNode {
            tree: tree(),
            style: InlineStyle {
                width: Some(480.0),
                display: Display::Flex,
            },
        };
        {
            let guard = StyleGuard::force(&mut node, 794.0);
            assert_eq!(guard.node().style.width, Some(794.0));
        }
        assert_eq!(node.style.width, Some(480.0));
    }
}
