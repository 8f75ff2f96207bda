//! Patch generation between two rendered documents
//!
//! Paths are child indexes from the document root (`[0, 2]` is the third
//! child of the first root node). Patches are meant to be applied in order;
//! each path is valid against the tree as left by the previous patches.
//!
//! Children that all carry unique keys are matched by key, so a reorder in
//! the preview becomes a handful of `MoveNode` patches instead of a rebuild
//! of every component after the moved one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;
use crate::vdom::{Attributes, CssRule, VNode, VirtualDomDocument};

pub type NodePath = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VDocPatch {
    /// Insert `node` so that it ends up at `path`
    CreateNode { path: NodePath, node: VNode },

    RemoveNode { path: NodePath },

    ReplaceNode { path: NodePath, node: VNode },

    /// Take the child at `from` out of `parent` and reinsert it at `to`
    MoveNode {
        parent: NodePath,
        from: usize,
        to: usize,
    },

    /// Full attribute set of the element at `path`
    UpdateAttributes { path: NodePath, attributes: Attributes },

    UpdateText { path: NodePath, content: String },

    RemoveStyleRule { index: usize },

    AddStyleRule { rule: CssRule },
}

/// Diff two VirtualDomDocuments and generate patches
pub fn diff_vdocument(old: &VirtualDomDocument, new: &VirtualDomDocument) -> Vec<VDocPatch> {
    let mut patches = Vec::new();

    diff_children(&old.nodes, &new.nodes, &[], &mut patches);
    diff_style_rules(&old.styles, &new.styles, &mut patches);

    patches
}

fn child_path(parent: &[usize], index: usize) -> NodePath {
    let mut path = parent.to_vec();
    path.push(index);
    path
}

fn unique_keys(nodes: &[VNode]) -> Option<Vec<&str>> {
    let mut seen = HashSet::new();
    nodes
        .iter()
        .map(|n| n.key().filter(|k| seen.insert(*k)))
        .collect()
}

fn diff_children(old: &[VNode], new: &[VNode], path: &[usize], patches: &mut Vec<VDocPatch>) {
    match (unique_keys(old), unique_keys(new)) {
        (Some(old_keys), Some(new_keys)) if !old.is_empty() && !new.is_empty() => {
            diff_keyed_children(old, new, &old_keys, &new_keys, path, patches)
        }
        _ => diff_indexed_children(old, new, path, patches),
    }
}

fn diff_indexed_children(
    old: &[VNode],
    new: &[VNode],
    path: &[usize],
    patches: &mut Vec<VDocPatch>,
) {
    let shared = old.len().min(new.len());

    for i in 0..shared {
        diff_vnode(&old[i], &new[i], child_path(path, i), patches);
    }

    // Trailing removals go back to front so earlier indexes stay valid
    for i in (shared..old.len()).rev() {
        patches.push(VDocPatch::RemoveNode {
            path: child_path(path, i),
        });
    }

    for (i, node) in new.iter().enumerate().skip(shared) {
        patches.push(VDocPatch::CreateNode {
            path: child_path(path, i),
            node: node.clone(),
        });
    }
}

fn diff_keyed_children(
    old: &[VNode],
    new: &[VNode],
    old_keys: &[&str],
    new_keys: &[&str],
    path: &[usize],
    patches: &mut Vec<VDocPatch>,
) {
    let wanted: HashSet<&str> = new_keys.iter().copied().collect();

    for (i, key) in old_keys.iter().enumerate().rev() {
        if !wanted.contains(key) {
            patches.push(VDocPatch::RemoveNode {
                path: child_path(path, i),
            });
        }
    }

    // Simulated child list, kept in step with the patches emitted so far
    let mut current: Vec<&str> = old_keys
        .iter()
        .copied()
        .filter(|k| wanted.contains(k))
        .collect();

    for (i, (key, node)) in new_keys.iter().zip(new).enumerate() {
        match current.iter().position(|k| k == key) {
            Some(from) => {
                if from != i {
                    let moved = current.remove(from);
                    current.insert(i, moved);
                    patches.push(VDocPatch::MoveNode {
                        parent: path.to_vec(),
                        from,
                        to: i,
                    });
                }
                if let Some(old_index) = old_keys.iter().position(|k| k == key) {
                    diff_vnode(&old[old_index], node, child_path(path, i), patches);
                }
            }
            None => {
                current.insert(i, key);
                patches.push(VDocPatch::CreateNode {
                    path: child_path(path, i),
                    node: node.clone(),
                });
            }
        }
    }
}

fn diff_vnode(old: &VNode, new: &VNode, path: NodePath, patches: &mut Vec<VDocPatch>) {
    match (old, new) {
        (
            VNode::Element {
                tag: old_tag,
                attributes: old_attrs,
                children: old_children,
                key: old_key,
            },
            VNode::Element {
                tag: new_tag,
                attributes: new_attrs,
                children: new_children,
                key: new_key,
            },
        ) => {
            if old_tag != new_tag || old_key != new_key {
                patches.push(VDocPatch::ReplaceNode {
                    path,
                    node: new.clone(),
                });
                return;
            }

            if old_attrs != new_attrs {
                patches.push(VDocPatch::UpdateAttributes {
                    path: path.clone(),
                    attributes: new_attrs.clone(),
                });
            }

            diff_children(old_children, new_children, &path, patches);
        }
        (VNode::Text { content: old_text }, VNode::Text { content: new_text }) => {
            if old_text != new_text {
                patches.push(VDocPatch::UpdateText {
                    path,
                    content: new_text.clone(),
                });
            }
        }
        (VNode::Comment { content: old_text }, VNode::Comment { content: new_text }) => {
            if old_text != new_text {
                patches.push(VDocPatch::ReplaceNode {
                    path,
                    node: new.clone(),
                });
            }
        }
        _ => patches.push(VDocPatch::ReplaceNode {
            path,
            node: new.clone(),
        }),
    }
}

fn diff_style_rules(old: &[CssRule], new: &[CssRule], patches: &mut Vec<VDocPatch>) {
    // Rule order matters to the cascade: keep the common prefix, replace the rest
    let common = old.iter().zip(new).take_while(|(a, b)| a == b).count();

    for i in (common..old.len()).rev() {
        patches.push(VDocPatch::RemoveStyleRule { index: i });
    }
    for rule in &new[common..] {
        patches.push(VDocPatch::AddStyleRule { rule: rule.clone() });
    }
}

/// Apply patches to a document copy
///
/// The page applies the same patches to the real DOM; this is the reference
/// behaviour they must match.
pub fn apply_patches(
    doc: &VirtualDomDocument,
    patches: &[VDocPatch],
) -> Result<VirtualDomDocument, RenderError> {
    let mut doc = doc.clone();

    for patch in patches {
        match patch {
            VDocPatch::CreateNode { path, node } => {
                let (parent, index) = split_path(path)?;
                let siblings = children_mut(&mut doc.nodes, parent)?;
                if index > siblings.len() {
                    return Err(RenderError::InvalidPatch(format!("insert past end at {:?}", path)));
                }
                siblings.insert(index, node.clone());
            }
            VDocPatch::RemoveNode { path } => {
                let (parent, index) = split_path(path)?;
                let siblings = children_mut(&mut doc.nodes, parent)?;
                if index >= siblings.len() {
                    return Err(RenderError::InvalidPatch(format!("no node at {:?}", path)));
                }
                siblings.remove(index);
            }
            VDocPatch::ReplaceNode { path, node } => {
                *node_mut(&mut doc.nodes, path)? = node.clone();
            }
            VDocPatch::MoveNode { parent, from, to } => {
                let siblings = children_mut(&mut doc.nodes, parent)?;
                if *from >= siblings.len() || *to >= siblings.len() {
                    return Err(RenderError::InvalidPatch(format!(
                        "move {} -> {} under {:?}",
                        from, to, parent
                    )));
                }
                let moved = siblings.remove(*from);
                siblings.insert(*to, moved);
            }
            VDocPatch::UpdateAttributes { path, attributes } => {
                match node_mut(&mut doc.nodes, path)? {
                    VNode::Element {
                        attributes: attrs, ..
                    } => *attrs = attributes.clone(),
                    _ => {
                        return Err(RenderError::InvalidPatch(format!(
                            "attributes on non-element at {:?}",
                            path
                        )))
                    }
                }
            }
            VDocPatch::UpdateText { path, content } => match node_mut(&mut doc.nodes, path)? {
                VNode::Text { content: text } => *text = content.clone(),
                _ => {
                    return Err(RenderError::InvalidPatch(format!(
                        "text update on non-text at {:?}",
                        path
                    )))
                }
            },
            VDocPatch::RemoveStyleRule { index } => {
                if *index >= doc.styles.len() {
                    return Err(RenderError::InvalidPatch(format!("no style rule {}", index)));
                }
                doc.styles.remove(*index);
            }
            VDocPatch::AddStyleRule { rule } => doc.styles.push(rule.clone()),
        }
    }

    Ok(doc)
}

fn split_path(path: &[usize]) -> Result<(&[usize], usize), RenderError> {
    match path.split_last() {
        Some((last, parent)) => Ok((parent, *last)),
        None => Err(RenderError::InvalidPatch("empty path".to_string())),
    }
}

fn children_mut<'a>(
    roots: &'a mut Vec<VNode>,
    parent: &[usize],
) -> Result<&'a mut Vec<VNode>, RenderError> {
    let mut siblings = roots;
    for &index in parent {
        match siblings.get_mut(index) {
            Some(VNode::Element { children, .. }) => siblings = children,
            _ => {
                return Err(RenderError::InvalidPatch(format!(
                    "no element at {:?}",
                    parent
                )))
            }
        }
    }
    Ok(siblings)
}

fn node_mut<'a>(roots: &'a mut Vec<VNode>, path: &[usize]) -> Result<&'a mut VNode, RenderError> {
    let (parent, index) = split_path(path)?;
    children_mut(roots, parent)?
        .get_mut(index)
        .ok_or_else(|| RenderError::InvalidPatch(format!("no node at {:?}", path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(nodes: Vec<VNode>) -> VirtualDomDocument {
        VirtualDomDocument {
            nodes,
            styles: vec![],
        }
    }

    fn keyed(key: &str) -> VNode {
        VNode::div("item").with_key(key).with_text(key)
    }

    #[test]
    fn test_diff_create_node() {
        let patches = diff_vdocument(&doc(vec![]), &doc(vec![VNode::div("a")]));
        assert_eq!(patches.len(), 1);
        match &patches[0] {
            VDocPatch::CreateNode { path, .. } => assert_eq!(path, &vec![0]),
            other => panic!("Expected CreateNode patch, got {:?}", other),
        }
    }

    #[test]
    fn test_diff_remove_node() {
        let patches = diff_vdocument(&doc(vec![VNode::div("a")]), &doc(vec![]));
        assert_eq!(patches, vec![VDocPatch::RemoveNode { path: vec![0] }]);
    }

    #[test]
    fn test_diff_update_text() {
        let old = doc(vec![VNode::div("p").with_text("old")]);
        let new = doc(vec![VNode::div("p").with_text("new")]);

        let patches = diff_vdocument(&old, &new);
        assert_eq!(
            patches,
            vec![VDocPatch::UpdateText {
                path: vec![0, 0],
                content: "new".into()
            }]
        );
    }

    #[test]
    fn test_diff_update_attributes() {
        let old = doc(vec![VNode::div("old-class")]);
        let new = doc(vec![VNode::div("new-class")]);

        let patches = diff_vdocument(&old, &new);
        assert_eq!(patches.len(), 1);
        match &patches[0] {
            VDocPatch::UpdateAttributes { path, attributes } => {
                assert_eq!(path, &vec![0]);
                assert_eq!(attributes.get("class").unwrap(), "new-class");
            }
            other => panic!("Expected UpdateAttributes patch, got {:?}", other),
        }
    }

    #[test]
    fn test_keyed_reorder_is_a_single_move() {
        let old = doc(vec![VNode::div("list").with_children(vec![keyed("a"), keyed("b"), keyed("c")])]);
        let new = doc(vec![VNode::div("list").with_children(vec![keyed("c"), keyed("a"), keyed("b")])]);

        let patches = diff_vdocument(&old, &new);
        assert_eq!(
            patches,
            vec![VDocPatch::MoveNode {
                parent: vec![0],
                from: 2,
                to: 0
            }]
        );
        assert_eq!(apply_patches(&old, &patches).unwrap(), new);
    }

    #[test]
    fn test_keyed_insert_and_remove() {
        let old = doc(vec![VNode::div("list").with_children(vec![keyed("a"), keyed("b"), keyed("c")])]);
        let new = doc(vec![VNode::div("list").with_children(vec![keyed("b"), keyed("d"), keyed("c")])]);

        let patches = diff_vdocument(&old, &new);
        assert!(patches.contains(&VDocPatch::RemoveNode { path: vec![0, 0] }));
        assert!(patches
            .iter()
            .any(|p| matches!(p, VDocPatch::CreateNode { path, .. } if path == &vec![0, 1])));
        assert_eq!(apply_patches(&old, &patches).unwrap(), new);
    }

    #[test]
    fn test_identical_documents_produce_no_patches() {
        let a = doc(vec![VNode::div("list").with_children(vec![keyed("a"), keyed("b")])]);
        assert!(diff_vdocument(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_style_rule_changes() {
        let mut old = doc(vec![]);
        old.add_style(":root", [("--a".to_string(), "1".to_string())].into_iter().collect());
        let mut new = doc(vec![]);
        new.add_style(":root", [("--a".to_string(), "2".to_string())].into_iter().collect());

        let patches = diff_vdocument(&old, &new);
        assert_eq!(patches.len(), 2);
        assert_eq!(apply_patches(&old, &patches).unwrap(), new);
    }

    #[test]
    fn test_style_rule_swap_keeps_order() {
        let rule = |selector: &str| (selector.to_string(), [("color".to_string(), "red".to_string())]);
        let mut old = doc(vec![]);
        let mut new = doc(vec![]);
        for (selector, props) in [rule(".a"), rule(".b")] {
            old.add_style(selector, props.into_iter().collect());
        }
        for (selector, props) in [rule(".b"), rule(".a")] {
            new.add_style(selector, props.into_iter().collect());
        }

        let patches = diff_vdocument(&old, &new);
        assert!(!patches.is_empty());
        assert_eq!(apply_patches(&old, &patches).unwrap(), new);
    }

    #[test]
    fn test_apply_rejects_bad_path() {
        let patches = vec![VDocPatch::RemoveNode { path: vec![3] }];
        assert!(apply_patches(&doc(vec![]), &patches).is_err());
    }
}
