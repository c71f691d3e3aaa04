// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyboard requirements of presented content.
//!
//! A presentation controller only listens for keyboard frame changes when
//! something in the presented hierarchy takes text input.

use serde::{Deserialize, Serialize};

/// What a node in the presented hierarchy is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// A form; it knows whether any of its fields take keyboard input
    Form {
        /// Whether the form has text fields
        requires_keyboard_input: bool,
    },
    /// Any other content; answers through its children
    Container,
}

/// A node of the presented content hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Display name, for logging
    pub name: String,
    /// Node kind
    pub kind: ContentKind,
    /// Child content
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Create a form node
    pub fn form(name: impl Into<String>, requires_keyboard_input: bool) -> Self {
        Self {
            name: name.into(),
            kind: ContentKind::Form {
                requires_keyboard_input,
            },
            children: Vec::new(),
        }
    }

    /// Create a container node
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ContentKind::Container,
            children: Vec::new(),
        }
    }

    /// Add a child
    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Whether any part of the hierarchy needs the keyboard.
///
/// A form answers for its whole subtree.
pub fn requires_keyboard_input(node: &ContentNode) -> bool {
    match node.kind {
        ContentKind::Form {
            requires_keyboard_input,
        } => requires_keyboard_input,
        ContentKind::Container => node.children.iter().any(requires_keyboard_input),
    }
}
