// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use crate::{ListValue, RichText};

/// One entry of a list.
#[derive(Clone, Debug, PartialEq)]
pub struct ListItem {
    /// Text of the item. Attributes are preserved as is; line breaks inside it continue the item.
    pub text: RichText,
    /// Indentation level, 1 being the outermost.
    pub level: usize,
    /// Which sibling run at this level the item belongs to.
    ///
    /// Derived when parsing text. Ignored when converting items to text.
    pub list_id: usize,
    /// The list membership tag applied to the whole item.
    pub value: ListValue,
}

impl ListItem {
    /// Creates an item with a `list_id` of 0.
    pub fn new(text: RichText, level: usize, value: ListValue) -> Self {
        Self {
            text,
            level,
            list_id: 0,
            value,
        }
    }

    /// Creates an item with unattributed text.
    pub fn plain(text: &str, level: usize, value: ListValue) -> Self {
        Self::new(RichText::new(text), level, value)
    }

    /// Returns this item with `list_id` set.
    #[must_use]
    pub fn with_list_id(mut self, list_id: usize) -> Self {
        self.list_id = list_id;
        self
    }
}

/// A [`ListItem`] found in text.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedListItem {
    /// 1-based index of the contiguous list the item was found in.
    pub list_index: usize,
    /// Byte range of the item in the parsed text, excluding the line break that ends it.
    pub range: Range<usize>,
    /// The item.
    pub item: ListItem,
}

/// A [`ListItem`] with the items nested below it.
#[derive(Clone, Debug, PartialEq)]
pub struct ListItemNode {
    /// The item.
    pub item: ListItem,
    /// Items with a deeper level that follow this one, up to the next item at this level or
    /// shallower.
    pub children: Vec<ListItemNode>,
}

impl ListItemNode {
    /// Nests a flat sequence of items by level.
    ///
    /// Each item becomes a child of the closest preceding item with a smaller level, or a root
    /// if there is none.
    pub fn build(items: impl IntoIterator<Item = ListItem>) -> Vec<Self> {
        let mut roots = Vec::new();
        // Open nodes, strictly increasing in level.
        let mut open: Vec<Self> = Vec::new();
        for item in items {
            while open.last().is_some_and(|node| node.item.level >= item.level) {
                close_last(&mut open, &mut roots);
            }
            open.push(Self {
                item,
                children: Vec::new(),
            });
        }
        while !open.is_empty() {
            close_last(&mut open, &mut roots);
        }
        roots
    }
}

fn close_last(open: &mut Vec<ListItemNode>, roots: &mut Vec<ListItemNode>) {
    let Some(node) = open.pop() else {
        return;
    };
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}
