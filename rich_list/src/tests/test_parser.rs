// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use super::utils::{numbered, TextBuilder, INDENT};
use crate::{
    ContentType, ListItem, ListParser, ListTextExt, ListValue, ParagraphStyle, ParsedListItem,
    RichText, TextAttribute, TextFont,
};

const LONG: &str = "The quick brown fox jumps over the lazy dog near the riverbank.";
const SHORT: &str = "Second item, ok";

fn ranges(parsed: &[ParsedListItem]) -> Vec<Range<usize>> {
    parsed.iter().map(|p| p.range.clone()).collect()
}

fn texts(parsed: &[ParsedListItem]) -> Vec<&str> {
    parsed.iter().map(|p| p.item.text.as_str()).collect()
}

fn list_ids(parsed: &[ParsedListItem]) -> Vec<usize> {
    parsed.iter().map(|p| p.item.list_id).collect()
}

#[test]
fn items_become_tagged_indented_lines() {
    let text = numbered(&[("Item 1", 1), ("Item 2", 2)]);
    assert_eq!(text.as_str(), "Item 1\nItem 2");
    assert_eq!(text.list_value_at(0), Some(&ListValue::Numbered));
    assert_eq!(text.list_value_at(6), Some(&ListValue::Numbered));
    assert_eq!(text.list_value_at(12), Some(&ListValue::Numbered));

    let first = text.paragraph_style_at(0).unwrap();
    assert_eq!(first.first_line_head_indent, 25.0);
    assert_eq!(first.head_indent, 25.0);
    let second = text.paragraph_style_at(7).unwrap();
    assert_eq!(second.first_line_head_indent, 50.0);
    assert_eq!(second.head_indent, 50.0);

    assert!(!text.skips_marker_at(6), "separating breaks start new items");
}

#[test]
fn breaks_inside_items_are_continuations() {
    let text = numbered(&[("first\nsecond", 1), ("third", 1)]);
    assert_eq!(text.as_str(), "first\nsecond\nthird");
    assert!(text.skips_marker_at(5), "the break inside the item skips its marker");
    assert!(text
        .attributes_at(5)
        .any(|attr| *attr == TextAttribute::ContentType(ContentType::Newline)));
    assert!(!text.skips_marker_at(12));
}

#[test]
fn empty_item_list_is_empty_text() {
    let text = ListParser::to_text(&[], INDENT);
    assert!(text.is_empty());
    assert!(ListParser::from_text(&text, INDENT).is_empty());
}

#[test]
fn single_level_ranges() {
    let text = numbered(&[(LONG, 1), (SHORT, 1), (LONG, 1)]);
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(ranges(&parsed), [0..63, 64..79, 80..143]);
    assert_eq!(texts(&parsed), [LONG, SHORT, LONG]);
    assert!(parsed.iter().all(|p| p.list_index == 1 && p.item.level == 1));
}

#[test]
fn blank_items_keep_their_place() {
    let text = numbered(&[(LONG, 1), ("", 1), ("", 1), (SHORT, 1)]);
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(ranges(&parsed), [0..63, 64..64, 65..65, 66..81]);
    assert_eq!(texts(&parsed), [LONG, "", "", SHORT]);
}

#[test]
fn continuation_lines_stay_in_their_item() {
    let first = alloc::format!("{LONG}\n{SHORT}");
    let text = numbered(&[(&first, 1), (LONG, 1)]);
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(ranges(&parsed), [0..79, 80..143]);
    assert_eq!(texts(&parsed), [first.as_str(), LONG]);
}

#[test]
fn continuation_across_a_level_change_extends_the_previous_item() {
    // The continuation line is indented deeper than the line it continues.
    let mut text = TextBuilder::new()
        .list("one\ntwo", 1, &ListValue::Numbered)
        .build();
    let skip = text.range(3..4).unwrap();
    text.apply_attribute(skip, TextAttribute::SkipNextListMarker);
    let tail = text.range(4..7).unwrap();
    text.apply_attribute(
        tail,
        TextAttribute::Paragraph(ParagraphStyle::for_level(2, INDENT)),
    );

    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(ranges(&parsed), [0..7]);
    assert_eq!(texts(&parsed), ["one\ntwo"]);
    assert_eq!(parsed[0].item.level, 2, "the merged item takes the later level");
}

#[test]
fn separate_lists_are_numbered_in_order() {
    let text = TextBuilder::new()
        .list("Alpha\nBeta", 1, &ListValue::Numbered)
        .plain("\nNot a list\n")
        .list("Gamma", 1, &ListValue::Bulleted)
        .build();
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(texts(&parsed), ["Alpha", "Beta", "Gamma"]);
    let indices: Vec<_> = parsed.iter().map(|p| p.list_index).collect();
    assert_eq!(indices, [1, 1, 2]);
    assert_eq!(parsed[2].item.value, ListValue::Bulleted);
}

#[test]
fn adjacent_lists_with_different_tags_are_separate() {
    let items = [
        ListItem::plain("numbered", 1, ListValue::Numbered),
        ListItem::plain("bulleted", 1, ListValue::Bulleted),
    ];
    let text = ListParser::to_text(&items, INDENT);
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(texts(&parsed), ["numbered", "bulleted"]);
    let indices: Vec<_> = parsed.iter().map(|p| p.list_index).collect();
    assert_eq!(indices, [1, 2]);
}

#[test]
fn list_ids_of_repeated_nesting() {
    let levels = [1, 1, 2, 2, 3, 3, 1, 1, 2, 2, 3, 3];
    let labels: Vec<_> = (0..levels.len()).map(|i| alloc::format!("Item {i}")).collect();
    let items: Vec<_> = labels
        .iter()
        .zip(levels)
        .map(|(label, level)| (label.as_str(), level))
        .collect();
    let parsed = ListParser::from_text(&numbered(&items), INDENT);

    let got: Vec<_> = parsed.iter().map(|p| p.item.level).collect();
    assert_eq!(got, levels);
    assert_eq!(list_ids(&parsed), [1, 1, 2, 2, 3, 3, 1, 1, 4, 4, 6, 6]);
}

#[test]
fn list_ids_span_separate_lists() {
    let value = ListValue::Numbered;
    let mut builder = TextBuilder::new();
    for (i, (line, level)) in [("A", 1), ("B", 2), ("C", 3), ("D", 3), ("E", 3), ("F", 2), ("G", 1)]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            builder = builder.plain("\n");
        }
        builder = builder.list(line, level, &value);
    }
    let parsed = ListParser::from_text(&builder.build(), INDENT);

    assert_eq!(texts(&parsed), ["A", "B", "C", "D", "E", "F", "G"]);
    let indices: Vec<_> = parsed.iter().map(|p| p.list_index).collect();
    assert_eq!(indices, [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(list_ids(&parsed), [1, 2, 3, 3, 3, 2, 1]);
}

#[test]
fn missing_paragraph_style_is_level_zero() {
    let mut text = RichText::new("loose\nitems");
    let all = text.full_range();
    text.apply_attribute(all, TextAttribute::ListItem(ListValue::Bulleted));
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(texts(&parsed), ["loose", "items"]);
    assert!(parsed.iter().all(|p| p.item.level == 0 && p.item.list_id == 0));
}

#[test]
fn untagged_text_yields_nothing() {
    let text = TextBuilder::new().plain("just\nprose\n").build();
    assert!(ListParser::from_text(&text, INDENT).is_empty());
}

#[test]
fn trailing_break_does_not_make_an_item() {
    let text = TextBuilder::new()
        .list("one\ntwo\n", 1, &ListValue::Bulleted)
        .build();
    let parsed = ListParser::from_text(&text, INDENT);
    assert_eq!(texts(&parsed), ["one", "two"]);
}

#[test]
fn three_items_round_trip_as_one_list() {
    let items = [
        ListItem::plain("Item 1", 1, ListValue::Numbered),
        ListItem::plain("Item 2", 1, ListValue::Numbered),
        ListItem::plain("Item 3", 1, ListValue::Numbered),
    ];
    let parsed = ListParser::from_text(&ListParser::to_text(&items, INDENT), INDENT);
    assert_eq!(parsed.len(), 3);
    assert!(parsed.iter().all(|p| p.item.level == 1));
    assert_eq!(list_ids(&parsed), [1, 1, 1]);
}

#[test]
fn nested_items_round_trip() {
    let items = [
        ListItem::plain("Fruit", 1, ListValue::Bulleted),
        ListItem::plain("Apple\nred or green", 2, ListValue::Bulleted),
        ListItem::plain("Pear", 2, ListValue::Bulleted),
        ListItem::plain("Conference", 3, ListValue::Bulleted),
        ListItem::plain("Vegetables", 1, ListValue::Bulleted),
        ListItem::plain("Leek", 2, ListValue::Bulleted),
    ];
    let parsed = ListParser::from_text(&ListParser::to_text(&items, INDENT), INDENT);
    assert_eq!(parsed.len(), items.len());
    for (parsed, item) in parsed.iter().zip(&items) {
        assert_eq!(parsed.item.text.as_str(), item.text.as_str());
        assert_eq!(parsed.item.level, item.level, "level of {:?}", item.text.as_str());
        assert_eq!(parsed.item.value, item.value);
    }
}

#[test]
fn item_attributes_survive_the_round_trip() {
    let mut label = RichText::new("bold move");
    let bold = label.range(0..4).unwrap();
    label.apply_attribute(bold, TextAttribute::Font(TextFont::new("serif-bold", 17.0)));
    let items = [
        ListItem::plain("plain", 1, ListValue::Numbered),
        ListItem::new(label, 1, ListValue::Numbered),
    ];
    let parsed = ListParser::from_text(&ListParser::to_text(&items, INDENT), INDENT);
    let text = &parsed[1].item.text;
    assert_eq!(text.as_str(), "bold move");
    assert_eq!(text.font_at(0).map(|font| &*font.family), Some("serif-bold"));
    assert_eq!(text.font_at(5), None);
}

#[test]
fn hierarchy_nests_by_level() {
    let text = numbered(&[("a", 1), ("a.1", 2), ("a.2", 2), ("a.2.i", 3), ("b", 1)]);
    let roots = ListParser::hierarchy(&text, INDENT);
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].item.text.as_str(), "a");
    assert_eq!(roots[0].children.len(), 2);
    assert_eq!(roots[0].children[1].children[0].item.text.as_str(), "a.2.i");
    assert!(roots[1].children.is_empty());
}
