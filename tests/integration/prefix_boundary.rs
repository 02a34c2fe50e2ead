use flattree::query::{select, DepthLimit};
use flattree::tree::SourceNode;
use flattree::BuildError;

use crate::support::{animals, records_of, titles};

#[test]
fn prefix_match_stops_at_segment_boundary() {
    let records = records_of(&animals());
    let under_cat = select(&records, Some("Animals > Cat"), DepthLimit::Unbounded, false);
    assert_eq!(titles(&under_cat), vec!["Tabby", "Siamese"]);
}

#[test]
fn including_root_does_not_pick_up_prefix_siblings() {
    let records = records_of(&animals());
    let cat = select(&records, Some("Animals > Cat"), DepthLimit::one(), true);
    assert_eq!(titles(&cat), vec!["Cat", "Tabby", "Siamese"]);
}

#[test]
fn depth_window_is_relative_to_the_anchor() {
    let records = records_of(&animals());
    let children = select(&records, Some("Animals"), DepthLimit::one(), false);
    assert_eq!(titles(&children), vec!["Cat", "Caterpillar", "Dog", "Dogfish"]);

    let two = select(&records, Some("Animals"), DepthLimit::levels(2).unwrap(), false);
    assert_eq!(two.len(), 9);
}

#[test]
fn unknown_path_selects_nothing() {
    let records = records_of(&animals());
    assert!(select(&records, Some("Animals > Ca"), DepthLimit::Unbounded, false).is_empty());
}

#[test]
fn separator_inside_a_title_is_rejected() {
    let source = SourceNode::new("Root").with_child(SourceNode::new("a > b"));
    let err = flattree::tree::flatten(&source).unwrap_err();
    assert!(matches!(err, BuildError::ReservedSeparator { .. }));

    let trailing = SourceNode::new("Root").with_child(SourceNode::new("a >"));
    assert!(flattree::tree::flatten(&trailing).is_err());
}

#[test]
fn duplicate_sibling_titles_are_rejected() {
    let source = SourceNode::new("Root")
        .with_child(SourceNode::new("A"))
        .with_child(SourceNode::new("A"));
    assert_eq!(
        flattree::tree::flatten(&source).unwrap_err(),
        BuildError::DuplicatePath("Root > A".to_string())
    );
}
