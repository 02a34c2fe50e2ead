use flattree::query::search;
use flattree::QueryError;

use crate::support::{animals, records_of, titles};

#[test]
fn search_scoped_to_dogfish_matches_the_anchor_only() {
    let records = records_of(&animals());
    let hits = search(&records, Some("Animals > Dogfish"), Some("Dog")).unwrap();
    assert_eq!(titles(&hits), vec!["Dogfish", "Spiny dogfish"]);
}

#[test]
fn search_is_case_insensitive_and_id_ordered() {
    let records = records_of(&animals());
    let hits = search(&records, None, Some("DOG")).unwrap();
    assert_eq!(titles(&hits), vec!["Dog", "Dogfish", "Spiny dogfish"]);
    assert!(hits.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn search_scope_respects_segment_boundary() {
    let records = records_of(&animals());
    let hits = search(&records, Some("Animals > Cat"), Some("i")).unwrap();
    assert_eq!(titles(&hits), vec!["Siamese"]);
}

#[test]
fn blank_term_is_rejected() {
    let records = records_of(&animals());
    assert_eq!(search(&records, None, None), Err(QueryError::EmptySearchTerm));
    assert_eq!(search(&records, None, Some("")), Err(QueryError::EmptySearchTerm));
}

#[test]
fn leading_space_in_term_is_matched_literally() {
    let records = records_of(&animals());
    let hits = search(&records, None, Some(" dog")).unwrap();
    assert_eq!(titles(&hits), vec!["Spiny dogfish"]);
    let hits = search(&records, Some("Animals > Dogfish"), Some(" ")).unwrap();
    assert_eq!(titles(&hits), vec!["Spiny dogfish"]);
}

#[test]
fn dog_and_dogfish_scopes() {
    let source = flattree::SourceNode::new("Root")
        .with_child(flattree::SourceNode::new("Dog"))
        .with_child(flattree::SourceNode::new("Dogfish"));
    let records = records_of(&source);

    let from_root = search(&records, Some("Root"), Some("Dog")).unwrap();
    assert_eq!(titles(&from_root), vec!["Dog", "Dogfish"]);

    let from_dogfish = search(&records, Some("Root > Dogfish"), Some("Dog")).unwrap();
    assert_eq!(titles(&from_dogfish), vec!["Dogfish"]);
}
