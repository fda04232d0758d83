// tests/thing_parse.rs
//
// Record parsing against a captured-shape `thing` response.
//
use bgg_shelf::core::xml;
use bgg_shelf::specs::thing::{self, parse_item, parse_things};
use bgg_shelf::{Error, GameRecord, ItemKind, ParseError, PlayerCount};

const THING: &str = include_str!("fixtures/thing.xml");

fn by_name<'a>(records: &'a [GameRecord], name: &str) -> &'a GameRecord {
    records.iter().find(|g| g.name == name).unwrap()
}

/// Wrap one `<item>` body so single-field cases stay short.
fn item(attrs: &str, body: &str) -> String {
    format!(
        r#"<item {attrs}>
            <thumbnail>t</thumbnail><image>i</image>
            <name type="primary" value="Probe"/>
            <description>d</description>
            <yearpublished value="2001"/><minplayers value="2"/><maxplayers value="4"/>
            <minplaytime value="30"/><maxplaytime value="60"/><minage value="10"/>
            <statistics>
              <ratings><average value="7"/><averageweight value="2"/></ratings>
            </statistics>
            {body}
        </item>"#
    )
}

fn parse_one(xml_item: &str) -> Result<GameRecord, ParseError> {
    let el = xml::parse(xml_item).unwrap();
    parse_item(&el, 0.5)
}

#[test]
fn parses_every_item_in_order() {
    let records = parse_things(THING, 0.5).unwrap();
    let names: Vec<_> = records.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Root", "Leaf", "Orphan Pack", "Quiet", "Solo Quest"]);
}

#[test]
fn base_game_scalars_and_polls() {
    let records = parse_things(THING, 0.5).unwrap();
    let root = by_name(&records, "Root");

    assert_eq!(root.id, "100");
    assert_eq!(root.kind, ItemKind::BaseGame);
    assert!(!root.is_expansion());
    assert_eq!(root.expands_name(), None);
    assert_eq!(root.description, "Trade & build\n\u{2014} or not");
    assert_eq!(root.year, 2018);
    assert_eq!(root.players, (2, 4));
    assert_eq!(root.playtime, (60, 90));
    assert_eq!(root.min_age, 10);
    assert!(root.image_url.ends_with("root.jpg"));
    assert!(root.thumbnail_url.contains("__thumb"));
    assert!((root.rating - 7.81234).abs() < 1e-9);
    assert!((root.complexity - 3.75).abs() < 1e-9);

    assert_eq!(root.community_min_players, Some(PlayerCount::Exactly(2)));
    assert_eq!(root.community_max_players, Some(PlayerCount::Exactly(2)));
    assert_eq!(root.community_best_players, Some(PlayerCount::Exactly(2)));
    assert_eq!(root.community_min_age.as_deref(), Some("12+"));
    assert_eq!(
        root.community_language_dependence.as_deref(),
        Some("No necessary in-game text")
    );
    assert!(root.expansions.is_empty());
}

#[test]
fn taxonomy_keeps_duplicates_and_order() {
    let records = parse_things(THING, 0.5).unwrap();
    let root = by_name(&records, "Root");
    assert_eq!(root.categories, ["Fantasy", "Fantasy", "Territory Building"]);
    assert_eq!(root.mechanics, ["Area Majority / Influence", "Hand Management"]);
    assert_eq!(root.designers, ["Cole Wehrle"]);
    assert_eq!(root.artists, ["Kyle Ferrin"]);
    assert_eq!(root.publishers, ["Leder Games"]);
    assert_eq!(root.families, ["Theme: Woodland"]);
    assert_eq!(root.compilations, ["Root Big Box"]);
}

#[test]
fn expansion_links_back_to_its_base() {
    let records = parse_things(THING, 0.5).unwrap();
    let leaf = by_name(&records, "Leaf");
    assert!(leaf.is_expansion());
    assert_eq!(leaf.expands_name(), Some("Root"));
    assert_eq!(leaf.community_min_players, Some(PlayerCount::Exactly(2)));
    assert_eq!(leaf.community_max_players, Some(PlayerCount::OrMore(4)));
    assert_eq!(leaf.community_best_players, Some(PlayerCount::Exactly(2)));
    assert!(leaf.good_for_players(9));
}

#[test]
fn missing_polls_leave_community_fields_empty() {
    let records = parse_things(THING, 0.5).unwrap();
    let quiet = by_name(&records, "Quiet");
    assert_eq!(quiet.community_min_players, None);
    assert_eq!(quiet.community_max_players, None);
    assert_eq!(quiet.community_best_players, None);
    // present but all-zero
    assert_eq!(quiet.community_min_age, None);
    assert_eq!(quiet.community_language_dependence, None);
    assert!(quiet.good_for_players(5));
    assert!(!quiet.good_for_players(6));

    let solo = by_name(&records, "Solo Quest");
    assert_eq!(solo.year, -500);
    assert!(solo.good_for_players(1));
    assert!(!solo.good_for_players(2));
}

#[test]
fn threshold_changes_derived_values() {
    let records = parse_things(THING, 0.15).unwrap();
    let root = by_name(&records, "Root");
    // 3 players is 20% yes, above a 15% bar
    assert_eq!(root.community_max_players, Some(PlayerCount::Exactly(3)));
    assert_eq!(root.community_min_age.as_deref(), Some("10"));
}

#[test]
fn primary_name_wins_over_alternates() {
    let records = parse_things(THING, 0.5).unwrap();
    assert!(records.iter().all(|g| g.name != "Raiz"));
}

#[test]
fn missing_required_field_names_item_and_path() {
    let doc = item(r#"type="boardgame" id="7""#, "").replace(r#"<minage value="10"/>"#, "");
    assert_eq!(
        parse_one(&doc),
        Err(ParseError::MissingElement { item: "7".into(), path: "minage" })
    );

    let doc = item(r#"type="boardgame" id="8""#, "").replace(r#"<average value="7"/>"#, "");
    assert_eq!(
        parse_one(&doc),
        Err(ParseError::MissingElement { item: "8".into(), path: "statistics/ratings/average" })
    );
}

#[test]
fn non_numeric_value_is_rejected() {
    let doc = item(r#"type="boardgame" id="9""#, "")
        .replace(r#"<minplayers value="2"/>"#, r#"<minplayers value="two"/>"#);
    assert!(matches!(
        parse_one(&doc),
        Err(ParseError::InvalidNumber { field: "minplayers", .. })
    ));
}

#[test]
fn expansion_without_inbound_link_is_rejected() {
    let doc = item(
        r#"type="boardgameexpansion" id="10""#,
        r#"<link type="boardgameexpansion" id="1" value="Outbound only"/>"#,
    );
    assert_eq!(parse_one(&doc), Err(ParseError::MissingExpandsLink { item: "10".into() }));
}

#[test]
fn vote_group_missing_a_label_fails() {
    let doc = item(
        r#"type="boardgame" id="11""#,
        r#"<poll name="suggested_numplayers">
             <results numplayers="2">
               <result value="Best" numvotes="3"/>
               <result value="Recommended" numvotes="1"/>
             </results>
           </poll>"#,
    );
    assert_eq!(
        parse_one(&doc),
        Err(ParseError::MissingVoteLabel {
            item: "11".into(),
            poll: "suggested_numplayers",
            group: "2".into(),
            label: "Not Recommended",
        })
    );
}

#[test]
fn empty_vote_group_is_skipped() {
    let doc = item(
        r#"type="boardgame" id="12""#,
        r#"<poll name="suggested_numplayers">
             <results numplayers="1"></results>
             <results numplayers="2">
               <result value="Best" numvotes="3"/>
               <result value="Recommended" numvotes="1"/>
               <result value="Not Recommended" numvotes="0"/>
             </results>
           </poll>"#,
    );
    let g = parse_one(&doc).unwrap();
    assert_eq!(g.community_min_players, Some(PlayerCount::Exactly(2)));
}

#[test]
fn saturated_vote_counts_still_parse() {
    let doc = item(
        r#"type="boardgame" id="14""#,
        r#"<poll name="suggested_playerage">
             <results>
               <result value="8" numvotes="18446744073709551615"/>
               <result value="12" numvotes="18446744073709551615"/>
             </results>
           </poll>
           <poll name="suggested_numplayers">
             <results numplayers="4">
               <result value="Best" numvotes="18446744073709551615"/>
               <result value="Recommended" numvotes="18446744073709551615"/>
               <result value="Not Recommended" numvotes="18446744073709551615"/>
             </results>
           </poll>"#,
    );
    let g = parse_one(&doc).unwrap();
    assert_eq!(g.community_min_age.as_deref(), Some("8"));
    assert_eq!(g.community_min_players, Some(PlayerCount::Exactly(4)));
    assert_eq!(g.community_best_players, Some(PlayerCount::Exactly(4)));
}

#[test]
fn bad_player_count_label_names_the_item() {
    let doc = item(
        r#"type="boardgame" id="15""#,
        r#"<poll name="suggested_numplayers">
             <results numplayers="lots">
               <result value="Best" numvotes="3"/>
               <result value="Recommended" numvotes="1"/>
               <result value="Not Recommended" numvotes="0"/>
             </results>
           </poll>"#,
    );
    assert_eq!(
        parse_one(&doc),
        Err(ParseError::InvalidPlayerCount { item: "15".into(), value: "lots".into() })
    );
}

#[test]
fn only_first_numplayers_poll_counts() {
    let doc = item(
        r#"type="boardgame" id="13""#,
        r#"<poll name="suggested_numplayers">
             <results numplayers="2">
               <result value="Best" numvotes="0"/>
               <result value="Recommended" numvotes="0"/>
               <result value="Not Recommended" numvotes="5"/>
             </results>
           </poll>
           <poll name="suggested_numplayers">
             <results numplayers="3">
               <result value="Best" numvotes="5"/>
               <result value="Recommended" numvotes="0"/>
               <result value="Not Recommended" numvotes="0"/>
             </results>
           </poll>"#,
    );
    let g = parse_one(&doc).unwrap();
    assert_eq!(g.community_min_players, None);
    assert_eq!(g.community_best_players, None);
}

#[test]
fn errors_document_is_an_api_error() {
    let doc = "<errors><error><message>Rate limit exceeded.</message></error></errors>";
    assert!(matches!(parse_things(doc, 0.5), Err(Error::Api(m)) if m == "Rate limit exceeded."));
}

#[test]
fn thing_url_batches_ids_with_stats() {
    let ids = vec!["13".to_string(), "822".to_string()];
    let url = thing::thing_url("https://example.test/xmlapi2", &ids).unwrap();
    assert_eq!(url.path(), "/xmlapi2/thing");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        [("id".to_string(), "13,822".to_string()), ("stats".to_string(), "1".to_string())]
    );
}
