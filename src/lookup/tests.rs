use super::*;

#[test]
fn query_strips_directories_and_extension() {
    assert_eq!(query_from_path("/music/Radiohead - Creep.mp3"), "Radiohead Creep");
    assert_eq!(query_from_path("C:\\Music\\Daft_Punk-Around_the_World.flac"), "Daft Punk Around the World");
    assert_eq!(query_from_path("song.mp3"), "song");
}

#[test]
fn query_collapses_separators_and_whitespace() {
    assert_eq!(query_from_path("  a -- b__c  .mp3"), "a b c");
    assert_eq!(query_from_path("/x/no_extension"), "no extension");
}

#[test]
fn query_keeps_inner_dots_and_leading_dot_names() {
    assert_eq!(query_from_path("/x/01. Intro.ogg"), "01. Intro");
    assert_eq!(query_from_path("/x/.hidden"), ".hidden");
}

#[test]
fn query_of_bare_separator_is_empty() {
    assert_eq!(query_from_path("/music/-.mp3"), "");
    assert_eq!(query_from_path(""), "");
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let worker_view = token.clone();
    assert!(worker_view.check().is_ok());

    token.cancel();
    assert!(worker_view.is_cancelled());
    assert!(matches!(worker_view.check(), Err(LookupError::Cancelled)));
}

#[test]
fn disabled_client_never_matches() {
    let client = DisabledClient;
    assert_eq!(client.search_one("anything", &CancelToken::new()).unwrap(), None);
}
