use super::*;
use serde_json::json;

#[test]
fn test_correct_search_string_prefixes_wildcard() {
    assert_eq!(correct_search_string("Foo"), "*Foo");
}

#[test]
fn test_correct_search_string_trims_each_entry() {
    assert_eq!(correct_search_string("A,B"), "*A,*B");
    assert_eq!(correct_search_string(" List , Map* ,?az"), "*List,*Map*,*?az");
}

#[test]
fn test_correct_search_string_literal_marker() {
    assert_eq!(correct_search_string("'Foo"), "Foo");
    assert_eq!(correct_search_string("'Foo'"), "Foo");
    // Literal input is not trimmed or split
    assert_eq!(correct_search_string("'java.util.List, Map'"), "java.util.List, Map");
}

#[test]
fn test_correct_search_string_degenerate_input() {
    assert_eq!(correct_search_string(""), "*");
    assert_eq!(correct_search_string("'"), "");
    assert_eq!(correct_search_string("''"), "");
    assert_eq!(correct_search_string(","), "*,*");
}

#[test]
fn test_build_query_single_wildcard() {
    let query = build_query(&correct_search_string("Foo"));
    assert_eq!(query.must, vec![QueryClause::Wildcard("*Foo".to_string())]);
}

#[test]
fn test_build_query_literal_is_exact() {
    let query = build_query(&correct_search_string("'Foo"));
    assert_eq!(query.must, vec![QueryClause::Exact("Foo".to_string())]);
}

#[test]
fn test_build_query_two_terms() {
    let query = build_query(&correct_search_string("A,B"));
    assert_eq!(query.must.len(), 2);
    assert!(query.must.iter().all(QueryClause::is_wildcard));
}

#[test]
fn test_build_query_one_clause_per_non_empty_term() {
    let query = build_query("Foo, ,Bar,,  Baz?  ");
    assert_eq!(
        query.must,
        vec![
            QueryClause::Exact("Foo".to_string()),
            QueryClause::Exact("Bar".to_string()),
            QueryClause::Wildcard("Baz?".to_string()),
        ]
    );
}

#[test]
fn test_build_query_all_empty_input() {
    assert!(build_query("").is_empty());
    assert!(build_query(" , ,, ").is_empty());
}

#[test]
fn test_clause_kind_follows_markers() {
    for term in ["a*", "*a", "a?c", "?", "*"] {
        assert!(QueryClause::for_term(term).is_wildcard(), "{} should be wildcard", term);
    }
    for term in ["a", "java.util.List", "a+b", "[x]"] {
        assert!(!QueryClause::for_term(term).is_wildcard(), "{} should be exact", term);
    }
}

#[test]
fn test_structured_query_json_shape() {
    let query = build_query("*Foo,Bar");
    let body = query.to_json("custom.tokens.importName");
    assert_eq!(
        body,
        json!({
            "bool": {
                "must": [
                    { "wildcard": { "custom.tokens.importName": "*Foo" } },
                    { "term": { "custom.tokens.importName": "Bar" } }
                ],
                "must_not": [],
                "should": []
            }
        })
    );
}

#[test]
fn test_search_request_body_sorts_by_score() {
    let body = search_request_body(&build_query("*Foo"), "imports");
    assert_eq!(body["sort"], json!([{ "score": { "order": "desc" } }]));
    assert_eq!(body["query"]["bool"]["must"][0]["wildcard"]["imports"], "*Foo");
}

#[test]
fn test_file_lookup_body() {
    let body = file_lookup_body("typesourcefile.fileName", "repo1/module/Foo.java");
    assert_eq!(
        body,
        json!({ "query": { "term": { "typesourcefile.fileName": "repo1/module/Foo.java" } } })
    );
}

#[test]
fn test_wildcard_to_regex() {
    assert_eq!(wildcard_to_regex("*Foo"), ".*Foo");
    assert_eq!(wildcard_to_regex("?az"), ".az");
    assert_eq!(wildcard_to_regex("java.util.*"), r"java\.util\..*");
    assert_eq!(wildcard_to_regex(""), "");
}

#[test]
fn test_compiled_term_is_substring_match() {
    let regex = compile_term("*Foo").unwrap();
    assert!(regex.is_match("com.acme.Foo"));
    assert!(regex.is_match("FooBar"));
    assert!(!regex.is_match("Bar"));

    let one = compile_term("?az").unwrap();
    assert!(one.is_match("Baz"));
    assert!(one.is_match("x.Bazooka"));
    assert!(!one.is_match("az"));
}

#[test]
fn test_compiled_term_dot_is_literal() {
    let regex = compile_term("java.util").unwrap();
    assert!(regex.is_match("java.util.List"));
    assert!(!regex.is_match("javaXutil"));
}

#[test]
fn test_compile_terms_skips_empty() {
    assert_eq!(compile_terms("*A, ,*B,").len(), 2);
    assert!(compile_terms("").is_empty());
}

#[test]
fn test_split_terms() {
    let terms: Vec<&str> = split_terms(" a , b,,c ").collect();
    assert_eq!(terms, vec!["a", "b", "c"]);
}
