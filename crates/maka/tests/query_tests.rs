//! Query builder tests.

use serde_json::json;

use maka::error::QueryError;
use maka::query::{
    AcademicQuery, CalcHistogramQuery, EvaluateQuery, InterpretQuery, QueryType, SimilarityQuery,
    expr,
};

fn args(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_interpret_defaults() {
    let form = InterpretQuery::new("papers by jaime teevan").form().unwrap();

    assert_eq!(
        form,
        vec![
            ("query", "papers by jaime teevan".to_string()),
            ("complete", "0".to_string()),
            ("count", "50".to_string()),
            ("offset", "0".to_string()),
            ("timeout", "1000".to_string()),
            ("model", "latest".to_string()),
        ]
    );
}

#[test]
fn test_evaluate_defaults() {
    let form = EvaluateQuery::new("Y=2000").form().unwrap();

    assert_eq!(
        form,
        vec![
            ("expr", "Y=2000".to_string()),
            ("attributes", "Id".to_string()),
            ("count", "50".to_string()),
            ("offset", "0".to_string()),
            ("model", "latest".to_string()),
        ]
    );
}

#[test]
fn test_histogram_shares_evaluate_form() {
    let evaluate = EvaluateQuery::new("Y=2000").with_attributes("Y");
    let histogram = CalcHistogramQuery::from(evaluate.clone());

    assert_eq!(histogram.form().unwrap(), evaluate.form().unwrap());
    assert_eq!(CalcHistogramQuery::PATH, "/calchistogram");
}

#[test]
fn test_next_page_advances_offset() {
    let query = EvaluateQuery::new("RId=1").with_count(50).with_offset(100);
    let next = query.next_page();

    assert_eq!(next.offset, 150);
    assert_eq!(next.count, 50);
    assert_eq!(next.expr, query.expr);
}

#[test]
fn test_missing_required_arguments() {
    assert_eq!(
        InterpretQuery::default().form(),
        Err(QueryError::RequiredArgument("Interpret needs a query".to_string()))
    );
    assert_eq!(
        EvaluateQuery::default().form(),
        Err(QueryError::RequiredArgument("Evaluate needs an expr".to_string()))
    );
    assert_eq!(
        SimilarityQuery { s1: Some("a".to_string()), s2: None }.form(),
        Err(QueryError::RequiredArgument("Similarity needs two strings to compare".to_string()))
    );
}

#[test]
fn test_from_arguments_keeps_defaults() {
    let query = AcademicQuery::from_arguments(
        QueryType::Evaluate,
        &args(json!({"expr": "Y=2000", "count": "10"})),
    )
    .unwrap();

    assert_eq!(query.query_type(), QueryType::Evaluate);
    assert_eq!(query.path(), "/evaluate");
    match query {
        AcademicQuery::Evaluate(q) => {
            assert_eq!(q.count, 10);
            assert_eq!(q.offset, 0);
            assert_eq!(q.attributes, "Id");
            assert_eq!(q.model, "latest");
        }
        other => panic!("unexpected query: {other:?}"),
    }
}

#[test]
fn test_from_arguments_interpret_complete_flag() {
    let query = AcademicQuery::from_arguments(
        QueryType::Interpret,
        &args(json!({"query": "papers by x", "complete": 1, "timeout": 500})),
    )
    .unwrap();

    let form = query.form().unwrap();
    assert!(form.contains(&("complete", "1".to_string())));
    assert!(form.contains(&("timeout", "500".to_string())));
}

#[test]
fn test_from_arguments_rejects_non_numeric() {
    let err = AcademicQuery::from_arguments(
        QueryType::Histogram,
        &args(json!({"expr": "Y=2000", "count": "lots"})),
    )
    .unwrap_err();

    assert!(matches!(err, QueryError::Format { ref field, .. } if field == "count"));
    assert!(err.to_string().starts_with("count must be numeric"));
}

#[test]
fn test_graph_traversal_is_unsupported() {
    assert_eq!(QueryType::GraphTraversal.path(), None);

    let err = AcademicQuery::from_arguments(QueryType::GraphTraversal, &args(json!({})))
        .unwrap_err();
    assert_eq!(err, QueryError::UnsupportedQueryType(QueryType::GraphTraversal));
}

#[test]
fn test_expression_helpers() {
    assert_eq!(expr::references(42), "RId=42");
    assert_eq!(expr::author_query("  albert einstein "), "papers by albert einstein");
    assert_eq!(
        expr::or_all(&["Composite(AA.AuN=='a')", "Composite(AA.AuN=='b')"]).as_deref(),
        Some("OR(Composite(AA.AuN=='a'),Composite(AA.AuN=='b'))")
    );
    assert_eq!(
        expr::author_names_in("And(Composite(AA.AuN=='a b'),Composite(AA.AuN == 'c'),Composite(AA.AuN=='a b'))"),
        vec!["a b", "c"]
    );
}
