use switchyard::http::parser::{ParseError, parse_head};
use switchyard::http::request::{Header, QueryParameter};

#[test]
fn test_parse_simple_get_request() {
    let head = parse_head(b"GET / HTTP/1.1\r\nHost: example.com").unwrap();

    assert_eq!(head.method, "GET");
    assert_eq!(head.path, "/");
    assert!(head.params.is_empty());
    assert_eq!(head.headers, vec![Header::new("Host", "example.com")]);
}

#[test]
fn test_parse_headers_keep_wire_order_and_duplicates() {
    let head = parse_head(
        b"GET /path HTTP/1.1\r\nX-B: 2\r\nX-A: 1\r\nX-B: 3\r\nAccept: */*",
    )
    .unwrap();

    assert_eq!(
        head.headers,
        vec![
            Header::new("X-B", "2"),
            Header::new("X-A", "1"),
            Header::new("X-B", "3"),
            Header::new("Accept", "*/*"),
        ]
    );
}

#[test]
fn test_parse_query_block_after_ampersand() {
    let head = parse_head(b"GET /params&foo=bar HTTP/1.1").unwrap();

    assert_eq!(head.path, "/params");
    assert_eq!(head.params, vec![QueryParameter::new("foo", "bar")]);
}

#[test]
fn test_parse_question_mark_separates_parameters() {
    let head = parse_head(b"GET /search&q=rust?page=2?q=again HTTP/1.1").unwrap();

    assert_eq!(head.path, "/search");
    assert_eq!(
        head.params,
        vec![
            QueryParameter::new("q", "rust"),
            QueryParameter::new("page", "2"),
            QueryParameter::new("q", "again"),
        ]
    );
}

#[test]
fn test_parse_standard_query_string_stays_in_path() {
    let head = parse_head(b"GET /search?q=rust HTTP/1.1").unwrap();

    assert_eq!(head.path, "/search?q=rust");
    assert!(head.params.is_empty());
}

#[test]
fn test_parse_param_value_split_once() {
    let head = parse_head(b"GET /p&expr=a=b HTTP/1.1").unwrap();

    assert_eq!(head.params, vec![QueryParameter::new("expr", "a=b")]);
}

#[test]
fn test_parse_only_first_query_block_is_read() {
    let head = parse_head(b"GET /p&a=1&b=2 HTTP/1.1").unwrap();

    assert_eq!(head.params, vec![QueryParameter::new("a", "1")]);
}

#[test]
fn test_parse_unknown_method_is_accepted() {
    let head = parse_head(b"BREW /pot HTTP/1.1").unwrap();

    assert_eq!(head.method, "BREW");
}

#[test]
fn test_parse_version_token_is_optional() {
    let head = parse_head(b"GET /").unwrap();

    assert_eq!(head.path, "/");
}

#[test]
fn test_parse_lf_only_lines() {
    let head = parse_head(b"GET / HTTP/1.1\nHost: a\nX-Other: b").unwrap();

    assert_eq!(head.headers.len(), 2);
    assert_eq!(head.headers[1], Header::new("X-Other", "b"));
}

#[test]
fn test_parse_header_without_space_after_colon() {
    let head = parse_head(b"GET / HTTP/1.1\r\nContent-Type:text/html").unwrap();

    assert_eq!(head.headers, vec![Header::new("Content-Type", "text/html")]);
}

#[test]
fn test_parse_header_value_keeps_inner_colons() {
    let head = parse_head(b"GET / HTTP/1.1\r\nHost: localhost:8080").unwrap();

    assert_eq!(head.headers, vec![Header::new("Host", "localhost:8080")]);
}

#[test]
fn test_parse_content_length_case_insensitive() {
    let head = parse_head(b"PUT /body HTTP/1.1\r\nCONTENT-LENGTH: 9").unwrap();

    assert_eq!(head.content_length(), Ok(Some(9)));
}

#[test]
fn test_parse_content_length_absent() {
    let head = parse_head(b"GET / HTTP/1.1\r\nHost: a").unwrap();

    assert_eq!(head.content_length(), Ok(None));
}

#[test]
fn test_parse_content_length_invalid() {
    let head = parse_head(b"PUT /body HTTP/1.1\r\ncontent-length: nine").unwrap();

    assert_eq!(
        head.content_length(),
        Err(ParseError::InvalidContentLength("nine".to_string()))
    );
}

#[test]
fn test_parse_malformed_header() {
    let result = parse_head(b"GET / HTTP/1.1\r\nBrokenHeader");

    assert_eq!(result, Err(ParseError::InvalidHeader("BrokenHeader".to_string())));
}

#[test]
fn test_parse_missing_target() {
    assert_eq!(parse_head(b"GET"), Err(ParseError::MissingTarget));
    assert_eq!(parse_head(b"GET  /"), Err(ParseError::MissingTarget));
}

#[test]
fn test_parse_empty_start_line() {
    assert_eq!(parse_head(b""), Err(ParseError::EmptyStartLine));
}

#[test]
fn test_parse_query_parameter_without_equals() {
    let result = parse_head(b"GET /p&flag HTTP/1.1");

    assert_eq!(result, Err(ParseError::InvalidQueryParameter("flag".to_string())));
}

#[test]
fn test_parse_invalid_utf8_head() {
    let result = parse_head(b"GET /\xff HTTP/1.1");

    assert_eq!(result, Err(ParseError::InvalidEncoding));
}
