//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, ReadBuf};

    use crate::parser::{parse_request, read_request, Error, HttpRequest, Method, ParseOutcome};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.uri, "/index.html");
        assert_eq!(result.user_agent, None);
        assert_eq!(result.body, None);
    }

    #[test]
    fn test_parse_user_agent() {
        let request = b"GET /user-agent HTTP/1.1\r\nHost: localhost\r\nUser-Agent: curl/7.64.1\r\nAccept: */*\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.uri, "/user-agent");
        assert_eq!(result.user_agent.as_deref(), Some("curl/7.64.1"));
    }

    #[test]
    fn test_user_agent_header_name_is_case_insensitive() {
        let request = b"GET / HTTP/1.1\r\nuser-agent: lower/1.0\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.user_agent.as_deref(), Some("lower/1.0"));
    }

    #[test]
    fn test_user_agent_without_space() {
        let request = b"GET / HTTP/1.1\r\nUser-Agent:tight\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.user_agent.as_deref(), Some("tight"));
    }

    #[test]
    fn test_parse_post_with_body() {
        let request = b"POST /files/readme.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 11\r\n\r\nhello world";
        let result = parse_request(request);
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.uri, "/files/readme.txt");
        assert_eq!(result.body.as_deref(), Some(&b"hello world"[..]));
    }

    #[test]
    fn test_body_is_single_line() {
        let request = b"POST /files/a HTTP/1.1\r\n\r\nfirst\r\nsecond\r\n";
        let result = parse_request(request);
        assert_eq!(result.body.as_deref(), Some(&b"first"[..]));
    }

    #[test]
    fn test_body_absent_without_content() {
        let request = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.body, None);
    }

    #[test]
    fn test_binary_body_is_preserved() {
        let request = b"POST /files/bin HTTP/1.1\r\n\r\n\x00\x01\xFF\xFE";
        let result = parse_request(request);
        assert_eq!(result.body, Some(vec![0x00, 0x01, 0xFF, 0xFE]));
    }

    #[test]
    fn test_bare_newline_terminators() {
        let request = b"GET /echo/abc HTTP/1.1\nUser-Agent: nl\n\nbody";
        let result = parse_request(request);
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.uri, "/echo/abc");
        assert_eq!(result.user_agent.as_deref(), Some("nl"));
        assert_eq!(result.body.as_deref(), Some(&b"body"[..]));
    }

    #[test]
    fn test_request_line_without_version() {
        let result = parse_request(b"GET /echo/short\r\n\r\n");
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.uri, "/echo/short");
    }

    #[test]
    fn test_request_line_with_too_many_fields_is_skipped() {
        let result = parse_request(b"GET /a b HTTP/1.1\r\n\r\n");
        assert_eq!(result, HttpRequest::default());
    }

    #[test]
    fn test_unknown_method() {
        let result = parse_request(b"DELETE /files/a HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(result.method, Method::UNKNOWN);
        assert_eq!(result.uri, "/");
    }

    #[test]
    fn test_garbage_defaults_to_root() {
        let result = parse_request(b"\xFF\xFE garbage");
        assert_eq!(result.method, Method::UNKNOWN);
        assert_eq!(result.uri, "/");
    }

    #[test]
    fn test_header_containing_method_token_is_not_a_request_line() {
        let request = b"GET /echo/x HTTP/1.1\r\nUser-Agent: GETter/1.0\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.uri, "/echo/x");
        assert_eq!(result.user_agent.as_deref(), Some("GETter/1.0"));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::POST);
        assert_eq!("get".parse::<Method>().unwrap(), Method::UNKNOWN);
        assert_eq!("PATCH".parse::<Method>().unwrap(), Method::UNKNOWN);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::POST.to_string(), "POST");
        assert_eq!(Method::UNKNOWN.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_request_builders() {
        let request = HttpRequest::new(Method::POST, "/files/x")
            .with_user_agent("agent")
            .with_body("data");
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.uri, "/files/x");
        assert_eq!(request.user_agent.as_deref(), Some("agent"));
        assert_eq!(request.body.as_deref(), Some(&b"data"[..]));
    }

    struct FailingReader;

    impl AsyncRead for FailingReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
        }
    }

    #[tokio::test]
    async fn test_read_request_parses_bytes() {
        let mut stream: &[u8] = b"GET /echo/hi HTTP/1.1\r\n\r\n";
        match read_request(&mut stream, 4096).await {
            ParseOutcome::Parsed(request) => {
                assert_eq!(request.method, Method::GET);
                assert_eq!(request.uri, "/echo/hi");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_request_empty_stream() {
        let mut stream: &[u8] = b"";
        let outcome = read_request(&mut stream, 4096).await;
        assert!(matches!(outcome, ParseOutcome::Malformed(Error::EmptyRequest)));
    }

    #[tokio::test]
    async fn test_read_request_io_error() {
        let outcome = read_request(&mut FailingReader, 4096).await;
        assert!(matches!(outcome, ParseOutcome::Malformed(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_read_request_is_bounded() {
        let mut stream: &[u8] = b"GET /echo/truncated HTTP/1.1\r\n\r\n";
        match read_request(&mut stream, 8).await {
            ParseOutcome::Parsed(request) => {
                // "GET /ech" still forms a two-field request line
                assert_eq!(request.uri, "/ech");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
