//! Minimal HTTP/1.1 framing: one request per connection, `Connection: close`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use thiserror::Error;

/// Request line plus headers may not exceed this.
const MAX_HEAD_BYTES: u64 = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("connection closed before a request line")]
    Closed,
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("body of {len} bytes exceeds limit of {limit}")]
    TooLarge { len: usize, limit: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub async fn read_request<R>(reader: &mut R, max_body_bytes: usize) -> Result<Request, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = (&mut *reader).take(MAX_HEAD_BYTES);

    let mut request_line = String::new();
    if read_head_line(&mut head, &mut request_line).await? == 0 {
        return Err(RequestError::Closed);
    }
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestError::Malformed(format!(
            "bad request line '{}'",
            request_line.trim_end()
        )));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(RequestError::Malformed(format!("unsupported version {version}")));
    }
    let method = method.to_string();
    // Query strings carry nothing we route on
    let path = target.split_once('?').map_or(target, |(p, _)| p).to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if read_head_line(&mut head, &mut line).await? == 0 {
            return Err(RequestError::Malformed("headers truncated".to_string()));
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(RequestError::Malformed(format!("bad header '{line}'")));
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            content_length = value
                .trim()
                .parse()
                .map_err(|_| RequestError::Malformed(format!("bad content-length '{}'", value.trim())))?;
        }
    }

    if content_length > max_body_bytes {
        return Err(RequestError::TooLarge {
            len: content_length,
            limit: max_body_bytes,
        });
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;

    Ok(Request { method, path, body })
}

/// `read_line` on the head; bytes that are not UTF-8 make the request malformed.
async fn read_head_line<R>(head: &mut R, line: &mut String) -> Result<usize, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    head.read_line(line).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => {
            RequestError::Malformed("request head is not valid UTF-8".to_string())
        }
        _ => RequestError::Io(e),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        _ => "Internal Server Error",
    }
}

pub async fn write_response<W>(stream: &mut W, response: &Response) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.content_type,
        response.body.len()
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(&response.body).await?;
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    async fn parse(raw: &str, limit: usize) -> Result<Request, RequestError> {
        let mut reader = BufReader::new(raw.as_bytes());
        read_request(&mut reader, limit).await
    }

    #[tokio::test]
    async fn test_reads_post_with_body() {
        let raw = "POST /analyze?x=1 HTTP/1.1\r\nHost: a\r\nContent-Length: 5\r\n\r\nhello";
        let req = parse(raw, 1024).await.expect("parses");
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/analyze");
        assert_eq!(req.body, b"hello");
    }

    #[tokio::test]
    async fn test_get_without_body() {
        let req = parse("GET /health HTTP/1.1\r\n\r\n", 1024).await.expect("parses");
        assert_eq!(req.path, "/health");
        assert!(req.body.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected_before_reading() {
        let raw = "POST /analyze HTTP/1.1\r\nContent-Length: 2048\r\n\r\n";
        let err = parse(raw, 1024).await.unwrap_err();
        assert!(matches!(err, RequestError::TooLarge { len: 2048, limit: 1024 }));
    }

    #[tokio::test]
    async fn test_malformed_inputs() {
        assert!(matches!(parse("", 10).await, Err(RequestError::Closed)));
        assert!(matches!(
            parse("NONSENSE\r\n\r\n", 10).await,
            Err(RequestError::Malformed(_))
        ));
        assert!(matches!(
            parse("POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n", 10).await,
            Err(RequestError::Malformed(_))
        ));
        assert!(matches!(
            parse("GET / SPDY/3\r\n\r\n", 10).await,
            Err(RequestError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_non_utf8_head_is_malformed() {
        let raw: &[u8] = b"GET /h\xff\xfe HTTP/1.1\r\n\r\n";
        let mut reader = BufReader::new(raw);
        let err = read_request(&mut reader, 10).await.unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)), "{err:?}");

        let raw: &[u8] = b"GET /health HTTP/1.1\r\nX-Bad: \xc3\x28\r\n\r\n";
        let mut reader = BufReader::new(raw);
        let err = read_request(&mut reader, 10).await.unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_write_response_frames_body() {
        let mut out = Vec::new();
        write_response(&mut out, &Response::json(404, b"{}".to_vec()))
            .await
            .expect("writes");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Length: 2\r\n"));
        assert!(text.ends_with("\r\n\r\n{}"));
    }
}
