//! Absolute http(s) import paths are fetched directly.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use lesscss_resource::FileResource;
use lesscss_source::LessSource;

/// Serves `responses` one connection at a time on an ephemeral port and
/// returns the base URL. Resolution probes a resource before fetching it, so
/// one imported stylesheet needs a HEAD response followed by a GET response.
fn serve(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let mut buf = [0_u8; 4096];
            let mut head = Vec::new();
            loop {
                let n = match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn response_with_body(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

#[test]
fn test_absolute_http_import_is_inlined() {
    let base = serve(vec![
        response_with_body(""),         // HEAD probe
        response_with_body("@c: red;"), // GET fetch
    ]);

    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.less");
    std::fs::write(
        &main,
        format!("@import \"{base}/vars.less\";\nbody {{ }}\n"),
    )
    .unwrap();

    let source = LessSource::new(Box::new(FileResource::new(&main))).unwrap();
    assert_eq!(source.normalized_content(), "@c: red;\nbody { }\n");
    assert!(source
        .imports()
        .contains_key(&format!("{base}/vars.less")));
}

#[test]
fn test_unreachable_http_import_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.less");
    std::fs::write(&main, "@import \"http://127.0.0.1:9/vars.less\";\n").unwrap();

    let err = LessSource::new(Box::new(FileResource::new(main.as_path()))).unwrap_err();
    assert!(matches!(
        err,
        lesscss_source::LessError::Resource(lesscss_resource::ResourceError::NotFound { .. })
    ));
}
