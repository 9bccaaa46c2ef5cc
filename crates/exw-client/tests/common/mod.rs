//! A local HTTP server that answers with canned JSON and records what it got.

use std::io::Read;
use std::thread::JoinHandle;

#[derive(Debug)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct MockServer {
    pub base: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl MockServer {
    /// Serve `responses` in order, one per request, then stop.
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
        let addr = server.server_addr().to_ip().expect("ip listener");
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let Ok(mut request) = server.recv() else {
                    break;
                };
                let mut content = String::new();
                let _ = request.as_reader().read_to_string(&mut content);
                seen.push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.to_string(), h.value.to_string()))
                        .collect(),
                    body: content,
                });
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
            seen
        });
        Self {
            base: format!("http://{addr}"),
            handle,
        }
    }

    /// Wait for every canned response to be served and return the requests.
    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().expect("mock server thread")
    }
}
