//! A throwaway HTTP server that answers a fixed sequence of requests.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use bongo::config::Config;
use bongo::fetch::BasicClient;
use bongo::fetch::auth::UrlParam;
use bongo::services::BongoClient;

pub const TEST_API_KEY: &str = "test-key";

pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl MockServer {
    /// Serves `responses` in order, one connection each.
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                request_lines.push(request_line.trim_end().to_string());

                // Drain headers; GET requests carry no body.
                let mut header = String::new();
                while reader.read_line(&mut header).unwrap() > 0 && header != "\r\n" {
                    header.clear();
                }

                write!(
                    stream,
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                )
                .unwrap();
                stream.flush().unwrap();
            }
            request_lines
        });

        Self { base_url, handle }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::start(vec![(status, body.to_string())])
    }

    /// A client pointed at this server, authenticating with [`TEST_API_KEY`].
    pub fn client(&self) -> BongoClient<UrlParam<BasicClient>> {
        let base_url = self.base_url.clone();
        let config = Config::from_lookup(move |name| match name {
            "BONGO_API_KEY" => Some(TEST_API_KEY.to_string()),
            "BONGO_API_URL" => Some(base_url.clone()),
            _ => None,
        })
        .unwrap();
        BongoClient::from_config(&config)
    }

    /// Waits for every response to be served and returns the request lines.
    pub fn request_lines(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
