use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use crate::data::dataset::Dataset;

pub mod api;
pub mod routes;
pub mod static_files;

/// Serve the viewer and its API. The dataset is loaded once by the caller; every
/// request recomputes its views from that snapshot.
pub fn run_server(bind_addr: &str, dataset: &Dataset) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("paddock server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, dataset) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, dataset: &Dataset) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(dataset, method, path).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
