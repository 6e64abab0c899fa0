use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use chess_core::InputMessage;
use chess_protocol::text_codec::{format_output, parse_input_line};
use chess_protocol::{decode_output, encode_input, WireFormat};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Where to connect: env override or default.
    let addr = env::var("CHESS_CLIENT_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let format: WireFormat = match env::var("CHESS_CLIENT_FORMAT") {
        Ok(s) => s.parse()?,
        Err(_) => WireFormat::Json,
    };

    println!("Connecting to {} ({})...", addr, format);
    let stream = TcpStream::connect(&addr).await?;
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();
    println!("Connected.");
    println!("Type moves like:");
    println!("  e2e4");
    println!("  move e7 e8 q");
    println!("Press enter on an empty line to poll for updates.");
    println!("Type 'quit' or 'exit' to leave.\n");

    // Role and starting position arrive right away.
    drain_responses(&mut lines, format).await?;

    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let n = stdin.read_line(&mut line)?;
        if n == 0 {
            println!("\nEOF on stdin, exiting client.");
            break;
        }

        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            println!("Exiting client.");
            break;
        }

        if !trimmed.is_empty() {
            let input_msg: InputMessage = match parse_input_line(trimmed) {
                Ok(Some(m)) => m,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("Could not parse move: {}", e);
                    continue;
                }
            };

            let payload = encode_input(format, &input_msg)?;
            write_half.write_all(payload.as_bytes()).await?;
            write_half.write_all(b"\n").await?;
        }

        if !drain_responses(&mut lines, format).await? {
            println!("Server closed the connection.");
            break;
        }
    }

    Ok(())
}

/// Print every server line that arrives before a short quiet period.
///
/// Returns `false` once the server has closed the connection.
async fn drain_responses(
    lines: &mut tokio::io::Lines<BufReader<tokio::net::tcp::OwnedReadHalf>>,
    format: WireFormat,
) -> Result<bool, Box<dyn Error>> {
    loop {
        let line = match timeout(Duration::from_millis(150), lines.next_line()).await {
            Ok(Ok(Some(line))) => line,
            Ok(Ok(None)) => return Ok(false),
            Ok(Err(e)) => {
                eprintln!("Read error: {:?}", e);
                return Ok(false);
            }
            // Timed out waiting for the next line: done for this command.
            Err(_) => return Ok(true),
        };

        match decode_output(format, &line) {
            Ok(msg) => println!("<< {}", format_output(&msg)),
            Err(e) => eprintln!("<< (undecodable: {}) {}", e, line),
        }
    }
}
