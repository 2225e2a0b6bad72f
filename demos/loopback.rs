// demos/loopback.rs
//! Request/response over a loopback TCP connection with one shared buffer.
//!
//! Run with `RUST_LOG=debug cargo run --example loopback`.

use duplexbuf::prelude::*;
use log::info;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Frames `payload` with a 3-byte little-endian length and a sequence id.
fn frame(seq: u8, payload: &[u8]) -> Vec<u8> {
    let len = payload.len() as u32;
    let mut out = vec![len as u8, (len >> 8) as u8, (len >> 16) as u8, seq];
    out.extend_from_slice(payload);
    out
}

fn read_packet<R: Read>(buf: &mut StreamBuffer<R>, row: &mut RowBuffer) -> Result<()> {
    let header = buf.read_next(4)?;
    let len = header[0] as usize | (header[1] as usize) << 8 | (header[2] as usize) << 16;
    row.push_value(buf.read_next(len)?);
    Ok(())
}

/// Answers every query with three rows and closes the connection.
fn serve(listener: TcpListener) -> std::io::Result<()> {
    let (mut stream, _) = listener.accept()?;
    let mut request = StreamBuffer::new(stream.try_clone()?);

    let header = request.read_next(4)?;
    let len = header[0] as usize;
    let query = String::from_utf8_lossy(request.read_next(len)?).into_owned();
    info!("server received {:?}", query);

    let long_name = "x".repeat(9000);
    for (seq, name) in ["alice", "bob", long_name.as_str()].iter().enumerate() {
        stream.write_all(&frame(seq as u8 + 1, name.as_bytes()))?;
    }
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let server = thread::spawn(move || serve(listener));

    let mut stream = TcpStream::connect(addr)?;
    let mut buf = StreamBuffer::new(stream.try_clone()?);

    let query = b"SELECT name FROM users";
    buf.ensure_idle()?;
    let mut region = buf
        .take_small_buffer(4 + query.len())
        .ok_or("stream buffer busy")?;
    region[..4].copy_from_slice(&[query.len() as u8, 0, 0, 0]);
    region[4..].copy_from_slice(query);
    stream.write_all(&region.commit(4 + query.len())?)?;

    let mut row = recycle::acquire_row_buffer();
    loop {
        match read_packet(&mut buf, &mut row) {
            Ok(()) => {}
            Err(e) if e.is_end_of_input() => {
                row.mark_exhausted();
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    for i in 0..row.len() {
        let value = row.value(i).unwrap_or_default();
        info!("column {}: {} bytes", i, value.len());
    }
    println!(
        "received {} values, buffer capacity {} bytes",
        row.len(),
        buf.capacity()
    );
    recycle::release_row_buffer(row);

    server.join().map_err(|_| "server thread panicked")??;
    Ok(())
}
