use crate::line_stream::LineStream;
use crate::protocol::{ErrorReply, Protocol, Request, Response};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use xiangqi::engine::Engine;

/// Serves protocol requests against a single engine, one line at a time.
pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn respond(&mut self, line: &str) -> Response {
        let Some(request) = Protocol::decode_request(line) else {
            warn!("malformed request '{line}'");
            return Response::Error(ErrorReply::malformed(line));
        };

        debug!("request {request:?}");
        let result = match request {
            Request::New => Ok(self.engine.new_game()),
            Request::Moves { x, y } => return Response::Moves(self.engine.get_valid_moves(x, y)),
            Request::Play { from_x, from_y, to_x, to_y } => self.engine.make_move(from_x, from_y, to_x, to_y),
            Request::Undo => self.engine.undo_move(),
            Request::State => Ok(self.engine.game_state()),
        };

        match result {
            Ok(snapshot) => Response::State(snapshot),
            Err(err) => {
                debug!("request rejected: {err}");
                Response::Error(err.into())
            }
        }
    }

    /// Answers every request until the input ends. Returns how many requests
    /// were served.
    pub fn serve<R: BufRead, W: Write>(&mut self, stream: &mut LineStream<R, W>) -> Result<usize, Box<dyn std::error::Error>> {
        let mut served = 0;
        while let Some(line) = stream.read_line() {
            let response = self.respond(&line);
            stream.write_line(&Protocol::encode_response(&response)?)?;
            served += 1;
        }

        info!("input closed after {served} requests");
        Ok(served)
    }
}
