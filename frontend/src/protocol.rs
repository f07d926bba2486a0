use serde::{Deserialize, Serialize};
use xiangqi::error::Error;
use xiangqi::snapshot::Snapshot;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Request {
    New,
    Moves { x: i32, y: i32 },
    Play { from_x: i32, from_y: i32, to_x: i32, to_y: i32 },
    Undo,
    State,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    State(Snapshot),
    Moves(Vec<(i32, i32)>),
    Error(ErrorReply),
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ErrorReply {
    pub kind: String,
    pub message: String,
}

impl ErrorReply {
    pub fn malformed(line: &str) -> Self {
        Self {
            kind: "Malformed".to_owned(),
            message: format!("could not parse request '{line}'"),
        }
    }
}

impl From<Error> for ErrorReply {
    fn from(err: Error) -> Self {
        Self {
            kind: err.kind().to_owned(),
            message: err.to_string(),
        }
    }
}

pub struct Protocol;

impl Protocol {
    fn decode(line: &str) -> (&str, impl Iterator<Item = &str>) {
        let mut parts = line.split_whitespace().fuse();
        (parts.next().unwrap_or(""), parts)
    }

    pub fn decode_request(line: &str) -> Option<Request> {
        let (kind, mut arguments) = Protocol::decode(line);
        let mut next = || arguments.next()?.parse::<i32>().ok();
        let request = match kind {
            "new" => Request::New,
            "moves" => Request::Moves { x: next()?, y: next()? },
            "play" => Request::Play {
                from_x: next()?,
                from_y: next()?,
                to_x: next()?,
                to_y: next()?,
            },
            "undo" => Request::Undo,
            "state" => Request::State,
            _ => return None,
        };

        match arguments.next() {
            None => Some(request),
            Some(_) => None,
        }
    }

    pub fn encode_request(request: &Request) -> String {
        match *request {
            Request::New => "new".to_owned(),
            Request::Moves { x, y } => format!("moves {x} {y}"),
            Request::Play { from_x, from_y, to_x, to_y } => format!("play {from_x} {from_y} {to_x} {to_y}"),
            Request::Undo => "undo".to_owned(),
            Request::State => "state".to_owned(),
        }
    }

    pub fn decode_response(line: &str) -> Option<Response> {
        serde_json::from_str(line).ok()
    }

    pub fn encode_response(response: &Response) -> serde_json::Result<String> {
        serde_json::to_string(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_requests() {
        assert_eq!(Protocol::decode_request("new"), Some(Request::New));
        assert_eq!(Protocol::decode_request("  undo  "), Some(Request::Undo));
        assert_eq!(Protocol::decode_request("state"), Some(Request::State));
        assert_eq!(Protocol::decode_request("moves 1 9"), Some(Request::Moves { x: 1, y: 9 }));
        assert_eq!(
            Protocol::decode_request("play 0 9 0 6"),
            Some(Request::Play {
                from_x: 0,
                from_y: 9,
                to_x: 0,
                to_y: 6
            })
        );
        assert_eq!(Protocol::decode_request("moves -1 3"), Some(Request::Moves { x: -1, y: 3 }));
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(Protocol::decode_request(""), None);
        assert_eq!(Protocol::decode_request("resign"), None);
        assert_eq!(Protocol::decode_request("moves 1"), None);
        assert_eq!(Protocol::decode_request("moves a b"), None);
        assert_eq!(Protocol::decode_request("play 0 9 0"), None);
        assert_eq!(Protocol::decode_request("undo now"), None);
    }

    #[test]
    fn test_encode_matches_decode() {
        let request = Request::Play {
            from_x: 7,
            from_y: 7,
            to_x: 4,
            to_y: 7,
        };
        let line = Protocol::encode_request(&request);
        assert_eq!(line, "play 7 7 4 7");
        assert_eq!(Protocol::decode_request(&line), Some(request));
    }

    #[test]
    fn test_encode_responses() {
        let moves = Response::Moves(vec![(0, 7), (2, 7)]);
        assert_eq!(Protocol::encode_response(&moves).unwrap(), r#"{"moves":[[0,7],[2,7]]}"#);

        let error = Response::Error(Error::NoHistory.into());
        assert_eq!(
            Protocol::encode_response(&error).unwrap(),
            r#"{"error":{"kind":"NoHistory","message":"there is no move to undo"}}"#
        );
    }

    #[test]
    fn test_decode_response_rejects_off_board_cells() {
        let line = r#"{"state":{"board":[],"current_turn":"Red","is_in_check":false,"is_ended":false,"winner":null,"history":[{"from":{"x":0,"y":9},"to":{"x":0,"y":12},"piece":{"kind":"Chariot","side":"Red"},"captured":null,"notation":""}]}}"#;
        assert_eq!(Protocol::decode_response(line), None);
        assert_eq!(Protocol::decode_response(&line.replace("12", "6")).map(|_| ()), Some(()));
    }
}
