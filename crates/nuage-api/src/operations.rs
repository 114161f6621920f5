// Generic entity verbs
//
// GET / CREATE / DELETE over raw bytes, each encoding the success status for
// its verb. Payloads are already-serialized JSON; callers own the typed
// encode/decode. DELETE drives a small bounded state machine because some
// entity kinds (enterprises) answer 300 and require a confirmation resend.

use bytes::Bytes;
use reqwest::Method;
use tracing::debug;

use crate::error::Error;
use crate::session::{Reply, Session};

/// Query parameter that confirms a destructive delete.
pub const DELETE_CONFIRMATION: (&str, &str) = ("responseChoice", "1");

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NO_CONTENT: u16 = 204;
const STATUS_MULTIPLE_CHOICES: u16 = 300;

/// States of a delete transaction.
///
/// `Requested` and `Confirmed` each issue exactly one DELETE, so the loop
/// that drives this machine performs at most two round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    /// Plain DELETE about to be (or just) sent.
    Requested,
    /// Controller asked for confirmation; resend with `responseChoice=1`.
    Confirmed,
    /// Terminal: the entity is gone.
    Deleted,
    /// Terminal: the controller answered with this status.
    Failed(u16),
}

impl DeleteState {
    /// Transition on the status of the DELETE issued in this state.
    pub fn advance(self, status: u16) -> Self {
        match (self, status) {
            (Self::Requested | Self::Confirmed, STATUS_NO_CONTENT) => Self::Deleted,
            (Self::Requested, STATUS_MULTIPLE_CHOICES) => Self::Confirmed,
            (Self::Requested | Self::Confirmed, code) => Self::Failed(code),
            (terminal, _) => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Deleted | Self::Failed(_))
    }
}

impl Session {
    /// GET `{api}/{path}`; success is 200. Returns the raw body.
    pub async fn get_entity(&self, path: &str) -> Result<Bytes, Error> {
        let url = self.api_url(path)?;
        let reply = self.execute(Method::GET, url, None).await?;
        expect_status(reply, STATUS_OK, "GET", path)
    }

    /// POST `payload` to `{api}/{collection}`; success is 201.
    pub async fn create_entity(&self, collection: &str, payload: &[u8]) -> Result<Bytes, Error> {
        let url = self.api_url(collection)?;
        let reply = self.execute(Method::POST, url, Some(payload)).await?;
        expect_status(reply, STATUS_CREATED, "CREATE", collection)
    }

    /// DELETE `{api}/{path}`, confirming once if the controller answers 300.
    ///
    /// A second 300 after confirmation is a failure, not another round.
    pub async fn delete_entity(&self, path: &str) -> Result<(), Error> {
        let url = self.api_url(path)?;
        let mut confirm_url = url.clone();
        confirm_url
            .query_pairs_mut()
            .append_pair(DELETE_CONFIRMATION.0, DELETE_CONFIRMATION.1);

        let mut state = DeleteState::Requested;
        let mut last_body = Bytes::new();

        while !state.is_terminal() {
            let target = if state == DeleteState::Confirmed {
                confirm_url.clone()
            } else {
                url.clone()
            };
            let reply = self.execute(Method::DELETE, target, None).await?;
            let next = state.advance(reply.status);
            debug!(path, status = reply.status, from = ?state, to = ?next, "DELETE");
            state = next;
            last_body = reply.body;
        }

        match state {
            DeleteState::Failed(code) => Err(Error::UnexpectedStatus {
                code,
                expected: STATUS_NO_CONTENT,
                body: String::from_utf8_lossy(&last_body).into_owned(),
            }),
            _ => Ok(()),
        }
    }
}

fn expect_status(reply: Reply, expected: u16, verb: &str, path: &str) -> Result<Bytes, Error> {
    if reply.status == expected {
        return Ok(reply.body);
    }
    debug!(verb, path, status = reply.status, expected, "unexpected HTTP status");
    Err(Error::UnexpectedStatus {
        code: reply.status,
        expected,
        body: String::from_utf8_lossy(&reply.body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_deletes_from_either_live_state() {
        assert_eq!(DeleteState::Requested.advance(204), DeleteState::Deleted);
        assert_eq!(DeleteState::Confirmed.advance(204), DeleteState::Deleted);
    }

    #[test]
    fn first_300_asks_for_confirmation() {
        assert_eq!(DeleteState::Requested.advance(300), DeleteState::Confirmed);
    }

    #[test]
    fn second_300_fails() {
        let state = DeleteState::Requested.advance(300).advance(300);
        assert_eq!(state, DeleteState::Failed(300));
        assert!(state.is_terminal());
    }

    #[test]
    fn other_statuses_fail_with_code() {
        assert_eq!(DeleteState::Requested.advance(404), DeleteState::Failed(404));
        assert_eq!(DeleteState::Confirmed.advance(409), DeleteState::Failed(409));
        assert_eq!(DeleteState::Requested.advance(200), DeleteState::Failed(200));
    }

    #[test]
    fn terminal_states_absorb() {
        assert_eq!(DeleteState::Deleted.advance(300), DeleteState::Deleted);
        assert_eq!(DeleteState::Failed(500).advance(204), DeleteState::Failed(500));
    }

    #[test]
    fn expect_status_passes_body_through() {
        let reply = Reply {
            status: 201,
            body: Bytes::from_static(b"[{}]"),
        };
        let body = expect_status(reply, 201, "CREATE", "enterprises");
        assert!(matches!(body, Ok(b) if b.as_ref() == b"[{}]"));

        let reply = Reply {
            status: 409,
            body: Bytes::from_static(b"conflict"),
        };
        match expect_status(reply, 201, "CREATE", "enterprises") {
            Err(Error::UnexpectedStatus { code, expected, body }) => {
                assert_eq!((code, expected), (409, 201));
                assert_eq!(body, "conflict");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
