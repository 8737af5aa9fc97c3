//! Request supersession.
//!
//! Responses can arrive out of order when the user flips filters quickly.
//! Every issued request takes a token from `begin`; only a response whose
//! token is still current may update displayed state.

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, invalidating all earlier ones.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_request_supersedes_earlier() {
        let mut seq = RequestSeq::new();
        let a = seq.begin();
        let b = seq.begin();

        // B's response arrives first and is applied
        assert!(seq.is_current(b));
        // A's response arrives late and must be discarded
        assert!(!seq.is_current(a));
    }

    #[test]
    fn test_single_request_is_current() {
        let mut seq = RequestSeq::new();
        let token = seq.begin();
        assert!(seq.is_current(token));
    }
}
